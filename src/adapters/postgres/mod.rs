//! PostgreSQL adapters for the read-only data-access ports.

mod catalog_reader;
mod customer_authenticator;
mod order_reader;

pub use catalog_reader::PostgresCatalogReader;
pub use customer_authenticator::PostgresCustomerAuthenticator;
pub use order_reader::PostgresOrderReader;
