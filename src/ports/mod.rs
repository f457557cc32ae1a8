//! Ports - interfaces to external collaborators.
//!
//! Adapters implement these traits; the application layer depends only on
//! the traits.

mod agent_gateway;
mod attachment_store;
mod catalog_reader;
mod customer_authenticator;
mod data_access;
mod order_reader;

pub use agent_gateway::{AgentGateway, AgentGatewayError};
pub use attachment_store::{
    generate_object_name, sanitize_filename, AttachmentLocator, AttachmentStore,
    AttachmentStoreError,
};
pub use catalog_reader::CatalogReader;
pub use customer_authenticator::{CustomerAuthenticator, CustomerProfile};
pub use data_access::DataAccessError;
pub use order_reader::{OrderLineView, OrderReader, OrderView};
