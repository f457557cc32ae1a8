//! HTTP adapter for order history.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::OrderHandlers;
pub use routes::order_routes;
