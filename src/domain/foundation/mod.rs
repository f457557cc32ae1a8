//! Foundation types shared across domain modules.

mod errors;
mod ids;

pub use errors::{DomainError, ErrorCode};
pub use ids::{ChatSessionId, CustomerId, OrderId, OrderItemId, ProductId};
