//! Request types for order endpoints.

use serde::Deserialize;

/// Query parameters for GET /api/orders.
#[derive(Debug, Deserialize)]
pub struct OrderQuery {
    pub customer_id: Option<i64>,
}
