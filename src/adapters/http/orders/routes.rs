//! HTTP routes for order endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{list_orders, OrderHandlers};

/// Creates the orders router.
pub fn order_routes(handlers: OrderHandlers) -> Router {
    Router::new()
        .route("/", get(list_orders))
        .with_state(handlers)
}
