//! HTTP handlers for order endpoints.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::adapters::http::domain_error_response;
use crate::domain::foundation::{CustomerId, DomainError};
use crate::ports::OrderReader;

use super::dto::OrderQuery;

#[derive(Clone)]
pub struct OrderHandlers {
    orders: Arc<dyn OrderReader>,
}

impl OrderHandlers {
    pub fn new(orders: Arc<dyn OrderReader>) -> Self {
        Self { orders }
    }
}

/// GET /api/orders?customer_id= - order history with delivery status.
pub async fn list_orders(
    State(handlers): State<OrderHandlers>,
    Query(query): Query<OrderQuery>,
) -> Response {
    let customer_id = match query.customer_id {
        Some(id) => CustomerId::new(id),
        None => {
            return domain_error_response(DomainError::validation(
                "customer_id query parameter is required",
            ))
        }
    };

    match handlers.orders.orders_for_customer(customer_id).await {
        Ok(orders) => (StatusCode::OK, Json(orders)).into_response(),
        Err(err) => domain_error_response(err.into()),
    }
}
