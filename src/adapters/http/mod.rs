//! HTTP adapters - REST API implementations.
//!
//! Each API area (auth, catalog, orders, chat) has its own dto/handlers/
//! routes triple; this module carries the shared error envelope and the
//! composed router.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};

pub mod auth;
pub mod catalog;
pub mod chat;
pub mod orders;

pub use auth::AuthHandlers;
pub use catalog::CatalogHandlers;
pub use chat::ChatHandlers;
pub use orders::OrderHandlers;

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: &ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// Maps a [`DomainError`] onto the API status-code contract.
pub(crate) fn domain_error_response(error: DomainError) -> Response {
    let status = match error.code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ErrorCode::SessionNotFound => StatusCode::NOT_FOUND,
        ErrorCode::SessionBusy => StatusCode::CONFLICT,
        ErrorCode::AgentUnavailable | ErrorCode::StorageFailed => StatusCode::BAD_GATEWAY,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = ErrorResponse::new(&error.code, error.message);
    (status, Json(body)).into_response()
}

async fn health() -> Response {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))).into_response()
}

/// Composes the full API router from the per-area routers.
pub fn api_router(
    auth: AuthHandlers,
    catalog: CatalogHandlers,
    orders: OrderHandlers,
    chat: ChatHandlers,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth::auth_routes(auth))
        .nest("/api/products", catalog::catalog_routes(catalog))
        .nest("/api/orders", orders::order_routes(orders))
        .nest("/api/chat", chat::chat_routes(chat))
}
