//! HTTP routes for auth endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{login, AuthHandlers};

/// Creates the auth router.
pub fn auth_routes(handlers: AuthHandlers) -> Router {
    Router::new()
        .route("/login", post(login))
        .with_state(handlers)
}
