//! HTTP routes for catalog endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{browse_products, CatalogHandlers};

/// Creates the catalog router.
pub fn catalog_routes(handlers: CatalogHandlers) -> Router {
    Router::new()
        .route("/", get(browse_products))
        .with_state(handlers)
}
