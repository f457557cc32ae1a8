//! HTTP handlers for catalog endpoints.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::adapters::http::domain_error_response;
use crate::application::{BrowseOutcome, ProductBrowseService};
use crate::domain::foundation::CustomerId;

use super::dto::ProductQuery;

#[derive(Clone)]
pub struct CatalogHandlers {
    browse: Arc<ProductBrowseService>,
}

impl CatalogHandlers {
    pub fn new(browse: Arc<ProductBrowseService>) -> Self {
        Self { browse }
    }
}

/// GET /api/products - list, search, suggest, or recommend.
pub async fn browse_products(
    State(handlers): State<CatalogHandlers>,
    Query(query): Query<ProductQuery>,
) -> Response {
    let customer = query.recommendations_for.map(CustomerId::new);
    let outcome = handlers
        .browse
        .browse(query.search_term(), customer, query.wants_suggestions())
        .await;

    match outcome {
        Ok(BrowseOutcome::Products(products)) => {
            (StatusCode::OK, Json(products)).into_response()
        }
        Ok(BrowseOutcome::Suggestions(suggestions)) => {
            (StatusCode::OK, Json(suggestions)).into_response()
        }
        Err(err) => domain_error_response(err),
    }
}
