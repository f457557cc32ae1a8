//! HTTP handlers for auth endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::info;

use crate::adapters::http::domain_error_response;
use crate::domain::foundation::DomainError;
use crate::ports::CustomerAuthenticator;

use super::dto::{LoginRequest, LoginResponse};

#[derive(Clone)]
pub struct AuthHandlers {
    authenticator: Arc<dyn CustomerAuthenticator>,
}

impl AuthHandlers {
    pub fn new(authenticator: Arc<dyn CustomerAuthenticator>) -> Self {
        Self { authenticator }
    }
}

/// POST /api/auth/login - verify a credential pair.
///
/// Any mismatch returns the same opaque 401; the response never says
/// which half of the pair failed.
pub async fn login(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<LoginRequest>,
) -> Response {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return domain_error_response(DomainError::validation(
            "Email and password are required",
        ));
    }

    match handlers
        .authenticator
        .authenticate(&req.email, &req.password)
        .await
    {
        Ok(Some(customer)) => {
            info!(customer_id = %customer.customer_id, "customer logged in");
            (StatusCode::OK, Json(LoginResponse { customer })).into_response()
        }
        Ok(None) => domain_error_response(DomainError::invalid_credentials()),
        Err(err) => domain_error_response(err.into()),
    }
}
