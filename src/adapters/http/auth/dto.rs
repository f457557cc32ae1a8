//! Request/response types for auth endpoints.

use serde::{Deserialize, Serialize};

use crate::ports::CustomerProfile;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub customer: CustomerProfile,
}
