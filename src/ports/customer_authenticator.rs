//! Customer authentication port.
//!
//! Returns `None` for any credential mismatch: callers surface a single
//! opaque invalid-credentials failure with no distinction between an
//! unknown email and a wrong password, to avoid account enumeration. The
//! comparison mechanism behind this port is a placeholder, not a contract;
//! implementations are free to hash.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::CustomerId;

use super::DataAccessError;

/// Profile returned on successful authentication. Never includes the
/// password column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub customer_id: CustomerId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_type: Option<String>,
}

/// Port for verifying shopper credentials.
#[async_trait]
pub trait CustomerAuthenticator: Send + Sync {
    /// Verifies the credential pair, returning the profile on success and
    /// `None` on any mismatch.
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<CustomerProfile>, DataAccessError>;
}
