//! PostgreSQL implementation of CustomerAuthenticator.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::CustomerId;
use crate::ports::{CustomerAuthenticator, CustomerProfile, DataAccessError};

/// PostgreSQL implementation of CustomerAuthenticator.
///
/// The credential check is a direct equality comparison against the stored
/// password column, preserved from the legacy schema. The port contract
/// deliberately hides which half of the pair failed; swap this adapter for
/// a hashing one without touching callers.
#[derive(Clone)]
pub struct PostgresCustomerAuthenticator {
    pool: PgPool,
}

impl PostgresCustomerAuthenticator {
    /// Creates a new PostgresCustomerAuthenticator.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerAuthenticator for PostgresCustomerAuthenticator {
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<CustomerProfile>, DataAccessError> {
        let row = sqlx::query(
            r#"
            SELECT customer_id, name, email, phone, city, state, customer_type
            FROM customers
            WHERE email = $1 AND password = $2
            "#,
        )
        .bind(email)
        .bind(password)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DataAccessError::new(format!("Customer lookup failed: {e}")))?;

        row.map(|row| {
            Ok(CustomerProfile {
                customer_id: CustomerId::new(
                    row.try_get::<i64, _>("customer_id")
                        .map_err(|e| DataAccessError::new(format!("Bad customer row: {e}")))?,
                ),
                name: row
                    .try_get("name")
                    .map_err(|e| DataAccessError::new(format!("Bad customer row: {e}")))?,
                email: row
                    .try_get("email")
                    .map_err(|e| DataAccessError::new(format!("Bad customer row: {e}")))?,
                phone: row
                    .try_get("phone")
                    .map_err(|e| DataAccessError::new(format!("Bad customer row: {e}")))?,
                city: row
                    .try_get("city")
                    .map_err(|e| DataAccessError::new(format!("Bad customer row: {e}")))?,
                state: row
                    .try_get("state")
                    .map_err(|e| DataAccessError::new(format!("Bad customer row: {e}")))?,
                customer_type: row
                    .try_get("customer_type")
                    .map_err(|e| DataAccessError::new(format!("Bad customer row: {e}")))?,
            })
        })
        .transpose()
    }
}
