//! Catalog reader port - read-only queries backing recommendations,
//! search, and suggestions.
//!
//! All queries are stateless with no cross-request caching; randomized
//! sampling queries may return different rows on every call.

use async_trait::async_trait;

use crate::domain::catalog::{Product, PurchasedCategory, Suggestion};
use crate::domain::foundation::CustomerId;

use super::DataAccessError;

/// Port for catalog and purchase-history reads.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// Distinct (category, brand) pairs from the customer's past orders,
    /// capped at [`crate::domain::catalog::HISTORY_PAIR_LIMIT`]. Empty when
    /// the customer has no purchase history.
    async fn purchased_categories(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<PurchasedCategory>, DataAccessError>;

    /// Candidate products for recommendation: the catalog minus every
    /// product the customer has already purchased.
    async fn candidates_excluding_purchased(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Product>, DataAccessError>;

    /// Up to `limit` catalog products in randomized order, no filtering.
    async fn random_products(&self, limit: usize) -> Result<Vec<Product>, DataAccessError>;

    /// Case-insensitive substring search over name, brand, and category,
    /// ordered by product id ascending.
    async fn search(&self, term: &str) -> Result<Vec<Product>, DataAccessError>;

    /// The full catalog, ordered by product id ascending.
    async fn list_all(&self) -> Result<Vec<Product>, DataAccessError>;

    /// Distinct (name, brand) pairs matching a substring, alphabetical by
    /// name, capped at [`crate::domain::catalog::SUGGESTION_LIMIT`].
    async fn suggestions(&self, term: &str) -> Result<Vec<Suggestion>, DataAccessError>;
}
