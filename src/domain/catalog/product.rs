//! Catalog product records.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ProductId;

/// A row from the product catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A distinct (name, brand) pair for search-as-you-type suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub brand: String,
}

/// A distinct (category, brand) pair from a customer's purchase history.
///
/// Only the category participates in relevance boosting; the brand is
/// carried because the history query has always produced both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PurchasedCategory {
    pub category: String,
    pub brand: String,
}
