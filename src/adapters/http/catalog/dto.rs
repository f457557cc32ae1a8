//! Request types for catalog endpoints.
//!
//! Product and suggestion rows serialize straight from the domain types;
//! only the query side needs a dedicated shape here.

use serde::Deserialize;

/// Query parameters for GET /api/products.
///
/// Precedence when several are present: `type=suggestions` with a search
/// term, then search, then recommendations, then the full listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub recommendations_for: Option<i64>,
    #[serde(rename = "type")]
    pub result_type: Option<String>,
}

impl ProductQuery {
    pub fn wants_suggestions(&self) -> bool {
        self.result_type.as_deref() == Some("suggestions")
    }

    /// Search term with surrounding whitespace removed; empty terms count
    /// as absent.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}
