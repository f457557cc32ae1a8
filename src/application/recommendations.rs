//! Product browse and recommendation service.
//!
//! The browse surface resolves one of four read paths in fixed precedence:
//! suggestions (when both the suggestion flag and a search term are set),
//! then search, then personalized recommendations, then the full catalog.

use std::collections::HashSet;
use std::sync::Arc;

use rand::thread_rng;
use tracing::debug;

use crate::domain::catalog::{
    backfill, backfill_shortfall, rank_candidates, Product, Suggestion, RECOMMENDATION_LIMIT,
};
use crate::domain::foundation::{CustomerId, DomainError};
use crate::ports::CatalogReader;

/// Outcome of a browse request; suggestions carry a different shape than
/// product rows.
#[derive(Debug, Clone)]
pub enum BrowseOutcome {
    Products(Vec<Product>),
    Suggestions(Vec<Suggestion>),
}

/// Catalog browsing and personalized recommendations over a [`CatalogReader`].
pub struct ProductBrowseService {
    catalog: Arc<dyn CatalogReader>,
}

impl ProductBrowseService {
    /// Creates a new ProductBrowseService.
    pub fn new(catalog: Arc<dyn CatalogReader>) -> Self {
        Self { catalog }
    }

    /// Resolves a browse request according to the parameter precedence.
    pub async fn browse(
        &self,
        search: Option<&str>,
        recommendations_for: Option<CustomerId>,
        want_suggestions: bool,
    ) -> Result<BrowseOutcome, DomainError> {
        match (search, recommendations_for) {
            (Some(term), _) if want_suggestions => {
                Ok(BrowseOutcome::Suggestions(self.catalog.suggestions(term).await?))
            }
            (Some(term), _) => Ok(BrowseOutcome::Products(self.catalog.search(term).await?)),
            (None, Some(customer_id)) => {
                Ok(BrowseOutcome::Products(self.recommend(customer_id).await?))
            }
            (None, None) => Ok(BrowseOutcome::Products(self.catalog.list_all().await?)),
        }
    }

    /// Personalized recommendations for a customer.
    ///
    /// Customers with no purchase history get a purely random sample. For
    /// everyone else: rank unpurchased candidates by category relevance,
    /// then top up any shortfall with random products (which may include
    /// already-purchased ones).
    pub async fn recommend(&self, customer_id: CustomerId) -> Result<Vec<Product>, DomainError> {
        let history = self.catalog.purchased_categories(customer_id).await?;
        if history.is_empty() {
            debug!(%customer_id, "no purchase history, sampling catalog");
            return Ok(self.catalog.random_products(RECOMMENDATION_LIMIT).await?);
        }

        let purchased: HashSet<String> = history.into_iter().map(|p| p.category).collect();
        let candidates = self.catalog.candidates_excluding_purchased(customer_id).await?;
        let ranked = rank_candidates(candidates, &purchased, &mut thread_rng());

        let shortfall = backfill_shortfall(&ranked);
        if shortfall == 0 {
            return Ok(ranked);
        }
        debug!(%customer_id, shortfall, "backfilling recommendations");
        let supply = self.catalog.random_products(shortfall).await?;
        Ok(backfill(ranked, supply, &mut thread_rng()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::PurchasedCategory;
    use crate::domain::foundation::ProductId;
    use crate::ports::DataAccessError;
    use async_trait::async_trait;

    /// Fixed-catalog reader: candidate exclusion and search are computed
    /// in memory, random sampling returns rows in stored order.
    struct FixtureCatalog {
        products: Vec<Product>,
        history: Vec<PurchasedCategory>,
        purchased_ids: Vec<i64>,
    }

    fn product(id: i64, name: &str, brand: &str, category: &str) -> Product {
        Product {
            product_id: ProductId::new(id),
            name: name.to_string(),
            brand: brand.to_string(),
            category: category.to_string(),
            price: 49.0,
            description: None,
        }
    }

    #[async_trait]
    impl CatalogReader for FixtureCatalog {
        async fn purchased_categories(
            &self,
            _customer_id: CustomerId,
        ) -> Result<Vec<PurchasedCategory>, DataAccessError> {
            Ok(self.history.clone())
        }

        async fn candidates_excluding_purchased(
            &self,
            _customer_id: CustomerId,
        ) -> Result<Vec<Product>, DataAccessError> {
            Ok(self
                .products
                .iter()
                .filter(|p| !self.purchased_ids.contains(&p.product_id.value()))
                .cloned()
                .collect())
        }

        async fn random_products(&self, limit: usize) -> Result<Vec<Product>, DataAccessError> {
            Ok(self.products.iter().take(limit).cloned().collect())
        }

        async fn search(&self, term: &str) -> Result<Vec<Product>, DataAccessError> {
            let needle = term.to_lowercase();
            Ok(self
                .products
                .iter()
                .filter(|p| {
                    p.name.to_lowercase().contains(&needle)
                        || p.brand.to_lowercase().contains(&needle)
                        || p.category.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect())
        }

        async fn list_all(&self) -> Result<Vec<Product>, DataAccessError> {
            Ok(self.products.clone())
        }

        async fn suggestions(&self, term: &str) -> Result<Vec<Suggestion>, DataAccessError> {
            let needle = term.to_lowercase();
            Ok(self
                .products
                .iter()
                .filter(|p| p.name.to_lowercase().contains(&needle))
                .map(|p| Suggestion {
                    name: p.name.clone(),
                    brand: p.brand.clone(),
                })
                .collect())
        }
    }

    fn service(catalog: FixtureCatalog) -> ProductBrowseService {
        ProductBrowseService::new(Arc::new(catalog))
    }

    fn shoe_shopper_catalog() -> FixtureCatalog {
        let mut products = vec![
            product(1, "Trail Runner", "Stride", "Shoes"),
            product(2, "Court Classic", "Stride", "Shoes"),
            product(3, "City Walker", "Pace", "Shoes"),
        ];
        for id in 4..=14 {
            products.push(product(id, &format!("Gadget {id}"), "Volt", "Electronics"));
        }
        FixtureCatalog {
            products,
            history: vec![PurchasedCategory {
                category: "Shoes".to_string(),
                brand: "Stride".to_string(),
            }],
            purchased_ids: vec![14],
        }
    }

    #[tokio::test]
    async fn shoe_buyer_sees_shoes_first_in_a_full_set() {
        let svc = service(shoe_shopper_catalog());

        let result = svc.recommend(CustomerId::new(1)).await.unwrap();

        assert_eq!(result.len(), RECOMMENDATION_LIMIT);
        assert!(result[..3].iter().all(|p| p.category == "Shoes"));
        assert!(result[3..].iter().all(|p| p.category == "Electronics"));
    }

    #[tokio::test]
    async fn purchased_products_are_excluded_from_ranked_results() {
        let svc = service(shoe_shopper_catalog());

        let result = svc.recommend(CustomerId::new(1)).await.unwrap();

        // Product 14 was purchased; the candidate pool is still large enough
        // that no backfill runs, so it cannot appear.
        assert!(result.iter().all(|p| p.product_id.value() != 14));
    }

    #[tokio::test]
    async fn no_history_falls_back_to_random_sample() {
        let catalog = FixtureCatalog {
            products: (1..=8).map(|i| product(i, &format!("P{i}"), "B", "Misc")).collect(),
            history: Vec::new(),
            purchased_ids: Vec::new(),
        };
        let svc = service(catalog);

        let result = svc.recommend(CustomerId::new(2)).await.unwrap();

        assert_eq!(result.len(), RECOMMENDATION_LIMIT);
    }

    #[tokio::test]
    async fn sparse_catalog_backfills_toward_six() {
        let catalog = FixtureCatalog {
            products: vec![
                product(1, "Trail Runner", "Stride", "Shoes"),
                product(2, "Gadget", "Volt", "Electronics"),
                product(3, "Novel", "Press", "Books"),
            ],
            history: vec![PurchasedCategory {
                category: "Shoes".to_string(),
                brand: "Stride".to_string(),
            }],
            purchased_ids: vec![2],
        };
        let svc = service(catalog);

        let result = svc.recommend(CustomerId::new(3)).await.unwrap();

        // Two candidates survive exclusion; backfill adds what the sampler
        // offers for the shortfall (which may repeat purchased rows).
        assert!(result.len() > 2);
        assert_eq!(result[0].category, "Shoes");
    }

    #[tokio::test]
    async fn search_takes_precedence_over_recommendations() {
        let svc = service(shoe_shopper_catalog());

        let outcome = svc
            .browse(Some("gadget"), Some(CustomerId::new(1)), false)
            .await
            .unwrap();

        match outcome {
            BrowseOutcome::Products(products) => {
                assert!(!products.is_empty());
                assert!(products.iter().all(|p| p.name.starts_with("Gadget")));
            }
            BrowseOutcome::Suggestions(_) => panic!("expected products"),
        }
    }

    #[tokio::test]
    async fn suggestion_flag_needs_a_term() {
        let svc = service(shoe_shopper_catalog());

        // Flag without a term falls through to the catalog listing.
        let outcome = svc.browse(None, None, true).await.unwrap();
        match outcome {
            BrowseOutcome::Products(products) => assert_eq!(products.len(), 14),
            BrowseOutcome::Suggestions(_) => panic!("expected products"),
        }

        let outcome = svc.browse(Some("walker"), None, true).await.unwrap();
        match outcome {
            BrowseOutcome::Suggestions(suggestions) => {
                assert_eq!(suggestions.len(), 1);
                assert_eq!(suggestions[0].name, "City Walker");
            }
            BrowseOutcome::Products(_) => panic!("expected suggestions"),
        }
    }
}
