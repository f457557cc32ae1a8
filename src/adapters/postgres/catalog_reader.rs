//! PostgreSQL implementation of CatalogReader.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::catalog::{
    Product, PurchasedCategory, Suggestion, HISTORY_PAIR_LIMIT, SUGGESTION_LIMIT,
};
use crate::domain::foundation::{CustomerId, ProductId};
use crate::ports::{CatalogReader, DataAccessError};

/// PostgreSQL implementation of CatalogReader.
#[derive(Clone)]
pub struct PostgresCatalogReader {
    pool: PgPool,
}

impl PostgresCatalogReader {
    /// Creates a new PostgresCatalogReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PRODUCT_COLUMNS: &str = "product_id, name, brand, category, price, description";

fn row_to_product(row: &PgRow) -> Result<Product, DataAccessError> {
    Ok(Product {
        product_id: ProductId::new(
            row.try_get::<i64, _>("product_id").map_err(db_err)?,
        ),
        name: row.try_get("name").map_err(db_err)?,
        brand: row.try_get("brand").map_err(db_err)?,
        category: row.try_get("category").map_err(db_err)?,
        price: row.try_get("price").map_err(db_err)?,
        description: row.try_get("description").map_err(db_err)?,
    })
}

fn db_err(e: sqlx::Error) -> DataAccessError {
    DataAccessError::new(format!("Catalog query failed: {e}"))
}

#[async_trait]
impl CatalogReader for PostgresCatalogReader {
    async fn purchased_categories(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<PurchasedCategory>, DataAccessError> {
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT p.category, p.brand
            FROM orders o
            JOIN order_items oi ON o.order_id = oi.order_id
            JOIN products p ON oi.product_id = p.product_id
            WHERE o.customer_id = $1
            LIMIT $2
            "#,
        )
        .bind(customer_id.value())
        .bind(HISTORY_PAIR_LIMIT as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter()
            .map(|row| {
                Ok(PurchasedCategory {
                    category: row.try_get("category").map_err(db_err)?,
                    brand: row.try_get("brand").map_err(db_err)?,
                })
            })
            .collect()
    }

    async fn candidates_excluding_purchased(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Product>, DataAccessError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE product_id NOT IN (
                SELECT oi.product_id
                FROM order_items oi
                JOIN orders o ON oi.order_id = o.order_id
                WHERE o.customer_id = $1
            )
            "#
        ))
        .bind(customer_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_product).collect()
    }

    async fn random_products(&self, limit: usize) -> Result<Vec<Product>, DataAccessError> {
        let rows = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY random() LIMIT $1"
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_product).collect()
    }

    async fn search(&self, term: &str) -> Result<Vec<Product>, DataAccessError> {
        let pattern = format!("%{term}%");
        let rows = sqlx::query(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE name ILIKE $1 OR brand ILIKE $1 OR category ILIKE $1
            ORDER BY product_id ASC
            "#
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_product).collect()
    }

    async fn list_all(&self) -> Result<Vec<Product>, DataAccessError> {
        let rows = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY product_id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_product).collect()
    }

    async fn suggestions(&self, term: &str) -> Result<Vec<Suggestion>, DataAccessError> {
        let pattern = format!("%{term}%");
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT name, brand
            FROM products
            WHERE name ILIKE $1 OR brand ILIKE $1
            ORDER BY name ASC
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(SUGGESTION_LIMIT as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter()
            .map(|row| {
                Ok(Suggestion {
                    name: row.try_get("name").map_err(db_err)?,
                    brand: row.try_get("brand").map_err(db_err)?,
                })
            })
            .collect()
    }
}
