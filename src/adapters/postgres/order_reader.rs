//! PostgreSQL implementation of OrderReader.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{CustomerId, OrderId, OrderItemId};
use crate::ports::{DataAccessError, OrderLineView, OrderReader, OrderView};

/// PostgreSQL implementation of OrderReader.
#[derive(Clone)]
pub struct PostgresOrderReader {
    pool: PgPool,
}

impl PostgresOrderReader {
    /// Creates a new PostgresOrderReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn items_for_order(&self, order_id: OrderId) -> Result<Vec<OrderLineView>, DataAccessError> {
        let rows = sqlx::query(
            r#"
            SELECT oi.order_item_id, oi.quantity, oi.price,
                   p.name AS product_name, p.brand, p.category
            FROM order_items oi
            JOIN products p ON oi.product_id = p.product_id
            WHERE oi.order_id = $1
            "#,
        )
        .bind(order_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_line).collect()
    }
}

fn db_err(e: sqlx::Error) -> DataAccessError {
    DataAccessError::new(format!("Order query failed: {e}"))
}

fn row_to_line(row: &PgRow) -> Result<OrderLineView, DataAccessError> {
    Ok(OrderLineView {
        order_item_id: OrderItemId::new(
            row.try_get::<i64, _>("order_item_id").map_err(db_err)?,
        ),
        quantity: row.try_get("quantity").map_err(db_err)?,
        price: row.try_get("price").map_err(db_err)?,
        product_name: row.try_get("product_name").map_err(db_err)?,
        brand: row.try_get("brand").map_err(db_err)?,
        category: row.try_get("category").map_err(db_err)?,
    })
}

fn row_to_order(row: &PgRow) -> Result<OrderView, DataAccessError> {
    Ok(OrderView {
        order_id: OrderId::new(row.try_get::<i64, _>("order_id").map_err(db_err)?),
        order_date: row
            .try_get::<DateTime<Utc>, _>("order_date")
            .map_err(db_err)?,
        order_status: row.try_get("order_status").map_err(db_err)?,
        total_amount: row.try_get("total_amount").map_err(db_err)?,
        payment_mode: row.try_get("payment_mode").map_err(db_err)?,
        delivery_status: row.try_get("delivery_status").map_err(db_err)?,
        current_location: row.try_get("current_location").map_err(db_err)?,
        expected_delivery_date: row
            .try_get::<Option<NaiveDate>, _>("expected_delivery_date")
            .map_err(db_err)?,
        actual_delivery_date: row
            .try_get::<Option<NaiveDate>, _>("actual_delivery_date")
            .map_err(db_err)?,
        items: Vec::new(),
    })
}

#[async_trait]
impl OrderReader for PostgresOrderReader {
    async fn orders_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<OrderView>, DataAccessError> {
        let rows = sqlx::query(
            r#"
            SELECT o.order_id, o.order_date, o.order_status, o.total_amount,
                   o.payment_mode,
                   d.delivery_status, d.current_location,
                   d.expected_delivery_date, d.actual_delivery_date
            FROM orders o
            LEFT JOIN deliveries d ON o.order_id = d.order_id
            WHERE o.customer_id = $1
            ORDER BY o.order_date DESC
            "#,
        )
        .bind(customer_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let mut orders = rows
            .iter()
            .map(row_to_order)
            .collect::<Result<Vec<_>, _>>()?;

        for order in &mut orders {
            order.items = self.items_for_order(order.order_id).await?;
        }

        Ok(orders)
    }
}
