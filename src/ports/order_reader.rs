//! Order reader port - order history enriched with delivery status.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CustomerId, OrderId, OrderItemId};

use super::DataAccessError;

/// A line item within an order, joined with its product details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineView {
    pub order_item_id: OrderItemId,
    pub quantity: i32,
    pub price: f64,
    pub product_name: String,
    pub brand: String,
    pub category: String,
}

/// An order enriched with its most recent delivery status and line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderView {
    pub order_id: OrderId,
    pub order_date: DateTime<Utc>,
    pub order_status: String,
    pub total_amount: f64,
    pub payment_mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_delivery_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_delivery_date: Option<NaiveDate>,
    pub items: Vec<OrderLineView>,
}

/// Port for order history reads.
#[async_trait]
pub trait OrderReader: Send + Sync {
    /// All orders for the customer, most recent first, each with its latest
    /// delivery status and line items.
    async fn orders_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<OrderView>, DataAccessError>;
}
