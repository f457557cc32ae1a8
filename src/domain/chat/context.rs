//! Context metadata carried by a conversation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CustomerId, OrderId, OrderItemId};

/// Identifiers supplied when a conversation is opened.
///
/// Used to build the structured payload for the first refund/complaint turn
/// so the shopper never has to repeat order identifiers in free text. Never
/// mutated after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_item_id: Option<OrderItemId>,
}

impl ContextMetadata {
    /// Metadata for a refund/complaint opened from an order line.
    pub fn for_order_item(
        customer_id: CustomerId,
        order_id: OrderId,
        order_item_id: OrderItemId,
    ) -> Self {
        Self {
            customer_id: Some(customer_id),
            order_id: Some(order_id),
            order_item_id: Some(order_item_id),
        }
    }

    fn field(value: Option<impl ToString>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    /// Renders the customer id for payload templates ("" when absent).
    pub fn customer_field(&self) -> String {
        Self::field(self.customer_id)
    }

    /// Renders the order id for payload templates ("" when absent).
    pub fn order_field(&self) -> String {
        Self::field(self.order_id)
    }

    /// Renders the order item id for payload templates ("" when absent).
    pub fn order_item_field(&self) -> String {
        Self::field(self.order_item_id)
    }
}
