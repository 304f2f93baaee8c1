use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_core::repository::CacheableEntity;

/// Identity of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub quantity: u64,
    pub price: f64,
}

impl ShopItem {
    pub fn new(title: impl Into<String>, quantity: u64, price: f64) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            quantity,
            price,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// A submitted order as stored and cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub account_email: String,
    pub delivery_address: String,
    pub delivery_time: DateTime<Utc>,
    pub shop_items: Vec<ShopItem>,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(
        account_email: impl Into<String>,
        delivery_address: impl Into<String>,
        delivery_time: DateTime<Utc>,
        shop_items: Vec<ShopItem>,
    ) -> Self {
        let total_price = shop_items.iter().map(ShopItem::line_total).sum();
        Self {
            id: OrderId::new(),
            account_email: account_email.into(),
            delivery_address: delivery_address.into(),
            delivery_time,
            shop_items,
            total_price,
            created_at: Utc::now(),
        }
    }
}

impl CacheableEntity for Order {
    type Id = OrderId;
    const ENTITY_TYPE: &'static str = "order";

    fn id(&self) -> &OrderId {
        &self.id
    }
}

/// Request payload for creating an order.
#[derive(Debug, Deserialize)]
pub struct CreateOrderPayload {
    pub account_email: String,
    pub delivery_address: String,
    /// Defaults to the time the order is received.
    #[serde(default)]
    pub delivery_time: Option<DateTime<Utc>>,
    pub shop_items: Vec<ShopItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_price_sums_line_totals() {
        let order = Order::new(
            "jane@example.com",
            "1 Main St",
            Utc::now(),
            vec![ShopItem::new("Widget", 2, 10.0), ShopItem::new("Gadget", 1, 5.5)],
        );

        assert_eq!(order.total_price, 25.5);
    }

    #[test]
    fn test_order_cache_key() {
        let order = Order::new("jane@example.com", "1 Main St", Utc::now(), Vec::new());

        assert_eq!(Order::cache_key(&order.id), format!("order:{}", order.id));
    }

    #[test]
    fn test_shop_item_description_defaults_to_empty() {
        let item: ShopItem =
            serde_json::from_str(r#"{"title": "Widget", "quantity": 1, "price": 2.0}"#).unwrap();

        assert_eq!(item, ShopItem::new("Widget", 1, 2.0));
    }
}
