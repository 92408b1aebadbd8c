//! Order history models.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    cart::models::{CartLine, ItemId},
    money::Price,
};

/// Fulfilment status of an order, as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Received, not yet confirmed.
    Pending,

    /// Confirmed by the restaurant.
    Confirmed,

    /// Being prepared.
    Preparing,

    /// On its way.
    OutForDelivery,

    /// Delivered.
    Delivered,

    /// Cancelled.
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::OutForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        };

        f.write_str(label)
    }
}

/// One line of a submitted or historical order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product id.
    #[serde(rename = "menuItemId")]
    pub menu_item_id: ItemId,

    /// Display name at order time.
    pub name: String,

    /// Unit price at order time.
    pub price: Price,

    /// Quantity ordered.
    pub quantity: u32,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        OrderLine {
            menu_item_id: line.id.clone(),
            name: line.name.clone(),
            price: line.unit_price,
            quantity: line.quantity,
        }
    }
}

/// An order as returned by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    /// Server-assigned order id.
    #[serde(alias = "_id")]
    pub id: ItemId,

    /// Human-facing order number, e.g. `"#12345"`.
    #[serde(rename = "orderNumber", default)]
    pub order_number: Option<String>,

    /// Current fulfilment status.
    pub status: OrderStatus,

    /// Line items.
    pub items: Vec<OrderLine>,

    /// Sum of line totals.
    pub subtotal: Price,

    /// Sales tax charged.
    #[serde(default)]
    pub tax: Price,

    /// Delivery fee charged.
    #[serde(rename = "deliveryFee", default)]
    pub delivery_fee: Price,

    /// Grand total.
    pub total: Price,

    /// When the order was placed.
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_parses_backend_shape() {
        let json = r##"{
            "_id": "ord_1",
            "orderNumber": "#12345",
            "status": "out_for_delivery",
            "items": [{"menuItemId": 1, "name": "Cheeseburger", "price": 8.99, "quantity": 1}],
            "subtotal": 8.99,
            "tax": 0.72,
            "deliveryFee": 0,
            "total": 9.71,
            "createdAt": "2026-08-01T12:30:00Z"
        }"##;

        let order: Order = serde_json::from_str(json).expect("order should parse");

        assert_eq!(order.id, ItemId::new("ord_1"));
        assert_eq!(order.status, OrderStatus::OutForDelivery);
        assert_eq!(order.total, Price::from_cents(971));
        assert!(order.created_at.is_some());
    }

    #[test]
    fn order_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": "ord_2",
            "status": "pending",
            "items": [],
            "subtotal": 0,
            "total": 0
        }"#;

        let order: Order = serde_json::from_str(json).expect("sparse order should parse");

        assert!(order.order_number.is_none());
        assert_eq!(order.tax, Price::ZERO);
        assert!(order.created_at.is_none());
    }

    #[test]
    fn status_labels_match_ui_badges() {
        assert_eq!(OrderStatus::OutForDelivery.to_string(), "Out for Delivery");
        assert_eq!(OrderStatus::Pending.to_string(), "Pending");
    }

    #[test]
    fn order_line_from_cart_line_keeps_snapshot() {
        let line = CartLine {
            id: ItemId::from(4),
            name: "Spicy Tacos".to_string(),
            unit_price: Price::from_cents(799),
            quantity: 2,
            image_url: String::new(),
            category: "Tacos".to_string(),
        };

        let order_line = OrderLine::from(&line);

        assert_eq!(order_line.menu_item_id, ItemId::from(4));
        assert_eq!(order_line.price, Price::from_cents(799));
        assert_eq!(order_line.quantity, 2);
    }
}
