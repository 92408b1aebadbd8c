//! Wire records for the storefront REST API.
//!
//! Field names follow the backend's camelCase JSON; ids additionally accept
//! the `_id` key the document store leaks through on some endpoints.

use serde::{Deserialize, Serialize};

use crate::{
    cart::models::{CartLine, ItemId, flexible_id},
    checkout::ShippingInfo,
    money::Price,
    orders::OrderLine,
};

/// Server-assigned id of a remote cart entry.
///
/// Distinct from the product id; the product-to-entry mapping is resolved by
/// fetching the remote cart and matching on product id, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(#[serde(deserialize_with = "flexible_id")] String);

impl EntryId {
    /// Wraps a raw entry id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        EntryId(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A catalog menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Product id.
    #[serde(alias = "_id")]
    pub id: ItemId,

    /// Display name.
    pub name: String,

    /// Current catalog price.
    pub price: Price,

    /// Image URL, possibly relative to the API host.
    #[serde(default)]
    pub image: String,

    /// Category name.
    pub category: String,

    /// Optional long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MenuItem {
    /// Builds the add-time snapshot line for this item with quantity 1.
    #[must_use]
    pub fn into_cart_line(self) -> CartLine {
        CartLine {
            id: self.id,
            name: self.name,
            unit_price: self.price,
            quantity: 1,
            image_url: self.image,
            category: self.category,
        }
    }
}

/// A menu category.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    /// Category id.
    #[serde(alias = "_id")]
    pub id: ItemId,

    /// Display name.
    pub name: String,

    /// Optional image URL.
    #[serde(default)]
    pub image: Option<String>,
}

/// A promotional banner for the storefront landing page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Banner {
    /// Banner id.
    #[serde(alias = "_id")]
    pub id: ItemId,

    /// Headline text.
    pub title: String,

    /// Optional secondary line.
    #[serde(default)]
    pub subtitle: Option<String>,

    /// Optional image URL.
    #[serde(default)]
    pub image: Option<String>,

    /// Whether the banner is currently shown.
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
}

/// One line of the remote cart as returned by `GET /api/orders/cart`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteCartLine {
    /// Server-assigned cart entry id.
    #[serde(rename = "cartEntryId", alias = "_id")]
    pub entry_id: EntryId,

    /// The item in this entry.
    #[serde(rename = "menuItem")]
    pub menu_item: MenuItem,

    /// Quantity held server-side.
    pub quantity: u32,
}

impl RemoteCartLine {
    /// Converts the remote entry into the local line shape.
    #[must_use]
    pub fn to_cart_line(&self) -> CartLine {
        CartLine {
            id: self.menu_item.id.clone(),
            name: self.menu_item.name.clone(),
            unit_price: self.menu_item.price,
            quantity: self.quantity,
            image_url: self.menu_item.image.clone(),
            category: self.menu_item.category.clone(),
        }
    }
}

/// Body of `POST /api/orders/cart`: set the line for a product to a quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLineUpsert {
    /// Product id.
    #[serde(rename = "menuItemId")]
    pub menu_item_id: ItemId,

    /// Absolute quantity after the upsert.
    pub quantity: u32,
}

/// Body of `PUT /api/orders/cart/{cartEntryId}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuantityUpdate {
    /// Absolute quantity for the entry.
    pub quantity: u32,
}

/// Body of `POST /api/orders`: a completed checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    /// Line items at their add-time price snapshots.
    pub items: Vec<OrderLine>,

    /// Delivery details collected at checkout.
    #[serde(rename = "shippingInfo")]
    pub shipping_info: ShippingInfo,

    /// Payment method label, e.g. `"card"`.
    #[serde(rename = "paymentMethod")]
    pub payment_method: String,

    /// Sum of line totals.
    pub subtotal: Price,

    /// Sales tax on the subtotal.
    pub tax: Price,

    /// Delivery fee.
    #[serde(rename = "deliveryFee")]
    pub delivery_fee: Price,

    /// Subtotal + tax + delivery fee.
    pub total: Price,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_line_parses_camel_case() {
        let json = r#"{
            "cartEntryId": "ce_9",
            "menuItem": {"id": 1, "name": "Cheeseburger", "price": 8.99, "image": "b.jpg", "category": "Burgers"},
            "quantity": 2
        }"#;

        let line: RemoteCartLine = serde_json::from_str(json).expect("remote line should parse");

        assert_eq!(line.entry_id, EntryId::new("ce_9"));
        assert_eq!(line.menu_item.id, ItemId::from(1));
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn remote_line_converts_to_local_shape() {
        let remote = RemoteCartLine {
            entry_id: EntryId::new("ce_9"),
            menu_item: MenuItem {
                id: ItemId::from(1),
                name: "Cheeseburger".to_string(),
                price: Price::from_cents(899),
                image: "b.jpg".to_string(),
                category: "Burgers".to_string(),
                description: None,
            },
            quantity: 2,
        };

        let line = remote.to_cart_line();

        assert_eq!(line.id, ItemId::from(1));
        assert_eq!(line.unit_price, Price::from_cents(899));
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn menu_item_accepts_document_store_id() {
        let json = r#"{"_id": "65af", "name": "Margherita", "price": 12.99, "category": "Pizzas"}"#;

        let item: MenuItem = serde_json::from_str(json).expect("menu item should parse");

        assert_eq!(item.id, ItemId::new("65af"));
        assert!(item.image.is_empty());
    }

    #[test]
    fn upsert_serializes_backend_field_names() {
        let body = CartLineUpsert {
            menu_item_id: ItemId::from(4),
            quantity: 3,
        };

        let json = serde_json::to_value(&body).expect("upsert should serialize");

        assert_eq!(json, serde_json::json!({"menuItemId": "4", "quantity": 3}));
    }
}
