//! Cart models.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::money::Price;

/// Canonical product identifier.
///
/// The backend has returned both numeric and string ids across versions, so
/// every id is normalized to a string at the boundary and compared as one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(#[serde(deserialize_with = "flexible_id")] String);

impl ItemId {
    /// Creates an id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        ItemId(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId(id.to_string())
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        ItemId(id.to_string())
    }
}

/// Accepts a JSON string or number and yields the canonical string form.
pub(crate) fn flexible_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(id) => id,
        Raw::Number(id) => id.to_string(),
    })
}

/// One line in the cart.
///
/// Display metadata and the unit price are snapshots taken when the item was
/// added; they are not re-fetched from the catalog. The serde layout matches
/// the durable storage shape: `{id, name, price, quantity, image, category}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product id of the item being purchased.
    pub id: ItemId,

    /// Display name snapshot.
    pub name: String,

    /// Unit price snapshot at add-time.
    #[serde(rename = "price")]
    pub unit_price: Price,

    /// Always at least 1; a line that would drop to 0 is removed instead.
    pub quantity: u32,

    /// Display image snapshot.
    #[serde(rename = "image")]
    pub image_url: String,

    /// Catalog category snapshot.
    pub category: String,
}

impl CartLine {
    /// Total price of this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_deserializes_from_string() {
        let id: ItemId = serde_json::from_str("\"abc123\"").expect("string id should parse");

        assert_eq!(id, ItemId::new("abc123"));
    }

    #[test]
    fn item_id_deserializes_from_number() {
        let id: ItemId = serde_json::from_str("42").expect("numeric id should parse");

        assert_eq!(id, ItemId::new("42"));
    }

    #[test]
    fn numeric_and_string_forms_compare_equal() {
        assert_eq!(ItemId::from(7), ItemId::from("7"));
    }

    #[test]
    fn line_total_multiplies_unit_price() {
        let line = CartLine {
            id: ItemId::from(4),
            name: "Spicy Tacos".to_string(),
            unit_price: Price::from_cents(799),
            quantity: 2,
            image_url: String::new(),
            category: "Tacos".to_string(),
        };

        assert_eq!(line.line_total(), Price::from_cents(1598));
    }

    #[test]
    fn storage_layout_field_names() {
        let line = CartLine {
            id: ItemId::from(1),
            name: "Cheeseburger".to_string(),
            unit_price: Price::from_cents(899),
            quantity: 1,
            image_url: "burger.jpg".to_string(),
            category: "Burgers".to_string(),
        };

        let json = serde_json::to_value(&line).expect("line should serialize");

        assert_eq!(json["price"], serde_json::json!(8.99));
        assert_eq!(json["image"], serde_json::json!("burger.jpg"));
        assert!(json.get("unit_price").is_none(), "wire name is `price`");
    }
}
