//! Shared REST DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! These types mirror the JSON the server emits for products, suppliers and
//! the session user. Decoding is lenient where backends are known to differ
//! (prices may arrive as decimal strings).

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A product row as returned by `/api/products`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Stock keeping unit; unique across products.
    pub sku: String,
    /// Free-form category label, if any.
    #[serde(default)]
    pub category: Option<String>,
    /// Price per unit.
    #[serde(deserialize_with = "deserialize_f64_from_number_or_string")]
    pub unit_price: f64,
    /// Units currently on hand.
    pub stock_quantity: i64,
    /// Threshold at or below which the product counts as low on stock.
    pub min_stock_level: i64,
    /// Preferred supplier identifier, if one is set.
    #[serde(default)]
    pub preferred_supplier: Option<i64>,
    /// Whether an image has been uploaded for this product.
    #[serde(default)]
    pub has_image: bool,
}

impl Product {
    /// True when stock has fallen to or below the minimum level.
    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.min_stock_level
    }
}

/// Request body for creating or updating a product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub sku: String,
    pub category: Option<String>,
    pub unit_price: f64,
    pub stock_quantity: i64,
    pub min_stock_level: i64,
    pub preferred_supplier: Option<i64>,
}

/// Supplier projection used by the product form dropdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
}

/// An authenticated user as returned by the `/api/auth/me` endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Login email, if known.
    #[serde(default)]
    pub email: Option<String>,
    /// Role name (`admin`, `manager` or `staff`).
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "staff".to_owned()
}

/// Raw image bytes fetched from an authenticated endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    /// MIME type reported by the server, if any.
    pub content_type: Option<String>,
}

fn deserialize_f64_from_number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let parsed = match &value {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(price) if price.is_finite() => Ok(price),
        _ => Err(D::Error::custom(format!("expected numeric price, got {value}"))),
    }
}
