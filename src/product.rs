//! # Product Records
//!
//! A product is a schemaless mapping from field name to JSON value. Exactly one
//! field (the key attribute, `productId` by default) identifies the record.

use serde_json::{Map, Value};
use uuid::Uuid;

/// Default name of the identifier field
pub const DEFAULT_KEY_ATTRIBUTE: &str = "productId";

/// A single record of the products table
pub type Product = Map<String, Value>;

/// Generate a fresh identifier for a new record
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Read the identifier of a record as a string.
///
/// Numeric identifiers are rendered with their JSON text so that cursors stay opaque strings.
pub fn key_of(product: &Product, key_attribute: &str) -> Option<String> {
    match product.get(key_attribute)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Build a product from a JSON body, rejecting anything that is not an object
pub fn from_value(value: Value) -> Option<Product> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
