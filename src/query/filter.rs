//! # Attribute Filters
//!
//! Filters applied by the store after it has read candidate records.
//! Only two shapes exist: the attribute is present, or the attribute is
//! present and equal to a string.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::product::Product;

/// A filter on a single attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum AttributeFilter {
    /// Attribute is present (any value, including null)
    Exists { field: String },

    /// Attribute is present and is exactly this string
    Equals { field: String, value: String },
}

impl AttributeFilter {
    /// Create an existence filter
    pub fn exists(field: impl Into<String>) -> Self {
        AttributeFilter::Exists {
            field: field.into(),
        }
    }

    /// Create an equality filter
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        AttributeFilter::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// The attribute this filter inspects
    pub fn field(&self) -> &str {
        match self {
            AttributeFilter::Exists { field } => field,
            AttributeFilter::Equals { field, .. } => field,
        }
    }

    /// Check if a record matches this filter
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            AttributeFilter::Exists { field } => product.contains_key(field),
            AttributeFilter::Equals { field, value } => match product.get(field) {
                Some(Value::String(actual)) => actual == value,
                _ => false,
            },
        }
    }
}
