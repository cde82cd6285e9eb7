//! # Partial Updates
//!
//! An update body maps field names to values. A `null` value means "remove
//! this field"; any other value means "set this field". Fields missing from
//! the body are left untouched.

use std::collections::BTreeMap;

use serde_json::Value;

use super::errors::{QueryError, QueryResult};
use crate::product::Product;

/// What to do with one field of a record
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    /// Assign a new value
    Set(Value),
    /// Delete the field from the record
    Remove,
}

impl FieldUpdate {
    /// Classify a body value: `null` removes, anything else sets
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => FieldUpdate::Remove,
            other => FieldUpdate::Set(other),
        }
    }
}

/// A partial update of a single record, keyed by its identifier
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateDescriptor {
    /// Name of the identifier attribute
    pub key_attribute: String,

    /// Identifier of the record to update
    pub key: String,

    /// Per-field instructions; every field appears exactly once
    pub fields: BTreeMap<String, FieldUpdate>,
}

impl UpdateDescriptor {
    /// Fields that receive a new value
    pub fn set_fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().filter_map(|(name, update)| match update {
            FieldUpdate::Set(value) => Some((name.as_str(), value)),
            FieldUpdate::Remove => None,
        })
    }

    /// Fields that are deleted from the record
    pub fn remove_fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter_map(|(name, update)| match update {
            FieldUpdate::Remove => Some(name.as_str()),
            FieldUpdate::Set(_) => None,
        })
    }

    /// Apply the update to an in-memory record
    pub fn apply_to(&self, product: &mut Product) {
        for (name, update) in &self.fields {
            match update {
                FieldUpdate::Set(value) => {
                    product.insert(name.clone(), value.clone());
                }
                FieldUpdate::Remove => {
                    product.remove(name);
                }
            }
        }
    }
}

/// Build the update for record `current_id` from a request body.
///
/// Rejects an empty body and any attempt to touch the identifier attribute.
pub fn build_update(
    key_attribute: &str,
    current_id: &str,
    updates: Product,
) -> QueryResult<UpdateDescriptor> {
    if updates.is_empty() {
        return Err(QueryError::EmptyUpdate);
    }
    if updates.contains_key(key_attribute) {
        return Err(QueryError::KeyInUpdate(key_attribute.to_string()));
    }

    let fields = updates
        .into_iter()
        .map(|(name, value)| (name, FieldUpdate::from_value(value)))
        .collect();

    Ok(UpdateDescriptor {
        key_attribute: key_attribute.to_string(),
        key: current_id.to_string(),
        fields,
    })
}
