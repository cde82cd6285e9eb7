//! Record store configuration
//!
//! Connection settings for the DynamoDB backend. Every field falls back to a
//! default suited to a local DynamoDB instance.

use serde::{Deserialize, Serialize};

use crate::product::DEFAULT_KEY_ATTRIBUTE;

/// DynamoDB connection and table settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Endpoint URL (default: "http://localhost:8000")
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Region name (default: "local")
    #[serde(default = "default_region")]
    pub region: String,

    /// Access key id (default: "fakeMyKeyId")
    #[serde(default = "default_access_key_id")]
    pub access_key_id: String,

    /// Secret access key (default: "fakeSecretAccessKey")
    #[serde(default = "default_secret_access_key")]
    pub secret_access_key: String,

    /// Table name (default: "Products")
    #[serde(default = "default_table")]
    pub table: String,

    /// Identifier attribute (default: "productId")
    #[serde(default = "default_key_attribute")]
    pub key_attribute: String,
}

fn default_endpoint() -> String {
    "http://localhost:8000".to_string()
}

fn default_region() -> String {
    "local".to_string()
}

fn default_access_key_id() -> String {
    "fakeMyKeyId".to_string()
}

fn default_secret_access_key() -> String {
    "fakeSecretAccessKey".to_string()
}

fn default_table() -> String {
    "Products".to_string()
}

fn default_key_attribute() -> String {
    DEFAULT_KEY_ATTRIBUTE.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            region: default_region(),
            access_key_id: default_access_key_id(),
            secret_access_key: default_secret_access_key(),
            table: default_table(),
            key_attribute: default_key_attribute(),
        }
    }
}
