//! # Record Store
//!
//! The backing key-value table behind the products API. One trait, two
//! backends: DynamoDB for deployments and an ordered in-memory table for
//! tests and local runs.

pub mod config;
pub mod dynamodb;
pub mod errors;
pub mod memory;

use async_trait::async_trait;

pub use config::StoreConfig;
pub use dynamodb::DynamoStore;
pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryStore;

use crate::product::Product;
use crate::query::{ScanRequest, UpdateDescriptor};

/// Result of a single scan call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutput {
    /// Records that passed the filter
    pub items: Vec<Product>,

    /// Identifier of the last record read, present when the store stopped early
    pub last_evaluated_key: Option<String>,

    /// Records read before the filter was applied
    pub scanned_count: usize,
}

/// Single-item operations on the products table.
///
/// No operation spans more than one item; writes are atomic per item only.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Name of the identifier attribute
    fn key_attribute(&self) -> &str;

    /// Read records, optionally filtered and limited, resuming after a key
    async fn scan(&self, request: &ScanRequest) -> StoreResult<ScanOutput>;

    /// Point lookup by identifier
    async fn get(&self, id: &str) -> StoreResult<Option<Product>>;

    /// Insert a record. Fails with `AlreadyExists` if the identifier is taken.
    async fn put(&self, product: Product) -> StoreResult<()>;

    /// Apply a partial update and return the full record afterwards.
    /// Fails with `NotFound` if the record does not exist.
    async fn update(&self, update: &UpdateDescriptor) -> StoreResult<Product>;

    /// Delete a record. Fails with `NotFound` if the record does not exist.
    async fn delete(&self, id: &str) -> StoreResult<()>;
}
