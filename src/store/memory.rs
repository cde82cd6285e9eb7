//! # In-Memory Record Store
//!
//! An ordered in-process table. Scans follow the same rules as the DynamoDB
//! backend: the limit counts records *read*, the filter is applied to what
//! was read, and a continuation key is returned whenever the limit was hit.

use std::collections::BTreeMap;
use std::ops::Bound;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::errors::{StoreError, StoreResult};
use super::{RecordStore, ScanOutput};
use crate::product::{key_of, Product, DEFAULT_KEY_ATTRIBUTE};
use crate::query::{ScanRequest, UpdateDescriptor};

/// In-memory products table, ordered by identifier
pub struct InMemoryStore {
    key_attribute: String,
    records: RwLock<BTreeMap<String, Product>>,
}

impl InMemoryStore {
    /// Create an empty store keyed by `productId`
    pub fn new() -> Self {
        Self::with_key_attribute(DEFAULT_KEY_ATTRIBUTE)
    }

    /// Create an empty store keyed by a custom attribute
    pub fn with_key_attribute(key_attribute: impl Into<String>) -> Self {
        Self {
            key_attribute: key_attribute.into(),
            records: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of records held
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn key_for(&self, product: &Product) -> StoreResult<String> {
        key_of(product, &self.key_attribute).ok_or_else(|| {
            StoreError::InvalidRecord(format!("missing key attribute '{}'", self.key_attribute))
        })
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    fn key_attribute(&self) -> &str {
        &self.key_attribute
    }

    async fn scan(&self, request: &ScanRequest) -> StoreResult<ScanOutput> {
        let records = self.records.read().await;

        let lower = match &request.exclusive_start_key {
            Some(key) => Bound::Excluded(key.clone()),
            None => Bound::Unbounded,
        };

        let mut output = ScanOutput::default();
        let mut last_read = None;

        for (key, product) in records.range((lower, Bound::Unbounded)) {
            if request.limit == Some(output.scanned_count) {
                break;
            }
            output.scanned_count += 1;
            last_read = Some(key.clone());

            let keep = request
                .filter
                .as_ref()
                .map_or(true, |filter| filter.matches(product));
            if keep {
                output.items.push(product.clone());
            }
        }

        if request.limit.is_some_and(|limit| limit > 0 && output.scanned_count == limit) {
            output.last_evaluated_key = last_read;
        }

        Ok(output)
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Product>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn put(&self, product: Product) -> StoreResult<()> {
        let key = self.key_for(&product)?;
        let mut records = self.records.write().await;
        if records.contains_key(&key) {
            return Err(StoreError::AlreadyExists(key));
        }
        records.insert(key, product);
        Ok(())
    }

    async fn update(&self, update: &UpdateDescriptor) -> StoreResult<Product> {
        let mut records = self.records.write().await;
        let product = records
            .get_mut(&update.key)
            .ok_or_else(|| StoreError::NotFound(update.key.clone()))?;
        update.apply_to(product);
        Ok(product.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.records
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{build_update, AttributeFilter};
    use serde_json::{json, Value};

    fn product(value: Value) -> Product {
        crate::product::from_value(value).unwrap()
    }

    async fn seeded(count: usize) -> InMemoryStore {
        let store = InMemoryStore::new();
        for i in 0..count {
            store
                .put(product(json!({"productId": format!("p-{i:02}"), "idx": i})))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let store = InMemoryStore::new();
        store
            .put(product(json!({"productId": "a", "name": "X"})))
            .await
            .unwrap();

        let found = store.get("a").await.unwrap().unwrap();
        assert_eq!(found.get("name"), Some(&json!("X")));
        assert!(store.get("b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_rejects_duplicate_key() {
        let store = InMemoryStore::new();
        store.put(product(json!({"productId": "a"}))).await.unwrap();
        let result = store.put(product(json!({"productId": "a"}))).await;
        assert_eq!(result, Err(StoreError::AlreadyExists("a".to_string())));
    }

    #[tokio::test]
    async fn test_put_requires_key() {
        let store = InMemoryStore::new();
        let result = store.put(product(json!({"name": "X"}))).await;
        assert!(matches!(result, Err(StoreError::InvalidRecord(_))));
    }

    #[tokio::test]
    async fn test_scan_limit_returns_continuation_key() {
        let store = seeded(5).await;
        let request = ScanRequest {
            limit: Some(2),
            ..ScanRequest::full()
        };

        let first = store.scan(&request).await.unwrap();
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.last_evaluated_key.as_deref(), Some("p-01"));

        let second = store.scan(&request.resume_after("p-01")).await.unwrap();
        assert_eq!(second.items[0].get("productId"), Some(&json!("p-02")));
    }

    #[tokio::test]
    async fn test_scan_exact_limit_still_reports_key() {
        let store = seeded(3).await;
        let request = ScanRequest {
            limit: Some(3),
            ..ScanRequest::full()
        };
        let output = store.scan(&request).await.unwrap();
        assert_eq!(output.items.len(), 3);
        assert_eq!(output.last_evaluated_key.as_deref(), Some("p-02"));
    }

    #[tokio::test]
    async fn test_scan_limit_applies_before_filter() {
        let store = InMemoryStore::new();
        for (id, category) in [("a", "hats"), ("b", "hats"), ("c", "shoes")] {
            store
                .put(product(json!({"productId": id, "category": category})))
                .await
                .unwrap();
        }

        let request = ScanRequest {
            filter: Some(AttributeFilter::equals("category", "shoes")),
            limit: Some(2),
            exclusive_start_key: None,
        };
        let output = store.scan(&request).await.unwrap();
        assert!(output.items.is_empty());
        assert_eq!(output.scanned_count, 2);
        assert_eq!(output.last_evaluated_key.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn test_full_scan_has_no_continuation_key() {
        let store = seeded(4).await;
        let output = store.scan(&ScanRequest::full()).await.unwrap();
        assert_eq!(output.items.len(), 4);
        assert_eq!(output.scanned_count, 4);
        assert_eq!(output.last_evaluated_key, None);
    }

    #[tokio::test]
    async fn test_update_sets_and_removes() {
        let store = InMemoryStore::new();
        store
            .put(product(json!({"productId": "a", "name": "Old", "price": 5})))
            .await
            .unwrap();

        let update = build_update(
            "productId",
            "a",
            product(json!({"name": "New", "price": null})),
        )
        .unwrap();
        let updated = store.update(&update).await.unwrap();

        assert_eq!(updated.get("name"), Some(&json!("New")));
        assert!(!updated.contains_key("price"));
        assert_eq!(updated.get("productId"), Some(&json!("a")));
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let store = InMemoryStore::new();
        let update = build_update("productId", "nope", product(json!({"a": 1}))).unwrap();
        let result = store.update(&update).await;
        assert_eq!(result, Err(StoreError::NotFound("nope".to_string())));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = seeded(2).await;
        store.delete("p-00").await.unwrap();
        assert_eq!(store.len().await, 1);

        let result = store.delete("p-00").await;
        assert_eq!(result, Err(StoreError::NotFound("p-00".to_string())));
    }
}
