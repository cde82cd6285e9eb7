//! # Product Service
//!
//! Sits between the HTTP handlers and the record store. Each operation
//! validates its input, builds one store operation and issues exactly one
//! store call.

use std::sync::Arc;

use serde_json::Value;

use super::errors::{RestError, RestResult};
use super::parser::PaginationQuery;
use crate::product::{self, Product};
use crate::query::{build_filtered_scan, build_update, Page, ScanRequest};
use crate::store::RecordStore;

/// Products API operations over a shared store handle
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn RecordStore>,
}

impl ProductService {
    /// Create a service over the given store
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Name of the identifier attribute
    pub fn key_attribute(&self) -> &str {
        self.store.key_attribute()
    }

    /// Every record the store returns for a single unfiltered scan
    pub async fn list_all(&self) -> RestResult<Vec<Product>> {
        let output = self.store.scan(&ScanRequest::full()).await?;
        tracing::debug!(count = output.items.len(), "listed products");
        Ok(output.items)
    }

    /// Point lookup
    pub async fn get_by_id(&self, id: &str) -> RestResult<Product> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| RestError::NotFound(id.to_string()))
    }

    /// One page of products, optionally filtered on a single attribute.
    ///
    /// Fails with `NoProducts` only when the store read nothing at all; a
    /// filter that matched nothing yields an empty page.
    pub async fn paginate(&self, query: PaginationQuery) -> RestResult<Page> {
        let plan = build_filtered_scan(query.last_key, query.limit, query.field, query.value);
        tracing::debug!(request = ?plan.request, page_limit = plan.page_limit, "scan planned");

        let output = self.store.scan(&plan.request).await?;
        if output.scanned_count == 0 {
            return Err(RestError::NoProducts);
        }

        Ok(plan.into_page(output, self.store.key_attribute()))
    }

    /// Store a new record under a freshly generated identifier
    pub async fn create(&self, body: Value) -> RestResult<Product> {
        let mut product = non_empty_object(body)?;
        let id = product::generate_id();
        product.insert(
            self.store.key_attribute().to_string(),
            Value::String(id.clone()),
        );

        self.store.put(product.clone()).await?;
        tracing::info!(id = %id, "product created");
        Ok(product)
    }

    /// Set and remove fields of an existing record; returns the full record afterwards
    pub async fn update(&self, id: &str, body: Value) -> RestResult<Product> {
        let updates = object(body)?;
        let update = build_update(self.store.key_attribute(), id, updates)?;

        let product = self.store.update(&update).await?;
        tracing::info!(id = %id, fields = update.fields.len(), "product updated");
        Ok(product)
    }

    /// Delete an existing record
    pub async fn delete(&self, id: &str) -> RestResult<()> {
        self.store.delete(id).await?;
        tracing::info!(id = %id, "product deleted");
        Ok(())
    }
}

fn object(body: Value) -> RestResult<Product> {
    product::from_value(body)
        .ok_or_else(|| RestError::InvalidBody("expected a JSON object".to_string()))
}

fn non_empty_object(body: Value) -> RestResult<Product> {
    let product = object(body)?;
    if product.is_empty() {
        return Err(RestError::InvalidBody("body cannot be empty".to_string()));
    }
    Ok(product)
}
