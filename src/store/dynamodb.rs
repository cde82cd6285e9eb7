//! # DynamoDB Record Store
//!
//! [`RecordStore`] backed by a DynamoDB table (or any endpoint speaking the
//! DynamoDB API, such as DynamoDB Local).
//!
//! Expression rendering is kept in free functions so it can be checked
//! without a live endpoint.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::config::{Credentials, Region};
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, KeySchemaElement, KeyType, ProvisionedThroughput,
    ReturnValue, ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, from_items, to_attribute_value, to_item};

use super::config::StoreConfig;
use super::errors::{StoreError, StoreResult};
use super::{RecordStore, ScanOutput};
use crate::product::{key_of, Product};
use crate::query::{AttributeFilter, ScanRequest, UpdateDescriptor};

/// Placeholder bound to the key attribute in condition expressions
const KEY_NAME: &str = "#k";

/// Throughput used when the table has to be created
const DEFAULT_CAPACITY_UNITS: i64 = 5;

/// A rendered DynamoDB expression with its placeholder bindings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    pub text: String,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

impl Expression {
    /// Values map as the SDK expects it; DynamoDB rejects an empty map
    fn values_or_none(
        values: HashMap<String, AttributeValue>,
    ) -> Option<HashMap<String, AttributeValue>> {
        if values.is_empty() {
            None
        } else {
            Some(values)
        }
    }
}

/// Render a scan filter
pub fn filter_expression(filter: &AttributeFilter) -> Expression {
    match filter {
        AttributeFilter::Exists { field } => Expression {
            text: "attribute_exists(#f)".to_string(),
            names: HashMap::from([("#f".to_string(), field.clone())]),
            values: HashMap::new(),
        },
        AttributeFilter::Equals { field, value } => Expression {
            text: "#f = :v".to_string(),
            names: HashMap::from([("#f".to_string(), field.clone())]),
            values: HashMap::from([(":v".to_string(), AttributeValue::S(value.clone()))]),
        },
    }
}

/// Render `SET ... REMOVE ...` for a partial update
pub fn update_expression(update: &UpdateDescriptor) -> StoreResult<Expression> {
    let mut expr = Expression::default();

    let mut set_clauses = Vec::new();
    for (i, (name, value)) in update.set_fields().enumerate() {
        let name_ref = format!("#s{i}");
        let value_ref = format!(":s{i}");
        set_clauses.push(format!("{name_ref} = {value_ref}"));
        expr.names.insert(name_ref, name.to_string());
        expr.values.insert(
            value_ref,
            to_attribute_value(value).map_err(|e| StoreError::InvalidRecord(e.to_string()))?,
        );
    }

    let mut remove_clauses = Vec::new();
    for (i, name) in update.remove_fields().enumerate() {
        let name_ref = format!("#r{i}");
        remove_clauses.push(name_ref.clone());
        expr.names.insert(name_ref, name.to_string());
    }

    let mut parts = Vec::new();
    if !set_clauses.is_empty() {
        parts.push(format!("SET {}", set_clauses.join(", ")));
    }
    if !remove_clauses.is_empty() {
        parts.push(format!("REMOVE {}", remove_clauses.join(", ")));
    }
    expr.text = parts.join(" ");

    Ok(expr)
}

/// Primary key map for an identifier
fn key_item(key_attribute: &str, id: &str) -> HashMap<String, AttributeValue> {
    HashMap::from([(key_attribute.to_string(), AttributeValue::S(id.to_string()))])
}

/// Identifier held in a key map returned by the store
fn key_from_item(key_attribute: &str, item: &HashMap<String, AttributeValue>) -> Option<String> {
    match item.get(key_attribute)? {
        AttributeValue::S(s) => Some(s.clone()),
        AttributeValue::N(n) => Some(n.clone()),
        _ => None,
    }
}

fn backend<E: std::error::Error>(operation: &'static str, err: E) -> StoreError {
    StoreError::backend(operation, DisplayErrorContext(err).to_string())
}

fn invalid(err: serde_dynamo::Error) -> StoreError {
    StoreError::InvalidRecord(err.to_string())
}

/// DynamoDB-backed products table
pub struct DynamoStore {
    client: Client,
    table: String,
    key_attribute: String,
}

impl DynamoStore {
    /// Wrap an existing client
    pub fn new(client: Client, table: impl Into<String>, key_attribute: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
            key_attribute: key_attribute.into(),
        }
    }

    /// Build a client from configuration. No request is sent until the first operation.
    pub async fn connect(config: &StoreConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "tienda",
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .endpoint_url(&config.endpoint)
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;

        tracing::info!(
            endpoint = %config.endpoint,
            region = %config.region,
            table = %config.table,
            "dynamodb client configured"
        );

        Self::new(Client::new(&sdk_config), &config.table, &config.key_attribute)
    }

    /// Table name
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Create the table if it does not exist yet.
    ///
    /// Returns `true` when the table was created, `false` when it was already there.
    pub async fn ensure_table(&self) -> StoreResult<bool> {
        let key_schema = KeySchemaElement::builder()
            .attribute_name(&self.key_attribute)
            .key_type(KeyType::Hash)
            .build()
            .map_err(|e| backend("create_table", e))?;
        let key_definition = AttributeDefinition::builder()
            .attribute_name(&self.key_attribute)
            .attribute_type(ScalarAttributeType::S)
            .build()
            .map_err(|e| backend("create_table", e))?;
        let throughput = ProvisionedThroughput::builder()
            .read_capacity_units(DEFAULT_CAPACITY_UNITS)
            .write_capacity_units(DEFAULT_CAPACITY_UNITS)
            .build()
            .map_err(|e| backend("create_table", e))?;

        match self
            .client
            .create_table()
            .table_name(&self.table)
            .key_schema(key_schema)
            .attribute_definitions(key_definition)
            .provisioned_throughput(throughput)
            .send()
            .await
        {
            Ok(_) => {
                tracing::info!(table = %self.table, "table created");
                Ok(true)
            }
            Err(err)
                if matches!(
                    err.as_service_error(),
                    Some(CreateTableError::ResourceInUseException(_))
                ) =>
            {
                tracing::info!(table = %self.table, "table already exists");
                Ok(false)
            }
            Err(err) => Err(backend("create_table", err)),
        }
    }
}

#[async_trait]
impl RecordStore for DynamoStore {
    fn key_attribute(&self) -> &str {
        &self.key_attribute
    }

    async fn scan(&self, request: &ScanRequest) -> StoreResult<ScanOutput> {
        let mut call = self
            .client
            .scan()
            .table_name(&self.table)
            .set_limit(
                request
                    .limit
                    .map(|limit| i32::try_from(limit).unwrap_or(i32::MAX)),
            )
            .set_exclusive_start_key(
                request
                    .exclusive_start_key
                    .as_deref()
                    .map(|key| key_item(&self.key_attribute, key)),
            );

        if let Some(filter) = &request.filter {
            let expr = filter_expression(filter);
            call = call
                .filter_expression(expr.text)
                .set_expression_attribute_names(Some(expr.names))
                .set_expression_attribute_values(Expression::values_or_none(expr.values));
        }

        let output = call.send().await.map_err(|e| backend("scan", e))?;

        let items: Vec<Product> = from_items(output.items.unwrap_or_default()).map_err(invalid)?;
        let last_evaluated_key = output
            .last_evaluated_key
            .as_ref()
            .and_then(|key| key_from_item(&self.key_attribute, key));

        Ok(ScanOutput {
            items,
            last_evaluated_key,
            scanned_count: usize::try_from(output.scanned_count).unwrap_or_default(),
        })
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Product>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .set_key(Some(key_item(&self.key_attribute, id)))
            .send()
            .await
            .map_err(|e| backend("get_item", e))?;

        output
            .item
            .map(|item| from_item(item).map_err(invalid))
            .transpose()
    }

    async fn put(&self, product: Product) -> StoreResult<()> {
        let key = key_of(&product, &self.key_attribute).ok_or_else(|| {
            StoreError::InvalidRecord(format!("missing key attribute '{}'", self.key_attribute))
        })?;
        let item = to_item(&product).map_err(invalid)?;

        match self
            .client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(item))
            .condition_expression(format!("attribute_not_exists({KEY_NAME})"))
            .expression_attribute_names(KEY_NAME, &self.key_attribute)
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(err)
                if matches!(
                    err.as_service_error(),
                    Some(PutItemError::ConditionalCheckFailedException(_))
                ) =>
            {
                Err(StoreError::AlreadyExists(key))
            }
            Err(err) => Err(backend("put_item", err)),
        }
    }

    async fn update(&self, update: &UpdateDescriptor) -> StoreResult<Product> {
        let expr = update_expression(update)?;
        let mut names = expr.names;
        names.insert(KEY_NAME.to_string(), self.key_attribute.clone());

        let result = self
            .client
            .update_item()
            .table_name(&self.table)
            .set_key(Some(key_item(&self.key_attribute, &update.key)))
            .update_expression(expr.text)
            .condition_expression(format!("attribute_exists({KEY_NAME})"))
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Expression::values_or_none(expr.values))
            .return_values(ReturnValue::AllNew)
            .send()
            .await;

        match result {
            Ok(output) => {
                let attributes = output.attributes.ok_or_else(|| {
                    StoreError::backend("update_item", "no attributes returned")
                })?;
                from_item(attributes).map_err(invalid)
            }
            Err(err)
                if matches!(
                    err.as_service_error(),
                    Some(UpdateItemError::ConditionalCheckFailedException(_))
                ) =>
            {
                Err(StoreError::NotFound(update.key.clone()))
            }
            Err(err) => Err(backend("update_item", err)),
        }
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        match self
            .client
            .delete_item()
            .table_name(&self.table)
            .set_key(Some(key_item(&self.key_attribute, id)))
            .condition_expression(format!("attribute_exists({KEY_NAME})"))
            .expression_attribute_names(KEY_NAME, &self.key_attribute)
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(err)
                if matches!(
                    err.as_service_error(),
                    Some(DeleteItemError::ConditionalCheckFailedException(_))
                ) =>
            {
                Err(StoreError::NotFound(id.to_string()))
            }
            Err(err) => Err(backend("delete_item", err)),
        }
    }
}
