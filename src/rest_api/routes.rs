//! # Product Routes
//!
//! Axum handlers for the `/productos` resource.

use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use super::errors::{RestError, RestResult};
use super::parser::PaginationQuery;
use super::response::PageResponse;
use super::service::ProductService;
use crate::product::Product;

/// Create product routes, to be nested under `/productos`
pub fn product_routes(service: ProductService) -> Router {
    Router::new()
        .route("/", get(list_handler).post(create_handler))
        .route("/pagination", get(pagination_handler))
        .route(
            "/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .with_state(service)
}

/// Unwrap a JSON body, answering 400 for anything unreadable
fn json_body(payload: Result<Json<Value>, JsonRejection>) -> RestResult<Value> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| RestError::InvalidBody(rejection.body_text()))
}

/// List all products
async fn list_handler(State(service): State<ProductService>) -> RestResult<Json<Vec<Product>>> {
    Ok(Json(service.list_all().await?))
}

/// One filtered page of products
async fn pagination_handler(
    State(service): State<ProductService>,
    Query(query): Query<HashMap<String, String>>,
) -> RestResult<Json<PageResponse>> {
    let query = PaginationQuery::parse(&query)?;
    let page = service.paginate(query).await?;
    Ok(Json(PageResponse::from(page)))
}

/// Get a single product
async fn get_handler(
    State(service): State<ProductService>,
    Path(id): Path<String>,
) -> RestResult<Json<Product>> {
    Ok(Json(service.get_by_id(&id).await?))
}

/// Create a product
async fn create_handler(
    State(service): State<ProductService>,
    payload: Result<Json<Value>, JsonRejection>,
) -> RestResult<(StatusCode, Json<Product>)> {
    let body = json_body(payload)?;
    let product = service.create(body).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product
async fn update_handler(
    State(service): State<ProductService>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> RestResult<Json<Product>> {
    let body = json_body(payload)?;
    Ok(Json(service.update(&id, body).await?))
}

/// Delete a product
async fn delete_handler(
    State(service): State<ProductService>,
    Path(id): Path<String>,
) -> RestResult<StatusCode> {
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
