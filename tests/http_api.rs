//! Products API HTTP Tests
//!
//! Drive the full router (CORS, tracing, nesting) against the in-memory
//! store, one request per `oneshot` call.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use tienda_api::http_server::{HttpServer, HttpServerConfig};
use tienda_api::rest_api::ProductService;
use tienda_api::store::InMemoryStore;

fn app() -> Router {
    let service = ProductService::new(Arc::new(InMemoryStore::new()));
    HttpServer::with_config(HttpServerConfig::default(), service).router()
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, body: Value) -> String {
    let (status, created) = send(app, Method::POST, "/productos", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    created["productId"].as_str().unwrap().to_string()
}

async fn seed_shoes(app: &Router) {
    for i in 0..5 {
        create(app, json!({"name": format!("shoe {i}"), "category": "shoes"})).await;
    }
    for i in 0..3 {
        create(app, json!({"name": format!("hat {i}"), "category": "hats"})).await;
    }
}

// =============================================================================
// CREATE / GET / LIST
// =============================================================================

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let app = app();
    let id = create(&app, json!({"name": "X", "price": 10})).await;

    let (status, product) = send(&app, Method::GET, &format!("/productos/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product, json!({"productId": id, "name": "X", "price": 10}));
}

#[tokio::test]
async fn test_create_rejects_empty_and_malformed_bodies() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/productos", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/productos")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/productos/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
    assert!(body["error"].as_str().unwrap().contains("nope"));
}

#[tokio::test]
async fn test_list_all_returns_every_product() {
    let app = app();
    seed_shoes(&app).await;

    let (status, products) = send(&app, Method::GET, "/productos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(products.as_array().unwrap().len(), 8);
}

// =============================================================================
// UPDATE / DELETE
// =============================================================================

#[tokio::test]
async fn test_update_null_removes_field_twice() {
    let app = app();
    let id = create(&app, json!({"name": "X", "price": 10})).await;
    let uri = format!("/productos/{id}");

    for _ in 0..2 {
        let (status, product) =
            send(&app, Method::PUT, &uri, Some(json!({"price": null}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(product, json!({"productId": id, "name": "X"}));
    }
}

#[tokio::test]
async fn test_update_sets_and_removes_together() {
    let app = app();
    let id = create(&app, json!({"name": "X", "price": 10, "color": "red"})).await;

    let (status, product) = send(
        &app,
        Method::PUT,
        &format!("/productos/{id}"),
        Some(json!({"price": 12, "color": null, "size": "M"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["price"], 12);
    assert_eq!(product["size"], "M");
    assert!(product.get("color").is_none());
}

#[tokio::test]
async fn test_update_validation_errors() {
    let app = app();
    let id = create(&app, json!({"name": "X"})).await;
    let uri = format!("/productos/{id}");

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({"productId": "other"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::PUT, "/productos/nope", Some(json!({"a": 1}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let app = app();
    let id = create(&app, json!({"name": "X"})).await;
    let uri = format!("/productos/{id}");

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let app = app();
    let (status, _) = send(&app, Method::DELETE, "/productos/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// PAGINATION
// =============================================================================

#[tokio::test]
async fn test_filtered_page_holds_only_matches() {
    let app = app();
    seed_shoes(&app).await;

    let (status, page) = send(
        &app,
        Method::GET,
        "/productos/pagination?limit=2&field=category&value=shoes",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let items = page["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|p| p["category"] == "shoes"));
    assert!(page["lastEvaluatedKey"].is_string());
}

#[tokio::test]
async fn test_cursor_walk_visits_every_match_once() {
    let app = app();
    seed_shoes(&app).await;

    let mut seen = Vec::new();
    let mut uri = "/productos/pagination?limit=2&field=category&value=shoes".to_string();
    loop {
        let (status, page) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        for item in page["items"].as_array().unwrap() {
            seen.push(item["productId"].as_str().unwrap().to_string());
        }
        match page["lastEvaluatedKey"].as_str() {
            Some(key) => {
                uri = format!(
                    "/productos/pagination?limit=2&field=category&value=shoes&lastKey={key}"
                )
            }
            None => break,
        }
    }

    let total = seen.len();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 5);
    assert_eq!(total, 5);
}

#[tokio::test]
async fn test_exists_filter() {
    let app = app();
    create(&app, json!({"name": "A", "discount": 5})).await;
    create(&app, json!({"name": "B"})).await;

    let (status, page) = send(&app, Method::GET, "/productos/pagination?field=discount", None).await;
    assert_eq!(status, StatusCode::OK);
    let items = page["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "A");
    assert!(page["lastEvaluatedKey"].is_null());
}

#[tokio::test]
async fn test_pagination_parameter_errors() {
    let app = app();
    seed_shoes(&app).await;

    for uri in [
        "/productos/pagination?limit=0",
        "/productos/pagination?limit=abc",
        "/productos/pagination?limit=5000",
        "/productos/pagination?value=shoes",
    ] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], 400);
    }
}

#[tokio::test]
async fn test_empty_table_page_is_not_found() {
    let app = app();
    let (status, _) = send(&app, Method::GET, "/productos/pagination", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_filter_without_matches_is_empty_page() {
    let app = app();
    seed_shoes(&app).await;

    let (status, page) = send(
        &app,
        Method::GET,
        "/productos/pagination?field=category&value=boots",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(page["items"].as_array().unwrap().is_empty());
}

// =============================================================================
// HEALTH / DOCS
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = app();
    let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["openapi"], "3.0.0");
    assert!(doc["paths"]["/productos/pagination"]["get"].is_object());
}
