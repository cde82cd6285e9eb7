//! # API Documentation
//!
//! OpenAPI 3.0 description of the products API, served as JSON.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

/// Build the OpenAPI document for a given identifier attribute
pub fn openapi_document(key_attribute: &str) -> Value {
    let id_param = json!({
        "in": "path",
        "name": "id",
        "required": true,
        "schema": {"type": "string"},
        "description": "Product identifier"
    });
    let product_ref = json!({"$ref": "#/components/schemas/Product"});
    let error_ref = json!({"$ref": "#/components/schemas/Error"});
    let json_of = |schema: &Value| json!({"application/json": {"schema": schema}});

    let collection = json!({
        "get": {
            "summary": "List all products",
            "tags": ["Products"],
            "responses": {
                "200": {
                    "description": "All products",
                    "content": json_of(&json!({"type": "array", "items": product_ref}))
                },
                "500": {"description": "Store error", "content": json_of(&error_ref)}
            }
        },
        "post": {
            "summary": "Create a product",
            "tags": ["Products"],
            "requestBody": {"required": true, "content": json_of(&product_ref)},
            "responses": {
                "201": {"description": "Product created", "content": json_of(&product_ref)},
                "400": {"description": "Empty or invalid body", "content": json_of(&error_ref)},
                "500": {"description": "Store error", "content": json_of(&error_ref)}
            }
        }
    });

    let pagination = json!({
        "get": {
            "summary": "List one page of products, optionally filtered on one attribute",
            "tags": ["Products"],
            "parameters": [
                {"in": "query", "name": "lastKey", "schema": {"type": "string"},
                 "description": "lastEvaluatedKey of the previous page"},
                {"in": "query", "name": "limit", "schema": {"type": "integer", "minimum": 1},
                 "description": "Page size"},
                {"in": "query", "name": "field", "schema": {"type": "string"},
                 "description": "Attribute that must exist"},
                {"in": "query", "name": "value", "schema": {"type": "string"},
                 "description": "Exact value of `field`; requires `field`"}
            ],
            "responses": {
                "200": {
                    "description": "One page",
                    "content": json_of(&json!({"$ref": "#/components/schemas/Page"}))
                },
                "400": {"description": "Invalid parameters", "content": json_of(&error_ref)},
                "404": {"description": "No products scanned", "content": json_of(&error_ref)},
                "500": {"description": "Store error", "content": json_of(&error_ref)}
            }
        }
    });

    let item = json!({
        "get": {
            "summary": "Get a product by identifier",
            "tags": ["Products"],
            "parameters": [id_param],
            "responses": {
                "200": {"description": "Product", "content": json_of(&product_ref)},
                "404": {"description": "Product not found", "content": json_of(&error_ref)}
            }
        },
        "put": {
            "summary": "Update a product; null values remove fields",
            "tags": ["Products"],
            "parameters": [id_param],
            "requestBody": {"required": true, "content": json_of(&json!({"type": "object"}))},
            "responses": {
                "200": {"description": "Updated product", "content": json_of(&product_ref)},
                "400": {"description": "Empty or invalid body", "content": json_of(&error_ref)},
                "404": {"description": "Product not found", "content": json_of(&error_ref)}
            }
        },
        "delete": {
            "summary": "Delete a product",
            "tags": ["Products"],
            "parameters": [id_param],
            "responses": {
                "204": {"description": "Product deleted"},
                "404": {"description": "Product not found", "content": json_of(&error_ref)}
            }
        }
    });

    let schemas = json!({
        "Product": {
            "type": "object",
            "required": [key_attribute],
            "properties": {
                (key_attribute): {"type": "string", "description": "Product identifier"}
            },
            "additionalProperties": true
        },
        "Page": {
            "type": "object",
            "properties": {
                "items": {"type": "array", "items": product_ref},
                "lastEvaluatedKey": {"type": "string", "nullable": true}
            }
        },
        "Error": {
            "type": "object",
            "properties": {
                "error": {"type": "string"},
                "code": {"type": "integer"}
            }
        }
    });

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Tienda API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "CRUD API for the products table"
        },
        "tags": [{"name": "Products", "description": "Product management"}],
        "paths": {
            "/productos": collection,
            "/productos/pagination": pagination,
            "/productos/{id}": item
        },
        "components": {"schemas": schemas}
    })
}

/// Documentation routes, to be nested under `/api-docs`
pub fn docs_routes(key_attribute: &str) -> Router {
    let document = openapi_document(key_attribute);
    Router::new().route("/openapi.json", get(move || async move { Json(document) }))
}
