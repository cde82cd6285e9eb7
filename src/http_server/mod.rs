//! # Tienda HTTP Server Module
//!
//! Combines the product, documentation and health routers into one Axum server.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/productos/*` - Products CRUD
//! - `/api-docs/openapi.json` - OpenAPI document

pub mod config;
pub mod health_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
