//! # Tienda REST API Module
//!
//! HTTP endpoints for CRUD operations on the products table.

pub mod docs;
pub mod errors;
pub mod parser;
pub mod response;
pub mod routes;
pub mod service;

pub use docs::{docs_routes, openapi_document};
pub use errors::{RestError, RestResult};
pub use parser::PaginationQuery;
pub use response::PageResponse;
pub use routes::product_routes;
pub use service::ProductService;
