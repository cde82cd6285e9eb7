//! tienda-api - CRUD HTTP API over a products key-value table
//!
//! Products are schemaless JSON objects identified by a single string
//! attribute. The API supports listing, point lookup, filtered pagination,
//! creation, partial update with `null`-as-remove, and deletion.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod product;
pub mod query;
pub mod rest_api;
pub mod store;
