//! # Query and Update Construction
//!
//! Pure builders that turn request parameters into store-agnostic operation
//! descriptors: a filtered, page-limited scan and a set/remove partial update.

pub mod errors;
pub mod filter;
pub mod scan;
pub mod update;

pub use errors::{QueryError, QueryResult};
pub use filter::AttributeFilter;
pub use scan::{build_filtered_scan, Page, ScanPlan, ScanRequest};
pub use update::{build_update, FieldUpdate, UpdateDescriptor};
