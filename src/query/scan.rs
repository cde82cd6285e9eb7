//! # Filtered Pagination
//!
//! Builds page-limited scans over the products table.
//!
//! The store applies its native limit *before* evaluating a filter, so a
//! filtered scan sent with `limit = n` may come back with fewer than `n`
//! matches even though more exist. Filtered scans are therefore sent without
//! a store-level limit and truncated here, after the store has answered.

use serde::{Deserialize, Serialize};

use super::filter::AttributeFilter;
use crate::product::{key_of, Product};
use crate::store::ScanOutput;

/// A single scan call against the record store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    /// Filter evaluated by the store after reading each record
    pub filter: Option<AttributeFilter>,

    /// Maximum number of records the store may read
    pub limit: Option<usize>,

    /// Resume after the record with this identifier
    pub exclusive_start_key: Option<String>,
}

impl ScanRequest {
    /// A scan over the whole table
    pub fn full() -> Self {
        Self::default()
    }

    /// Continue this scan after `key`
    pub fn resume_after(&self, key: impl Into<String>) -> Self {
        Self {
            exclusive_start_key: Some(key.into()),
            ..self.clone()
        }
    }
}

/// A scan plus the page size it must be cut to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPlan {
    pub request: ScanRequest,
    pub page_limit: usize,
}

/// One page of results
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// At most `page_limit` matching records, in store order
    pub items: Vec<Product>,

    /// Where the next page starts, if anything remains
    pub last_evaluated_key: Option<String>,

    /// Records the store read before filtering
    pub scanned_count: usize,
}

/// Build the scan for one page.
///
/// - no `field`: plain scan, store limit = `limit`
/// - `field` only: records where the attribute exists, no store limit
/// - `field` and `value`: records where the attribute equals `value`, no store limit
///
/// `limit` must already be positive. A `value` without a `field` is rejected
/// upstream and ignored here.
pub fn build_filtered_scan(
    cursor: Option<String>,
    limit: usize,
    field: Option<String>,
    value: Option<String>,
) -> ScanPlan {
    let filter = match (field, value) {
        (None, _) => None,
        (Some(field), None) => Some(AttributeFilter::exists(field)),
        (Some(field), Some(value)) => Some(AttributeFilter::equals(field, value)),
    };

    let store_limit = if filter.is_none() { Some(limit) } else { None };

    ScanPlan {
        request: ScanRequest {
            filter,
            limit: store_limit,
            exclusive_start_key: cursor,
        },
        page_limit: limit,
    }
}

impl ScanPlan {
    /// Cut the store output down to one page and compute the next cursor.
    ///
    /// If matches were dropped by the truncation, the next page starts after
    /// the last record delivered so the dropped ones are read again. Otherwise
    /// the store's own continuation key is passed through.
    pub fn into_page(self, output: ScanOutput, key_attribute: &str) -> Page {
        let ScanOutput {
            mut items,
            last_evaluated_key,
            scanned_count,
        } = output;

        let truncated = items.len() > self.page_limit;
        items.truncate(self.page_limit);

        let last_evaluated_key = if truncated {
            items.last().and_then(|p| key_of(p, key_attribute))
        } else {
            last_evaluated_key
        };

        Page {
            items,
            last_evaluated_key,
            scanned_count,
        }
    }
}
