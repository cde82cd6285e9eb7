//! # Response Formatting
//!
//! Response bodies that are not a bare record or record list.

use serde::Serialize;

use crate::product::Product;
use crate::query::Page;

/// One page of products
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse {
    pub items: Vec<Product>,

    /// Identifier to pass as `lastKey` for the next page, `null` on the last page
    #[serde(rename = "lastEvaluatedKey")]
    pub last_evaluated_key: Option<String>,
}

impl From<Page> for PageResponse {
    fn from(page: Page) -> Self {
        Self {
            items: page.items,
            last_evaluated_key: page.last_evaluated_key,
        }
    }
}
