//! Page and query types shared by every list endpoint.

use serde::{Deserialize, Serialize};

/// Pagination summary reported by the server alongside a page of items.
///
/// `has_more` is authoritative: stores never infer it from counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total number of items matching the query across all pages.
    pub total: u64,
    /// Whether further pages exist beyond the requested offset.
    pub has_more: bool,
}

/// One page of items plus its pagination summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page<T> {
    /// Items in server-returned order.
    pub items: Vec<T>,
    /// Pagination summary for the query that produced this page.
    pub pagination: PageInfo,
}

/// Query parameters accepted by the list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Maximum number of items to return.
    pub limit: u32,
    /// Zero-based item offset.
    pub offset: u32,
    /// Optional server-side search term.
    pub search: Option<String>,
}

impl ListQuery {
    /// Builds a query for `limit` items starting at `offset`, no search.
    pub fn page(limit: u32, offset: u32) -> Self {
        Self {
            limit,
            offset,
            search: None,
        }
    }

    /// Attaches a search term; empty terms are treated as no search.
    pub fn with_search(mut self, term: &str) -> Self {
        self.search = if term.is_empty() {
            None
        } else {
            Some(term.to_string())
        };
        self
    }
}
