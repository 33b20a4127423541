//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by both strategies.

use crate::decode::Page;
use crate::query::PAGE_PARAM;

/// First page number served by the API
pub const FIRST_PAGE: u32 = 1;

/// Result of the next page computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// Request this page number next
    Continue {
        /// 1-based page number
        page: u32,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Tracks pagination state during one fetch
#[derive(Debug, Clone)]
pub struct PaginationState {
    /// Page number of the next request
    pub page: u32,
    /// Pages decoded so far
    pub pages_fetched: u32,
    /// Records (or CSV lines) seen so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::with_page(FIRST_PAGE)
    }
}

impl PaginationState {
    /// Create a new pagination state starting at page 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state with a starting page
    pub fn with_page(page: u32) -> Self {
        Self {
            page,
            pages_fetched: 0,
            total_fetched: 0,
            done: false,
        }
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Increment page number
    pub fn next_page(&mut self) {
        self.page += 1;
    }

    /// Record a decoded page
    pub fn add_page(&mut self, count: u64) {
        self.pages_fetched += 1;
        self.total_fetched += count;
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Query parameters selecting the page described by `state`
    fn page_params(&self, state: &PaginationState) -> Vec<(String, String)> {
        vec![(PAGE_PARAM.to_string(), state.page.to_string())]
    }

    /// Inspect a decoded page and decide whether another request follows
    fn process_page(&self, page: &Page, state: &mut PaginationState) -> NextPage;

    /// The server answered 204 No Content: there is nothing at or beyond
    /// the requested page.
    fn no_content(&self, state: &mut PaginationState) -> NextPage {
        state.mark_done();
        NextPage::Done
    }
}
