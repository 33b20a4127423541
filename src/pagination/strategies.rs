//! Pagination strategy implementations
//!
//! One strategy per response format.

use super::types::{NextPage, PaginationState, Paginator};
use crate::decode::Page;
use crate::types::ResponseFormat;

// ============================================================================
// Next Cursor Pagination
// ============================================================================

/// JSON pagination driven by `pagination.next`.
///
/// A null cursor ends the walk on the current page, so no trailing request is
/// made.
#[derive(Debug, Clone, Default)]
pub struct NextCursorPaginator;

impl NextCursorPaginator {
    /// Create a new cursor paginator
    pub fn new() -> Self {
        Self
    }
}

impl Paginator for NextCursorPaginator {
    fn process_page(&self, page: &Page, state: &mut PaginationState) -> NextPage {
        state.add_page(page.len() as u64);

        if page.next_cursor().is_some() {
            state.next_page();
            NextPage::Continue { page: state.page }
        } else {
            state.mark_done();
            NextPage::Done
        }
    }
}

// ============================================================================
// No Content Pagination
// ============================================================================

/// CSV pagination.
///
/// CSV bodies carry no last-page marker, so every page advances and only a
/// 204 No Content response stops the walk. This always costs one request past
/// the last page with data.
#[derive(Debug, Clone, Default)]
pub struct NoContentPaginator;

impl NoContentPaginator {
    /// Create a new no-content paginator
    pub fn new() -> Self {
        Self
    }
}

impl Paginator for NoContentPaginator {
    fn process_page(&self, page: &Page, state: &mut PaginationState) -> NextPage {
        state.add_page(page.len() as u64);
        state.next_page();
        NextPage::Continue { page: state.page }
    }
}

/// Paginator matching a response format
pub fn paginator_for(format: ResponseFormat) -> Box<dyn Paginator> {
    match format {
        ResponseFormat::Json => Box::new(NextCursorPaginator::new()),
        ResponseFormat::Csv => Box::new(NoContentPaginator::new()),
    }
}
