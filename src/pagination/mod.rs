//! Pagination module
//!
//! Supports: next-cursor (JSON) and no-content (CSV) page walks
//!
//! # Overview
//!
//! Pages are requested by 1-based number, strictly in order. JSON walks stop
//! when the server reports a null `pagination.next`; CSV walks stop only when
//! the server answers 204 No Content. Both stop on 204.

mod strategies;
mod types;

pub use strategies::{paginator_for, NextCursorPaginator, NoContentPaginator};
pub use types::{NextPage, PaginationState, Paginator, FIRST_PAGE};
