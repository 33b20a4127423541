//! Query module
//!
//! Builds the fixed part of every dataset request: the `;`-joined filters,
//! the compact structure JSON and the response format.
//!
//! # Overview
//!
//! - `Filters` - ordered filter predicates, joined verbatim
//! - `Structure` - insertion-ordered field mapping with last-key-wins inserts
//! - `Query` - the two above plus a `ResponseFormat`

mod filters;
mod structure;

pub use filters::Filters;
pub use structure::{default_structure, Structure, DEFAULT_STRUCTURE_FIELDS};

use crate::error::{Error, Result};
use crate::types::ResponseFormat;

/// Query parameter carrying the joined filters
pub const FILTERS_PARAM: &str = "filters";
/// Query parameter carrying the compact structure JSON
pub const STRUCTURE_PARAM: &str = "structure";
/// Query parameter selecting `json` or `csv`
pub const FORMAT_PARAM: &str = "format";
/// Query parameter carrying the 1-based page number
pub const PAGE_PARAM: &str = "page";

/// A dataset query, constructed per fetch
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Filter predicates, in the order they are sent
    pub filters: Filters,
    /// Requested output fields
    pub structure: Structure,
    /// Body format
    pub format: ResponseFormat,
}

impl Query {
    /// Create a JSON query
    pub fn new(filters: impl Into<Filters>, structure: Structure) -> Self {
        Self {
            filters: filters.into(),
            structure,
            format: ResponseFormat::Json,
        }
    }

    /// Query for the default structure over regions
    pub fn latest() -> Self {
        Self::new(Filters::default_region(), default_structure().clone())
    }

    /// Request CSV instead of JSON
    #[must_use]
    pub fn csv(mut self) -> Self {
        self.format = ResponseFormat::Csv;
        self
    }

    /// Set the response format
    #[must_use]
    pub fn with_format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    /// Whether CSV was requested
    pub fn is_csv(&self) -> bool {
        self.format == ResponseFormat::Csv
    }

    /// The parameters shared by every page request, in send order
    pub fn params(&self) -> Result<Vec<(String, String)>> {
        if self.filters.is_empty() {
            return Err(Error::config("At least one filter is required"));
        }

        Ok(vec![
            (FILTERS_PARAM.to_string(), self.filters.joined()),
            (STRUCTURE_PARAM.to_string(), self.structure.to_compact_json()?),
            (FORMAT_PARAM.to_string(), self.format.as_str().to_string()),
        ])
    }
}

#[cfg(test)]
mod tests;
