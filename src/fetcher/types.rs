//! Fetcher types
//!
//! The aggregated dataset and per-fetch statistics.

use crate::decode::Page;
use crate::error::{Error, Result};
use crate::pagination::PaginationState;
use crate::types::{Record, ResponseFormat};
use serde::Serialize;

/// Separator placed between CSV page blobs
pub const CSV_PAGE_SEPARATOR: &str = "\n";

/// Everything a fetch returned, page boundaries erased
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    /// Records from every JSON page, in page order
    Records(Vec<Record>),
    /// First page's header followed by every page's data lines
    Csv(String),
}

impl Dataset {
    /// Format this dataset was fetched in
    pub fn format(&self) -> ResponseFormat {
        match self {
            Dataset::Records(_) => ResponseFormat::Json,
            Dataset::Csv(_) => ResponseFormat::Csv,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Dataset::Records(records) => records.is_empty(),
            Dataset::Csv(text) => text.is_empty(),
        }
    }

    pub fn as_records(&self) -> Option<&[Record]> {
        match self {
            Dataset::Records(records) => Some(records),
            Dataset::Csv(_) => None,
        }
    }

    pub fn as_csv(&self) -> Option<&str> {
        match self {
            Dataset::Csv(text) => Some(text),
            Dataset::Records(_) => None,
        }
    }

    /// Take the records, failing for a CSV dataset
    pub fn into_records(self) -> Result<Vec<Record>> {
        match self {
            Dataset::Records(records) => Ok(records),
            Dataset::Csv(_) => Err(Error::Other("dataset was fetched as CSV".to_string())),
        }
    }

    /// Take the CSV text, failing for a JSON dataset
    pub fn into_csv(self) -> Result<String> {
        match self {
            Dataset::Csv(text) => Ok(text),
            Dataset::Records(_) => Err(Error::Other("dataset was fetched as JSON".to_string())),
        }
    }
}

/// Collects decoded pages into a [`Dataset`]
#[derive(Debug)]
pub(crate) enum DatasetBuilder {
    Records(Vec<Record>),
    CsvPages(Vec<String>),
}

impl DatasetBuilder {
    pub(crate) fn new(format: ResponseFormat) -> Self {
        match format {
            ResponseFormat::Json => Self::Records(Vec::new()),
            ResponseFormat::Csv => Self::CsvPages(Vec::new()),
        }
    }

    pub(crate) fn push(&mut self, page: Page) -> Result<()> {
        match (self, page) {
            (Self::Records(all), Page::Json { records, .. }) => all.extend(records),
            (Self::CsvPages(pages), Page::Csv { text }) => pages.push(text),
            _ => return Err(Error::malformed("page format does not match the query")),
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> Dataset {
        match self {
            Self::Records(records) => Dataset::Records(records),
            Self::CsvPages(pages) => Dataset::Csv(pages.join(CSV_PAGE_SEPARATOR)),
        }
    }
}

/// Statistics for one fetch
#[derive(Debug, Clone, Default, Serialize)]
pub struct FetchStats {
    /// HTTP requests issued, including a terminating 204
    pub requests: u32,
    /// Pages merged into the dataset
    pub pages: u32,
    /// Records (JSON) or non-empty lines (CSV) merged
    pub records: u64,
    /// Wall time in milliseconds
    pub duration_ms: u64,
}

impl FetchStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment request count
    pub fn add_request(&mut self) {
        self.requests += 1;
    }

    /// Take page and record counts from a finished page walk
    pub fn record_pagination(&mut self, state: &PaginationState) {
        self.pages = state.pages_fetched;
        self.records = state.total_fetched;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
