//! Decoder types and traits
//!
//! Defines the decoded page and the decoder abstraction.

use super::decoders::{CsvPageDecoder, JsonPageDecoder};
use crate::error::Result;
use crate::types::{Record, ResponseFormat};

/// One decoded response
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    /// JSON page: its records and the server's continuation cursor
    Json {
        /// Records from `data`, in server order
        records: Vec<Record>,
        /// `pagination.next`; `None` when the server sent null
        next: Option<String>,
    },
    /// CSV page body, header removed on pages after the first, trimmed
    Csv {
        /// Page text
        text: String,
    },
}

impl Page {
    /// Number of records (JSON) or non-empty lines (CSV) on this page
    pub fn len(&self) -> usize {
        match self {
            Page::Json { records, .. } => records.len(),
            Page::Csv { text } => text.lines().filter(|l| !l.trim().is_empty()).count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The continuation cursor, JSON pages only
    pub fn next_cursor(&self) -> Option<&str> {
        match self {
            Page::Json { next, .. } => next.as_deref(),
            Page::Csv { .. } => None,
        }
    }
}

/// Trait for decoding one response body into a page
pub trait PageDecoder: Send + Sync {
    /// Decode `body`, which was served for 1-based `page_number`
    fn decode(&self, body: &str, page_number: u32) -> Result<Page>;
}

/// Decoder matching a response format
pub fn decoder_for(format: ResponseFormat) -> Box<dyn PageDecoder> {
    match format {
        ResponseFormat::Json => Box::new(JsonPageDecoder::new()),
        ResponseFormat::Csv => Box::new(CsvPageDecoder::new()),
    }
}
