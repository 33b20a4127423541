//! Decoder implementations
//!
//! Each decoder handles one response format.

use super::types::{Page, PageDecoder};
use crate::error::{Error, Result};
use serde_json::Value;

/// Path of the records array in a JSON page
pub const RECORD_PATH: &str = "data";

/// Path of the continuation cursor in a JSON page
pub const NEXT_PATH: &str = "pagination.next";

// ============================================================================
// JSON Decoder
// ============================================================================

/// Decoder for the `{ data: [...], pagination: { next: ... } }` envelope.
///
/// Both paths must be present. A null cursor means this is the last page.
#[derive(Debug, Clone, Default)]
pub struct JsonPageDecoder;

impl JsonPageDecoder {
    /// Create a decoder for the standard envelope
    pub fn new() -> Self {
        Self
    }
}

impl PageDecoder for JsonPageDecoder {
    fn decode(&self, body: &str, page_number: u32) -> Result<Page> {
        let value: Value = serde_json::from_str(body).map_err(|e| {
            Error::malformed(format!("page {page_number} is not valid JSON: {e}"))
        })?;

        let records = match extract_simple_path(&value, RECORD_PATH) {
            Some(Value::Array(records)) => records.clone(),
            Some(other) => {
                return Err(Error::malformed(format!(
                    "page {page_number}: '{RECORD_PATH}' is not an array (got {})",
                    type_name(other)
                )))
            }
            None => {
                return Err(Error::malformed(format!(
                    "page {page_number}: missing '{RECORD_PATH}'"
                )))
            }
        };

        let next = match extract_simple_path(&value, NEXT_PATH) {
            Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None => {
                return Err(Error::malformed(format!(
                    "page {page_number}: missing '{NEXT_PATH}'"
                )))
            }
        };

        Ok(Page::Json { records, next })
    }
}

// ============================================================================
// CSV Decoder
// ============================================================================

/// Decoder for raw CSV pages.
///
/// Every page repeats the header line; it is kept on page 1 only. The
/// remaining text is trimmed of surrounding whitespace. The text itself is
/// not parsed.
#[derive(Debug, Clone, Default)]
pub struct CsvPageDecoder;

impl CsvPageDecoder {
    /// Create a new CSV decoder
    pub fn new() -> Self {
        Self
    }
}

impl PageDecoder for CsvPageDecoder {
    fn decode(&self, body: &str, page_number: u32) -> Result<Page> {
        let content = if page_number > 1 {
            strip_first_line(body)
        } else {
            body
        };

        Ok(Page::Csv {
            text: content.trim().to_string(),
        })
    }
}

/// Everything after the first `\n`, or nothing if there is no newline
fn strip_first_line(text: &str) -> &str {
    text.split_once('\n').map_or("", |(_, rest)| rest)
}

// ============================================================================
// Helpers
// ============================================================================

/// Walk a dot-separated path through nested objects
fn extract_simple_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for part in path.split('.') {
        match current {
            Value::Object(map) => current = map.get(part)?,
            _ => return None,
        }
    }

    Some(current)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
