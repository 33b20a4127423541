// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]

//! # coronaviz-data
//!
//! Fetch paginated statistics from the UK coronavirus dashboard API and
//! aggregate them into one dataset.
//!
//! ## Features
//!
//! - **Page Walk**: requests `page=1, 2, ...` until the server says stop
//! - **JSON Records**: `data` arrays from every page merged in order
//! - **CSV Text**: pages concatenated with the repeated header removed
//! - **Boundary Data**: ONS GeoJSON boundaries cached on disk after first download
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coronaviz_data::{DatasetFetcher, Filters, Structure, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let fetcher = DatasetFetcher::new()?;
//!
//!     let structure = Structure::new()
//!         .field("date", "date")
//!         .field("newCases", "newCasesByPublishDate");
//!
//!     let records = fetcher
//!         .fetch_json(["areaType=nation", "areaName=england"], structure)
//!         .await?;
//!
//!     println!("{} rows", records.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                     DatasetFetcher                        │
//! │   fetch(Query) → Dataset::Records | Dataset::Csv          │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────┬─────────────────┼───────────────┬──────────────┐
//! │  Query   │      HTTP       │   Paginate    │    Decode    │
//! ├──────────┼─────────────────┼───────────────┼──────────────┤
//! │ Filters  │ 10s timeout     │ Next cursor   │ JSON envelope│
//! │ Structure│ >=400 → error   │ 204 No Content│ CSV header   │
//! │ Format   │ no retries      │               │   stripping  │
//! └──────────┴─────────────────┴───────────────┴──────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Filters, structure and query parameters
pub mod query;

/// HTTP client
pub mod http;

/// Page-walk stopping rules
pub mod pagination;

/// Page decoders (JSON, CSV)
pub mod decode;

/// Paginated dataset fetcher
pub mod fetcher;

/// Cached boundary GeoJSON
pub mod boundary;

/// Configuration file
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use fetcher::{Dataset, DatasetFetcher, FetchStats, DEFAULT_ENDPOINT};
pub use query::{default_structure, Filters, Query, Structure};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
