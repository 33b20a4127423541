//! CLI module
//!
//! Command-line interface for fetching datasets.
//!
//! # Commands
//!
//! - `fetch` - Fetch every page for the given filters and structure
//! - `latest` - Fetch the default structure (regions unless filtered)
//! - `structure` - Print the default structure
//! - `area-types` - List area types
//! - `boundaries` - Load a boundary GeoJSON file, downloading it if needed

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
