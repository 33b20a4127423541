//! Page decoder module
//!
//! Supports: JSON envelope pages, CSV text pages
//!
//! # Overview
//!
//! A decoder turns one response body into a [`Page`]. JSON decoding pulls
//! the `data` records and the `pagination.next` cursor out of the envelope;
//! CSV decoding drops the repeated header line on later pages and trims the
//! text.

mod decoders;
mod types;

pub use decoders::{CsvPageDecoder, JsonPageDecoder};
pub use types::{decoder_for, Page, PageDecoder};
