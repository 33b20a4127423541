//! HTTP client module
//!
//! Thin wrapper over `reqwest` used for every outbound call.
//!
//! # Features
//!
//! - **Fixed Timeout**: 10 seconds per request unless configured otherwise
//! - **Status Classification**: any status >= 400 becomes `Error::Request`
//!   carrying the response body
//! - **Single Attempt**: requests are never retried

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
