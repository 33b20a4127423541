//! Error types for coronaviz-data
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! A fetch either yields the complete dataset or one of these errors; there
//! is no partial-result mode.

use thiserror::Error;

/// The main error type for coronaviz-data
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Any response with status >= 400. Carries the raw body for diagnostics.
    #[error("Request failed (HTTP {status}): {body}")]
    Request { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a request error from a failed response
    pub fn request(status: u16, body: impl Into<String>) -> Self {
        Self::Request {
            status,
            body: body.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Response body attached to a request error, if any
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Error::Request { body, .. } => Some(body),
            _ => None,
        }
    }

    /// HTTP status attached to a request error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for coronaviz-data
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::request(404, "Not found");
        assert_eq!(err.to_string(), "Request failed (HTTP 404): Not found");

        let err = Error::malformed("missing 'data'");
        assert_eq!(err.to_string(), "Malformed response: missing 'data'");
    }

    #[test]
    fn test_request_error_accessors() {
        let err = Error::request(500, "upstream exploded");
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.response_body(), Some("upstream exploded"));

        let err = Error::config("nope");
        assert_eq!(err.status(), None);
        assert_eq!(err.response_body(), None);
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }

    #[test]
    fn test_io_error_with_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));
        let err = result
            .with_context(|| "reading regions.geojson".to_string())
            .unwrap_err();
        assert!(err.to_string().starts_with("reading regions.geojson: IO error"));
    }
}
