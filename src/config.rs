//! Configuration for the fetcher and the boundary loader
//!
//! Loaded from YAML. Every field has a default, so an empty file is valid:
//!
//! ```yaml
//! endpoint: https://api.coronavirus.data.gov.uk/v1/data
//! timeout_secs: 10
//! default_filters:
//!   - areaType=region
//! boundary_cache_dir: ./geo
//! ```

use crate::error::{Error, Result};
use crate::fetcher::DEFAULT_ENDPOINT;
use crate::http::HttpClientConfig;
use crate::query::Filters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Complete configuration loaded from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Dataset endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Filters used when a command is given none
    #[serde(default = "Filters::default_region")]
    pub default_filters: Filters,

    /// Directory holding cached boundary GeoJSON files
    #[serde(default = "default_cache_dir")]
    pub boundary_cache_dir: PathBuf,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            headers: HashMap::new(),
            default_filters: Filters::default_region(),
            boundary_cache_dir: default_cache_dir(),
        }
    }
}

impl FetcherConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // An empty document deserializes as null
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Check the endpoint URL and the timeout
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.endpoint)?;
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// HTTP client settings derived from this config
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder().timeout(self.timeout());
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }
        builder.build()
    }
}
