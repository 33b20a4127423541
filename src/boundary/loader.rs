//! Cached GeoJSON loader
//!
//! Reads a boundary file from the local cache, or downloads it once and
//! writes it there. Cached files are never refreshed.

use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::types::JsonValue;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// A downloadable boundary dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundarySource {
    /// Short name used on the command line
    pub name: &'static str,
    /// File name inside the cache directory
    pub file_name: &'static str,
    /// Download location
    pub url: &'static str,
    /// What the file contains
    pub description: &'static str,
}

/// NHS Region (Geography) boundaries in England, April 2016, ONS
pub const NHS_REGIONS: BoundarySource = BoundarySource {
    name: "nhs-regions",
    file_name: "nhs_regions.geojson",
    url: "http://geoportal1-ons.opendata.arcgis.com/datasets/0d03007bd13b48ebbeb1d95110338585_0.geojson",
    description: "NHS Regions (Geography) April 2016 full clipped boundaries in England",
};

/// Region boundaries in England, December 2016, ONS
pub const REGIONS: BoundarySource = BoundarySource {
    name: "regions",
    file_name: "regions.geojson",
    url: "http://geoportal1-ons.opendata.arcgis.com/datasets/f99b145881724e15a04a8a113544dfc5_0.geojson?outSR={%22latestWkid%22:27700,%22wkid%22:27700}",
    description: "Regions December 2016 full clipped boundaries in England",
};

/// Every built-in boundary source
pub const SOURCES: [BoundarySource; 2] = [NHS_REGIONS, REGIONS];

impl BoundarySource {
    /// Look up a built-in source by its short name
    pub fn by_name(name: &str) -> Result<Self> {
        SOURCES
            .iter()
            .copied()
            .find(|s| s.name == name)
            .ok_or_else(|| {
                let known: Vec<&str> = SOURCES.iter().map(|s| s.name).collect();
                Error::config(format!(
                    "Unknown boundary source '{name}' (known: {})",
                    known.join(", ")
                ))
            })
    }
}

/// Loads boundary files through a local cache directory
#[derive(Debug, Clone)]
pub struct BoundaryLoader {
    client: HttpClient,
    cache_dir: PathBuf,
}

impl BoundaryLoader {
    /// Create a loader caching into `cache_dir`
    pub fn new(client: HttpClient, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            cache_dir: cache_dir.into(),
        }
    }

    /// Cache directory
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Cache location of a source
    pub fn cache_path(&self, source: &BoundarySource) -> PathBuf {
        self.cache_dir.join(source.file_name)
    }

    /// Load a built-in source
    pub async fn load(&self, source: &BoundarySource) -> Result<JsonValue> {
        self.load_or_fetch(self.cache_path(source), source.url).await
    }

    /// Return the JSON document at `path`, downloading it from `url` first
    /// if the file cannot be read.
    ///
    /// A cached file that is not valid JSON is an error, not a cache miss.
    pub async fn load_or_fetch(&self, path: impl AsRef<Path>, url: &str) -> Result<JsonValue> {
        let path = path.as_ref();

        match tokio::fs::read_to_string(path).await {
            Ok(contents) => {
                debug!("Loaded cached boundary data from {}", path.display());
                return serde_json::from_str(&contents).map_err(|e| {
                    Error::Other(format!("Cached file {} is not valid JSON: {e}", path.display()))
                });
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                error!("No boundary data found at {} - downloading...", path.display());
            }
            Err(e) => {
                error!(
                    "Could not read boundary data at {} ({e}) - downloading...",
                    path.display()
                );
            }
        }

        let data: JsonValue = self.client.get_json(url).await?;
        write_atomic(path, &serde_json::to_string(&data)?).await?;

        let absolute = tokio::fs::canonicalize(path)
            .await
            .unwrap_or_else(|_| path.to_path_buf());
        info!("Wrote data to {}", absolute.display());

        Ok(data)
    }
}

/// Write to a temp file next to `path`, then rename over it
async fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let temp_path = path.with_extension("tmp");
    tokio::fs::write(&temp_path, contents).await?;
    tokio::fs::rename(&temp_path, path).await?;
    Ok(())
}
