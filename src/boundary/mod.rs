//! Boundary geometry module
//!
//! GeoJSON boundaries for mapping the statistics, served from a local cache
//! and downloaded on first use.

mod loader;

pub use loader::{BoundaryLoader, BoundarySource, NHS_REGIONS, REGIONS, SOURCES};
