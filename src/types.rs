//! Common types used throughout coronaviz-data
//!
//! Shared type aliases, the area-type enumeration and the response format.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// One row returned by the API. Fields are whatever the server sends back.
pub type Record = JsonValue;

// ============================================================================
// Area Type
// ============================================================================

/// Geographical granularity understood by the `areaType` filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaType {
    /// Overview data for the United Kingdom
    #[serde(rename = "overview")]
    Overview,
    /// Nation data (England, Northern Ireland, Scotland, and Wales)
    #[serde(rename = "nation")]
    Nation,
    /// Region data
    #[serde(rename = "region")]
    Region,
    /// NHS Region data
    #[serde(rename = "nhsRegion")]
    NhsRegion,
    /// Upper-tier local authority data
    #[serde(rename = "utla")]
    UpperTierLocalAuthority,
    /// Lower-tier local authority data
    #[serde(rename = "ltla")]
    LowerTierLocalAuthority,
}

impl AreaType {
    /// Every area type, coarsest first
    pub const ALL: [AreaType; 6] = [
        AreaType::Overview,
        AreaType::Nation,
        AreaType::Region,
        AreaType::NhsRegion,
        AreaType::UpperTierLocalAuthority,
        AreaType::LowerTierLocalAuthority,
    ];

    /// Name used by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            AreaType::Overview => "overview",
            AreaType::Nation => "nation",
            AreaType::Region => "region",
            AreaType::NhsRegion => "nhsRegion",
            AreaType::UpperTierLocalAuthority => "utla",
            AreaType::LowerTierLocalAuthority => "ltla",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            AreaType::Overview => "Overview data for the United Kingdom",
            AreaType::Nation => "Nation data (England, Northern Ireland, Scotland, and Wales)",
            AreaType::Region => "Region data",
            AreaType::NhsRegion => "NHS Region data",
            AreaType::UpperTierLocalAuthority => "Upper-tier local authority data",
            AreaType::LowerTierLocalAuthority => "Lower-tier local authority data",
        }
    }
}

impl fmt::Display for AreaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AreaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "overview" => Ok(AreaType::Overview),
            "nation" => Ok(AreaType::Nation),
            "region" => Ok(AreaType::Region),
            "nhsRegion" | "nhs-region" | "nhs_region" => Ok(AreaType::NhsRegion),
            "utla" | "upper-tier-local-authority" => Ok(AreaType::UpperTierLocalAuthority),
            "ltla" | "lower-tier-local-authority" => Ok(AreaType::LowerTierLocalAuthority),
            other => Err(Error::config(format!("Unknown area type: {other}"))),
        }
    }
}

// ============================================================================
// Response Format
// ============================================================================

/// Body format requested from the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// JSON envelope with `data` and `pagination`
    #[default]
    Json,
    /// Raw CSV text, header line first
    Csv,
}

impl ResponseFormat {
    /// Value of the `format` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Csv => "csv",
        }
    }

    /// Pick the format from the `as_csv` switch
    pub fn from_csv_flag(as_csv: bool) -> Self {
        if as_csv {
            ResponseFormat::Csv
        } else {
            ResponseFormat::Json
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
