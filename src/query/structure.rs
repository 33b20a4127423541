//! Field structure
//!
//! Maps output field names to source field names (or nested structures).
//! Keys keep insertion order; re-inserting a key replaces its value but keeps
//! its first position, so a table with a repeated key behaves like a
//! dictionary literal: the last value wins.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Field table sent when the caller supplies no structure.
///
/// `cumCasesBySpecimenDateRate` appears twice; the second entry replaces the
/// first when the table is turned into a [`Structure`].
pub const DEFAULT_STRUCTURE_FIELDS: &[(&str, &str)] = &[
    ("areaType", "areaType"),
    ("areaName", "areaName"),
    ("areaCode", "areaCode"),
    ("date", "date"),
    ("hash", "hash"),
    ("newCasesByPublishDate", "newCasesByPublishDate"),
    ("cumCasesByPublishDate", "cumCasesByPublishDate"),
    ("cumCasesBySpecimenDateRate", "cumCasesBySpecimenDateRate"),
    ("newCasesBySpecimenDate", "newCasesBySpecimenDate"),
    ("cumCasesBySpecimenDateRate", "cumCasesBySpecimenDateRate"),
    ("cumCasesBySpecimenDate", "cumCasesBySpecimenDate"),
    ("maleCases", "maleCases"),
    ("femaleCases", "femaleCases"),
    ("newPillarOneTestsByPublishDate", "newPillarOneTestsByPublishDate"),
    ("cumPillarOneTestsByPublishDate", "cumPillarOneTestsByPublishDate"),
    ("newPillarTwoTestsByPublishDate", "newPillarTwoTestsByPublishDate"),
    ("cumPillarTwoTestsByPublishDate", "cumPillarTwoTestsByPublishDate"),
    ("newPillarThreeTestsByPublishDate", "newPillarThreeTestsByPublishDate"),
    ("cumPillarThreeTestsByPublishDate", "cumPillarThreeTestsByPublishDate"),
    ("newPillarFourTestsByPublishDate", "newPillarFourTestsByPublishDate"),
    ("cumPillarFourTestsByPublishDate", "cumPillarFourTestsByPublishDate"),
    ("newAdmissions", "newAdmissions"),
    ("cumAdmissions", "cumAdmissions"),
    ("cumAdmissionsByAge", "cumAdmissionsByAge"),
    ("cumTestsByPublishDate", "cumTestsByPublishDate"),
    ("newTestsByPublishDate", "newTestsByPublishDate"),
    ("covidOccupiedMVBeds", "covidOccupiedMVBeds"),
    ("hospitalCases", "hospitalCases"),
    ("plannedCapacityByPublishDate", "plannedCapacityByPublishDate"),
    ("newDeaths28DaysByPublishDate", "newDeaths28DaysByPublishDate"),
    ("cumDeaths28DaysByPublishDate", "cumDeaths28DaysByPublishDate"),
    ("cumDeaths28DaysByPublishDateRate", "cumDeaths28DaysByPublishDateRate"),
    ("newDeaths28DaysByDeathDate", "newDeaths28DaysByDeathDate"),
    ("cumDeaths28DaysByDeathDate", "cumDeaths28DaysByDeathDate"),
    ("cumDeaths28DaysByDeathDateRate", "cumDeaths28DaysByDeathDateRate"),
];

static DEFAULT_STRUCTURE: LazyLock<Structure> =
    LazyLock::new(|| Structure::from_pairs(DEFAULT_STRUCTURE_FIELDS.iter().copied()));

/// The structure used when the caller supplies none
pub fn default_structure() -> &'static Structure {
    &DEFAULT_STRUCTURE
}

/// Output field mapping sent as the `structure` parameter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Structure(JsonObject);

impl Structure {
    /// Create an empty structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(output, source)` pairs, later pairs replacing earlier ones
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut structure = Self::new();
        for (name, source) in pairs {
            structure.insert_field(name, source);
        }
        structure
    }

    /// Parse a structure from a JSON object literal.
    ///
    /// Values must be strings or nested objects. Repeated keys resolve to the
    /// last value.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(json)?;
        Self::try_from(value)
    }

    /// Add `name -> source`
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert_field(name, source);
        self
    }

    /// Add `name -> { ... }`
    #[must_use]
    pub fn nested(mut self, name: impl Into<String>, inner: Structure) -> Self {
        self.0.insert(name.into(), JsonValue::Object(inner.0));
        self
    }

    /// Insert `name -> source` in place, returning the replaced value if any
    pub fn insert_field(
        &mut self,
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Option<JsonValue> {
        self.0
            .insert(name.into(), JsonValue::String(source.into()))
    }

    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.0.get(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize with no whitespace between tokens
    pub fn to_compact_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }
}

impl TryFrom<JsonValue> for Structure {
    type Error = Error;

    fn try_from(value: JsonValue) -> Result<Self> {
        let JsonValue::Object(map) = value else {
            return Err(Error::config("Structure must be a JSON object"));
        };
        check_values(&map)?;
        Ok(Self(map))
    }
}

fn check_values(map: &JsonObject) -> Result<()> {
    for (key, value) in map {
        match value {
            JsonValue::String(_) => {}
            JsonValue::Object(inner) => check_values(inner)?,
            _ => {
                return Err(Error::config(format!(
                    "Structure field '{key}' must map to a string or an object"
                )))
            }
        }
    }
    Ok(())
}
