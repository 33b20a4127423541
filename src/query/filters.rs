//! Filter predicates
//!
//! Predicates are plain `key=value` strings. They are never parsed or
//! validated; order is preserved and they are joined with `;`.

use crate::types::AreaType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Separator placed between predicates in the `filters` parameter
pub const FILTER_SEPARATOR: &str = ";";

/// Ordered list of filter predicates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filters(Vec<String>);

impl Filters {
    /// Create an empty filter list
    pub fn new() -> Self {
        Self::default()
    }

    /// `areaType=region`, used when the caller supplies no filters
    pub fn default_region() -> Self {
        Self::new().area_type(AreaType::Region)
    }

    /// Append a raw predicate
    #[must_use]
    pub fn with(mut self, predicate: impl Into<String>) -> Self {
        self.push(predicate);
        self
    }

    /// Append a raw predicate in place
    pub fn push(&mut self, predicate: impl Into<String>) {
        self.0.push(predicate.into());
    }

    /// Append `areaType=<type>`
    #[must_use]
    pub fn area_type(self, area_type: AreaType) -> Self {
        self.with(format!("areaType={area_type}"))
    }

    /// Append `areaName=<name>`
    #[must_use]
    pub fn area_name(self, name: &str) -> Self {
        self.with(format!("areaName={name}"))
    }

    /// Append `areaCode=<code>`
    #[must_use]
    pub fn area_code(self, code: &str) -> Self {
        self.with(format!("areaCode={code}"))
    }

    /// Append `date=YYYY-MM-DD`
    #[must_use]
    pub fn date(self, date: NaiveDate) -> Self {
        self.with(format!("date={}", date.format("%Y-%m-%d")))
    }

    /// The value of the `filters` query parameter
    pub fn joined(&self) -> String {
        self.0.join(FILTER_SEPARATOR)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for Filters {
    fn from(predicates: Vec<String>) -> Self {
        Self(predicates)
    }
}

impl From<&[&str]> for Filters {
    fn from(predicates: &[&str]) -> Self {
        predicates.iter().copied().collect()
    }
}

impl<const N: usize> From<[&str; N]> for Filters {
    fn from(predicates: [&str; N]) -> Self {
        predicates.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Filters {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
