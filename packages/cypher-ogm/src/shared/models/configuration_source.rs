//! Configuration source precedence
//!
//! Records who last touched a setting. A setter accepts a new value only when
//! the incoming source is the same as or stronger than the stored one; an
//! update keeps the maximum of the old and new sources.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Precedence token, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigurationSource {
    /// Applied by a convention
    Convention,
    /// Applied from a type or member attribute
    DataAnnotation,
    /// Applied through the fluent builder API
    Explicit,
}

impl ConfigurationSource {
    /// Whether this source may replace a value stored with `existing`
    pub fn overrides(self, existing: Option<ConfigurationSource>) -> bool {
        existing.map_or(true, |existing| self >= existing)
    }

    /// The stronger of this source and `other`
    pub fn max_with(self, other: Option<ConfigurationSource>) -> ConfigurationSource {
        match other {
            Some(other) if other > self => other,
            _ => self,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Convention => "convention",
            Self::DataAnnotation => "data_annotation",
            Self::Explicit => "explicit",
        }
    }
}

impl fmt::Display for ConfigurationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata that tracks the strongest justification for its own definition
pub trait HasConfigurationSource {
    fn configuration_source(&self) -> ConfigurationSource;

    /// Raise the stored source to `source` if it is stronger
    fn update_configuration_source(&mut self, source: ConfigurationSource);
}
