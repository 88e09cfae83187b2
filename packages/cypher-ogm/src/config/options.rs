//! Model options

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::provenance::{ConfigProvenance, ConfigSource};
use super::validation::Validatable;
use crate::features::annotations::ConflictPolicy;

/// Default replay ceiling for the convention dispatcher
pub const DEFAULT_MAX_CONVENTION_ITERATIONS: usize = i16::MAX as usize;

const MAX_CONVENTION_ITERATIONS_LIMIT: usize = 1_000_000;

/// Options for one graph model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OgmOptions {
    /// Replayed events allowed per outermost batch before `ConventionLoop`
    pub max_convention_iterations: usize,

    /// Policy for competing generated-value settings set through the views
    pub conflict_policy: ConflictPolicy,

    /// Joins a defining node's label with the navigation name for
    /// dependent entity labels
    pub dependent_label_separator: String,

    #[serde(skip)]
    provenance: ConfigProvenance,
}

impl Default for OgmOptions {
    fn default() -> Self {
        Self {
            max_convention_iterations: DEFAULT_MAX_CONVENTION_ITERATIONS,
            conflict_policy: ConflictPolicy::Throw,
            dependent_label_separator: "_".to_string(),
            provenance: ConfigProvenance::new(),
        }
    }
}

impl OgmOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_convention_iterations(mut self, limit: usize) -> Self {
        self.max_convention_iterations = limit;
        self.provenance
            .track_field("max_convention_iterations", ConfigSource::Builder);
        self
    }

    pub fn conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self.provenance
            .track_field("conflict_policy", ConfigSource::Builder);
        self
    }

    pub fn dependent_label_separator(mut self, separator: impl Into<String>) -> Self {
        self.dependent_label_separator = separator.into();
        self.provenance
            .track_field("dependent_label_separator", ConfigSource::Builder);
        self
    }

    pub fn provenance(&self) -> &ConfigProvenance {
        &self.provenance
    }

    pub(crate) fn provenance_mut(&mut self) -> &mut ConfigProvenance {
        &mut self.provenance
    }
}

impl Validatable for OgmOptions {
    fn validate(&self) -> ConfigResult<()> {
        if !(1..=MAX_CONVENTION_ITERATIONS_LIMIT).contains(&self.max_convention_iterations) {
            return Err(ConfigError::range_with_hint(
                "max_convention_iterations",
                self.max_convention_iterations,
                1,
                MAX_CONVENTION_ITERATIONS_LIMIT,
                "At least one replayed event must be allowed",
            ));
        }
        if self.dependent_label_separator.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "dependent_label_separator '{}' must not contain whitespace",
                self.dependent_label_separator
            )));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "OgmOptions"
    }
}
