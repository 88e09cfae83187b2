//! Options file I/O (YAML)
//!
//! Versioned schema. Fields left out of the file keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::options::OgmOptions;
use super::provenance::ConfigSource;
use super::validation::Validatable;
use crate::features::annotations::ConflictPolicy;

const SUPPORTED_VERSIONS: [u32; 1] = [1];

/// YAML Schema v1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionsFileV1 {
    /// Schema version (always 1 for v1)
    pub version: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_convention_iterations: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_policy: Option<ConflictPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependent_label_separator: Option<String>,
}

impl OgmOptions {
    /// Parse and validate options from YAML text. `origin` is recorded as
    /// the provenance of every field the text sets.
    pub fn from_yaml_str(content: &str, origin: &str) -> ConfigResult<Self> {
        let raw: serde_yaml::Value = serde_yaml::from_str(content)?;
        let version = raw
            .get("version")
            .ok_or(ConfigError::MissingVersion)?
            .as_u64()
            .ok_or(ConfigError::MissingVersion)?;
        let version = u32::try_from(version).unwrap_or(u32::MAX);
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let file: OptionsFileV1 = serde_yaml::from_value(raw)?;
        let source = || ConfigSource::Yaml {
            path: origin.to_string(),
        };

        let mut options = OgmOptions::default();
        if let Some(limit) = file.max_convention_iterations {
            options.max_convention_iterations = limit;
            options
                .provenance_mut()
                .track_field("max_convention_iterations", source());
        }
        if let Some(policy) = file.conflict_policy {
            options.conflict_policy = policy;
            options
                .provenance_mut()
                .track_field("conflict_policy", source());
        }
        if let Some(separator) = file.dependent_label_separator {
            options.dependent_label_separator = separator;
            options
                .provenance_mut()
                .track_field("dependent_label_separator", source());
        }

        options.validate()?;
        Ok(options)
    }

    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content, &path.display().to_string())
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = OptionsFileV1 {
            version: 1,
            max_convention_iterations: Some(self.max_convention_iterations),
            conflict_policy: Some(self.conflict_policy),
            dependent_label_separator: Some(self.dependent_label_separator.clone()),
        };
        serde_yaml::to_string(&file).map_err(ConfigError::Yaml)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }
}
