//! Configuration provenance tracking
//!
//! Track where each option value came from (defaults, YAML, builder)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name → source of its current value. Fields not listed hold defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigProvenance {
    field_sources: BTreeMap<String, ConfigSource>,
}

/// Configuration source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Built-in default
    Default,

    /// From YAML file
    Yaml { path: String },

    /// From builder API
    Builder,
}

impl ConfigProvenance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record field-level override
    pub fn track_field(&mut self, field: &str, source: ConfigSource) {
        self.field_sources.insert(field.to_string(), source);
    }

    /// Source for a field; `Default` when never overridden
    pub fn source(&self, field: &str) -> ConfigSource {
        self.field_sources
            .get(field)
            .cloned()
            .unwrap_or(ConfigSource::Default)
    }

    pub fn field_sources(&self) -> &BTreeMap<String, ConfigSource> {
        &self.field_sources
    }

    /// Human-readable summary
    pub fn summary(&self) -> String {
        if self.field_sources.is_empty() {
            return "All options at defaults".to_string();
        }
        let mut lines = vec!["Overridden options:".to_string()];
        for (field, source) in &self.field_sources {
            lines.push(format!("  {} ← {}", field, source.describe()));
        }
        lines.join("\n")
    }
}

impl ConfigSource {
    /// Short description
    pub fn describe(&self) -> String {
        match self {
            ConfigSource::Default => "default".to_string(),
            ConfigSource::Yaml { path } => format!("yaml:{}", path),
            ConfigSource::Builder => "builder".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provenance_tracking() {
        let mut prov = ConfigProvenance::new();
        assert_eq!(prov.source("conflict_policy"), ConfigSource::Default);

        prov.track_field("conflict_policy", ConfigSource::Builder);
        assert_eq!(prov.source("conflict_policy"), ConfigSource::Builder);
        assert!(prov.summary().contains("conflict_policy ← builder"));
    }
}
