//! Generated-value settings on a property
//!
//! A property has at most one of: a default value, a default storage
//! constraint, a computed storage constraint.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::names;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratedValueKind {
    DefaultValue,
    DefaultStorageConstraint,
    ComputedStorageConstraint,
}

impl GeneratedValueKind {
    pub const ALL: [GeneratedValueKind; 3] = [
        GeneratedValueKind::DefaultValue,
        GeneratedValueKind::DefaultStorageConstraint,
        GeneratedValueKind::ComputedStorageConstraint,
    ];

    pub fn annotation_name(self) -> &'static str {
        match self {
            GeneratedValueKind::DefaultValue => names::DEFAULT_VALUE,
            GeneratedValueKind::DefaultStorageConstraint => names::DEFAULT_STORAGE_CONSTRAINT,
            GeneratedValueKind::ComputedStorageConstraint => names::COMPUTED_STORAGE_CONSTRAINT,
        }
    }

    /// The other two kinds
    pub fn competitors(self) -> impl Iterator<Item = GeneratedValueKind> {
        Self::ALL.into_iter().filter(move |k| *k != self)
    }
}

impl fmt::Display for GeneratedValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GeneratedValueKind::DefaultValue => "a default value",
            GeneratedValueKind::DefaultStorageConstraint => "a default storage constraint",
            GeneratedValueKind::ComputedStorageConstraint => "a computed storage constraint",
        };
        f.write_str(text)
    }
}

/// What to do when a competing generated-value setting is already present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Fail with `ConflictingGeneratedValue`
    #[default]
    Throw,
    /// Remove the competing settings
    Clear,
}
