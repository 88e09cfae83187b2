//! Error types for cypher-ogm
//!
//! Provides unified error handling across the crate. Every error is returned
//! to the immediate caller; nothing is retried or swallowed internally.

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::annotations::GeneratedValueKind;
use crate::features::metadata::SchemaError;

/// Main error type for cypher-ogm operations
#[derive(Debug, Error)]
pub enum OgmError {
    /// Malformed input rejected at the builder boundary
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// Schema invariant violated by a mutating call
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Competing generated-value settings on one property (strict policy)
    #[error(
        "Cannot configure {requested} for property '{property}' on '{entity}' because {existing} is already configured"
    )]
    ConflictingGeneratedValue {
        entity: String,
        property: String,
        requested: GeneratedValueKind,
        existing: GeneratedValueKind,
    },

    /// Convention replay exceeded the iteration ceiling
    #[error("Convention processing exceeded {limit} iterations. A convention keeps re-triggering itself")]
    ConventionLoop { limit: usize },

    /// A queued event was appended to a scope that is already being replayed
    #[error("Cannot queue '{event}' into a convention scope that has already been replayed")]
    ConventionScopeClosed { event: String },

    /// A host service required by the operation is not a graph provider
    #[error("'{operation}' requires a graph provider, but the configured provider is '{provider}'")]
    ServiceUnavailable { operation: String, provider: String },

    /// Metadata referenced by a handle no longer exists
    #[error("{kind} '{name}' was not found in the graph")]
    NotFound { kind: &'static str, name: String },

    /// A convention vetoed or removed the metadata being configured
    #[error("{kind} '{name}' was removed by a convention while being configured")]
    Detached { kind: &'static str, name: String },

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl OgmError {
    /// Create an invalid argument error
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        OgmError::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        OgmError::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Create a detached error
    pub fn detached(kind: &'static str, name: impl Into<String>) -> Self {
        OgmError::Detached {
            kind,
            name: name.into(),
        }
    }

    /// Returns the schema error if this is a schema invariant violation
    pub fn as_schema(&self) -> Option<&SchemaError> {
        match self {
            OgmError::Schema(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type alias for cypher-ogm operations
pub type Result<T> = std::result::Result<T, OgmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = OgmError::invalid_argument("labels", "must not be empty");
        let msg = err.to_string();
        assert!(msg.contains("labels"));
        assert!(msg.contains("must not be empty"));
    }

    #[test]
    fn test_schema_error_is_transparent() {
        let err: OgmError = SchemaError::CircularInheritance {
            entity: "A".to_string(),
            base: "C".to_string(),
        }
        .into();

        assert!(err.as_schema().is_some());
        assert!(err.to_string().contains("circular"));
    }

    #[test]
    fn test_convention_loop_display() {
        let err = OgmError::ConventionLoop { limit: 32767 };
        assert!(err.to_string().contains("32767"));
    }
}
