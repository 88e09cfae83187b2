/*
 * cypher-ogm - Object-graph mapping metadata and Cypher pattern expressions
 *
 * Feature-First Architecture:
 * - shared/    : Identity values, host type descriptors, configuration sources
 * - features/  : Vertical slices (metadata → conventions → builder → annotations → cypher)
 * - config/    : Model options (builder API + versioned YAML)
 * - errors.rs  : Crate error type
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::unnecessary_map_or)] // map_or style for compatibility

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{ConfigError, OgmOptions};
pub use errors::{OgmError, Result};
pub use features::annotations::{ConflictPolicy, GeneratedValueKind};
pub use features::builder::{
    EntityBuilder, ModelBuilder, NavigationBuilder, PropertyBuilder, RelationshipBuilder,
};
pub use features::conventions::{Convention, ConventionSet};
pub use features::cypher::{CypherExpression, CypherWriter, PatternFactory};
pub use features::metadata::{
    ForeignKeyId, GraphModel, NavigationRef, NodeId, PropertyRef, SchemaError,
};
pub use features::raw_command::{execute_cypher_raw, CommandExecutor, RawCommand};
pub use shared::models::{
    scalars, ConfigurationSource, GraphType, LabelSet, NodeIdentity, NodeReference, TypeBuilder,
    TypeRef,
};
