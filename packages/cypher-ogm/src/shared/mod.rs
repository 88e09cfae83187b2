//! Shared module - Common types and utilities
//!
//! Identity values, host type descriptors and configuration-source precedence
//! shared by every feature.

pub mod models;
pub mod utils;

// Re-exports for convenience
pub use models::*;
