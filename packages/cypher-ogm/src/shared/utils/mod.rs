//! Shared utilities

pub mod validation;

pub use validation::{check_identifier, check_labels};
