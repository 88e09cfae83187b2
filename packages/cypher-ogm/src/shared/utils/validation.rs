//! Argument checks applied at the builder boundary

use crate::errors::{OgmError, Result};

/// Reject empty or whitespace-only names
pub fn check_identifier(argument: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(OgmError::invalid_argument(
            argument,
            "must not be empty or whitespace",
        ));
    }
    Ok(())
}

/// Reject empty label arrays and arrays with empty or whitespace entries
pub fn check_labels<S: AsRef<str>>(labels: &[S]) -> Result<()> {
    if labels.is_empty() {
        return Err(OgmError::invalid_argument(
            "labels",
            "at least one label is required",
        ));
    }

    if let Some(position) = labels.iter().position(|l| l.as_ref().trim().is_empty()) {
        return Err(OgmError::invalid_argument(
            "labels",
            format!("label at position {} is empty or whitespace", position),
        ));
    }

    Ok(())
}
