//! Raw Cypher command execution
//!
//! A command template uses positional `{0}`, `{1}` placeholders. They are
//! rewritten to named parameters `$p0`, `$p1` and the values are handed to
//! the host executor, which returns the affected-row count.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use crate::errors::{OgmError, Result};
use crate::features::cypher::CypherValue;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\d+)\}").expect("valid placeholder regex"));

/// Command text plus its named parameters, in placeholder order
#[derive(Debug, Clone, PartialEq)]
pub struct RawCommand {
    text: String,
    parameters: Vec<(String, CypherValue)>,
}

impl RawCommand {
    pub fn from_template(template: &str, values: Vec<CypherValue>) -> Result<Self> {
        if template.trim().is_empty() {
            return Err(OgmError::invalid_argument("template", "must not be empty"));
        }

        let mut missing = None;
        let text = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
            let index: usize = caps[1].parse().unwrap_or(usize::MAX);
            if index >= values.len() {
                missing.get_or_insert(caps[0].to_string());
            }
            format!("$p{}", &caps[1])
        });
        if let Some(placeholder) = missing {
            return Err(OgmError::invalid_argument(
                "parameters",
                format!(
                    "placeholder {} has no value ({} supplied)",
                    placeholder,
                    values.len()
                ),
            ));
        }

        let parameters = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| (format!("p{}", i), value))
            .collect();
        Ok(Self {
            text: text.into_owned(),
            parameters,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parameters(&self) -> &[(String, CypherValue)] {
        &self.parameters
    }
}

/// Host-provided command executor
pub trait CommandExecutor {
    /// Provider name used in diagnostics
    fn provider(&self) -> &str;

    /// Whether the executor talks to a graph database
    fn is_graph_provider(&self) -> bool;

    /// Run the command and return the affected-row count
    fn execute(&mut self, command: &RawCommand) -> Result<usize>;
}

/// Rewrite `template` and run it. Fails before any I/O when the executor is
/// not a graph provider.
pub fn execute_cypher_raw(
    executor: &mut dyn CommandExecutor,
    template: &str,
    values: Vec<CypherValue>,
) -> Result<usize> {
    if !executor.is_graph_provider() {
        return Err(OgmError::ServiceUnavailable {
            operation: "execute_cypher_raw".to_string(),
            provider: executor.provider().to_string(),
        });
    }
    let command = RawCommand::from_template(template, values)?;
    debug!(text = command.text(), parameters = command.parameters().len(), "executing raw cypher");
    executor.execute(&command)
}
