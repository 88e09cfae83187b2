//! Two-stage relationship join
//!
//! `outer` rows join relationship rows on the relationship's start
//! endpoint, and the result joins `inner` rows on the end endpoint. Each
//! stage is a build/probe hash join keyed on field values; rows with a
//! missing or null key never match.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::errors::{OgmError, Result};
use crate::features::cypher::CypherValue;

use crate::features::pattern_join::domain::{JoinedRow, Record, ShapeId, ShapeRegistry};

pub const OUTER_SLOT: &str = "outer";
pub const RELATIONSHIP_SLOT: &str = "relationship";
pub const INNER_SLOT: &str = "inner";

/// Key fields for each side of the join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinSelectors {
    /// Field of the outer record matched against `start_key`
    pub outer_key: String,
    /// Relationship field naming its start endpoint
    pub start_key: String,
    /// Relationship field naming its end endpoint
    pub end_key: String,
    /// Field of the inner record matched against `end_key`
    pub inner_key: String,
}

impl JoinSelectors {
    pub fn new(outer_key: &str, start_key: &str, end_key: &str, inner_key: &str) -> Self {
        Self {
            outer_key: outer_key.to_string(),
            start_key: start_key.to_string(),
            end_key: end_key.to_string(),
            inner_key: inner_key.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct JoinStage {
    /// Slot of the left row holding the key record
    left_slot: usize,
    left_key: String,
    right_key: String,
    output: ShapeId,
}

/// Compiled join: two stages and the shapes their rows take
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinPlan {
    input: ShapeId,
    first: JoinStage,
    second: JoinStage,
}

/// Compilation context owning the shapes plans refer to
#[derive(Debug, Default)]
pub struct JoinContext {
    shapes: ShapeRegistry,
}

impl JoinContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> &ShapeRegistry {
        &self.shapes
    }

    pub fn plan(&mut self, selectors: &JoinSelectors) -> Result<JoinPlan> {
        for (argument, key) in [
            ("outer_key", &selectors.outer_key),
            ("start_key", &selectors.start_key),
            ("end_key", &selectors.end_key),
            ("inner_key", &selectors.inner_key),
        ] {
            if key.trim().is_empty() {
                return Err(OgmError::invalid_argument(argument, "must not be empty"));
            }
        }

        let input = self.shapes.intern(&[OUTER_SLOT]);
        let paired = self.shapes.intern(&[OUTER_SLOT, RELATIONSHIP_SLOT]);
        let triple = self.shapes.intern(&[OUTER_SLOT, RELATIONSHIP_SLOT, INNER_SLOT]);

        Ok(JoinPlan {
            input,
            first: JoinStage {
                left_slot: 0,
                left_key: selectors.outer_key.clone(),
                right_key: selectors.start_key.clone(),
                output: paired,
            },
            second: JoinStage {
                left_slot: 1,
                left_key: selectors.end_key.clone(),
                right_key: selectors.inner_key.clone(),
                output: triple,
            },
        })
    }
}

impl JoinPlan {
    /// Shape of the rows `evaluate` returns
    pub fn output_shape(&self) -> ShapeId {
        self.second.output
    }

    /// Matched `(outer, relationship, inner)` triples, in outer order
    pub fn evaluate(&self, outer: &[Record], relationships: &[Record], inner: &[Record]) -> Vec<JoinedRow> {
        let rows: Vec<JoinedRow> = outer
            .iter()
            .map(|r| JoinedRow {
                shape: self.input,
                slots: vec![r.clone()],
            })
            .collect();

        let paired = hash_join(&self.first, rows, relationships);
        debug!(rows = paired.len(), "relationship join: start endpoint");
        let triples = hash_join(&self.second, paired, inner);
        debug!(rows = triples.len(), "relationship join: end endpoint");
        triples
    }

    /// Map each matched triple through `select`, in outer order
    pub fn evaluate_with<R, F>(
        &self,
        outer: &[Record],
        relationships: &[Record],
        inner: &[Record],
        mut select: F,
    ) -> Vec<R>
    where
        F: FnMut(&Record, &Record, &Record) -> R,
    {
        self.evaluate(outer, relationships, inner)
            .iter()
            .filter_map(|row| match row.slots() {
                [o, r, i] => Some(select(o, r, i)),
                _ => None,
            })
            .collect()
    }
}

fn join_key<'r>(record: &'r Record, field: &str) -> Option<&'r CypherValue> {
    record.get(field).filter(|v| !v.is_null())
}

fn hash_join(stage: &JoinStage, left: Vec<JoinedRow>, right: &[Record]) -> Vec<JoinedRow> {
    let mut table: FxHashMap<&CypherValue, Vec<usize>> = FxHashMap::default();
    for (index, record) in right.iter().enumerate() {
        if let Some(key) = join_key(record, &stage.right_key) {
            table.entry(key).or_default().push(index);
        }
    }

    let mut output = Vec::new();
    for row in left {
        let Some(key) = row
            .slot(stage.left_slot)
            .and_then(|record| join_key(record, &stage.left_key))
        else {
            continue;
        };
        let Some(matches) = table.get(key) else {
            continue;
        };
        for &index in matches {
            let mut slots = row.slots.clone();
            slots.push(right[index].clone());
            output.push(JoinedRow {
                shape: stage.output,
                slots,
            });
        }
    }
    output
}
