//! Records and joined rows

use std::collections::BTreeMap;

use crate::features::cypher::CypherValue;

use super::shape::ShapeId;

/// One materialized node or relationship: field name to value
pub type Record = BTreeMap<String, CypherValue>;

/// Build a record from `(field, value)` pairs
pub fn record<I, K, V>(fields: I) -> Record
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<CypherValue>,
{
    fields
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// A combination of records, one per slot of its shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedRow {
    pub(crate) shape: ShapeId,
    pub(crate) slots: Vec<Record>,
}

impl JoinedRow {
    pub fn shape(&self) -> ShapeId {
        self.shape
    }

    pub fn slot(&self, index: usize) -> Option<&Record> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[Record] {
        &self.slots
    }

    pub fn into_slots(self) -> Vec<Record> {
        self.slots
    }
}
