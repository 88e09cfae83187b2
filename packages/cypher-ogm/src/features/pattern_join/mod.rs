//! Relationship pattern join
//!
//! Evaluates `(outer)-[relationship]->(inner)` over materialized records:
//! a relationship row matches when its start endpoint equals the outer key
//! and its end endpoint equals the inner key.

pub mod application;
pub mod domain;

pub use application::{JoinContext, JoinPlan, JoinSelectors};
pub use domain::{record, JoinedRow, Record, ShapeId, ShapeRegistry};
