//! Annotation bag and Cypher annotation names

mod annotation;
mod generated_value;
pub mod names;

pub use annotation::{Annotation, Annotations, HasAnnotations};
pub use generated_value::{ConflictPolicy, GeneratedValueKind};
