//! Annotation Storage Layer
//!
//! Every metadata item carries a string-keyed bag of JSON values, each with
//! the configuration source that set it. Cypher settings live under the
//! `Cypher:` prefix and are read through typed views:
//!
//! ```text
//! model.cypher_node(id)?.labels()
//! model.cypher_property(&p)?.storage_name()
//! model.cypher_foreign_key(fk)?.relationship_name()
//! ```

pub mod application;
pub mod domain;

pub use application::*;
pub use domain::{names, Annotation, Annotations, ConflictPolicy, GeneratedValueKind, HasAnnotations};
pub(crate) use application::refresh_default_labels;
