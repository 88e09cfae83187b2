//! Cypher views over annotations and label resolution

mod labels;
mod views;

pub use labels::{configured_labels, default_labels, resolved_labels};
pub(crate) use labels::refresh_default_labels;
pub use views::{
    ForeignKeyCypher, ForeignKeyCypherMut, NavigationCypher, NodeCypher, NodeCypherMut,
    PropertyCypher, PropertyCypherMut,
};
