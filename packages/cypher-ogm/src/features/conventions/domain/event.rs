//! Queued convention events
//!
//! While a batch is open, dispatches are recorded as these tagged values and
//! replayed when the outermost batch ends.

use std::fmt;

use crate::features::metadata::domain::{ForeignKeyId, NavigationRef, NodeId, PropertyRef};
use crate::shared::models::NodeIdentity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConventionEvent {
    GraphInitialized,
    EntityAdded(NodeId),
    EntityIgnored(NodeIdentity),
    BaseEntityChanged {
        node: NodeId,
        previous: Option<NodeId>,
    },
    PropertyAdded(PropertyRef),
    PropertyNullabilityChanged(PropertyRef),
    ForeignKeyAdded(ForeignKeyId),
    ForeignKeyUniquenessChanged(ForeignKeyId),
    ForeignKeyOwnershipChanged(ForeignKeyId),
    NavigationAdded(NavigationRef),
    NavigationRemoved {
        source: NodeId,
        target: NodeId,
        name: String,
    },
    GraphBuilt,
}

impl ConventionEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            ConventionEvent::GraphInitialized => "graph_initialized",
            ConventionEvent::EntityAdded(_) => "entity_added",
            ConventionEvent::EntityIgnored(_) => "entity_ignored",
            ConventionEvent::BaseEntityChanged { .. } => "base_entity_changed",
            ConventionEvent::PropertyAdded(_) => "property_added",
            ConventionEvent::PropertyNullabilityChanged(_) => "property_nullability_changed",
            ConventionEvent::ForeignKeyAdded(_) => "foreign_key_added",
            ConventionEvent::ForeignKeyUniquenessChanged(_) => "foreign_key_uniqueness_changed",
            ConventionEvent::ForeignKeyOwnershipChanged(_) => "foreign_key_ownership_changed",
            ConventionEvent::NavigationAdded(_) => "navigation_added",
            ConventionEvent::NavigationRemoved { .. } => "navigation_removed",
            ConventionEvent::GraphBuilt => "graph_built",
        }
    }
}

impl fmt::Display for ConventionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConventionEvent::GraphInitialized | ConventionEvent::GraphBuilt => {
                f.write_str(self.kind())
            }
            ConventionEvent::EntityAdded(node) => write!(f, "{}({})", self.kind(), node),
            ConventionEvent::EntityIgnored(identity) => write!(f, "{}({})", self.kind(), identity),
            ConventionEvent::BaseEntityChanged { node, previous } => match previous {
                Some(previous) => write!(f, "{}({}, was {})", self.kind(), node, previous),
                None => write!(f, "{}({})", self.kind(), node),
            },
            ConventionEvent::PropertyAdded(p) | ConventionEvent::PropertyNullabilityChanged(p) => {
                write!(f, "{}({})", self.kind(), p)
            }
            ConventionEvent::ForeignKeyAdded(fk)
            | ConventionEvent::ForeignKeyUniquenessChanged(fk)
            | ConventionEvent::ForeignKeyOwnershipChanged(fk) => {
                write!(f, "{}({})", self.kind(), fk)
            }
            ConventionEvent::NavigationAdded(n) => write!(f, "{}({})", self.kind(), n),
            ConventionEvent::NavigationRemoved { source, name, .. } => {
                write!(f, "{}({}.{})", self.kind(), source, name)
            }
        }
    }
}
