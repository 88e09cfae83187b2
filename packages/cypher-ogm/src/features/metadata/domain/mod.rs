//! Metadata graph domain: arena-backed nodes, properties, navigations and
//! foreign keys addressed by copyable handles

mod error;
mod foreign_key;
mod graph;
mod ids;
mod ignored;
mod navigation;
mod node;
mod property;

pub use error::SchemaError;
pub use foreign_key::ForeignKey;
pub use graph::{Graph, RemovedNavigation};
pub use ids::{ForeignKeyId, NavigationRef, NodeId, PropertyRef};
pub use ignored::IgnoredMember;
pub use navigation::Navigation;
pub use node::{DefiningNavigation, Node, NodeKind, PropertyCounts};
pub use property::{Property, PropertyIndexes};
