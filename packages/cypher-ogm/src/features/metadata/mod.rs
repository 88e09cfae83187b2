//! Metadata Graph Model
//!
//! The mutable schema graph. `Graph` owns the arena and answers queries;
//! `GraphModel` wraps it with validated mutations that raise convention
//! events.

pub mod application;
pub mod domain;

pub use application::GraphModel;
pub use domain::{
    ForeignKey, ForeignKeyId, Graph, IgnoredMember, Navigation, NavigationRef, Node, NodeId,
    NodeKind, Property, PropertyRef, SchemaError,
};
