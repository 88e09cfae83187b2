//! Builder Façade
//!
//! `internal` holds the source-guarded builders conventions use; `fluent`
//! is the public configuration API built on top of them.

pub mod fluent;
pub mod internal;

pub use fluent::{EntityBuilder, ModelBuilder, NavigationBuilder, PropertyBuilder, RelationshipBuilder};
pub use internal::{
    InternalGraphBuilder, InternalNodeBuilder, InternalPropertyBuilder, InternalRelationshipBuilder,
};
