//! Internal builders
//!
//! Configuration-source guarded entry points used by conventions and by the
//! fluent API. A setter returns `false` / `None` when a stronger source
//! already owns the setting.

mod graph_builder;
mod node_builder;
mod property_builder;
mod relationship_builder;

pub use graph_builder::InternalGraphBuilder;
pub use node_builder::InternalNodeBuilder;
pub use property_builder::InternalPropertyBuilder;
pub use relationship_builder::InternalRelationshipBuilder;
