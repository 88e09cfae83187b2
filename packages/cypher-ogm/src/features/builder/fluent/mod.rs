//! Fluent API
//!
//! Every call configures with the explicit source and fails with
//! `OgmError::Detached` when a convention removed the item being configured.

mod entity_builder;
mod model_builder;
mod navigation_builder;
mod property_builder;

pub use entity_builder::EntityBuilder;
pub use model_builder::ModelBuilder;
pub use navigation_builder::{NavigationBuilder, RelationshipBuilder};
pub use property_builder::PropertyBuilder;
