//! Built-in Cypher conventions

mod base_type_discovery;
mod labels;
mod property_discovery;
mod relationship_attribute;
mod relationship_cleanup;
mod storage_attribute;
mod storage_name_uniqueness;

pub use base_type_discovery::BaseTypeDiscoveryConvention;
pub use labels::{LabelsAttributeConvention, LabelsConvention};
pub use property_discovery::PropertyDiscoveryConvention;
pub use relationship_attribute::RelationshipAttributeConvention;
pub use relationship_cleanup::RelationshipCleanupConvention;
pub use storage_attribute::StorageAttributeConvention;
pub use storage_name_uniqueness::StorageNameUniquenessConvention;
