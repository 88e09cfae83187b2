//! Cypher annotation names

pub const PREFIX: &str = "Cypher:";

pub const LABELS: &str = "Cypher:Labels";
pub const STORAGE_NAME: &str = "Cypher:StorageName";
pub const STORAGE_TYPE: &str = "Cypher:StorageType";
pub const STORAGE_ORDER: &str = "Cypher:StorageOrder";
pub const DEFAULT_VALUE: &str = "Cypher:DefaultValue";
pub const DEFAULT_STORAGE_CONSTRAINT: &str = "Cypher:DefaultStorageConstraint";
pub const COMPUTED_STORAGE_CONSTRAINT: &str = "Cypher:ComputedStorageConstraint";
pub const RELATIONSHIP_NAME: &str = "Cypher:RelationshipName";
pub const RELATIONSHIP_TYPE: &str = "Cypher:RelationshipType";
pub const RELATIONSHIP_START: &str = "Cypher:RelationshipStart";
