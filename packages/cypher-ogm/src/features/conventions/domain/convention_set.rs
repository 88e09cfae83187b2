//! Ordered convention lists, one per event

use std::fmt;
use std::sync::Arc;

use super::convention::*;
use crate::features::conventions::infrastructure::{
    BaseTypeDiscoveryConvention, LabelsAttributeConvention, LabelsConvention,
    PropertyDiscoveryConvention, RelationshipAttributeConvention, RelationshipCleanupConvention,
    StorageAttributeConvention, StorageNameUniquenessConvention,
};

/// Handlers run in list order
#[derive(Clone, Default)]
pub struct ConventionSet {
    pub graph_initialized: Vec<Arc<dyn GraphInitializedConvention>>,
    pub entity_added: Vec<Arc<dyn EntityAddedConvention>>,
    pub entity_ignored: Vec<Arc<dyn EntityIgnoredConvention>>,
    pub base_entity_changed: Vec<Arc<dyn BaseEntityChangedConvention>>,
    pub property_added: Vec<Arc<dyn PropertyAddedConvention>>,
    pub property_nullability_changed: Vec<Arc<dyn PropertyNullabilityChangedConvention>>,
    pub foreign_key_added: Vec<Arc<dyn ForeignKeyAddedConvention>>,
    pub foreign_key_uniqueness_changed: Vec<Arc<dyn ForeignKeyUniquenessChangedConvention>>,
    pub foreign_key_ownership_changed: Vec<Arc<dyn ForeignKeyOwnershipChangedConvention>>,
    pub navigation_added: Vec<Arc<dyn NavigationAddedConvention>>,
    pub navigation_removed: Vec<Arc<dyn NavigationRemovedConvention>>,
    pub graph_built: Vec<Arc<dyn GraphBuiltConvention>>,
}

impl ConventionSet {
    /// Empty set: mutations run without any convention
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in conventions for Cypher-backed models
    pub fn cypher_defaults() -> Self {
        let base_type_discovery = Arc::new(BaseTypeDiscoveryConvention);
        let property_discovery = Arc::new(PropertyDiscoveryConvention);
        let labels = Arc::new(LabelsConvention);

        let mut set = Self::new();
        set.entity_added.push(base_type_discovery);
        set.entity_added.push(property_discovery.clone());
        set.entity_added.push(Arc::new(LabelsAttributeConvention));
        set.entity_added.push(labels.clone());

        set.base_entity_changed.push(property_discovery);
        set.base_entity_changed.push(labels);

        set.property_added.push(Arc::new(StorageAttributeConvention));
        set.navigation_added.push(Arc::new(RelationshipAttributeConvention));
        set.navigation_removed.push(Arc::new(RelationshipCleanupConvention));
        set.graph_built.push(Arc::new(StorageNameUniquenessConvention));
        set
    }

    pub fn len(&self) -> usize {
        self.graph_initialized.len()
            + self.entity_added.len()
            + self.entity_ignored.len()
            + self.base_entity_changed.len()
            + self.property_added.len()
            + self.property_nullability_changed.len()
            + self.foreign_key_added.len()
            + self.foreign_key_uniqueness_changed.len()
            + self.foreign_key_ownership_changed.len()
            + self.navigation_added.len()
            + self.navigation_removed.len()
            + self.graph_built.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for ConventionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn names<C: Convention + ?Sized>(list: &[Arc<C>]) -> Vec<&str> {
            list.iter().map(|c| c.name()).collect()
        }
        f.debug_struct("ConventionSet")
            .field("graph_initialized", &names(&self.graph_initialized))
            .field("entity_added", &names(&self.entity_added))
            .field("entity_ignored", &names(&self.entity_ignored))
            .field("base_entity_changed", &names(&self.base_entity_changed))
            .field("property_added", &names(&self.property_added))
            .field(
                "property_nullability_changed",
                &names(&self.property_nullability_changed),
            )
            .field("foreign_key_added", &names(&self.foreign_key_added))
            .field(
                "foreign_key_uniqueness_changed",
                &names(&self.foreign_key_uniqueness_changed),
            )
            .field(
                "foreign_key_ownership_changed",
                &names(&self.foreign_key_ownership_changed),
            )
            .field("navigation_added", &names(&self.navigation_added))
            .field("navigation_removed", &names(&self.navigation_removed))
            .field("graph_built", &names(&self.graph_built))
            .finish()
    }
}
