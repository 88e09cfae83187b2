//! Removes convention-created foreign keys left without navigations

use tracing::debug;

use crate::errors::Result;
use crate::features::conventions::domain::{Convention, NavigationRemovedConvention};
use crate::features::metadata::domain::{ForeignKeyId, NodeId};
use crate::features::metadata::GraphModel;
use crate::shared::models::{ConfigurationSource, HasConfigurationSource};

#[derive(Debug, Default, Clone, Copy)]
pub struct RelationshipCleanupConvention;

impl Convention for RelationshipCleanupConvention {
    fn name(&self) -> &str {
        "RelationshipCleanup"
    }
}

impl NavigationRemovedConvention for RelationshipCleanupConvention {
    fn apply(
        &self,
        model: &mut GraphModel,
        source: NodeId,
        target: NodeId,
        name: &str,
    ) -> Result<bool> {
        let orphaned: Vec<ForeignKeyId> = model
            .graph()
            .foreign_keys_between(source, target)
            .into_iter()
            .filter(|id| {
                model.foreign_key(*id).map_or(false, |fk| {
                    !fk.has_navigations()
                        && fk.configuration_source() == ConfigurationSource::Convention
                })
            })
            .collect();

        for fk in orphaned {
            debug!(fk = %fk, navigation = name, "removing foreign key without navigations");
            model.remove_foreign_key(fk)?;
        }
        Ok(true)
    }
}
