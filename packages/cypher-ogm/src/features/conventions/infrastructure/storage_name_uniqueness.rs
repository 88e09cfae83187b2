//! Rejects two properties of one node sharing a storage name

use std::collections::BTreeMap;

use crate::errors::Result;
use crate::features::conventions::domain::{Convention, GraphBuiltConvention};
use crate::features::metadata::domain::{NodeId, PropertyRef, SchemaError};
use crate::features::metadata::GraphModel;

#[derive(Debug, Default, Clone, Copy)]
pub struct StorageNameUniquenessConvention;

impl Convention for StorageNameUniquenessConvention {
    fn name(&self) -> &str {
        "StorageNameUniqueness"
    }
}

impl GraphBuiltConvention for StorageNameUniquenessConvention {
    fn apply(&self, model: &mut GraphModel) -> Result<()> {
        let nodes: Vec<NodeId> = model.graph().nodes().map(|n| n.id()).collect();
        for node in nodes {
            let properties: Vec<PropertyRef> = model
                .graph()
                .all_properties(node)
                .into_iter()
                .map(|p| p.handle())
                .collect();

            let mut seen: BTreeMap<String, String> = BTreeMap::new();
            for property in properties {
                let Some(storage_name) = model.cypher_property(&property)?.storage_name() else {
                    continue;
                };
                if let Some(first) = seen.get(&storage_name) {
                    return Err(SchemaError::DuplicateStorageName {
                        entity: model.graph().display_name(node),
                        storage_name,
                        first: first.clone(),
                        second: property.name.clone(),
                    }
                    .into());
                }
                seen.insert(storage_name, property.name);
            }
        }
        Ok(())
    }
}
