//! Links typed entities to the nearest registered ancestor type

use tracing::debug;

use crate::errors::Result;
use crate::features::conventions::domain::{Convention, EntityAddedConvention};
use crate::features::metadata::domain::NodeId;
use crate::features::metadata::{Graph, GraphModel};
use crate::shared::models::{ConfigurationSource, HasLabelsOrType, TypeRef};

/// On entity added: set the base to the node of the nearest ancestor type,
/// and adopt existing nodes whose nearest registered ancestor is now the new
/// node
#[derive(Debug, Default, Clone, Copy)]
pub struct BaseTypeDiscoveryConvention;

impl Convention for BaseTypeDiscoveryConvention {
    fn name(&self) -> &str {
        "BaseTypeDiscovery"
    }
}

fn nearest_registered_ancestor(graph: &Graph, ty: &TypeRef) -> Option<NodeId> {
    let mut current = ty.base().cloned();
    while let Some(ancestor) = current {
        if let Some(id) = graph.find_node_by_type(&ancestor) {
            return Some(id);
        }
        current = ancestor.base().cloned();
    }
    None
}

impl EntityAddedConvention for BaseTypeDiscoveryConvention {
    fn apply(&self, model: &mut GraphModel, node: NodeId) -> Result<Option<NodeId>> {
        let Some(n) = model.node(node) else {
            return Ok(None);
        };
        if n.is_dependent() {
            return Ok(Some(node));
        }
        let Some(ty) = n.clr_type().cloned() else {
            return Ok(Some(node));
        };

        let base = nearest_registered_ancestor(model.graph(), &ty);
        if base.is_some() {
            model
                .node_builder(node)
                .has_base_type(base, ConfigurationSource::Convention)?;
        }

        let adopted: Vec<NodeId> = model
            .graph()
            .nodes()
            .filter(|other| other.id() != node && !other.is_dependent())
            .filter(|other| ConfigurationSource::Convention.overrides(other.base_source()))
            .filter(|other| {
                other.clr_type().map_or(false, |t| {
                    nearest_registered_ancestor(model.graph(), t) == Some(node)
                })
            })
            .map(|other| other.id())
            .collect();
        for derived in adopted {
            debug!(node = %derived, base = %node, "re-parenting onto discovered base");
            model
                .node_builder(derived)
                .has_base_type(Some(node), ConfigurationSource::Convention)?;
        }

        Ok(model.graph().contains_node(node).then_some(node))
    }
}
