//! Adds properties for mappable members of an entity's host type

use tracing::trace;

use crate::errors::Result;
use crate::features::conventions::domain::{
    BaseEntityChangedConvention, Convention, EntityAddedConvention,
};
use crate::features::metadata::domain::{IgnoredMember, NodeId};
use crate::features::metadata::GraphModel;
use crate::shared::models::{
    ConfigurationSource, HasLabelsOrType, MemberDescriptor, NodeIdentity,
};

/// Members declared between the node's type and its base node's type become
/// properties. Skipped: not-mapped members, relationship members, members
/// without a storage mapping and names already taken or ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct PropertyDiscoveryConvention;

impl PropertyDiscoveryConvention {
    fn discover(&self, model: &mut GraphModel, node: NodeId) -> Result<()> {
        let graph = model.graph();
        let Some(n) = graph.node(node) else {
            return Ok(());
        };
        let Some(ty) = n.clr_type().cloned() else {
            return Ok(());
        };
        let base_type = n
            .base()
            .and_then(|b| graph.node(b))
            .and_then(|b| b.clr_type().cloned());

        let chain = std::iter::once(ty.as_ref())
            .chain(ty.ancestors())
            .take_while(|t| base_type.as_deref() != Some(*t));

        let mut candidates = Vec::new();
        for declaring in chain {
            for member in declaring.members() {
                if is_candidate(model, node, &n.identity, member) {
                    candidates.push(member.name.clone());
                }
            }
        }

        for name in candidates {
            trace!(node = %node, member = %name, "discovered property");
            model
                .node_builder(node)
                .member_property(&name, ConfigurationSource::Convention)?;
        }
        Ok(())
    }
}

fn is_candidate(
    model: &GraphModel,
    node: NodeId,
    identity: &NodeIdentity,
    member: &MemberDescriptor,
) -> bool {
    let graph = model.graph();
    if member.is_not_mapped() || member.relationship_attribute().is_some() {
        return false;
    }
    if model.type_mapper().find_mapping(&member.member_type).is_none() {
        return false;
    }
    if graph.is_ignored(&IgnoredMember::member(identity, member.name.as_str())) {
        return false;
    }
    let name = member.name.as_str();
    graph.find_property(node, name).is_none()
        && graph.find_navigation(node, name).is_none()
        && graph.find_derived_navigation(node, name).is_none()
}

impl Convention for PropertyDiscoveryConvention {
    fn name(&self) -> &str {
        "PropertyDiscovery"
    }
}

impl EntityAddedConvention for PropertyDiscoveryConvention {
    fn apply(&self, model: &mut GraphModel, node: NodeId) -> Result<Option<NodeId>> {
        self.discover(model, node)?;
        Ok(model.graph().contains_node(node).then_some(node))
    }
}

impl BaseEntityChangedConvention for PropertyDiscoveryConvention {
    fn apply(
        &self,
        model: &mut GraphModel,
        node: NodeId,
        _previous: Option<NodeId>,
    ) -> Result<Option<NodeId>> {
        self.discover(model, node)?;
        Ok(model.graph().contains_node(node).then_some(node))
    }
}
