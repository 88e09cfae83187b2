//! Source-guarded graph-level operations

use crate::errors::Result;
use crate::features::metadata::domain::{IgnoredMember, NodeId, NodeKind, SchemaError};
use crate::features::metadata::GraphModel;
use crate::shared::models::{ConfigurationSource, HasConfigurationSource, NodeIdentity};

use super::{InternalNodeBuilder, InternalPropertyBuilder, InternalRelationshipBuilder};
use crate::features::metadata::domain::{ForeignKeyId, PropertyRef};

pub struct InternalGraphBuilder<'m> {
    model: &'m mut GraphModel,
}

impl<'m> InternalGraphBuilder<'m> {
    pub(crate) fn new(model: &'m mut GraphModel) -> Self {
        Self { model }
    }

    /// Get or add a non-dependent entity
    pub fn entity(
        &mut self,
        identity: NodeIdentity,
        source: ConfigurationSource,
    ) -> Result<Option<NodeId>> {
        self.node(identity, NodeKind::Entity, source)
    }

    /// Get or add a relationship-type node
    pub fn relationship_node(
        &mut self,
        identity: NodeIdentity,
        source: ConfigurationSource,
    ) -> Result<Option<NodeId>> {
        self.node(identity, NodeKind::Relationship, source)
    }

    fn node(
        &mut self,
        identity: NodeIdentity,
        kind: NodeKind,
        source: ConfigurationSource,
    ) -> Result<Option<NodeId>> {
        if let Some(id) = self.model.graph.find_node(&identity) {
            let node = self.model.graph.require_node_mut(id)?;
            if node.kind != kind {
                return Err(SchemaError::NodeKindMismatch {
                    entity: identity.display_name(),
                    expected: kind.to_string(),
                    actual: node.kind.to_string(),
                }
                .into());
            }
            node.update_configuration_source(source);
            return Ok(Some(id));
        }

        match kind {
            NodeKind::Entity => self.model.add_entity(identity, source),
            NodeKind::Relationship => self.model.add_relationship_node(identity, source),
        }
    }

    /// Get or add a dependent entity reached from `defining` through `navigation`
    pub fn dependent_entity(
        &mut self,
        identity: NodeIdentity,
        navigation: &str,
        defining: NodeId,
        source: ConfigurationSource,
    ) -> Result<Option<NodeId>> {
        if let Some(id) = self
            .model
            .graph
            .find_dependent(&identity, navigation, defining)
        {
            self.model
                .graph
                .require_node_mut(id)?
                .update_configuration_source(source);
            return Ok(Some(id));
        }
        self.model
            .add_dependent_entity(identity, navigation, defining, source)
    }

    pub fn ignore(&mut self, member: IgnoredMember, source: ConfigurationSource) -> Result<bool> {
        self.model.ignore(member, source)
    }

    pub fn node_builder(&mut self, node: NodeId) -> InternalNodeBuilder<'_> {
        InternalNodeBuilder::new(self.model, node)
    }
}

impl GraphModel {
    pub fn graph_builder(&mut self) -> InternalGraphBuilder<'_> {
        InternalGraphBuilder::new(self)
    }

    pub fn node_builder(&mut self, node: NodeId) -> InternalNodeBuilder<'_> {
        InternalNodeBuilder::new(self, node)
    }

    pub fn property_builder(&mut self, property: PropertyRef) -> InternalPropertyBuilder<'_> {
        InternalPropertyBuilder::new(self, property)
    }

    pub fn relationship_builder(&mut self, fk: ForeignKeyId) -> InternalRelationshipBuilder<'_> {
        InternalRelationshipBuilder::new(self, fk)
    }
}
