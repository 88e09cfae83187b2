//! Fluent configuration of one entity

use serde_json::Value;

use crate::errors::{OgmError, Result};
use crate::features::metadata::domain::{NodeId, PropertyRef};
use crate::features::metadata::GraphModel;
use crate::shared::models::{
    ConfigurationSource, GraphType, HasConfigurationSource, NodeIdentity, NodeReference,
    TypeRef,
};

use super::{NavigationBuilder, PropertyBuilder};

const EXPLICIT: ConfigurationSource = ConfigurationSource::Explicit;

pub struct EntityBuilder<'m> {
    model: &'m mut GraphModel,
    node: NodeId,
}

impl<'m> EntityBuilder<'m> {
    pub(crate) fn new(model: &'m mut GraphModel, node: NodeId) -> Self {
        Self { model, node }
    }

    pub fn id(&self) -> NodeId {
        self.node
    }

    pub fn model(&self) -> &GraphModel {
        self.model
    }

    /// Replace the node's labels. Empty arrays and blank labels are rejected.
    pub fn has_labels(&mut self, labels: &[&str]) -> Result<&mut Self> {
        self.model
            .node_builder(self.node)
            .has_labels(labels, EXPLICIT)?;
        Ok(self)
    }

    pub fn has_annotation(&mut self, name: &str, value: Value) -> Result<&mut Self> {
        self.model
            .node_builder(self.node)
            .has_annotation(name, value, EXPLICIT)?;
        Ok(self)
    }

    pub fn has_base_type<T: GraphType>(&mut self) -> Result<&mut Self> {
        self.has_base(NodeReference::Type(T::type_descriptor()))
    }

    /// Base node by host type or label; the base entity is added if missing
    pub fn has_base(&mut self, base: impl Into<NodeReference>) -> Result<&mut Self> {
        let base = self.resolve_entity(base.into())?;
        self.model
            .node_builder(self.node)
            .has_base_type(Some(base), EXPLICIT)?;
        Ok(self)
    }

    pub fn has_no_base(&mut self) -> Result<&mut Self> {
        self.model
            .node_builder(self.node)
            .has_base_type(None, EXPLICIT)?;
        Ok(self)
    }

    /// Property backed by the member of the same name, or an existing one
    pub fn property(&mut self, name: &str) -> Result<PropertyBuilder<'_>> {
        let property = match self.model.graph().find_property(self.node, name) {
            Some(existing) => {
                let handle = existing.handle();
                if let Some(p) = self.model.graph.property_mut(&handle) {
                    p.update_configuration_source(EXPLICIT);
                }
                Some(handle)
            }
            None => self
                .model
                .node_builder(self.node)
                .member_property(name, EXPLICIT)?,
        };
        self.property_builder(name, property)
    }

    /// Shadow property of the given type
    pub fn property_of_type(&mut self, name: &str, value_type: &TypeRef) -> Result<PropertyBuilder<'_>> {
        let property = self
            .model
            .node_builder(self.node)
            .property(name, value_type, EXPLICIT)?;
        self.property_builder(name, property)
    }

    fn property_builder(
        &mut self,
        name: &str,
        property: Option<PropertyRef>,
    ) -> Result<PropertyBuilder<'_>> {
        let property = property.ok_or_else(|| {
            OgmError::detached(
                "Property",
                format!("{}.{}", self.model.graph().display_name(self.node), name),
            )
        })?;
        Ok(PropertyBuilder::new(self.model, property))
    }

    /// Exclude a property or navigation
    pub fn ignore(&mut self, name: &str) -> Result<&mut Self> {
        self.model
            .node_builder(self.node)
            .ignore_member(name, EXPLICIT)?;
        Ok(self)
    }

    /// Reference navigation to `target`; finish with `with_one` / `with_many`
    pub fn has_one(
        &mut self,
        name: &str,
        target: impl Into<NodeReference>,
    ) -> Result<NavigationBuilder<'_>> {
        let target = self.resolve_entity(target.into())?;
        Ok(NavigationBuilder::new(self.model, self.node, target, name, false))
    }

    /// Collection navigation to `target`; finish with `with_one`
    pub fn has_many(
        &mut self,
        name: &str,
        target: impl Into<NodeReference>,
    ) -> Result<NavigationBuilder<'_>> {
        let target = self.resolve_entity(target.into())?;
        Ok(NavigationBuilder::new(self.model, self.node, target, name, true))
    }

    /// Dependent entity that exists only under this one through `name`
    pub fn owns_one(
        &mut self,
        name: &str,
        target: impl Into<NodeReference>,
    ) -> Result<EntityBuilder<'_>> {
        self.owns(name, target.into(), true)
    }

    pub fn owns_many(
        &mut self,
        name: &str,
        target: impl Into<NodeReference>,
    ) -> Result<EntityBuilder<'_>> {
        self.owns(name, target.into(), false)
    }

    fn owns(&mut self, name: &str, target: NodeReference, unique: bool) -> Result<EntityBuilder<'_>> {
        let identity = target.to_identity();
        let dependent = self
            .model
            .graph_builder()
            .dependent_entity(identity.clone(), name, self.node, EXPLICIT)?
            .ok_or_else(|| OgmError::detached("Entity", identity.display_name()))?;

        let fk = self
            .model
            .node_builder(dependent)
            .relationship_to(self.node, None, Some(name), EXPLICIT)?
            .ok_or_else(|| OgmError::detached("Relationship", name))?;
        let mut relationship = self.model.relationship_builder(fk);
        relationship.is_unique(unique, EXPLICIT)?;
        relationship.is_ownership(true, EXPLICIT)?;

        Ok(EntityBuilder::new(self.model, dependent))
    }

    fn resolve_entity(&mut self, reference: NodeReference) -> Result<NodeId> {
        let identity: NodeIdentity = reference.to_identity();
        self.model
            .graph_builder()
            .entity(identity.clone(), EXPLICIT)?
            .ok_or_else(|| OgmError::detached("Entity", identity.display_name()))
    }
}
