//! Source-guarded node operations
//!
//! Each setter compares the incoming configuration source with the stored
//! one and leaves the graph untouched when the stored source is stronger.

use serde_json::Value;
use tracing::trace;

use crate::errors::{OgmError, Result};
use crate::features::annotations::{names, refresh_default_labels, HasAnnotations};
use crate::features::metadata::domain::{ForeignKeyId, NodeId, PropertyRef, SchemaError};
use crate::features::metadata::GraphModel;
use crate::shared::models::{
    ConfigurationSource, HasConfigurationSource, HasLabelsOrType, LabelSet, MemberDescriptor,
    TypeRef,
};
use crate::shared::utils::check_identifier;

pub struct InternalNodeBuilder<'m> {
    model: &'m mut GraphModel,
    node: NodeId,
}

impl<'m> InternalNodeBuilder<'m> {
    pub(crate) fn new(model: &'m mut GraphModel, node: NodeId) -> Self {
        Self { model, node }
    }

    pub fn id(&self) -> NodeId {
        self.node
    }

    pub fn model(&mut self) -> &mut GraphModel {
        self.model
    }

    /// Change the base node if `source` is at least as strong as the stored
    /// base-link source. Members of this node and its derived nodes that
    /// collide with the new base are removed first. When any of them was
    /// configured with a stronger source the base is left unchanged.
    pub fn has_base_type(
        &mut self,
        base: Option<NodeId>,
        source: ConfigurationSource,
    ) -> Result<Option<NodeId>> {
        let node = self.model.graph.require_node(self.node)?;
        if node.base == base {
            return self.model.set_base_type(self.node, base, source);
        }
        if !source.overrides(node.base_source) {
            trace!(node = %self.node, "base type kept, stored source is stronger");
            return Ok(None);
        }

        if let Some(base) = base {
            if node.is_dependent() {
                return self.model.set_base_type(self.node, Some(base), source);
            }
            self.model.graph.validate_base_hierarchy(self.node, base)?;
            if !self.remove_members_hidden_by(base, source)? {
                trace!(node = %self.node, base = %base, "base type kept, a colliding member is stronger");
                return Ok(None);
            }
        }

        self.model.set_base_type(self.node, base, source)
    }

    /// Returns `false` without touching the graph when a colliding member
    /// cannot be overridden by `source`.
    fn remove_members_hidden_by(&mut self, base: NodeId, source: ConfigurationSource) -> Result<bool> {
        let graph = &self.model.graph;
        let base_names: Vec<String> = graph
            .all_properties(base)
            .into_iter()
            .map(|p| p.name.clone())
            .chain(graph.all_navigations(base).into_iter().map(|n| n.name.clone()))
            .collect();

        let mut properties = Vec::new();
        let mut navigations = Vec::new();
        for id in std::iter::once(self.node).chain(graph.descendants(self.node)) {
            let Some(node) = graph.node(id) else { continue };
            for name in &base_names {
                if let Some(p) = node.property(name) {
                    if !source.overrides(Some(p.configuration_source)) {
                        return Ok(false);
                    }
                    properties.push(p.handle());
                }
                if let Some(n) = node.navigation(name) {
                    if !source.overrides(Some(n.configuration_source)) {
                        return Ok(false);
                    }
                    navigations.push(n.handle());
                }
            }
        }

        for property in properties {
            self.model.remove_property(&property)?;
        }
        for navigation in navigations {
            self.model.remove_navigation(&navigation)?;
        }
        Ok(true)
    }

    /// Set explicit labels. Rejects empty arrays and blank labels.
    pub fn has_labels<S: AsRef<str>>(
        &mut self,
        labels: &[S],
        source: ConfigurationSource,
    ) -> Result<bool> {
        let labels = LabelSet::try_new(labels)?;
        let value = Value::from(labels.to_vec());
        if !self.has_annotation(names::LABELS, value, source)? {
            return Ok(false);
        }
        refresh_default_labels(self.model, self.node)?;
        Ok(true)
    }

    pub fn has_annotation(
        &mut self,
        name: &str,
        value: Value,
        source: ConfigurationSource,
    ) -> Result<bool> {
        let node = self.model.graph.require_node_mut(self.node)?;
        if !node.annotations.can_set(name, &value, source) {
            return Ok(false);
        }
        node.annotations_mut().set(name, value, source);
        Ok(true)
    }

    /// Get or add a shadow property
    pub fn property(
        &mut self,
        name: &str,
        value_type: &TypeRef,
        source: ConfigurationSource,
    ) -> Result<Option<PropertyRef>> {
        self.get_or_add_property(name, value_type, None, source)
    }

    /// Get or add a property backed by a member of the node's type
    pub fn member_property(
        &mut self,
        member_name: &str,
        source: ConfigurationSource,
    ) -> Result<Option<PropertyRef>> {
        let node = self.model.graph.require_node(self.node)?;
        let member = node
            .clr_type()
            .and_then(|ty| ty.find_member(member_name))
            .cloned()
            .ok_or_else(|| {
                OgmError::from(SchemaError::MissingBackingMember {
                    member: member_name.to_string(),
                    entity: node.display_name(),
                })
            })?;
        let value_type = member.member_type.clone();
        self.get_or_add_property(member_name, &value_type, Some(member), source)
    }

    fn get_or_add_property(
        &mut self,
        name: &str,
        value_type: &TypeRef,
        member: Option<MemberDescriptor>,
        source: ConfigurationSource,
    ) -> Result<Option<PropertyRef>> {
        check_identifier("name", name)?;
        let graph = &self.model.graph;

        if let Some(existing) = graph.find_property(self.node, name) {
            let handle = existing.handle();
            let same_shape = existing.value_type == *value_type
                && (member.is_none() || existing.member == member);
            if same_shape {
                if let Some(p) = self.model.graph.property_mut(&handle) {
                    p.update_configuration_source(source);
                }
                return Ok(Some(handle));
            }
            if handle.node != self.node || !source.overrides(Some(existing.configuration_source)) {
                return Ok(None);
            }
            self.model.remove_property(&handle)?;
        } else {
            let navigation = graph
                .find_navigation(self.node, name)
                .or_else(|| graph.find_derived_navigation(self.node, name))
                .map(|n| (n.handle(), n.configuration_source));
            if let Some((navigation, navigation_source)) = navigation {
                if !source.overrides(Some(navigation_source)) {
                    return Ok(None);
                }
                self.model.remove_navigation(&navigation)?;
            }

            let graph = &self.model.graph;
            let duplicates: Vec<(PropertyRef, ConfigurationSource)> = graph
                .descendants(self.node)
                .into_iter()
                .filter_map(|id| graph.node(id)?.property(name))
                .map(|p| (p.handle(), p.configuration_source))
                .collect();
            if duplicates
                .iter()
                .any(|(_, existing)| !source.overrides(Some(*existing)))
            {
                return Ok(None);
            }
            for (duplicate, _) in duplicates {
                trace!(property = %duplicate, "moving derived property to base");
                self.model.remove_property(&duplicate)?;
            }
        }

        self.model
            .add_property_with_member(self.node, name, value_type, member, source)
    }

    /// Ignore a property or navigation of this node
    pub fn ignore_member(&mut self, name: &str, source: ConfigurationSource) -> Result<bool> {
        check_identifier("name", name)?;
        self.model.ignore_node_member(self.node, name, source)
    }

    /// Get or add the foreign key from this (dependent) node to `principal`
    /// carrying the given navigations
    pub fn relationship_to(
        &mut self,
        principal: NodeId,
        to_principal: Option<&str>,
        to_dependent: Option<&str>,
        source: ConfigurationSource,
    ) -> Result<Option<ForeignKeyId>> {
        self.model.graph.require_node(principal)?;
        let existing = self.find_relationship(principal, to_principal, to_dependent);

        let fk = match existing {
            Some(fk) => {
                self.model
                    .graph
                    .require_foreign_key_mut(fk)?
                    .update_configuration_source(source);
                fk
            }
            None => match self.model.add_foreign_key(self.node, &[], principal, source)? {
                Some(fk) => fk,
                None => return Ok(None),
            },
        };

        let mut builder = self.model.relationship_builder(fk);
        if let Some(name) = to_principal {
            if builder.navigation_to_principal(name, source)?.is_none() {
                return Ok(None);
            }
        }
        if let Some(name) = to_dependent {
            if builder.navigation_to_dependent(name, source)?.is_none() {
                return Ok(None);
            }
        }
        Ok(self.model.graph.contains_foreign_key(fk).then_some(fk))
    }

    fn find_relationship(
        &self,
        principal: NodeId,
        to_principal: Option<&str>,
        to_dependent: Option<&str>,
    ) -> Option<ForeignKeyId> {
        let graph = &self.model.graph;
        let node = graph.node(self.node)?;
        node.foreign_keys()
            .filter_map(|id| graph.foreign_key(id))
            .filter(|fk| fk.principal_node == principal)
            .find(|fk| {
                let by_dependent = to_principal
                    .map_or(false, |n| fk.dependent_to_principal() == Some(n));
                let by_principal = to_dependent
                    .map_or(false, |n| fk.principal_to_dependent() == Some(n));
                let unnamed = to_principal.is_none()
                    && to_dependent.is_none()
                    && !fk.has_navigations();
                by_dependent || by_principal || unnamed
            })
            .map(|fk| fk.id())
    }
}
