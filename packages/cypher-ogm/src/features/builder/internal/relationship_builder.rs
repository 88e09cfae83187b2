//! Source-guarded relationship (foreign key) operations

use serde_json::Value;
use tracing::trace;

use crate::errors::{OgmError, Result};
use crate::features::annotations::{names, resolved_labels, HasAnnotations};
use crate::features::metadata::domain::{ForeignKeyId, NavigationRef, NodeId, PropertyRef};
use crate::features::metadata::GraphModel;
use crate::shared::models::{
    scalars, ConfigurationSource, HasConfigurationSource, HasLabelsOrType, NodeIdentity,
    NodeReference, TypeRef,
};
use crate::shared::utils::check_identifier;

pub struct InternalRelationshipBuilder<'m> {
    model: &'m mut GraphModel,
    fk: ForeignKeyId,
}

impl<'m> InternalRelationshipBuilder<'m> {
    pub(crate) fn new(model: &'m mut GraphModel, fk: ForeignKeyId) -> Self {
        Self { model, fk }
    }

    pub fn id(&self) -> ForeignKeyId {
        self.fk
    }

    pub fn is_unique(&mut self, unique: bool, source: ConfigurationSource) -> Result<bool> {
        let fk = self.model.graph.require_foreign_key(self.fk)?;
        if !source.overrides(fk.is_unique_source) {
            return Ok(false);
        }
        Ok(self
            .model
            .set_foreign_key_unique(self.fk, unique, source)?
            .is_some())
    }

    pub fn is_ownership(&mut self, ownership: bool, source: ConfigurationSource) -> Result<bool> {
        let fk = self.model.graph.require_foreign_key(self.fk)?;
        if !source.overrides(fk.is_ownership_source) {
            return Ok(false);
        }
        Ok(self
            .model
            .set_foreign_key_ownership(self.fk, ownership, source)?
            .is_some())
    }

    /// Make every carrying property non-nullable (`true`) or nullable (`false`)
    pub fn is_required(&mut self, required: bool, source: ConfigurationSource) -> Result<bool> {
        let fk = self.model.graph.require_foreign_key(self.fk)?;
        let dependent = fk.declaring_node;
        let properties: Vec<PropertyRef> = fk
            .properties
            .iter()
            .filter_map(|name| self.model.graph.find_property(dependent, name))
            .map(|p| p.handle())
            .collect();

        let mut applied = true;
        for property in properties {
            applied &= self
                .model
                .property_builder(property)
                .is_nullable(!required, source)?;
        }
        Ok(applied)
    }

    /// Replace the carrying properties. Names that do not resolve on the
    /// dependent become nullable 64-bit shadow properties.
    pub fn has_foreign_key(&mut self, properties: &[&str], source: ConfigurationSource) -> Result<bool> {
        let fk = self.model.graph.require_foreign_key(self.fk)?;
        if !source.overrides(Some(fk.configuration_source)) {
            return Ok(false);
        }
        let dependent = fk.declaring_node;

        let shadow_type = scalars::nullable(&scalars::int64());
        for name in properties {
            check_identifier("properties", name)?;
            if self.model.graph.find_property(dependent, name).is_some() {
                continue;
            }
            trace!(fk = %self.fk, property = name, "adding shadow foreign key property");
            let added = self.model.node_builder(dependent).property(
                name,
                &shadow_type,
                ConfigurationSource::Convention,
            )?;
            if added.is_none() {
                return Ok(false);
            }
        }

        if !self.model.graph.contains_foreign_key(self.fk) {
            return Ok(false);
        }
        self.model
            .set_foreign_key_properties(self.fk, properties, source)?;
        Ok(true)
    }

    /// Name the relationship and optionally the node it starts from.
    /// `start` must identify the principal or the dependent end.
    pub fn has_relationship(
        &mut self,
        name: &str,
        start: Option<&NodeReference>,
        source: ConfigurationSource,
    ) -> Result<bool> {
        check_identifier("name", name)?;
        let start = self.check_start(start)?;
        if !self.can_set(names::RELATIONSHIP_NAME, &Value::from(name), source)?
            || !self.can_set(names::RELATIONSHIP_START, &start, source)?
        {
            return Ok(false);
        }
        self.has_annotation(names::RELATIONSHIP_NAME, Value::from(name), source)?;
        self.has_annotation(names::RELATIONSHIP_START, start, source)
    }

    /// Carry the relationship's own properties on a relationship-type node
    pub fn has_relationship_type(
        &mut self,
        relationship_type: &TypeRef,
        start: Option<&NodeReference>,
        source: ConfigurationSource,
    ) -> Result<bool> {
        let start = self.check_start(start)?;
        let type_name = Value::from(relationship_type.name());
        if !self.can_set(names::RELATIONSHIP_TYPE, &type_name, source)?
            || !self.can_set(names::RELATIONSHIP_START, &start, source)?
        {
            return Ok(false);
        }

        let Some(node) = self
            .model
            .graph_builder()
            .relationship_node(NodeIdentity::of_type(relationship_type), source)?
        else {
            return Ok(false);
        };
        if !self.model.graph.contains_foreign_key(self.fk) {
            return Ok(false);
        }
        self.model.set_relationship_node(self.fk, Some(node))?;
        self.has_annotation(names::RELATIONSHIP_TYPE, type_name, source)?;
        self.has_annotation(names::RELATIONSHIP_START, start, source)
    }

    fn check_start(&self, start: Option<&NodeReference>) -> Result<Value> {
        let Some(start) = start else {
            return Ok(Value::Null);
        };
        let fk = self.model.graph.require_foreign_key(self.fk)?;
        let ends = [fk.principal_node, fk.declaring_node];
        if ends.iter().any(|end| self.identifies(*end, start)) {
            return Ok(Value::from(start.as_annotation_value()));
        }
        Err(OgmError::invalid_argument(
            "start",
            format!(
                "'{}' is neither end of the relationship between {} and {}",
                start.as_annotation_value(),
                self.model.graph.display_name(fk.principal_node),
                self.model.graph.display_name(fk.declaring_node),
            ),
        ))
    }

    fn identifies(&self, node: NodeId, reference: &NodeReference) -> bool {
        let Some(n) = self.model.graph.node(node) else {
            return false;
        };
        match reference {
            NodeReference::Type(ty) => n.clr_type() == Some(ty),
            NodeReference::Label(label) => resolved_labels(&*self.model, node).contains(label),
        }
    }

    fn can_set(&self, name: &str, value: &Value, source: ConfigurationSource) -> Result<bool> {
        let fk = self.model.graph.require_foreign_key(self.fk)?;
        Ok(fk.annotations.can_set(name, value, source))
    }

    pub fn has_annotation(
        &mut self,
        name: &str,
        value: Value,
        source: ConfigurationSource,
    ) -> Result<bool> {
        let fk = self.model.graph.require_foreign_key_mut(self.fk)?;
        if !fk.annotations.can_set(name, &value, source) {
            return Ok(false);
        }
        fk.annotations_mut().set(name, value, source);
        Ok(true)
    }

    pub fn navigation_to_principal(
        &mut self,
        name: &str,
        source: ConfigurationSource,
    ) -> Result<Option<NavigationRef>> {
        self.navigation(name, true, source)
    }

    pub fn navigation_to_dependent(
        &mut self,
        name: &str,
        source: ConfigurationSource,
    ) -> Result<Option<NavigationRef>> {
        self.navigation(name, false, source)
    }

    fn navigation(
        &mut self,
        name: &str,
        on_dependent: bool,
        source: ConfigurationSource,
    ) -> Result<Option<NavigationRef>> {
        check_identifier("name", name)?;
        let fk = self.model.graph.require_foreign_key(self.fk)?;
        let (node, existing) = if on_dependent {
            (fk.declaring_node, fk.dependent_to_principal.clone())
        } else {
            (fk.principal_node, fk.principal_to_dependent.clone())
        };

        if let Some(existing) = existing {
            let handle = NavigationRef::new(node, existing);
            let navigation = self.model.graph.require_navigation(&handle)?;
            if navigation.name == name {
                if let Some(navigation) = self.model.graph.navigation_mut(&handle) {
                    navigation.update_configuration_source(source);
                }
                return Ok(Some(handle));
            }
            if !source.overrides(Some(navigation.configuration_source)) {
                return Ok(None);
            }
        }

        let member = self
            .model
            .graph
            .require_node(node)?
            .clr_type()
            .and_then(|ty| ty.find_member(name))
            .cloned();
        self.model
            .add_navigation(self.fk, name, on_dependent, member, source)
    }
}
