//! Typed Cypher views over the annotation bags
//!
//! Read views resolve a setting from its annotation and fall back to the
//! computed default. Mutable views write with an explicit source and apply
//! the model's conflict policy to generated-value settings.

use heck::ToShoutySnakeCase;
use serde_json::Value;

use crate::errors::Result;
use crate::features::annotations::domain::{names, GeneratedValueKind};
use crate::features::annotations::HasAnnotations;
use crate::features::metadata::domain::{
    ForeignKey, ForeignKeyId, Navigation, NavigationRef, Node, NodeId, Property, PropertyRef,
};
use crate::features::metadata::GraphModel;
use crate::shared::models::{ConfigurationSource, LabelSet, NodeReference, TypeRef};

use super::labels::{configured_labels, resolved_labels};

const EXPLICIT: ConfigurationSource = ConfigurationSource::Explicit;

fn string_annotation<'a>(item: &'a impl HasAnnotations, name: &str) -> Option<&'a str> {
    item.annotations().value(name)?.as_str()
}

// ── nodes ────────────────────────────────────────────────────────────────

pub struct NodeCypher<'a> {
    model: &'a GraphModel,
    node: &'a Node,
}

impl<'a> NodeCypher<'a> {
    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn labels(&self) -> LabelSet {
        resolved_labels(self.model, self.node.id)
    }

    /// Whether labels were set by an attribute or explicitly
    pub fn has_configured_labels(&self) -> bool {
        configured_labels(self.node).is_some()
    }
}

pub struct NodeCypherMut<'a> {
    model: &'a mut GraphModel,
    node: NodeId,
}

impl<'a> NodeCypherMut<'a> {
    pub fn set_labels<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<bool> {
        self.model.node_builder(self.node).has_labels(labels, EXPLICIT)
    }
}

// ── properties ───────────────────────────────────────────────────────────

pub struct PropertyCypher<'a> {
    model: &'a GraphModel,
    property: &'a Property,
}

impl<'a> PropertyCypher<'a> {
    pub fn property(&self) -> &'a Property {
        self.property
    }

    /// Stored name, else the property name. Foreign key properties have no
    /// default name.
    pub fn storage_name(&self) -> Option<String> {
        if let Some(name) = string_annotation(self.property, names::STORAGE_NAME) {
            return Some(name.to_string());
        }
        if self
            .model
            .graph()
            .is_foreign_key_property(&self.property.handle())
        {
            return None;
        }
        Some(self.property.name.clone())
    }

    /// Stored type name, else the store type of the value type mapping
    pub fn storage_type(&self) -> Option<String> {
        if let Some(type_name) = string_annotation(self.property, names::STORAGE_TYPE) {
            return Some(type_name.to_string());
        }
        self.model
            .type_mapper()
            .find_mapping(&self.property.value_type)
            .map(|mapping| mapping.store_type)
    }

    pub fn storage_order(&self) -> Option<u32> {
        let order = self
            .property
            .annotations()
            .value(names::STORAGE_ORDER)?
            .as_u64()?;
        u32::try_from(order).ok()
    }

    pub fn default_value(&self) -> Option<&'a Value> {
        self.property.annotations().value(names::DEFAULT_VALUE)
    }

    pub fn default_storage_constraint(&self) -> Option<&'a str> {
        string_annotation(self.property, names::DEFAULT_STORAGE_CONSTRAINT)
    }

    pub fn computed_storage_constraint(&self) -> Option<&'a str> {
        string_annotation(self.property, names::COMPUTED_STORAGE_CONSTRAINT)
    }

    /// The generated-value setting in effect, if any
    pub fn generated_value(&self) -> Option<GeneratedValueKind> {
        GeneratedValueKind::ALL
            .into_iter()
            .find(|kind| self.property.annotation(kind.annotation_name()).is_some())
    }
}

pub struct PropertyCypherMut<'a> {
    model: &'a mut GraphModel,
    property: PropertyRef,
}

impl<'a> PropertyCypherMut<'a> {
    pub fn set_storage_name(&mut self, name: Option<&str>) -> Result<bool> {
        self.model
            .property_builder(self.property.clone())
            .has_storage_name(name, EXPLICIT)
    }

    pub fn set_storage_type(&mut self, type_name: Option<&str>) -> Result<bool> {
        self.model
            .property_builder(self.property.clone())
            .has_storage_type(type_name, EXPLICIT)
    }

    pub fn set_storage_order(&mut self, order: Option<u32>) -> Result<bool> {
        self.model
            .property_builder(self.property.clone())
            .has_storage_order(order, EXPLICIT)
    }

    pub fn set_default_value(&mut self, value: Value) -> Result<bool> {
        let policy = self.model.options().conflict_policy;
        self.model
            .property_builder(self.property.clone())
            .has_default_value(value, EXPLICIT, policy)
    }

    pub fn set_default_storage_constraint(&mut self, sql: Option<&str>) -> Result<bool> {
        let policy = self.model.options().conflict_policy;
        self.model
            .property_builder(self.property.clone())
            .has_default_storage_constraint(sql, EXPLICIT, policy)
    }

    pub fn set_computed_storage_constraint(&mut self, sql: Option<&str>) -> Result<bool> {
        let policy = self.model.options().conflict_policy;
        self.model
            .property_builder(self.property.clone())
            .has_computed_storage_constraint(sql, EXPLICIT, policy)
    }
}

// ── foreign keys ─────────────────────────────────────────────────────────

pub struct ForeignKeyCypher<'a> {
    model: &'a GraphModel,
    fk: &'a ForeignKey,
}

impl<'a> ForeignKeyCypher<'a> {
    pub fn foreign_key(&self) -> &'a ForeignKey {
        self.fk
    }

    /// Stored relationship name, else the principal-side navigation name in
    /// upper snake case, else the dependent-side one
    pub fn relationship_name(&self) -> Option<String> {
        if let Some(name) = string_annotation(self.fk, names::RELATIONSHIP_NAME) {
            return Some(name.to_string());
        }
        self.fk
            .principal_to_dependent()
            .or_else(|| self.fk.dependent_to_principal())
            .map(|navigation| navigation.to_shouty_snake_case())
    }

    /// Full name of the relationship-type node's host type
    pub fn relationship_type(&self) -> Option<&'a str> {
        string_annotation(self.fk, names::RELATIONSHIP_TYPE)
    }

    pub fn relationship_node(&self) -> Option<NodeId> {
        self.fk.relationship_node()
    }

    /// Node the relationship starts from; the principal unless configured
    pub fn start(&self) -> NodeId {
        let Some(start) = string_annotation(self.fk, names::RELATIONSHIP_START) else {
            return self.fk.principal_node;
        };
        let matches = |id: NodeId| {
            self.model.node(id).map_or(false, |n| match n.identity.clr_type() {
                Some(ty) => ty.name() == start,
                None => false,
            }) || resolved_labels(self.model, id).contains(start)
        };
        if !matches(self.fk.principal_node) && matches(self.fk.declaring_node) {
            self.fk.declaring_node
        } else {
            self.fk.principal_node
        }
    }

    pub fn end(&self) -> NodeId {
        if self.start() == self.fk.principal_node {
            self.fk.declaring_node
        } else {
            self.fk.principal_node
        }
    }
}

pub struct ForeignKeyCypherMut<'a> {
    model: &'a mut GraphModel,
    fk: ForeignKeyId,
}

impl<'a> ForeignKeyCypherMut<'a> {
    pub fn set_relationship_name(
        &mut self,
        name: &str,
        start: Option<&NodeReference>,
    ) -> Result<bool> {
        self.model
            .relationship_builder(self.fk)
            .has_relationship(name, start, EXPLICIT)
    }

    pub fn set_relationship_type(
        &mut self,
        relationship_type: &TypeRef,
        start: Option<&NodeReference>,
    ) -> Result<bool> {
        self.model
            .relationship_builder(self.fk)
            .has_relationship_type(relationship_type, start, EXPLICIT)
    }
}

// ── navigations ──────────────────────────────────────────────────────────

pub struct NavigationCypher<'a> {
    model: &'a GraphModel,
    navigation: &'a Navigation,
}

impl<'a> NavigationCypher<'a> {
    pub fn navigation(&self) -> &'a Navigation {
        self.navigation
    }

    pub fn relationship_name(&self) -> Option<String> {
        let fk = self.model.foreign_key(self.navigation.foreign_key)?;
        ForeignKeyCypher { model: self.model, fk }.relationship_name()
    }

    /// Whether traversing this navigation follows the relationship direction
    pub fn is_outgoing(&self) -> bool {
        let Some(fk) = self.model.foreign_key(self.navigation.foreign_key) else {
            return false;
        };
        ForeignKeyCypher { model: self.model, fk }.start() == self.navigation.declaring_node
    }
}

// ── model accessors ──────────────────────────────────────────────────────

impl GraphModel {
    pub fn cypher_node(&self, node: NodeId) -> Result<NodeCypher<'_>> {
        let node = self.graph.require_node(node)?;
        Ok(NodeCypher { model: self, node })
    }

    pub fn cypher_node_mut(&mut self, node: NodeId) -> Result<NodeCypherMut<'_>> {
        self.graph.require_node(node)?;
        Ok(NodeCypherMut { model: self, node })
    }

    pub fn cypher_property(&self, property: &PropertyRef) -> Result<PropertyCypher<'_>> {
        let property = self.graph.require_property(property)?;
        Ok(PropertyCypher {
            model: self,
            property,
        })
    }

    pub fn cypher_property_mut(&mut self, property: &PropertyRef) -> Result<PropertyCypherMut<'_>> {
        self.graph.require_property(property)?;
        Ok(PropertyCypherMut {
            model: self,
            property: property.clone(),
        })
    }

    pub fn cypher_foreign_key(&self, fk: ForeignKeyId) -> Result<ForeignKeyCypher<'_>> {
        let fk = self.graph.require_foreign_key(fk)?;
        Ok(ForeignKeyCypher { model: self, fk })
    }

    pub fn cypher_foreign_key_mut(&mut self, fk: ForeignKeyId) -> Result<ForeignKeyCypherMut<'_>> {
        self.graph.require_foreign_key(fk)?;
        Ok(ForeignKeyCypherMut { model: self, fk })
    }

    pub fn cypher_navigation(&self, navigation: &NavigationRef) -> Result<NavigationCypher<'_>> {
        let navigation = self.graph.require_navigation(navigation)?;
        Ok(NavigationCypher {
            model: self,
            navigation,
        })
    }
}
