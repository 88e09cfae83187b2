//! Fluent relationship configuration

use serde_json::Value;

use crate::errors::{OgmError, Result};
use crate::features::metadata::domain::{ForeignKeyId, NodeId};
use crate::features::metadata::GraphModel;
use crate::shared::models::{ConfigurationSource, NodeReference, TypeRef};

const EXPLICIT: ConfigurationSource = ConfigurationSource::Explicit;

/// First half of a relationship: one navigation, waiting for its inverse
pub struct NavigationBuilder<'m> {
    model: &'m mut GraphModel,
    declaring: NodeId,
    target: NodeId,
    name: String,
    collection: bool,
}

impl<'m> NavigationBuilder<'m> {
    pub(crate) fn new(
        model: &'m mut GraphModel,
        declaring: NodeId,
        target: NodeId,
        name: &str,
        collection: bool,
    ) -> Self {
        Self {
            model,
            declaring,
            target,
            name: name.to_string(),
            collection,
        }
    }

    /// The target has at most one related entity. `inverse` names the
    /// navigation back from the target, if any.
    pub fn with_one(self, inverse: Option<&str>) -> Result<RelationshipBuilder<'m>> {
        let Self {
            model,
            declaring,
            target,
            name,
            collection,
        } = self;
        if collection {
            // seen from the principal: the target holds the foreign key
            return relate(model, target, declaring, inverse, Some(&name), false);
        }
        relate(model, declaring, target, Some(&name), inverse, true)
    }

    /// The target has many related entities
    pub fn with_many(self, inverse: Option<&str>) -> Result<RelationshipBuilder<'m>> {
        if self.collection {
            return Err(OgmError::invalid_argument(
                "inverse",
                format!(
                    "'{}' is a collection, many-to-many needs a relationship type node",
                    self.name
                ),
            ));
        }
        let Self {
            model,
            declaring,
            target,
            name,
            ..
        } = self;
        relate(model, declaring, target, Some(&name), inverse, false)
    }
}

fn relate<'m>(
    model: &'m mut GraphModel,
    dependent: NodeId,
    principal: NodeId,
    to_principal: Option<&str>,
    to_dependent: Option<&str>,
    unique: bool,
) -> Result<RelationshipBuilder<'m>> {
    let fk = model
        .node_builder(dependent)
        .relationship_to(principal, to_principal, to_dependent, EXPLICIT)?
        .ok_or_else(|| {
            let name = to_principal.or(to_dependent).unwrap_or_default();
            OgmError::detached("Relationship", name)
        })?;
    model.relationship_builder(fk).is_unique(unique, EXPLICIT)?;
    Ok(RelationshipBuilder { model, fk })
}

/// Configuration of an existing relationship
pub struct RelationshipBuilder<'m> {
    model: &'m mut GraphModel,
    fk: ForeignKeyId,
}

impl<'m> RelationshipBuilder<'m> {
    pub fn id(&self) -> ForeignKeyId {
        self.fk
    }

    /// Relationship name in Cypher, and the end it starts from (the
    /// principal when `None`)
    pub fn has_relationship(
        &mut self,
        name: &str,
        start: Option<NodeReference>,
    ) -> Result<&mut Self> {
        self.model
            .relationship_builder(self.fk)
            .has_relationship(name, start.as_ref(), EXPLICIT)?;
        Ok(self)
    }

    /// Relationship carried by a relationship-type node
    pub fn has_relationship_type(
        &mut self,
        relationship_type: &TypeRef,
        start: Option<NodeReference>,
    ) -> Result<&mut Self> {
        self.model
            .relationship_builder(self.fk)
            .has_relationship_type(relationship_type, start.as_ref(), EXPLICIT)?;
        Ok(self)
    }

    pub fn is_unique(&mut self, unique: bool) -> Result<&mut Self> {
        self.model
            .relationship_builder(self.fk)
            .is_unique(unique, EXPLICIT)?;
        Ok(self)
    }

    pub fn is_ownership(&mut self, ownership: bool) -> Result<&mut Self> {
        self.model
            .relationship_builder(self.fk)
            .is_ownership(ownership, EXPLICIT)?;
        Ok(self)
    }

    pub fn is_required(&mut self, required: bool) -> Result<&mut Self> {
        self.model
            .relationship_builder(self.fk)
            .is_required(required, EXPLICIT)?;
        Ok(self)
    }

    /// Carrying properties on the dependent; missing ones become shadow
    /// properties
    pub fn has_foreign_key(&mut self, properties: &[&str]) -> Result<&mut Self> {
        self.model
            .relationship_builder(self.fk)
            .has_foreign_key(properties, EXPLICIT)?;
        Ok(self)
    }

    pub fn has_annotation(&mut self, name: &str, value: Value) -> Result<&mut Self> {
        self.model
            .relationship_builder(self.fk)
            .has_annotation(name, value, EXPLICIT)?;
        Ok(self)
    }
}
