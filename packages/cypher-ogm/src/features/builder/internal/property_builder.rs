//! Source-guarded property operations

use serde_json::Value;

use crate::errors::{OgmError, Result};
use crate::features::annotations::{names, ConflictPolicy, GeneratedValueKind, HasAnnotations};
use crate::features::metadata::domain::PropertyRef;
use crate::features::metadata::GraphModel;
use crate::shared::models::ConfigurationSource;
use crate::shared::utils::check_identifier;

pub struct InternalPropertyBuilder<'m> {
    model: &'m mut GraphModel,
    property: PropertyRef,
}

impl<'m> InternalPropertyBuilder<'m> {
    pub(crate) fn new(model: &'m mut GraphModel, property: PropertyRef) -> Self {
        Self { model, property }
    }

    pub fn handle(&self) -> &PropertyRef {
        &self.property
    }

    pub fn is_nullable(&mut self, nullable: bool, source: ConfigurationSource) -> Result<bool> {
        let property = self.model.graph.require_property(&self.property)?;
        if !source.overrides(property.nullable_source) {
            return Ok(false);
        }
        Ok(self
            .model
            .set_property_nullable(&self.property, nullable, source)?
            .is_some())
    }

    pub fn has_annotation(
        &mut self,
        name: &str,
        value: Value,
        source: ConfigurationSource,
    ) -> Result<bool> {
        let property = self.model.graph.require_property_mut(&self.property)?;
        if !property.annotations.can_set(name, &value, source) {
            return Ok(false);
        }
        property.annotations_mut().set(name, value, source);
        Ok(true)
    }

    /// `None` clears the stored name so the default applies again
    pub fn has_storage_name(&mut self, name: Option<&str>, source: ConfigurationSource) -> Result<bool> {
        if let Some(name) = name {
            check_identifier("name", name)?;
        }
        self.has_annotation(names::STORAGE_NAME, name.into(), source)
    }

    pub fn has_storage_type(
        &mut self,
        type_name: Option<&str>,
        source: ConfigurationSource,
    ) -> Result<bool> {
        if let Some(type_name) = type_name {
            check_identifier("type_name", type_name)?;
        }
        self.has_annotation(names::STORAGE_TYPE, type_name.into(), source)
    }

    pub fn has_storage_order(&mut self, order: Option<u32>, source: ConfigurationSource) -> Result<bool> {
        self.has_annotation(names::STORAGE_ORDER, order.into(), source)
    }

    pub fn has_default_value(
        &mut self,
        value: Value,
        source: ConfigurationSource,
        policy: ConflictPolicy,
    ) -> Result<bool> {
        self.has_generated_value(GeneratedValueKind::DefaultValue, value, source, policy)
    }

    pub fn has_default_storage_constraint(
        &mut self,
        sql: Option<&str>,
        source: ConfigurationSource,
        policy: ConflictPolicy,
    ) -> Result<bool> {
        self.has_generated_value(
            GeneratedValueKind::DefaultStorageConstraint,
            sql.into(),
            source,
            policy,
        )
    }

    pub fn has_computed_storage_constraint(
        &mut self,
        sql: Option<&str>,
        source: ConfigurationSource,
        policy: ConflictPolicy,
    ) -> Result<bool> {
        self.has_generated_value(
            GeneratedValueKind::ComputedStorageConstraint,
            sql.into(),
            source,
            policy,
        )
    }

    /// Set one generated-value kind. A non-null value conflicts with the
    /// other two kinds; `policy` decides whether that fails or clears them.
    pub fn has_generated_value(
        &mut self,
        kind: GeneratedValueKind,
        value: Value,
        source: ConfigurationSource,
        policy: ConflictPolicy,
    ) -> Result<bool> {
        let entity = self.model.graph.display_name(self.property.node);
        let property = self.model.graph.require_property_mut(&self.property)?;
        if !property.annotations.can_set(kind.annotation_name(), &value, source) {
            return Ok(false);
        }

        if !value.is_null() {
            let present: Vec<(GeneratedValueKind, ConfigurationSource)> = kind
                .competitors()
                .filter_map(|other| {
                    property
                        .annotations
                        .source(other.annotation_name())
                        .map(|s| (other, s))
                })
                .collect();

            if let Some((existing, _)) = present.first() {
                if policy == ConflictPolicy::Throw {
                    return Err(OgmError::ConflictingGeneratedValue {
                        entity,
                        property: property.name.clone(),
                        requested: kind,
                        existing: *existing,
                    });
                }
            }
            if present.iter().any(|(_, s)| !source.overrides(Some(*s))) {
                return Ok(false);
            }
            for (other, _) in present {
                property.annotations.remove(other.annotation_name());
            }
        }

        property
            .annotations_mut()
            .set(kind.annotation_name(), value, source);
        Ok(true)
    }
}
