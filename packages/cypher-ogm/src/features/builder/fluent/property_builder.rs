//! Fluent property configuration
//!
//! Generated-value setters clear competing settings instead of failing.

use serde_json::Value;

use crate::errors::Result;
use crate::features::annotations::ConflictPolicy;
use crate::features::metadata::domain::PropertyRef;
use crate::features::metadata::GraphModel;
use crate::shared::models::ConfigurationSource;

const EXPLICIT: ConfigurationSource = ConfigurationSource::Explicit;

pub struct PropertyBuilder<'m> {
    model: &'m mut GraphModel,
    property: PropertyRef,
}

impl<'m> PropertyBuilder<'m> {
    pub(crate) fn new(model: &'m mut GraphModel, property: PropertyRef) -> Self {
        Self { model, property }
    }

    pub fn handle(&self) -> &PropertyRef {
        &self.property
    }

    pub fn has_storage_name(&mut self, name: &str) -> Result<&mut Self> {
        self.model
            .property_builder(self.property.clone())
            .has_storage_name(Some(name), EXPLICIT)?;
        Ok(self)
    }

    pub fn has_storage_type(&mut self, type_name: &str) -> Result<&mut Self> {
        self.model
            .property_builder(self.property.clone())
            .has_storage_type(Some(type_name), EXPLICIT)?;
        Ok(self)
    }

    pub fn has_storage_order(&mut self, order: u32) -> Result<&mut Self> {
        self.model
            .property_builder(self.property.clone())
            .has_storage_order(Some(order), EXPLICIT)?;
        Ok(self)
    }

    pub fn has_default_value(&mut self, value: impl Into<Value>) -> Result<&mut Self> {
        self.model
            .property_builder(self.property.clone())
            .has_default_value(value.into(), EXPLICIT, ConflictPolicy::Clear)?;
        Ok(self)
    }

    pub fn has_default_storage_constraint(&mut self, sql: &str) -> Result<&mut Self> {
        self.model
            .property_builder(self.property.clone())
            .has_default_storage_constraint(Some(sql), EXPLICIT, ConflictPolicy::Clear)?;
        Ok(self)
    }

    pub fn has_computed_storage_constraint(&mut self, sql: &str) -> Result<&mut Self> {
        self.model
            .property_builder(self.property.clone())
            .has_computed_storage_constraint(Some(sql), EXPLICIT, ConflictPolicy::Clear)?;
        Ok(self)
    }

    /// Non-nullable when `true`. Fails for nullable on a non-nullable type.
    pub fn is_required(&mut self, required: bool) -> Result<&mut Self> {
        self.model
            .property_builder(self.property.clone())
            .is_nullable(!required, EXPLICIT)?;
        Ok(self)
    }

    pub fn has_annotation(&mut self, name: &str, value: Value) -> Result<&mut Self> {
        self.model
            .property_builder(self.property.clone())
            .has_annotation(name, value, EXPLICIT)?;
        Ok(self)
    }
}
