//! Applies member-level storage attributes to new properties

use tracing::trace;

use crate::errors::Result;
use crate::features::conventions::domain::{Convention, PropertyAddedConvention};
use crate::features::metadata::domain::PropertyRef;
use crate::features::metadata::GraphModel;
use crate::shared::models::ConfigurationSource;

#[derive(Debug, Default, Clone, Copy)]
pub struct StorageAttributeConvention;

impl Convention for StorageAttributeConvention {
    fn name(&self) -> &str {
        "StorageAttribute"
    }
}

impl PropertyAddedConvention for StorageAttributeConvention {
    fn apply(&self, model: &mut GraphModel, property: PropertyRef) -> Result<Option<PropertyRef>> {
        let Some(attribute) = model
            .property(&property)
            .and_then(|p| p.member())
            .and_then(|m| m.storage_attribute())
            .cloned()
        else {
            return Ok(Some(property));
        };

        trace!(property = %property, "applying storage attribute");
        let source = ConfigurationSource::DataAnnotation;
        let mut builder = model.property_builder(property.clone());
        if let Some(name) = attribute.name.as_deref() {
            builder.has_storage_name(Some(name), source)?;
        }
        if let Some(type_name) = attribute.type_name.as_deref() {
            builder.has_storage_type(Some(type_name), source)?;
        }
        if let Some(order) = attribute.order {
            builder.has_storage_order(Some(order), source)?;
        }
        Ok(Some(property))
    }
}
