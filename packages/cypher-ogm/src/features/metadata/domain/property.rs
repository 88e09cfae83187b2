//! Node properties

use std::cell::Cell;

use super::ids::{NodeId, PropertyRef};
use crate::features::annotations::{Annotations, HasAnnotations};
use crate::shared::models::{
    ConfigurationSource, HasConfigurationSource, MemberDescriptor, TypeRef,
};

/// Position of a property within its node's flattened property list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyIndexes {
    /// Index among all properties, base properties first
    pub index: usize,
    /// Index among properties without a backing member
    pub shadow_index: Option<usize>,
}

/// Named, typed attribute of a node
#[derive(Debug, Clone)]
pub struct Property {
    pub(crate) name: String,
    pub(crate) declaring_node: NodeId,
    pub(crate) value_type: TypeRef,
    pub(crate) member: Option<MemberDescriptor>,
    pub(crate) nullable: bool,
    pub(crate) nullable_source: Option<ConfigurationSource>,
    pub(crate) configuration_source: ConfigurationSource,
    pub(crate) indexes: Cell<Option<PropertyIndexes>>,
    pub(crate) annotations: Annotations,
}

impl Property {
    pub(crate) fn new(
        name: String,
        declaring_node: NodeId,
        value_type: TypeRef,
        member: Option<MemberDescriptor>,
        source: ConfigurationSource,
    ) -> Self {
        let nullable = value_type.is_nullable();
        Self {
            name,
            declaring_node,
            value_type,
            member,
            nullable,
            nullable_source: None,
            configuration_source: source,
            indexes: Cell::new(None),
            annotations: Annotations::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declaring_node(&self) -> NodeId {
        self.declaring_node
    }

    pub fn handle(&self) -> PropertyRef {
        PropertyRef::new(self.declaring_node, self.name.clone())
    }

    pub fn value_type(&self) -> &TypeRef {
        &self.value_type
    }

    pub fn member(&self) -> Option<&MemberDescriptor> {
        self.member.as_ref()
    }

    /// Properties without a backing member live only in the graph
    pub fn is_shadow(&self) -> bool {
        self.member.is_none()
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn nullable_source(&self) -> Option<ConfigurationSource> {
        self.nullable_source
    }

    pub(crate) fn invalidate_indexes(&self) {
        self.indexes.set(None);
    }
}

impl HasConfigurationSource for Property {
    fn configuration_source(&self) -> ConfigurationSource {
        self.configuration_source
    }

    fn update_configuration_source(&mut self, source: ConfigurationSource) {
        self.configuration_source = source.max_with(Some(self.configuration_source));
    }
}

impl HasAnnotations for Property {
    fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }
}
