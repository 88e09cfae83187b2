//! Navigations: named traversals along a foreign key

use super::ids::{ForeignKeyId, NavigationRef, NodeId};
use crate::features::annotations::{Annotations, HasAnnotations};
use crate::shared::models::{ConfigurationSource, HasConfigurationSource, MemberDescriptor};

#[derive(Debug, Clone)]
pub struct Navigation {
    pub(crate) name: String,
    pub(crate) declaring_node: NodeId,
    pub(crate) foreign_key: ForeignKeyId,
    /// Declared on the dependent and pointing at the principal
    pub(crate) points_to_principal: bool,
    pub(crate) is_collection: bool,
    pub(crate) member: Option<MemberDescriptor>,
    pub(crate) configuration_source: ConfigurationSource,
    pub(crate) annotations: Annotations,
}

impl Navigation {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declaring_node(&self) -> NodeId {
        self.declaring_node
    }

    pub fn handle(&self) -> NavigationRef {
        NavigationRef::new(self.declaring_node, self.name.clone())
    }

    pub fn foreign_key(&self) -> ForeignKeyId {
        self.foreign_key
    }

    pub fn points_to_principal(&self) -> bool {
        self.points_to_principal
    }

    pub fn is_collection(&self) -> bool {
        self.is_collection
    }

    pub fn member(&self) -> Option<&MemberDescriptor> {
        self.member.as_ref()
    }
}

impl HasConfigurationSource for Navigation {
    fn configuration_source(&self) -> ConfigurationSource {
        self.configuration_source
    }

    fn update_configuration_source(&mut self, source: ConfigurationSource) {
        self.configuration_source = source.max_with(Some(self.configuration_source));
    }
}

impl HasAnnotations for Navigation {
    fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }
}
