//! Foreign keys: the edges of the graph
//!
//! The dependent (declaring) node is the end of the relationship and the
//! principal is its start, unless the relationship start annotation says
//! otherwise.

use super::ids::{ForeignKeyId, NodeId};
use crate::features::annotations::{Annotations, HasAnnotations};
use crate::shared::models::{ConfigurationSource, HasConfigurationSource};

#[derive(Debug, Clone)]
pub struct ForeignKey {
    pub(crate) id: ForeignKeyId,
    pub(crate) declaring_node: NodeId,
    pub(crate) principal_node: NodeId,
    pub(crate) properties: Vec<String>,
    pub(crate) dependent_to_principal: Option<String>,
    pub(crate) principal_to_dependent: Option<String>,
    pub(crate) is_unique: bool,
    pub(crate) is_unique_source: Option<ConfigurationSource>,
    pub(crate) is_ownership: bool,
    pub(crate) is_ownership_source: Option<ConfigurationSource>,
    pub(crate) relationship_node: Option<NodeId>,
    pub(crate) configuration_source: ConfigurationSource,
    pub(crate) annotations: Annotations,
}

impl ForeignKey {
    pub fn id(&self) -> ForeignKeyId {
        self.id
    }

    /// Dependent side
    pub fn declaring_node(&self) -> NodeId {
        self.declaring_node
    }

    pub fn principal_node(&self) -> NodeId {
        self.principal_node
    }

    /// Names of the carrying properties, resolved against the dependent hierarchy
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    pub fn dependent_to_principal(&self) -> Option<&str> {
        self.dependent_to_principal.as_deref()
    }

    pub fn principal_to_dependent(&self) -> Option<&str> {
        self.principal_to_dependent.as_deref()
    }

    pub fn has_navigations(&self) -> bool {
        self.dependent_to_principal.is_some() || self.principal_to_dependent.is_some()
    }

    pub fn is_unique(&self) -> bool {
        self.is_unique
    }

    pub fn is_unique_source(&self) -> Option<ConfigurationSource> {
        self.is_unique_source
    }

    pub fn is_ownership(&self) -> bool {
        self.is_ownership
    }

    pub fn is_ownership_source(&self) -> Option<ConfigurationSource> {
        self.is_ownership_source
    }

    /// Relationship-type node carrying the edge's own properties
    pub fn relationship_node(&self) -> Option<NodeId> {
        self.relationship_node
    }

    pub fn is_self_referencing(&self) -> bool {
        self.declaring_node == self.principal_node
    }

    pub fn connects(&self, node: NodeId) -> bool {
        self.declaring_node == node || self.principal_node == node
    }
}

impl HasConfigurationSource for ForeignKey {
    fn configuration_source(&self) -> ConfigurationSource {
        self.configuration_source
    }

    fn update_configuration_source(&mut self, source: ConfigurationSource) {
        self.configuration_source = source.max_with(Some(self.configuration_source));
    }
}

impl HasAnnotations for ForeignKey {
    fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }
}
