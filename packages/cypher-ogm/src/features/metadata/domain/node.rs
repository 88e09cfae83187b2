//! Graph nodes
//!
//! One struct covers entities and relationship-type nodes; `NodeKind` tells
//! them apart.

use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::foreign_key::ForeignKey;
use super::ids::{ForeignKeyId, NodeId};
use super::navigation::Navigation;
use super::property::Property;
use crate::features::annotations::{Annotations, HasAnnotations};
use crate::shared::models::{
    ConfigurationSource, HasConfigurationSource, HasLabelsOrType, NodeIdentity,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Entity,
    /// Edge class carrying its own properties
    Relationship,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Entity => f.write_str("entity"),
            NodeKind::Relationship => f.write_str("relationship"),
        }
    }
}

/// Navigation through which a dependent entity is reached
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DefiningNavigation {
    pub name: String,
    pub node: NodeId,
}

/// Flattened member counts, inherited members included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PropertyCounts {
    pub properties: usize,
    pub shadow_properties: usize,
    pub navigations: usize,
    pub foreign_keys: usize,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) kind: NodeKind,
    pub(crate) identity: NodeIdentity,
    pub(crate) base: Option<NodeId>,
    pub(crate) base_source: Option<ConfigurationSource>,
    pub(crate) configuration_source: ConfigurationSource,
    pub(crate) derived: BTreeSet<NodeId>,
    pub(crate) defining_navigation: Option<DefiningNavigation>,
    pub(crate) properties: BTreeMap<String, Property>,
    pub(crate) navigations: BTreeMap<String, Navigation>,
    /// Foreign keys where this node is the dependent
    pub(crate) foreign_keys: BTreeSet<ForeignKeyId>,
    /// Foreign keys where this node is the principal
    pub(crate) referencing_foreign_keys: BTreeSet<ForeignKeyId>,
    pub(crate) counts: Cell<Option<PropertyCounts>>,
    pub(crate) annotations: Annotations,
}

impl Node {
    pub(crate) fn new(
        id: NodeId,
        kind: NodeKind,
        identity: NodeIdentity,
        defining_navigation: Option<DefiningNavigation>,
        source: ConfigurationSource,
    ) -> Self {
        Self {
            id,
            kind,
            identity,
            base: None,
            base_source: None,
            configuration_source: source,
            derived: BTreeSet::new(),
            defining_navigation,
            properties: BTreeMap::new(),
            navigations: BTreeMap::new(),
            foreign_keys: BTreeSet::new(),
            referencing_foreign_keys: BTreeSet::new(),
            counts: Cell::new(None),
            annotations: Annotations::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn base(&self) -> Option<NodeId> {
        self.base
    }

    pub fn base_source(&self) -> Option<ConfigurationSource> {
        self.base_source
    }

    /// Directly derived nodes
    pub fn derived(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.derived.iter().copied()
    }

    pub fn defining_navigation(&self) -> Option<&DefiningNavigation> {
        self.defining_navigation.as_ref()
    }

    pub fn is_dependent(&self) -> bool {
        self.defining_navigation.is_some()
    }

    /// Properties declared on this node, ordered by name
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// Navigations declared on this node, ordered by name
    pub fn navigations(&self) -> impl Iterator<Item = &Navigation> {
        self.navigations.values()
    }

    pub fn navigation(&self, name: &str) -> Option<&Navigation> {
        self.navigations.get(name)
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = ForeignKeyId> + '_ {
        self.foreign_keys.iter().copied()
    }

    pub fn referencing_foreign_keys(&self) -> impl Iterator<Item = ForeignKeyId> + '_ {
        self.referencing_foreign_keys.iter().copied()
    }

    pub(crate) fn invalidate_caches(&self) {
        self.counts.set(None);
        for property in self.properties.values() {
            property.invalidate_indexes();
        }
    }

    /// Whether the foreign key is declared on this node
    pub fn declares(&self, fk: &ForeignKey) -> bool {
        fk.declaring_node == self.id
    }
}

impl HasLabelsOrType for Node {
    fn identity(&self) -> &NodeIdentity {
        &self.identity
    }
}

impl HasConfigurationSource for Node {
    fn configuration_source(&self) -> ConfigurationSource {
        self.configuration_source
    }

    fn update_configuration_source(&mut self, source: ConfigurationSource) {
        self.configuration_source = source.max_with(Some(self.configuration_source));
    }
}

impl HasAnnotations for Node {
    fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }
}
