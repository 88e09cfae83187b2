//! Metadata graph arena
//!
//! Owns every node and foreign key. Read queries live here; mutations that
//! must raise convention events live on `GraphModel`, which calls the
//! crate-internal slot operations below.

use std::collections::{BTreeMap, BTreeSet};

use super::error::SchemaError;
use super::foreign_key::ForeignKey;
use super::ids::{ForeignKeyId, NavigationRef, NodeId, PropertyRef};
use super::ignored::IgnoredMember;
use super::navigation::Navigation;
use super::node::{DefiningNavigation, Node, NodeKind, PropertyCounts};
use super::property::{Property, PropertyIndexes};
use crate::errors::{OgmError, Result};
use crate::features::annotations::{Annotations, HasAnnotations};
use crate::shared::models::{ConfigurationSource, HasLabelsOrType, NodeIdentity, TypeRef};

/// Navigation removed together with its foreign key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedNavigation {
    pub source: NodeId,
    pub target: NodeId,
    pub name: String,
}

#[derive(Debug, Default)]
pub struct Graph {
    nodes: Vec<Option<Node>>,
    by_identity: BTreeMap<NodeIdentity, NodeId>,
    dependents: BTreeMap<NodeIdentity, Vec<NodeId>>,
    foreign_keys: Vec<Option<ForeignKey>>,
    ignored: BTreeMap<IgnoredMember, ConfigurationSource>,
    annotations: Annotations,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    // ── nodes ────────────────────────────────────────────────────────────

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn require_node(&self, id: NodeId) -> Result<&Node> {
        self.node(id)
            .ok_or_else(|| OgmError::not_found("Node", id.to_string()))
    }

    pub(crate) fn require_node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.node_mut(id)
            .ok_or_else(|| OgmError::not_found("Node", id.to_string()))
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Live nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter_map(Option::as_ref)
    }

    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Non-dependent node with this identity
    pub fn find_node(&self, identity: &NodeIdentity) -> Option<NodeId> {
        self.by_identity.get(identity).copied()
    }

    pub fn find_node_by_type(&self, ty: &TypeRef) -> Option<NodeId> {
        self.find_node(&NodeIdentity::Type(ty.clone()))
    }

    pub fn find_node_by_labels(&self, labels: &[&str]) -> Option<NodeId> {
        self.find_node(&NodeIdentity::labels(labels.iter().copied()))
    }

    /// Dependent node reached from `defining` through `navigation`
    pub fn find_dependent(
        &self,
        identity: &NodeIdentity,
        navigation: &str,
        defining: NodeId,
    ) -> Option<NodeId> {
        self.dependents_with_identity(identity)
            .iter()
            .copied()
            .find(|id| {
                self.node(*id)
                    .and_then(|n| n.defining_navigation.as_ref())
                    .map_or(false, |d| d.name == navigation && d.node == defining)
            })
    }

    pub fn dependents_with_identity(&self, identity: &NodeIdentity) -> &[NodeId] {
        self.dependents
            .get(identity)
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_dependents_with_identity(&self, identity: &NodeIdentity) -> bool {
        !self.dependents_with_identity(identity).is_empty()
    }

    /// Name for diagnostics; falls back to the handle for removed nodes
    pub fn display_name(&self, id: NodeId) -> String {
        self.node(id)
            .map(|n| n.display_name())
            .unwrap_or_else(|| id.to_string())
    }

    // ── foreign keys ─────────────────────────────────────────────────────

    pub fn foreign_key(&self, id: ForeignKeyId) -> Option<&ForeignKey> {
        self.foreign_keys.get(id.index()).and_then(Option::as_ref)
    }

    pub(crate) fn foreign_key_mut(&mut self, id: ForeignKeyId) -> Option<&mut ForeignKey> {
        self.foreign_keys.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn require_foreign_key(&self, id: ForeignKeyId) -> Result<&ForeignKey> {
        self.foreign_key(id)
            .ok_or_else(|| OgmError::not_found("Foreign key", id.to_string()))
    }

    pub(crate) fn require_foreign_key_mut(&mut self, id: ForeignKeyId) -> Result<&mut ForeignKey> {
        self.foreign_key_mut(id)
            .ok_or_else(|| OgmError::not_found("Foreign key", id.to_string()))
    }

    pub fn contains_foreign_key(&self, id: ForeignKeyId) -> bool {
        self.foreign_key(id).is_some()
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = &ForeignKey> {
        self.foreign_keys.iter().filter_map(Option::as_ref)
    }

    /// Foreign keys between the two nodes, in either direction
    pub fn foreign_keys_between(&self, a: NodeId, b: NodeId) -> Vec<ForeignKeyId> {
        self.foreign_keys()
            .filter(|fk| {
                (fk.declaring_node == a && fk.principal_node == b)
                    || (fk.declaring_node == b && fk.principal_node == a)
            })
            .map(|fk| fk.id)
            .collect()
    }

    // ── properties and navigations ───────────────────────────────────────

    pub fn property(&self, property: &PropertyRef) -> Option<&Property> {
        self.node(property.node)?.properties.get(&property.name)
    }

    pub(crate) fn property_mut(&mut self, property: &PropertyRef) -> Option<&mut Property> {
        self.node_mut(property.node)?
            .properties
            .get_mut(&property.name)
    }

    pub fn require_property(&self, property: &PropertyRef) -> Result<&Property> {
        self.property(property).ok_or_else(|| {
            OgmError::not_found(
                "Property",
                format!("{}.{}", self.display_name(property.node), property.name),
            )
        })
    }

    pub(crate) fn require_property_mut(&mut self, property: &PropertyRef) -> Result<&mut Property> {
        let name = format!("{}.{}", self.display_name(property.node), property.name);
        self.property_mut(property)
            .ok_or_else(|| OgmError::not_found("Property", name))
    }

    pub fn navigation(&self, navigation: &NavigationRef) -> Option<&Navigation> {
        self.node(navigation.node)?
            .navigations
            .get(&navigation.name)
    }

    pub(crate) fn navigation_mut(&mut self, navigation: &NavigationRef) -> Option<&mut Navigation> {
        self.node_mut(navigation.node)?
            .navigations
            .get_mut(&navigation.name)
    }

    pub fn require_navigation(&self, navigation: &NavigationRef) -> Result<&Navigation> {
        self.navigation(navigation).ok_or_else(|| {
            OgmError::not_found(
                "Navigation",
                format!("{}.{}", self.display_name(navigation.node), navigation.name),
            )
        })
    }

    /// Node the navigation leads to
    pub fn navigation_target(&self, navigation: &Navigation) -> Option<NodeId> {
        let fk = self.foreign_key(navigation.foreign_key)?;
        Some(if navigation.points_to_principal {
            fk.principal_node
        } else {
            fk.declaring_node
        })
    }

    // ── hierarchy ────────────────────────────────────────────────────────

    /// Base chain, nearest first
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.node(id).and_then(|n| n.base);
        while let Some(base) = current {
            if base == id || chain.contains(&base) {
                break;
            }
            chain.push(base);
            current = self.node(base).and_then(|n| n.base);
        }
        chain
    }

    pub fn root(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().copied().unwrap_or(id)
    }

    /// All transitively derived nodes, pre-order
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = match self.node(id) {
            Some(node) => node.derived.iter().rev().copied().collect(),
            None => return result,
        };
        while let Some(next) = stack.pop() {
            if next == id || result.contains(&next) {
                continue;
            }
            result.push(next);
            if let Some(node) = self.node(next) {
                stack.extend(node.derived.iter().rev().copied());
            }
        }
        result
    }

    /// Root of the hierarchy followed by all of its descendants
    pub fn hierarchy(&self, id: NodeId) -> Vec<NodeId> {
        let root = self.root(id);
        let mut all = vec![root];
        all.extend(self.descendants(root));
        all
    }

    pub fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).contains(&ancestor)
    }

    /// Property declared on the node or inherited from an ancestor
    pub fn find_property(&self, node: NodeId, name: &str) -> Option<&Property> {
        std::iter::once(node)
            .chain(self.ancestors(node))
            .filter_map(|id| self.node(id))
            .find_map(|n| n.properties.get(name))
    }

    pub fn find_navigation(&self, node: NodeId, name: &str) -> Option<&Navigation> {
        std::iter::once(node)
            .chain(self.ancestors(node))
            .filter_map(|id| self.node(id))
            .find_map(|n| n.navigations.get(name))
    }

    /// Derived node that declares a property with this name
    pub fn find_derived_property(&self, node: NodeId, name: &str) -> Option<&Property> {
        self.descendants(node)
            .into_iter()
            .filter_map(|id| self.node(id))
            .find_map(|n| n.properties.get(name))
    }

    pub fn find_derived_navigation(&self, node: NodeId, name: &str) -> Option<&Navigation> {
        self.descendants(node)
            .into_iter()
            .filter_map(|id| self.node(id))
            .find_map(|n| n.navigations.get(name))
    }

    /// Properties visible on the node, base properties first, each level by name
    pub fn all_properties(&self, node: NodeId) -> Vec<&Property> {
        let mut chain = self.ancestors(node);
        chain.reverse();
        chain.push(node);
        chain
            .into_iter()
            .filter_map(|id| self.node(id))
            .flat_map(|n| n.properties.values())
            .collect()
    }

    pub fn all_navigations(&self, node: NodeId) -> Vec<&Navigation> {
        let mut chain = self.ancestors(node);
        chain.reverse();
        chain.push(node);
        chain
            .into_iter()
            .filter_map(|id| self.node(id))
            .flat_map(|n| n.navigations.values())
            .collect()
    }

    /// Foreign keys declared on the node or its ancestors
    pub fn all_foreign_keys(&self, node: NodeId) -> Vec<ForeignKeyId> {
        std::iter::once(node)
            .chain(self.ancestors(node))
            .filter_map(|id| self.node(id))
            .flat_map(|n| n.foreign_keys.iter().copied())
            .collect()
    }

    /// Names visible on the node and every node below it
    fn subtree_member_names(&self, node: NodeId) -> (BTreeSet<String>, BTreeSet<String>) {
        let mut properties = BTreeSet::new();
        let mut navigations = BTreeSet::new();
        for id in std::iter::once(node).chain(self.descendants(node)) {
            if let Some(n) = self.node(id) {
                properties.extend(n.properties.keys().cloned());
                navigations.extend(n.navigations.keys().cloned());
            }
        }
        (properties, navigations)
    }

    // ── caches ───────────────────────────────────────────────────────────

    pub fn property_counts(&self, node: NodeId) -> Option<PropertyCounts> {
        let n = self.node(node)?;
        if let Some(counts) = n.counts.get() {
            return Some(counts);
        }

        let properties = self.all_properties(node);
        let counts = PropertyCounts {
            properties: properties.len(),
            shadow_properties: properties.iter().filter(|p| p.is_shadow()).count(),
            navigations: self.all_navigations(node).len(),
            foreign_keys: self.all_foreign_keys(node).len(),
        };
        n.counts.set(Some(counts));
        Some(counts)
    }

    pub fn property_indexes(&self, property: &PropertyRef) -> Option<PropertyIndexes> {
        let target = self.property(property)?;
        if let Some(indexes) = target.indexes.get() {
            return Some(indexes);
        }

        // Indexes of a declared property are the same in every derived node,
        // so computing them from the declaring node is enough.
        let mut shadow_index = 0;
        for (index, p) in self.all_properties(property.node).into_iter().enumerate() {
            let shadow = if p.is_shadow() {
                shadow_index += 1;
                Some(shadow_index - 1)
            } else {
                None
            };
            p.indexes.set(Some(PropertyIndexes {
                index,
                shadow_index: shadow,
            }));
        }
        target.indexes.get()
    }

    /// Drop cached counts and indexes across the node's whole hierarchy
    pub(crate) fn invalidate_property_caches(&self, node: NodeId) {
        for id in self.hierarchy(node) {
            if let Some(n) = self.node(id) {
                n.invalidate_caches();
            }
        }
    }

    // ── foreign key queries ──────────────────────────────────────────────

    /// Foreign keys whose carrying properties include this property
    pub fn foreign_keys_using(&self, property: &PropertyRef) -> Vec<ForeignKeyId> {
        let candidates = std::iter::once(property.node).chain(self.descendants(property.node));
        let mut result = Vec::new();
        for id in candidates {
            let Some(node) = self.node(id) else { continue };
            for fk_id in &node.foreign_keys {
                let Some(fk) = self.foreign_key(*fk_id) else { continue };
                let uses = fk.properties.iter().any(|name| {
                    name == &property.name
                        && self
                            .find_property(fk.declaring_node, name)
                            .map_or(false, |p| p.declaring_node == property.node)
                });
                if uses {
                    result.push(*fk_id);
                }
            }
        }
        result
    }

    pub fn is_foreign_key_property(&self, property: &PropertyRef) -> bool {
        !self.foreign_keys_using(property).is_empty()
    }

    /// A relationship is required when none of its carrying properties is nullable
    pub fn is_required(&self, fk: ForeignKeyId) -> bool {
        let Some(fk) = self.foreign_key(fk) else {
            return false;
        };
        !fk.properties.iter().any(|name| {
            self.find_property(fk.declaring_node, name)
                .map_or(false, |p| p.is_nullable())
        })
    }

    /// Foreign key whose principal is gone or whose properties no longer resolve
    pub fn is_dangling(&self, fk: &ForeignKey) -> bool {
        !self.contains_node(fk.principal_node)
            || !self.contains_node(fk.declaring_node)
            || fk
                .properties
                .iter()
                .any(|name| self.find_property(fk.declaring_node, name).is_none())
    }

    // ── ignored registry ─────────────────────────────────────────────────

    pub fn ignored_source(&self, member: &IgnoredMember) -> Option<ConfigurationSource> {
        self.ignored.get(member).copied()
    }

    pub fn is_ignored(&self, member: &IgnoredMember) -> bool {
        self.ignored.contains_key(member)
    }

    pub fn ignored(&self) -> impl Iterator<Item = (&IgnoredMember, ConfigurationSource)> {
        self.ignored.iter().map(|(k, v)| (k, *v))
    }

    /// Register, keeping the strongest source on repeat
    pub(crate) fn register_ignored(&mut self, member: IgnoredMember, source: ConfigurationSource) {
        let stored = source.max_with(self.ignored.get(&member).copied());
        self.ignored.insert(member, stored);
    }

    pub(crate) fn unregister_ignored(&mut self, member: &IgnoredMember) {
        self.ignored.remove(member);
    }

    // ── validation ───────────────────────────────────────────────────────

    /// Check that `base` may become the base of `node`
    pub fn validate_base_type(&self, node: NodeId, base: NodeId) -> Result<()> {
        self.validate_base_hierarchy(node, base)?;
        self.validate_base_members(node, base)
    }

    /// Typedness, assignability, dependency, cycle and kind checks
    pub fn validate_base_hierarchy(&self, node: NodeId, base: NodeId) -> Result<()> {
        let entity = self.require_node(node)?;
        let candidate = self.require_node(base)?;
        let entity_name = entity.display_name();
        let base_name = candidate.display_name();

        match (entity.identity.clr_type(), candidate.identity.clr_type()) {
            (Some(_), None) => {
                return Err(SchemaError::NonClrBaseType {
                    entity: entity_name,
                    base: base_name,
                }
                .into())
            }
            (None, Some(_)) => {
                return Err(SchemaError::NonShadowBaseType {
                    entity: entity_name,
                    base: base_name,
                }
                .into())
            }
            (Some(entity_type), Some(base_type)) => {
                if !base_type.is_assignable_from(entity_type) || base_type == entity_type {
                    return Err(SchemaError::NotAssignableClrBaseType {
                        entity: entity_name,
                        base: base_name,
                    }
                    .into());
                }
            }
            (None, None) => {}
        }

        if candidate.is_dependent() {
            return Err(SchemaError::DependentBaseType {
                entity: entity_name,
                base: base_name,
            }
            .into());
        }

        if base == node || self.ancestors(base).contains(&node) {
            return Err(SchemaError::CircularInheritance {
                entity: entity_name,
                base: base_name,
            }
            .into());
        }

        if entity.kind != candidate.kind {
            return Err(SchemaError::BaseKindMismatch {
                entity: entity_name,
                base: base_name,
            }
            .into());
        }

        Ok(())
    }

    /// Member names of the new base must not collide with the node's subtree
    pub fn validate_base_members(&self, node: NodeId, base: NodeId) -> Result<()> {
        let entity_name = self.display_name(node);
        let base_name = self.display_name(base);

        let (subtree_properties, subtree_navigations) = self.subtree_member_names(node);
        let subtree: BTreeSet<&String> = subtree_properties
            .iter()
            .chain(subtree_navigations.iter())
            .collect();

        let duplicate_properties: Vec<&str> = self
            .all_properties(base)
            .into_iter()
            .map(|p| p.name.as_str())
            .filter(|name| subtree.iter().any(|s| s.as_str() == *name))
            .collect();
        if !duplicate_properties.is_empty() {
            return Err(SchemaError::DuplicatePropertiesOnBase {
                entity: entity_name,
                base: base_name,
                properties: duplicate_properties.join(", "),
            }
            .into());
        }

        let duplicate_navigations: Vec<&str> = self
            .all_navigations(base)
            .into_iter()
            .map(|n| n.name.as_str())
            .filter(|name| subtree.iter().any(|s| s.as_str() == *name))
            .collect();
        if !duplicate_navigations.is_empty() {
            return Err(SchemaError::DuplicateNavigationsOnBase {
                entity: entity_name,
                base: base_name,
                navigations: duplicate_navigations.join(", "),
            }
            .into());
        }

        Ok(())
    }

    /// Check that a property or navigation named `name` may be added to `node`
    pub fn validate_member_name(&self, node: NodeId, name: &str, is_navigation: bool) -> Result<()> {
        let entity = self.display_name(node);
        let property = self
            .find_property(node, name)
            .or_else(|| self.find_derived_property(node, name));
        let navigation = self
            .find_navigation(node, name)
            .or_else(|| self.find_derived_navigation(node, name));

        let err = match (is_navigation, property, navigation) {
            (false, Some(p), _) => SchemaError::DuplicateProperty {
                property: name.to_string(),
                entity,
                duplicate_entity: self.display_name(p.declaring_node),
            },
            (false, None, Some(n)) => SchemaError::ConflictingNavigation {
                property: name.to_string(),
                entity,
                navigation_entity: self.display_name(n.declaring_node),
            },
            (true, _, Some(n)) => SchemaError::DuplicateNavigation {
                navigation: name.to_string(),
                entity,
                duplicate_entity: self.display_name(n.declaring_node),
            },
            (true, Some(p), None) => SchemaError::ConflictingProperty {
                navigation: name.to_string(),
                entity,
                property_entity: self.display_name(p.declaring_node),
            },
            (_, None, None) => return Ok(()),
        };
        Err(err.into())
    }

    // ── slot operations ──────────────────────────────────────────────────

    pub(crate) fn insert_node(
        &mut self,
        kind: NodeKind,
        identity: NodeIdentity,
        defining_navigation: Option<DefiningNavigation>,
        source: ConfigurationSource,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        if defining_navigation.is_some() {
            self.dependents
                .entry(identity.clone())
                .or_default()
                .push(id);
        } else {
            self.by_identity.insert(identity.clone(), id);
        }
        self.nodes
            .push(Some(Node::new(id, kind, identity, defining_navigation, source)));
        id
    }

    /// Remove the slot and index entries. Hierarchy links and foreign keys
    /// are the caller's responsibility.
    pub(crate) fn detach_node(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.get_mut(id.index())?.take()?;
        if node.defining_navigation.is_some() {
            if let Some(ids) = self.dependents.get_mut(&node.identity) {
                ids.retain(|d| *d != id);
                if ids.is_empty() {
                    self.dependents.remove(&node.identity);
                }
            }
        } else if self.by_identity.get(&node.identity) == Some(&id) {
            self.by_identity.remove(&node.identity);
        }
        Some(node)
    }

    pub(crate) fn insert_foreign_key(
        &mut self,
        declaring_node: NodeId,
        properties: Vec<String>,
        principal_node: NodeId,
        source: ConfigurationSource,
    ) -> ForeignKeyId {
        let id = ForeignKeyId(self.foreign_keys.len() as u32);
        self.foreign_keys.push(Some(ForeignKey {
            id,
            declaring_node,
            principal_node,
            properties,
            dependent_to_principal: None,
            principal_to_dependent: None,
            is_unique: false,
            is_unique_source: None,
            is_ownership: false,
            is_ownership_source: None,
            relationship_node: None,
            configuration_source: source,
            annotations: Annotations::new(),
        }));
        if let Some(node) = self.node_mut(declaring_node) {
            node.foreign_keys.insert(id);
        }
        if let Some(node) = self.node_mut(principal_node) {
            node.referencing_foreign_keys.insert(id);
        }
        id
    }

    /// Remove the foreign key and the navigations that ride on it
    pub(crate) fn detach_foreign_key(
        &mut self,
        id: ForeignKeyId,
    ) -> Option<(ForeignKey, Vec<RemovedNavigation>)> {
        let fk = self.foreign_keys.get_mut(id.index())?.take()?;
        let mut removed = Vec::new();

        if let Some(node) = self.node_mut(fk.declaring_node) {
            node.foreign_keys.remove(&id);
            if let Some(name) = &fk.dependent_to_principal {
                if node.navigations.remove(name).is_some() {
                    removed.push(RemovedNavigation {
                        source: fk.declaring_node,
                        target: fk.principal_node,
                        name: name.clone(),
                    });
                }
            }
        }
        if let Some(node) = self.node_mut(fk.principal_node) {
            node.referencing_foreign_keys.remove(&id);
            if let Some(name) = &fk.principal_to_dependent {
                if node.navigations.remove(name).is_some() {
                    removed.push(RemovedNavigation {
                        source: fk.principal_node,
                        target: fk.declaring_node,
                        name: name.clone(),
                    });
                }
            }
        }
        for node in [fk.declaring_node, fk.principal_node] {
            if self.contains_node(node) {
                self.invalidate_property_caches(node);
            }
        }
        Some((fk, removed))
    }

    pub(crate) fn set_base_link(&mut self, node: NodeId, base: Option<NodeId>) {
        let previous = self.node(node).and_then(|n| n.base);
        if let Some(old) = previous {
            if let Some(old_node) = self.node_mut(old) {
                old_node.derived.remove(&node);
            }
        }
        if let Some(new) = base {
            if let Some(new_node) = self.node_mut(new) {
                new_node.derived.insert(node);
            }
        }
        if let Some(n) = self.node_mut(node) {
            n.base = base;
        }
    }
}

impl HasAnnotations for Graph {
    fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }
}
