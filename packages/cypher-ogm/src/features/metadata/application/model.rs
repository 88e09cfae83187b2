//! Graph model: the mutable metadata graph plus its convention dispatcher
//!
//! Every structural mutation validates first, applies second and then raises
//! the matching convention event. The value returned by a mutation is the
//! value returned by the convention chain, so a convention can veto (`None`)
//! the item being added.
//!
//! Mutations here do not compare configuration sources; the source-guarded
//! entry points are the internal builders in `features::builder`.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::{OgmOptions, Validatable};
use crate::errors::{OgmError, Result};
use crate::features::conventions::{ConventionDispatcher, ConventionSet};
use crate::features::metadata::domain::{
    DefiningNavigation, ForeignKey, ForeignKeyId, Graph, IgnoredMember, Navigation, NavigationRef,
    Node, NodeId, NodeKind, Property, PropertyRef, SchemaError,
};
use crate::features::type_mapping::{CypherTypeMapper, TypeMapper};
use crate::shared::models::{
    ConfigurationSource, HasConfigurationSource, HasLabelsOrType, MemberDescriptor, NodeIdentity,
    TypeRef,
};
use crate::shared::utils::check_identifier;

pub struct GraphModel {
    pub(crate) graph: Graph,
    pub(crate) dispatcher: ConventionDispatcher,
    options: OgmOptions,
    type_mapper: Arc<dyn TypeMapper>,
}

impl GraphModel {
    pub fn new(conventions: ConventionSet) -> Result<Self> {
        Self::with_options(conventions, OgmOptions::default())
    }

    pub fn with_options(conventions: ConventionSet, options: OgmOptions) -> Result<Self> {
        Self::with_services(conventions, options, Arc::new(CypherTypeMapper::new()))
    }

    /// Create a model and run the graph-initialized conventions
    pub fn with_services(
        conventions: ConventionSet,
        options: OgmOptions,
        type_mapper: Arc<dyn TypeMapper>,
    ) -> Result<Self> {
        options.validate()?;
        let mut model = Self {
            graph: Graph::new(),
            dispatcher: ConventionDispatcher::new(
                Arc::new(conventions),
                options.max_convention_iterations,
            ),
            options,
            type_mapper,
        };
        model.fire_graph_initialized()?;
        Ok(model)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn options(&self) -> &OgmOptions {
        &self.options
    }

    pub fn type_mapper(&self) -> &dyn TypeMapper {
        self.type_mapper.as_ref()
    }

    pub fn conventions(&self) -> &ConventionSet {
        self.dispatcher.conventions()
    }

    pub fn dispatcher(&self) -> &ConventionDispatcher {
        &self.dispatcher
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.graph.node(id)
    }

    pub fn property(&self, property: &PropertyRef) -> Option<&Property> {
        self.graph.property(property)
    }

    pub fn navigation(&self, navigation: &NavigationRef) -> Option<&Navigation> {
        self.graph.navigation(navigation)
    }

    pub fn foreign_key(&self, fk: ForeignKeyId) -> Option<&ForeignKey> {
        self.graph.foreign_key(fk)
    }

    // ── nodes ────────────────────────────────────────────────────────────

    pub fn add_entity(
        &mut self,
        identity: NodeIdentity,
        source: ConfigurationSource,
    ) -> Result<Option<NodeId>> {
        self.add_node(NodeKind::Entity, identity, None, source)
    }

    /// Add an entity that exists only under `defining` through `navigation`
    pub fn add_dependent_entity(
        &mut self,
        identity: NodeIdentity,
        navigation: &str,
        defining: NodeId,
        source: ConfigurationSource,
    ) -> Result<Option<NodeId>> {
        check_identifier("navigation", navigation)?;
        self.graph.require_node(defining)?;
        let defining = DefiningNavigation {
            name: navigation.to_string(),
            node: defining,
        };
        self.add_node(NodeKind::Entity, identity, Some(defining), source)
    }

    pub fn add_relationship_node(
        &mut self,
        identity: NodeIdentity,
        source: ConfigurationSource,
    ) -> Result<Option<NodeId>> {
        self.add_node(NodeKind::Relationship, identity, None, source)
    }

    fn add_node(
        &mut self,
        kind: NodeKind,
        identity: NodeIdentity,
        defining: Option<DefiningNavigation>,
        source: ConfigurationSource,
    ) -> Result<Option<NodeId>> {
        let ignored = IgnoredMember::Node(identity.clone());
        if let Some(ignored_source) = self.graph.ignored_source(&ignored) {
            if !source.overrides(Some(ignored_source)) {
                debug!(entity = %identity, "entity is ignored, not adding");
                return Ok(None);
            }
            self.graph.unregister_ignored(&ignored);
        }

        let name = identity.display_name();
        match &defining {
            None => {
                if self.graph.find_node(&identity).is_some() {
                    return Err(SchemaError::DuplicateEntity { entity: name }.into());
                }
                if self.graph.has_dependents_with_identity(&identity) {
                    return Err(SchemaError::ClashingDependentEntity { entity: name }.into());
                }
            }
            Some(defining) => {
                if self.graph.find_node(&identity).is_some() {
                    return Err(SchemaError::ClashingNonDependentEntity { entity: name }.into());
                }
                if self
                    .graph
                    .find_dependent(&identity, &defining.name, defining.node)
                    .is_some()
                {
                    return Err(SchemaError::DuplicateEntity { entity: name }.into());
                }
            }
        }

        let id = self.graph.insert_node(kind, identity, defining, source);
        debug!(node = %id, entity = %name, kind = %kind, "node added");
        self.fire_entity_added(id)
    }

    /// Remove a node: dependents defined through it go too, derived nodes are
    /// re-parented onto its base and every foreign key touching it is removed.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Option<Node>> {
        if !self.graph.contains_node(id) {
            return Ok(None);
        }

        let defined: Vec<NodeId> = self
            .graph
            .nodes()
            .filter(|n| n.defining_navigation.as_ref().map_or(false, |d| d.node == id))
            .map(|n| n.id)
            .collect();
        for dependent in defined {
            self.remove_node(dependent)?;
        }

        let (base, derived, foreign_keys) = {
            let node = self.graph.require_node(id)?;
            let fks: Vec<ForeignKeyId> = node
                .foreign_keys
                .iter()
                .chain(node.referencing_foreign_keys.iter())
                .copied()
                .collect();
            (node.base, node.derived.iter().copied().collect::<Vec<_>>(), fks)
        };
        for fk in foreign_keys {
            self.remove_foreign_key(fk)?;
        }

        let carried: Vec<ForeignKeyId> = self
            .graph
            .foreign_keys()
            .filter(|fk| fk.relationship_node == Some(id))
            .map(|fk| fk.id)
            .collect();
        for fk in carried {
            if let Some(fk) = self.graph.foreign_key_mut(fk) {
                fk.relationship_node = None;
            }
        }

        for child in &derived {
            self.graph.set_base_link(*child, base);
        }
        self.graph.set_base_link(id, None);
        let removed = self.graph.detach_node(id);
        if let Some(base) = base {
            self.graph.invalidate_property_caches(base);
        }
        debug!(node = %id, derived = derived.len(), "node removed");

        for child in derived {
            if self.graph.contains_node(child) {
                self.graph.invalidate_property_caches(child);
                self.remove_dangling_foreign_keys(child)?;
                self.fire_base_entity_changed(child, Some(id))?;
            }
        }
        Ok(removed)
    }

    /// Change the base node. `None` detaches the node from its hierarchy.
    pub fn set_base_type(
        &mut self,
        node: NodeId,
        base: Option<NodeId>,
        source: ConfigurationSource,
    ) -> Result<Option<NodeId>> {
        let current = self.graph.require_node(node)?;
        let previous = current.base;
        if previous == base {
            let node_mut = self.graph.require_node_mut(node)?;
            node_mut.base_source = Some(source.max_with(node_mut.base_source));
            return Ok(Some(node));
        }

        if let Some(base) = base {
            if current.is_dependent() {
                return Err(SchemaError::DependentDerived {
                    entity: current.display_name(),
                }
                .into());
            }
            self.graph.validate_base_type(node, base)?;
        }

        if let Some(previous) = previous {
            self.graph.invalidate_property_caches(previous);
        }
        self.graph.set_base_link(node, base);
        {
            let node_mut = self.graph.require_node_mut(node)?;
            node_mut.base_source = Some(source.max_with(node_mut.base_source));
            node_mut.update_configuration_source(source);
        }
        if let Some(base) = base {
            if let Some(base_node) = self.graph.node_mut(base) {
                base_node.update_configuration_source(source);
            }
        }
        self.graph.invalidate_property_caches(node);
        debug!(node = %node, base = ?base, previous = ?previous, "base type changed");

        for id in std::iter::once(node).chain(self.graph.descendants(node)) {
            self.remove_dangling_foreign_keys(id)?;
        }

        self.fire_base_entity_changed(node, previous)
    }

    fn remove_dangling_foreign_keys(&mut self, node: NodeId) -> Result<()> {
        let Some(n) = self.graph.node(node) else {
            return Ok(());
        };
        let dangling: Vec<ForeignKeyId> = n
            .foreign_keys
            .iter()
            .chain(n.referencing_foreign_keys.iter())
            .copied()
            .filter(|fk| {
                self.graph
                    .foreign_key(*fk)
                    .map_or(false, |fk| self.graph.is_dangling(fk))
            })
            .collect();
        for fk in dangling {
            debug!(fk = %fk, node = %node, "removing dangling foreign key");
            self.remove_foreign_key(fk)?;
        }
        Ok(())
    }

    // ── properties ───────────────────────────────────────────────────────

    /// Add a shadow property
    pub fn add_property(
        &mut self,
        node: NodeId,
        name: &str,
        value_type: &TypeRef,
        source: ConfigurationSource,
    ) -> Result<Option<PropertyRef>> {
        self.add_property_with_member(node, name, value_type, None, source)
    }

    /// Add a property backed by the named member of the node's type
    pub fn add_member_property(
        &mut self,
        node: NodeId,
        member_name: &str,
        source: ConfigurationSource,
    ) -> Result<Option<PropertyRef>> {
        let n = self.graph.require_node(node)?;
        let member = n
            .clr_type()
            .and_then(|ty| ty.find_member(member_name))
            .cloned()
            .ok_or_else(|| SchemaError::MissingBackingMember {
                member: member_name.to_string(),
                entity: n.display_name(),
            })?;
        let value_type = member.member_type.clone();
        self.add_property_with_member(node, member_name, &value_type, Some(member), source)
    }

    pub fn add_property_with_member(
        &mut self,
        node: NodeId,
        name: &str,
        value_type: &TypeRef,
        member: Option<MemberDescriptor>,
        source: ConfigurationSource,
    ) -> Result<Option<PropertyRef>> {
        check_identifier("name", name)?;
        let n = self.graph.require_node(node)?;

        let ignored = IgnoredMember::member(&n.identity, name);
        if let Some(ignored_source) = self.graph.ignored_source(&ignored) {
            if !source.overrides(Some(ignored_source)) {
                trace!(node = %node, property = name, "property is ignored");
                return Ok(None);
            }
        }

        self.graph.validate_member_name(node, name, false)?;
        if let Some(member) = &member {
            self.check_backing_member(n, name, value_type, member)?;
        }

        self.graph.unregister_ignored(&ignored);
        let property = Property::new(name.to_string(), node, value_type.clone(), member, source);
        self.graph
            .require_node_mut(node)?
            .properties
            .insert(name.to_string(), property);
        self.graph.invalidate_property_caches(node);
        trace!(node = %node, property = name, "property added");

        self.fire_property_added(PropertyRef::new(node, name))
    }

    fn check_backing_member(
        &self,
        node: &Node,
        name: &str,
        value_type: &TypeRef,
        member: &MemberDescriptor,
    ) -> Result<()> {
        let declared_on_type = node
            .clr_type()
            .map_or(false, |ty| member.is_declared_on(ty));
        if !declared_on_type {
            return Err(SchemaError::BackingFieldOnIncompatibleType {
                member: member.name.clone(),
                declaring_type: member.declaring_type.clone(),
                entity: node.display_name(),
            }
            .into());
        }
        if !member.is_compatible_with(value_type) {
            return Err(SchemaError::BadBackingFieldType {
                member: member.name.clone(),
                member_type: member.member_type.name().to_string(),
                entity: node.display_name(),
                property: name.to_string(),
                property_type: value_type.name().to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Remove a property and every foreign key it carries
    pub fn remove_property(&mut self, property: &PropertyRef) -> Result<Option<Property>> {
        if self.graph.property(property).is_none() {
            return Ok(None);
        }
        for fk in self.graph.foreign_keys_using(property) {
            self.remove_foreign_key(fk)?;
        }
        let removed = self
            .graph
            .node_mut(property.node)
            .and_then(|n| n.properties.remove(&property.name));
        self.graph.invalidate_property_caches(property.node);
        trace!(property = %property, "property removed");
        Ok(removed)
    }

    pub fn set_property_nullable(
        &mut self,
        property: &PropertyRef,
        nullable: bool,
        source: ConfigurationSource,
    ) -> Result<Option<PropertyRef>> {
        let entity = self.graph.display_name(property.node);
        let p = self.graph.require_property_mut(property)?;
        if nullable && !p.value_type.is_nullable() {
            return Err(SchemaError::CannotBeNullable {
                property: p.name.clone(),
                entity,
                property_type: p.value_type.name().to_string(),
            }
            .into());
        }

        p.nullable_source = Some(source.max_with(p.nullable_source));
        if p.nullable == nullable {
            return Ok(Some(property.clone()));
        }
        p.nullable = nullable;
        self.fire_property_nullability_changed(property.clone())
    }

    // ── foreign keys ─────────────────────────────────────────────────────

    /// Add a foreign key declared on `dependent` pointing at `principal`
    pub fn add_foreign_key(
        &mut self,
        dependent: NodeId,
        properties: &[&str],
        principal: NodeId,
        source: ConfigurationSource,
    ) -> Result<Option<ForeignKeyId>> {
        self.graph.require_node(principal)?;
        let entity = self.graph.require_node(dependent)?.display_name();
        for (i, name) in properties.iter().enumerate() {
            if properties[..i].contains(name) {
                return Err(OgmError::invalid_argument(
                    "properties",
                    format!("'{}' is listed more than once", name),
                ));
            }
            if self.graph.find_property(dependent, name).is_none() {
                return Err(SchemaError::ForeignKeyPropertyNotFound {
                    property: name.to_string(),
                    entity,
                }
                .into());
            }
        }

        let properties = properties.iter().map(|p| p.to_string()).collect();
        let fk = self
            .graph
            .insert_foreign_key(dependent, properties, principal, source);
        self.graph.invalidate_property_caches(dependent);
        debug!(fk = %fk, dependent = %dependent, principal = %principal, "foreign key added");
        self.fire_foreign_key_added(fk)
    }

    /// Remove a foreign key together with its navigations
    pub fn remove_foreign_key(&mut self, fk: ForeignKeyId) -> Result<Option<ForeignKey>> {
        let Some((removed, navigations)) = self.graph.detach_foreign_key(fk) else {
            return Ok(None);
        };
        debug!(fk = %fk, navigations = navigations.len(), "foreign key removed");
        for navigation in navigations {
            self.fire_navigation_removed(navigation.source, navigation.target, &navigation.name)?;
        }
        Ok(Some(removed))
    }

    /// Replace the carrying properties of a foreign key
    pub fn set_foreign_key_properties(
        &mut self,
        fk: ForeignKeyId,
        properties: &[&str],
        source: ConfigurationSource,
    ) -> Result<ForeignKeyId> {
        let dependent = self.graph.require_foreign_key(fk)?.declaring_node;
        let entity = self.graph.display_name(dependent);
        for (i, name) in properties.iter().enumerate() {
            if properties[..i].contains(name) {
                return Err(OgmError::invalid_argument(
                    "properties",
                    format!("'{}' is listed more than once", name),
                ));
            }
            if self.graph.find_property(dependent, name).is_none() {
                return Err(SchemaError::ForeignKeyPropertyNotFound {
                    property: name.to_string(),
                    entity: entity.clone(),
                }
                .into());
            }
        }
        let fk_mut = self.graph.require_foreign_key_mut(fk)?;
        fk_mut.properties = properties.iter().map(|p| p.to_string()).collect();
        fk_mut.update_configuration_source(source);
        self.graph.invalidate_property_caches(dependent);
        Ok(fk)
    }

    pub fn set_foreign_key_unique(
        &mut self,
        fk: ForeignKeyId,
        unique: bool,
        source: ConfigurationSource,
    ) -> Result<Option<ForeignKeyId>> {
        let fk_mut = self.graph.require_foreign_key_mut(fk)?;
        fk_mut.is_unique_source = Some(source.max_with(fk_mut.is_unique_source));
        if fk_mut.is_unique == unique {
            return Ok(Some(fk));
        }
        fk_mut.is_unique = unique;
        let principal_navigation = fk_mut
            .principal_to_dependent
            .clone()
            .map(|name| NavigationRef::new(fk_mut.principal_node, name));
        if let Some(navigation) = principal_navigation {
            if let Some(navigation) = self.graph.navigation_mut(&navigation) {
                navigation.is_collection = !unique;
            }
        }
        self.fire_foreign_key_uniqueness_changed(fk)
    }

    pub fn set_foreign_key_ownership(
        &mut self,
        fk: ForeignKeyId,
        ownership: bool,
        source: ConfigurationSource,
    ) -> Result<Option<ForeignKeyId>> {
        let fk_mut = self.graph.require_foreign_key_mut(fk)?;
        fk_mut.is_ownership_source = Some(source.max_with(fk_mut.is_ownership_source));
        if fk_mut.is_ownership == ownership {
            return Ok(Some(fk));
        }
        fk_mut.is_ownership = ownership;
        self.fire_foreign_key_ownership_changed(fk)
    }

    /// Attach or detach the relationship-type node carrying the edge's properties
    pub fn set_relationship_node(
        &mut self,
        fk: ForeignKeyId,
        relationship_node: Option<NodeId>,
    ) -> Result<()> {
        if let Some(id) = relationship_node {
            let node = self.graph.require_node(id)?;
            if node.kind != NodeKind::Relationship {
                return Err(SchemaError::NodeKindMismatch {
                    entity: node.display_name(),
                    expected: NodeKind::Relationship.to_string(),
                    actual: node.kind.to_string(),
                }
                .into());
            }
        }
        self.graph.require_foreign_key_mut(fk)?.relationship_node = relationship_node;
        Ok(())
    }

    // ── navigations ──────────────────────────────────────────────────────

    /// Add a navigation on one end of a foreign key. `on_dependent` picks the
    /// dependent-to-principal end. An existing navigation on that end is
    /// removed first.
    pub fn add_navigation(
        &mut self,
        fk: ForeignKeyId,
        name: &str,
        on_dependent: bool,
        member: Option<MemberDescriptor>,
        source: ConfigurationSource,
    ) -> Result<Option<NavigationRef>> {
        check_identifier("name", name)?;
        let key = self.graph.require_foreign_key(fk)?;
        let (node, existing) = if on_dependent {
            (key.declaring_node, key.dependent_to_principal.clone())
        } else {
            (key.principal_node, key.principal_to_dependent.clone())
        };
        let is_collection = !on_dependent && !key.is_unique;

        let n = self.graph.require_node(node)?;
        let ignored = IgnoredMember::member(&n.identity, name);
        if let Some(ignored_source) = self.graph.ignored_source(&ignored) {
            if !source.overrides(Some(ignored_source)) {
                return Ok(None);
            }
        }
        if let Some(member) = &member {
            let declared = n.clr_type().map_or(false, |ty| member.is_declared_on(ty));
            if !declared {
                return Err(SchemaError::BackingFieldOnIncompatibleType {
                    member: member.name.clone(),
                    declaring_type: member.declaring_type.clone(),
                    entity: n.display_name(),
                }
                .into());
            }
        }

        if let Some(existing) = existing {
            if existing == name {
                return Ok(Some(NavigationRef::new(node, name)));
            }
            self.remove_navigation(&NavigationRef::new(node, existing))?;
        }
        self.graph.validate_member_name(node, name, true)?;
        self.graph.unregister_ignored(&ignored);

        let navigation = Navigation {
            name: name.to_string(),
            declaring_node: node,
            foreign_key: fk,
            points_to_principal: on_dependent,
            is_collection,
            member,
            configuration_source: source,
            annotations: Default::default(),
        };
        self.graph
            .require_node_mut(node)?
            .navigations
            .insert(name.to_string(), navigation);
        let key = self.graph.require_foreign_key_mut(fk)?;
        if on_dependent {
            key.dependent_to_principal = Some(name.to_string());
        } else {
            key.principal_to_dependent = Some(name.to_string());
        }
        self.graph.invalidate_property_caches(node);
        trace!(node = %node, navigation = name, fk = %fk, "navigation added");

        self.fire_navigation_added(NavigationRef::new(node, name))
    }

    pub fn remove_navigation(&mut self, navigation: &NavigationRef) -> Result<Option<Navigation>> {
        let Some(removed) = self
            .graph
            .node_mut(navigation.node)
            .and_then(|n| n.navigations.remove(&navigation.name))
        else {
            return Ok(None);
        };

        let mut target = navigation.node;
        if let Some(fk) = self.graph.foreign_key_mut(removed.foreign_key) {
            if removed.points_to_principal {
                fk.dependent_to_principal = None;
                target = fk.principal_node;
            } else {
                fk.principal_to_dependent = None;
                target = fk.declaring_node;
            }
        }
        self.graph.invalidate_property_caches(navigation.node);
        self.fire_navigation_removed(navigation.node, target, &navigation.name)?;
        Ok(Some(removed))
    }

    // ── ignore ───────────────────────────────────────────────────────────

    /// Exclude a node or member from the graph and remove it if present.
    ///
    /// Returns `false` when an existing item was configured with a stronger
    /// source than `source`; nothing is changed in that case.
    pub fn ignore(&mut self, member: IgnoredMember, source: ConfigurationSource) -> Result<bool> {
        match &member {
            IgnoredMember::Node(identity) => {
                let mut targets: Vec<NodeId> = self
                    .graph
                    .dependents_with_identity(identity)
                    .to_vec();
                targets.extend(self.graph.find_node(identity));
                for id in &targets {
                    let node = self.graph.require_node(*id)?;
                    if !source.overrides(Some(node.configuration_source)) {
                        debug!(entity = %identity, "ignore refused, entity configured with a stronger source");
                        return Ok(false);
                    }
                }

                let identity = identity.clone();
                self.graph.register_ignored(member, source);
                for id in targets {
                    self.remove_node(id)?;
                }
                debug!(entity = %identity, "entity ignored");
                self.fire_entity_ignored(&identity)
            }
            IgnoredMember::Member { node, name } => {
                let mut targets: Vec<NodeId> = self.graph.dependents_with_identity(node).to_vec();
                targets.extend(self.graph.find_node(node));
                let name = name.clone();
                self.ignore_member_on(&targets, member, &name, source)
            }
        }
    }

    /// Ignore a member of one node, which may be a dependent entity that
    /// shares its identity with others.
    pub fn ignore_node_member(
        &mut self,
        node: NodeId,
        name: &str,
        source: ConfigurationSource,
    ) -> Result<bool> {
        let identity = self.graph.require_node(node)?.identity.clone();
        self.ignore_member_on(&[node], IgnoredMember::member(&identity, name), name, source)
    }

    fn ignore_member_on(
        &mut self,
        targets: &[NodeId],
        member: IgnoredMember,
        name: &str,
        source: ConfigurationSource,
    ) -> Result<bool> {
        for id in targets {
            let property = PropertyRef::new(*id, name);
            let navigation = NavigationRef::new(*id, name);
            let stored = self
                .graph
                .property(&property)
                .map(|p| p.configuration_source)
                .or_else(|| self.graph.navigation(&navigation).map(|n| n.configuration_source));
            if !source.overrides(stored) {
                debug!(node = %id, member = name, "ignore refused, member configured with a stronger source");
                return Ok(false);
            }
        }

        self.graph.register_ignored(member, source);
        for id in targets {
            self.remove_property(&PropertyRef::new(*id, name))?;
            self.remove_navigation(&NavigationRef::new(*id, name))?;
        }
        Ok(true)
    }

    // ── lifecycle ────────────────────────────────────────────────────────

    /// Run the graph-built conventions. Call once configuration is complete.
    pub fn finalize(&mut self) -> Result<()> {
        debug!(nodes = self.graph.node_count(), "finalizing graph");
        self.fire_graph_built()
    }
}

impl std::fmt::Debug for GraphModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphModel")
            .field("graph", &self.graph)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
