//! Convention dispatcher
//!
//! Outside a batch, events run their handler chain immediately. Inside a
//! batch they are appended to the open delayed scope instead, and the
//! dispatch call returns its input unchanged. When the outermost batch ends
//! the dispatcher replays the queue as a trampoline: close the scope, open a
//! fresh one to capture nested events, replay the closed events in order,
//! repeat until a closed scope comes back empty.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use tracing::{debug, error, trace, warn};

use crate::errors::{OgmError, Result};
use crate::features::conventions::domain::{Convention, ConventionEvent, ConventionSet};
use crate::features::metadata::domain::{ForeignKeyId, Graph, NavigationRef, NodeId, PropertyRef};
use crate::features::metadata::GraphModel;
use crate::shared::models::NodeIdentity;

#[derive(Debug, Default)]
struct DelayedScope {
    events: Vec<ConventionEvent>,
    read_only: bool,
}

pub struct ConventionDispatcher {
    conventions: Arc<ConventionSet>,
    batch_depth: usize,
    scope: Option<DelayedScope>,
    replaying: bool,
    max_iterations: usize,
}

impl ConventionDispatcher {
    pub(crate) fn new(conventions: Arc<ConventionSet>, max_iterations: usize) -> Self {
        Self {
            conventions,
            batch_depth: 0,
            scope: None,
            replaying: false,
            max_iterations,
        }
    }

    pub fn conventions(&self) -> &ConventionSet {
        &self.conventions
    }

    pub fn batch_depth(&self) -> usize {
        self.batch_depth
    }

    /// Whether dispatched events are currently queued instead of run
    pub fn is_delaying(&self) -> bool {
        self.scope.is_some()
    }

    pub fn pending_events(&self) -> usize {
        self.scope.as_ref().map_or(0, |s| s.events.len())
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Append to the open scope. Returns `false` when no scope is open and
    /// the caller must run the chain itself.
    pub(crate) fn enqueue(&mut self, event: ConventionEvent) -> Result<bool> {
        match self.scope.as_mut() {
            None => Ok(false),
            Some(scope) if scope.read_only => Err(OgmError::ConventionScopeClosed {
                event: event.to_string(),
            }),
            Some(scope) => {
                trace!(event = %event, queued = scope.events.len() + 1, "convention event queued");
                scope.events.push(event);
                Ok(true)
            }
        }
    }

    pub(crate) fn begin_batch(&mut self) {
        self.batch_depth += 1;
        if self.scope.is_none() {
            self.scope = Some(DelayedScope::default());
        }
        debug!(depth = self.batch_depth, "convention batch started");
    }

    /// Mark the open scope read-only and take its events
    fn close_scope(&mut self) -> Vec<ConventionEvent> {
        match self.scope.as_mut() {
            Some(scope) => {
                scope.read_only = true;
                std::mem::take(&mut scope.events)
            }
            None => Vec::new(),
        }
    }

    /// Back to immediate execution with nothing queued
    fn reset(&mut self) {
        self.batch_depth = 0;
        self.scope = None;
        self.replaying = false;
    }
}

impl fmt::Debug for ConventionDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConventionDispatcher")
            .field("batch_depth", &self.batch_depth)
            .field("pending_events", &self.pending_events())
            .field("replaying", &self.replaying)
            .field("max_iterations", &self.max_iterations)
            .finish()
    }
}

/// Open batch. Queued events replay on `run` or when the guard is dropped.
///
/// Errors raised by a drop-triggered replay are logged; call `run` to get
/// them.
#[must_use = "dropping the batch replays immediately and only logs replay errors; call `run`"]
pub struct ConventionBatch<'m> {
    model: &'m mut GraphModel,
    finished: bool,
}

impl<'m> ConventionBatch<'m> {
    pub fn run(mut self) -> Result<()> {
        self.finished = true;
        self.model.end_batch()
    }
}

impl Deref for ConventionBatch<'_> {
    type Target = GraphModel;

    fn deref(&self) -> &GraphModel {
        self.model
    }
}

impl DerefMut for ConventionBatch<'_> {
    fn deref_mut(&mut self) -> &mut GraphModel {
        self.model
    }
}

impl Drop for ConventionBatch<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(err) = self.model.end_batch() {
            error!(error = %err, "convention replay failed while closing a batch");
        }
    }
}

impl GraphModel {
    /// Open a batch; nested batches only bump the depth
    pub fn start_batch(&mut self) -> ConventionBatch<'_> {
        self.dispatcher.begin_batch();
        ConventionBatch {
            model: self,
            finished: false,
        }
    }

    /// Run `f` inside a batch and replay the queued events afterwards
    pub fn in_batch<R>(&mut self, f: impl FnOnce(&mut GraphModel) -> Result<R>) -> Result<R> {
        self.dispatcher.begin_batch();
        let result = f(self);
        let ended = self.end_batch();
        let value = result?;
        ended?;
        Ok(value)
    }

    pub(crate) fn end_batch(&mut self) -> Result<()> {
        let dispatcher = &mut self.dispatcher;
        if dispatcher.batch_depth == 0 {
            return Ok(());
        }
        dispatcher.batch_depth -= 1;
        if dispatcher.batch_depth > 0 || dispatcher.replaying {
            return Ok(());
        }

        let result = self.replay_pending();
        self.dispatcher.reset();
        result
    }

    fn replay_pending(&mut self) -> Result<()> {
        self.dispatcher.replaying = true;
        let limit = self.dispatcher.max_iterations;
        let mut iterations = 0usize;
        let mut round = 0usize;

        loop {
            let events = self.dispatcher.close_scope();
            if events.is_empty() {
                break;
            }
            round += 1;
            debug!(round, events = events.len(), "replaying convention events");
            self.dispatcher.scope = Some(DelayedScope::default());

            for event in events {
                iterations += 1;
                if iterations > limit {
                    error!(limit, "convention replay did not reach a fixed point");
                    return Err(OgmError::ConventionLoop { limit });
                }
                self.replay_event(event)?;
            }
        }

        debug!(rounds = round, events = iterations, "convention batch finished");
        Ok(())
    }

    fn replay_event(&mut self, event: ConventionEvent) -> Result<()> {
        trace!(event = %event, "replaying convention event");
        match event {
            ConventionEvent::GraphInitialized => self.run_graph_initialized(),
            ConventionEvent::EntityAdded(node) => self.run_entity_added(node).map(drop),
            ConventionEvent::EntityIgnored(identity) => {
                self.run_entity_ignored(&identity).map(drop)
            }
            ConventionEvent::BaseEntityChanged { node, previous } => {
                self.run_base_entity_changed(node, previous).map(drop)
            }
            ConventionEvent::PropertyAdded(property) => {
                self.run_property_added(property).map(drop)
            }
            ConventionEvent::PropertyNullabilityChanged(property) => {
                self.run_property_nullability_changed(property).map(drop)
            }
            ConventionEvent::ForeignKeyAdded(fk) => self.run_foreign_key_added(fk).map(drop),
            ConventionEvent::ForeignKeyUniquenessChanged(fk) => {
                self.run_foreign_key_uniqueness_changed(fk).map(drop)
            }
            ConventionEvent::ForeignKeyOwnershipChanged(fk) => {
                self.run_foreign_key_ownership_changed(fk).map(drop)
            }
            ConventionEvent::NavigationAdded(navigation) => {
                self.run_navigation_added(navigation).map(drop)
            }
            ConventionEvent::NavigationRemoved {
                source,
                target,
                name,
            } => self.run_navigation_removed(source, target, &name).map(drop),
            ConventionEvent::GraphBuilt => self.run_graph_built(),
        }
    }

    /// Run a handle-returning chain, stopping on veto or detachment
    fn run_chain<H, C>(
        &mut self,
        handlers: &[Arc<C>],
        handle: H,
        is_attached: fn(&Graph, &H) -> bool,
        apply: impl Fn(&C, &mut GraphModel, H) -> Result<Option<H>>,
    ) -> Result<Option<H>>
    where
        H: Clone + fmt::Display,
        C: Convention + ?Sized,
    {
        let mut current = handle;
        for convention in handlers {
            if !is_attached(&self.graph, &current) {
                trace!(handle = %current, "handle detached, stopping convention chain");
                return Ok(None);
            }
            match apply(convention.as_ref(), self, current.clone())? {
                Some(next) => current = next,
                None => {
                    warn!(convention = convention.name(), handle = %current, "convention vetoed");
                    return Ok(None);
                }
            }
        }
        Ok(is_attached(&self.graph, &current).then_some(current))
    }

    // ── dispatch entry points ────────────────────────────────────────────

    pub(crate) fn fire_graph_initialized(&mut self) -> Result<()> {
        if self.dispatcher.enqueue(ConventionEvent::GraphInitialized)? {
            return Ok(());
        }
        self.run_graph_initialized()
    }

    fn run_graph_initialized(&mut self) -> Result<()> {
        let conventions = self.dispatcher.conventions.clone();
        for convention in &conventions.graph_initialized {
            convention.apply(self)?;
        }
        Ok(())
    }

    pub(crate) fn fire_entity_added(&mut self, node: NodeId) -> Result<Option<NodeId>> {
        if self.dispatcher.enqueue(ConventionEvent::EntityAdded(node))? {
            return Ok(Some(node));
        }
        self.run_entity_added(node)
    }

    fn run_entity_added(&mut self, node: NodeId) -> Result<Option<NodeId>> {
        let conventions = self.dispatcher.conventions.clone();
        self.run_chain(
            &conventions.entity_added,
            node,
            |graph, node| graph.contains_node(*node),
            |c, model, node| c.apply(model, node),
        )
    }

    pub(crate) fn fire_entity_ignored(&mut self, identity: &NodeIdentity) -> Result<bool> {
        if self
            .dispatcher
            .enqueue(ConventionEvent::EntityIgnored(identity.clone()))?
        {
            return Ok(true);
        }
        self.run_entity_ignored(identity)
    }

    fn run_entity_ignored(&mut self, identity: &NodeIdentity) -> Result<bool> {
        let conventions = self.dispatcher.conventions.clone();
        for convention in &conventions.entity_ignored {
            if !convention.apply(self, identity)? {
                warn!(convention = convention.name(), entity = %identity, "convention stopped entity-ignored chain");
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub(crate) fn fire_base_entity_changed(
        &mut self,
        node: NodeId,
        previous: Option<NodeId>,
    ) -> Result<Option<NodeId>> {
        if self
            .dispatcher
            .enqueue(ConventionEvent::BaseEntityChanged { node, previous })?
        {
            return Ok(Some(node));
        }
        self.run_base_entity_changed(node, previous)
    }

    fn run_base_entity_changed(
        &mut self,
        node: NodeId,
        previous: Option<NodeId>,
    ) -> Result<Option<NodeId>> {
        let conventions = self.dispatcher.conventions.clone();
        self.run_chain(
            &conventions.base_entity_changed,
            node,
            |graph, node| graph.contains_node(*node),
            |c, model, node| c.apply(model, node, previous),
        )
    }

    pub(crate) fn fire_property_added(&mut self, property: PropertyRef) -> Result<Option<PropertyRef>> {
        if self
            .dispatcher
            .enqueue(ConventionEvent::PropertyAdded(property.clone()))?
        {
            return Ok(Some(property));
        }
        self.run_property_added(property)
    }

    fn run_property_added(&mut self, property: PropertyRef) -> Result<Option<PropertyRef>> {
        let conventions = self.dispatcher.conventions.clone();
        self.run_chain(
            &conventions.property_added,
            property,
            |graph, p| graph.property(p).is_some(),
            |c, model, p| c.apply(model, p),
        )
    }

    pub(crate) fn fire_property_nullability_changed(
        &mut self,
        property: PropertyRef,
    ) -> Result<Option<PropertyRef>> {
        if self
            .dispatcher
            .enqueue(ConventionEvent::PropertyNullabilityChanged(property.clone()))?
        {
            return Ok(Some(property));
        }
        self.run_property_nullability_changed(property)
    }

    fn run_property_nullability_changed(
        &mut self,
        property: PropertyRef,
    ) -> Result<Option<PropertyRef>> {
        let conventions = self.dispatcher.conventions.clone();
        self.run_chain(
            &conventions.property_nullability_changed,
            property,
            |graph, p| graph.property(p).is_some(),
            |c, model, p| c.apply(model, p),
        )
    }

    pub(crate) fn fire_foreign_key_added(&mut self, fk: ForeignKeyId) -> Result<Option<ForeignKeyId>> {
        if self.dispatcher.enqueue(ConventionEvent::ForeignKeyAdded(fk))? {
            return Ok(Some(fk));
        }
        self.run_foreign_key_added(fk)
    }

    fn run_foreign_key_added(&mut self, fk: ForeignKeyId) -> Result<Option<ForeignKeyId>> {
        let conventions = self.dispatcher.conventions.clone();
        self.run_chain(
            &conventions.foreign_key_added,
            fk,
            |graph, fk| graph.contains_foreign_key(*fk),
            |c, model, fk| c.apply(model, fk),
        )
    }

    pub(crate) fn fire_foreign_key_uniqueness_changed(
        &mut self,
        fk: ForeignKeyId,
    ) -> Result<Option<ForeignKeyId>> {
        if self
            .dispatcher
            .enqueue(ConventionEvent::ForeignKeyUniquenessChanged(fk))?
        {
            return Ok(Some(fk));
        }
        self.run_foreign_key_uniqueness_changed(fk)
    }

    fn run_foreign_key_uniqueness_changed(
        &mut self,
        fk: ForeignKeyId,
    ) -> Result<Option<ForeignKeyId>> {
        let conventions = self.dispatcher.conventions.clone();
        self.run_chain(
            &conventions.foreign_key_uniqueness_changed,
            fk,
            |graph, fk| graph.contains_foreign_key(*fk),
            |c, model, fk| c.apply(model, fk),
        )
    }

    pub(crate) fn fire_foreign_key_ownership_changed(
        &mut self,
        fk: ForeignKeyId,
    ) -> Result<Option<ForeignKeyId>> {
        if self
            .dispatcher
            .enqueue(ConventionEvent::ForeignKeyOwnershipChanged(fk))?
        {
            return Ok(Some(fk));
        }
        self.run_foreign_key_ownership_changed(fk)
    }

    fn run_foreign_key_ownership_changed(
        &mut self,
        fk: ForeignKeyId,
    ) -> Result<Option<ForeignKeyId>> {
        let conventions = self.dispatcher.conventions.clone();
        self.run_chain(
            &conventions.foreign_key_ownership_changed,
            fk,
            |graph, fk| graph.contains_foreign_key(*fk),
            |c, model, fk| c.apply(model, fk),
        )
    }

    pub(crate) fn fire_navigation_added(
        &mut self,
        navigation: NavigationRef,
    ) -> Result<Option<NavigationRef>> {
        if self
            .dispatcher
            .enqueue(ConventionEvent::NavigationAdded(navigation.clone()))?
        {
            return Ok(Some(navigation));
        }
        self.run_navigation_added(navigation)
    }

    fn run_navigation_added(&mut self, navigation: NavigationRef) -> Result<Option<NavigationRef>> {
        let conventions = self.dispatcher.conventions.clone();
        self.run_chain(
            &conventions.navigation_added,
            navigation,
            |graph, n| graph.navigation(n).is_some(),
            |c, model, n| c.apply(model, n),
        )
    }

    pub(crate) fn fire_navigation_removed(
        &mut self,
        source: NodeId,
        target: NodeId,
        name: &str,
    ) -> Result<bool> {
        let event = ConventionEvent::NavigationRemoved {
            source,
            target,
            name: name.to_string(),
        };
        if self.dispatcher.enqueue(event)? {
            return Ok(true);
        }
        self.run_navigation_removed(source, target, name)
    }

    fn run_navigation_removed(&mut self, source: NodeId, target: NodeId, name: &str) -> Result<bool> {
        let conventions = self.dispatcher.conventions.clone();
        for convention in &conventions.navigation_removed {
            if !self.graph.contains_node(source) {
                return Ok(false);
            }
            if !convention.apply(self, source, target, name)? {
                warn!(convention = convention.name(), navigation = name, "convention stopped navigation-removed chain");
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub(crate) fn fire_graph_built(&mut self) -> Result<()> {
        if self.dispatcher.enqueue(ConventionEvent::GraphBuilt)? {
            return Ok(());
        }
        self.run_graph_built()
    }

    fn run_graph_built(&mut self) -> Result<()> {
        let conventions = self.dispatcher.conventions.clone();
        for convention in &conventions.graph_built {
            convention.apply(self)?;
        }
        Ok(())
    }
}
