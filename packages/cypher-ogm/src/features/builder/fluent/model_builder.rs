//! Entry point of the fluent API

use tracing::debug;

use crate::config::OgmOptions;
use crate::errors::{OgmError, Result};
use crate::features::conventions::ConventionSet;
use crate::features::metadata::domain::IgnoredMember;
use crate::features::metadata::GraphModel;
use crate::shared::models::{
    ConfigurationSource, GraphType, LabelSet, NodeIdentity, TypeRef,
};

use super::EntityBuilder;

const EXPLICIT: ConfigurationSource = ConfigurationSource::Explicit;

/// Builds a graph model through explicit configuration
///
/// ```rust,ignore
/// let mut builder = ModelBuilder::new()?;
/// builder.entity::<Customer>()?.has_labels(&["Client"])?;
/// builder
///     .entity::<Order>()?
///     .has_one("Customer", Customer::type_descriptor())?
///     .with_many(Some("Orders"))?
///     .has_relationship("PLACED", None)?;
/// let model = builder.build()?;
/// ```
#[derive(Debug)]
pub struct ModelBuilder {
    model: GraphModel,
}

impl ModelBuilder {
    /// Builder with the built-in Cypher conventions
    pub fn new() -> Result<Self> {
        Self::with_conventions(ConventionSet::cypher_defaults())
    }

    pub fn with_conventions(conventions: ConventionSet) -> Result<Self> {
        Self::with_options(conventions, OgmOptions::default())
    }

    pub fn with_options(conventions: ConventionSet, options: OgmOptions) -> Result<Self> {
        Ok(Self {
            model: GraphModel::with_options(conventions, options)?,
        })
    }

    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut GraphModel {
        &mut self.model
    }

    pub fn entity<T: GraphType>(&mut self) -> Result<EntityBuilder<'_>> {
        self.entity_type(&T::type_descriptor())
    }

    pub fn entity_type(&mut self, ty: &TypeRef) -> Result<EntityBuilder<'_>> {
        self.entity_identity(NodeIdentity::of_type(ty))
    }

    /// Shadow entity identified by labels
    pub fn entity_labels(&mut self, labels: &[&str]) -> Result<EntityBuilder<'_>> {
        let labels = LabelSet::try_new(labels)?;
        self.entity_identity(NodeIdentity::Labels(labels))
    }

    fn entity_identity(&mut self, identity: NodeIdentity) -> Result<EntityBuilder<'_>> {
        let node = self
            .model
            .graph_builder()
            .entity(identity.clone(), EXPLICIT)?
            .ok_or_else(|| OgmError::detached("Entity", identity.display_name()))?;
        Ok(EntityBuilder::new(&mut self.model, node))
    }

    pub fn ignore<T: GraphType>(&mut self) -> Result<&mut Self> {
        self.ignore_type(&T::type_descriptor())
    }

    pub fn ignore_type(&mut self, ty: &TypeRef) -> Result<&mut Self> {
        self.model
            .graph_builder()
            .ignore(IgnoredMember::Node(NodeIdentity::of_type(ty)), EXPLICIT)?;
        Ok(self)
    }

    pub fn ignore_labels(&mut self, labels: &[&str]) -> Result<&mut Self> {
        let labels = LabelSet::try_new(labels)?;
        self.model
            .graph_builder()
            .ignore(IgnoredMember::Node(NodeIdentity::Labels(labels)), EXPLICIT)?;
        Ok(self)
    }

    /// Run several configuration calls in one convention batch
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut ModelBuilder) -> Result<R>) -> Result<R> {
        self.model.dispatcher.begin_batch();
        let result = f(self);
        let ended = self.model.end_batch();
        let value = result?;
        ended?;
        Ok(value)
    }

    /// Finish configuration and run the graph-built conventions
    pub fn build(mut self) -> Result<GraphModel> {
        self.model.finalize()?;
        debug!(nodes = self.model.graph().node_count(), "model built");
        Ok(self.model)
    }
}
