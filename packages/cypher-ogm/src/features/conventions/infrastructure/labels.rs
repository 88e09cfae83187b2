//! Label conventions

use crate::errors::Result;
use crate::features::annotations::refresh_default_labels;
use crate::features::conventions::domain::{
    BaseEntityChangedConvention, Convention, EntityAddedConvention,
};
use crate::features::metadata::domain::NodeId;
use crate::features::metadata::GraphModel;
use crate::shared::models::{ConfigurationSource, HasLabelsOrType};

/// Applies a type-level labels attribute
#[derive(Debug, Default, Clone, Copy)]
pub struct LabelsAttributeConvention;

impl Convention for LabelsAttributeConvention {
    fn name(&self) -> &str {
        "LabelsAttribute"
    }
}

impl EntityAddedConvention for LabelsAttributeConvention {
    fn apply(&self, model: &mut GraphModel, node: NodeId) -> Result<Option<NodeId>> {
        let labels = model
            .node(node)
            .and_then(|n| n.clr_type())
            .and_then(|ty| ty.labels_attribute())
            .map(|attribute| attribute.labels().to_vec());

        if let Some(labels) = labels {
            model
                .node_builder(node)
                .has_labels(&labels, ConfigurationSource::DataAnnotation)?;
        }
        Ok(model.graph().contains_node(node).then_some(node))
    }
}

/// Stores default labels for the node and everything that derives its
/// labels from it
#[derive(Debug, Default, Clone, Copy)]
pub struct LabelsConvention;

impl Convention for LabelsConvention {
    fn name(&self) -> &str {
        "Labels"
    }
}

impl EntityAddedConvention for LabelsConvention {
    fn apply(&self, model: &mut GraphModel, node: NodeId) -> Result<Option<NodeId>> {
        refresh_default_labels(model, node)?;
        Ok(model.graph().contains_node(node).then_some(node))
    }
}

impl BaseEntityChangedConvention for LabelsConvention {
    fn apply(
        &self,
        model: &mut GraphModel,
        node: NodeId,
        _previous: Option<NodeId>,
    ) -> Result<Option<NodeId>> {
        refresh_default_labels(model, node)?;
        Ok(model.graph().contains_node(node).then_some(node))
    }
}
