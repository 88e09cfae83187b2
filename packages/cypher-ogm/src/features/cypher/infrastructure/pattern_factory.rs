//! Pattern expressions built from model metadata
//!
//! Labels, relationship names, storage names and directions come from the
//! Cypher views, so the patterns follow whatever the conventions and the
//! builder configured.

use tracing::trace;

use crate::errors::{OgmError, Result};
use crate::features::cypher::domain::{
    Direction, MatchExpression, NodePatternExpression, PatternExpression, QuerySourceBearing,
    RelationshipDetailExpression, RelationshipPatternExpression, StorageExpression,
};
use crate::features::metadata::domain::{ForeignKeyId, NavigationRef, NodeId, PropertyRef};
use crate::features::metadata::GraphModel;
use crate::shared::models::LabelSet;

pub struct PatternFactory<'a> {
    model: &'a GraphModel,
}

impl<'a> PatternFactory<'a> {
    pub fn new(model: &'a GraphModel) -> Self {
        Self { model }
    }

    pub fn node(&self, node: NodeId, alias: &str) -> Result<NodePatternExpression> {
        let labels = self.model.cypher_node(node)?.labels();
        NodePatternExpression::aliased(labels, alias)
    }

    pub fn match_node(&self, node: NodeId, alias: &str) -> Result<MatchExpression> {
        let mut expression = MatchExpression::new(self.model.cypher_node(node)?.labels());
        expression.set_alias(alias)?;
        Ok(expression)
    }

    /// `alias.storage_name`; `None` for properties without a storage name
    pub fn storage(&self, property: &PropertyRef, alias: &str) -> Result<Option<StorageExpression>> {
        let view = self.model.cypher_property(property)?;
        let Some(name) = view.storage_name() else {
            return Ok(None);
        };
        StorageExpression::new(alias, &name, view.property().value_type().clone()).map(Some)
    }

    /// Relationship hop leaving `from`, pointing along the relationship's
    /// start-to-end direction
    pub fn relationship(
        &self,
        fk: ForeignKeyId,
        from: NodeId,
        alias: Option<&str>,
    ) -> Result<RelationshipPatternExpression> {
        let view = self.model.cypher_foreign_key(fk)?;
        let direction = if self.is_end(view.start(), from) {
            Direction::Right
        } else if self.is_end(view.end(), from) {
            Direction::Left
        } else {
            return Err(OgmError::invalid_argument(
                "from",
                format!(
                    "{} is not an end of the relationship",
                    self.model.graph().display_name(from)
                ),
            ));
        };

        let kinds = view
            .relationship_name()
            .map_or_else(LabelSet::empty, LabelSet::single);
        let mut detail = RelationshipDetailExpression::new(kinds);
        if let Some(alias) = alias {
            detail.set_alias(alias)?;
        }
        Ok(RelationshipPatternExpression::new(direction, Some(detail)))
    }

    /// `(source)-[:REL]->(target)` for one navigation
    pub fn navigation(
        &self,
        navigation: &NavigationRef,
        source_alias: &str,
        target_alias: &str,
    ) -> Result<PatternExpression> {
        let graph = self.model.graph();
        let nav = graph.require_navigation(navigation)?;
        let target = graph
            .navigation_target(nav)
            .ok_or_else(|| OgmError::not_found("ForeignKey", nav.foreign_key().to_string()))?;

        trace!(
            navigation = %navigation.name,
            target = %graph.display_name(target),
            "building navigation pattern"
        );
        let relationship = self.relationship(nav.foreign_key(), navigation.node, None)?;
        Ok(PatternExpression::new(self.node(navigation.node, source_alias)?)
            .then(relationship, self.node(target, target_alias)?))
    }

    /// `node` is `end` or one of its derived nodes
    fn is_end(&self, end: NodeId, node: NodeId) -> bool {
        end == node || self.model.graph().is_ancestor_of(end, node)
    }
}
