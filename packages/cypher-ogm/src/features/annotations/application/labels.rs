//! Label resolution
//!
//! A node's labels are its stored `Cypher:Labels` annotation when that was
//! set by an attribute or explicitly, otherwise a default derived from the
//! graph:
//!
//! - dependent node: each label of the defining node joined with the
//!   defining navigation name (`Customer` + `Orders` → `Customer_Orders`)
//! - typed node: the type's short name
//! - shadow node: its identity labels
//!
//! followed by the resolved labels of the base node.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::trace;

use crate::errors::Result;
use crate::features::annotations::domain::names;
use crate::features::annotations::HasAnnotations;
use crate::features::metadata::domain::{Node, NodeId};
use crate::features::metadata::GraphModel;
use crate::shared::models::{ConfigurationSource, LabelSet, NodeIdentity};

/// Labels stored on the node by an attribute or the builder, if any
pub fn configured_labels(node: &Node) -> Option<LabelSet> {
    let annotation = node.annotation(names::LABELS)?;
    if annotation.source == ConfigurationSource::Convention {
        return None;
    }
    parse_labels(&annotation.value)
}

pub fn resolved_labels(model: &GraphModel, node: NodeId) -> LabelSet {
    match model.node(node) {
        Some(n) => configured_labels(n).unwrap_or_else(|| default_labels(model, node)),
        None => LabelSet::empty(),
    }
}

pub fn default_labels(model: &GraphModel, node: NodeId) -> LabelSet {
    let Some(n) = model.node(node) else {
        return LabelSet::empty();
    };

    let own = match (&n.defining_navigation, &n.identity) {
        (Some(defining), _) => {
            let separator = &model.options().dependent_label_separator;
            LabelSet::new(
                resolved_labels(model, defining.node)
                    .iter()
                    .map(|parent| format!("{}{}{}", parent, separator, defining.name)),
            )
        }
        (None, NodeIdentity::Type(ty)) => LabelSet::single(ty.short_name()),
        (None, NodeIdentity::Labels(labels)) => labels.clone(),
    };

    match n.base {
        Some(base) => own.union(&resolved_labels(model, base)),
        None => own,
    }
}

fn parse_labels(value: &Value) -> Option<LabelSet> {
    let labels: Vec<String> = serde_json::from_value(value.clone()).ok()?;
    (!labels.is_empty()).then(|| LabelSet::new(labels))
}

/// Nodes whose default labels depend on `node`: its descendants and every
/// node defined through one of them, transitively
fn label_dependents(model: &GraphModel, node: NodeId) -> Vec<NodeId> {
    let graph = model.graph();
    let mut seen = BTreeSet::new();
    let mut queue = vec![node];
    let mut order = Vec::new();

    while let Some(id) = queue.pop() {
        if !seen.insert(id) {
            continue;
        }
        order.push(id);
        queue.extend(graph.descendants(id));
        queue.extend(
            graph
                .nodes()
                .filter(|n| n.defining_navigation.as_ref().map_or(false, |d| d.node == id))
                .map(|n| n.id),
        );
    }
    order
}

/// Store the default labels with a convention source on `node` and every
/// node whose default depends on it. Attribute and explicit labels are left
/// alone.
pub(crate) fn refresh_default_labels(model: &mut GraphModel, node: NodeId) -> Result<()> {
    for id in label_dependents(model, node) {
        let labels = default_labels(model, id);
        let value = Value::from(labels.to_vec());
        let Some(n) = model.graph.node_mut(id) else {
            continue;
        };
        if n.annotations.can_set(names::LABELS, &value, ConfigurationSource::Convention) {
            trace!(node = %id, labels = %labels, "default labels");
            n.annotations_mut()
                .set(names::LABELS, value, ConfigurationSource::Convention);
        }
    }
    Ok(())
}
