//! Domain assertions

use cypher_ogm::features::metadata::domain::NodeId;
use cypher_ogm::{GraphModel, LabelSet, OgmError, SchemaError};

/// Resolved labels equal `expected`, ignoring order
pub fn assert_labels(model: &GraphModel, node: NodeId, expected: &[&str]) {
    let labels = model.cypher_node(node).unwrap().labels();
    assert_eq!(
        labels,
        LabelSet::new(expected.iter().copied()),
        "labels of {} were {}",
        model.graph().display_name(node),
        labels
    );
}

/// Resolved labels equal `expected`, in order
pub fn assert_label_order(model: &GraphModel, node: NodeId, expected: &[&str]) {
    let labels = model.cypher_node(node).unwrap().labels();
    assert_eq!(labels.as_slice(), expected, "label order of {}", model.graph().display_name(node));
}

pub fn expect_schema_error<T: std::fmt::Debug>(result: Result<T, OgmError>) -> SchemaError {
    match result {
        Err(OgmError::Schema(err)) => err,
        other => panic!("expected a schema error, got {:?}", other),
    }
}

pub fn assert_invalid_argument<T: std::fmt::Debug>(result: Result<T, OgmError>, argument: &str) {
    match result {
        Err(OgmError::InvalidArgument { argument: actual, .. }) => {
            assert_eq!(actual, argument, "wrong argument rejected")
        }
        other => panic!("expected an invalid argument error, got {:?}", other),
    }
}

pub fn property_names(model: &GraphModel, node: NodeId) -> Vec<String> {
    model
        .graph()
        .all_properties(node)
        .into_iter()
        .map(|p| p.name().to_string())
        .collect()
}
