//! Ignored-member registry keys

use std::fmt;

use crate::shared::models::NodeIdentity;

/// Something the user or a convention excluded from the graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IgnoredMember {
    /// A whole node, by identity
    Node(NodeIdentity),
    /// A property or navigation of a node
    Member { node: NodeIdentity, name: String },
}

impl IgnoredMember {
    pub fn member(node: &NodeIdentity, name: impl Into<String>) -> Self {
        IgnoredMember::Member {
            node: node.clone(),
            name: name.into(),
        }
    }
}

impl fmt::Display for IgnoredMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoredMember::Node(identity) => write!(f, "{}", identity),
            IgnoredMember::Member { node, name } => write!(f, "{}.{}", node, name),
        }
    }
}
