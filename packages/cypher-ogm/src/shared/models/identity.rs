//! Node identity
//!
//! A node is identified either by a set of labels or by a host type. Label
//! sets compare as sets: `[A, B]` and `[B, A]` are the same identity, hash the
//! same and sort to the same position.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::type_descriptor::TypeRef;
use crate::errors::Result;
use crate::shared::utils::check_labels;

/// Unordered set of labels that keeps the declaration order for display
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    /// Build a label set, dropping repeated labels
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into();
            if !unique.contains(&label) {
                unique.push(label);
            }
        }
        Self { labels: unique }
    }

    /// Build a label set from user input, rejecting empty arrays and blank labels
    pub fn try_new<S: AsRef<str>>(labels: &[S]) -> Result<Self> {
        check_labels(labels)?;
        Ok(Self::new(labels.iter().map(|l| l.as_ref().to_string())))
    }

    pub fn single(label: impl Into<String>) -> Self {
        Self {
            labels: vec![label.into()],
        }
    }

    pub fn empty() -> Self {
        Self { labels: Vec::new() }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|l| l.as_str())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Labels of `self` followed by labels of `other` not already present
    pub fn union(&self, other: &LabelSet) -> LabelSet {
        LabelSet::new(self.labels.iter().chain(other.labels.iter()).cloned())
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.labels.clone()
    }

    fn sorted(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = self.labels.iter().map(|l| l.as_str()).collect();
        sorted.sort_unstable();
        sorted
    }
}

impl PartialEq for LabelSet {
    fn eq(&self, other: &Self) -> bool {
        self.labels.len() == other.labels.len() && self.sorted() == other.sorted()
    }
}

impl Eq for LabelSet {}

impl Hash for LabelSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted().hash(state);
    }
}

impl PartialOrd for LabelSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LabelSet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sorted().cmp(&other.sorted())
    }
}

impl From<Vec<String>> for LabelSet {
    fn from(labels: Vec<String>) -> Self {
        LabelSet::new(labels)
    }
}

impl From<LabelSet> for Vec<String> {
    fn from(set: LabelSet) -> Self {
        set.labels
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.labels.join(":"))
    }
}

/// Identity of a node: labels or host type, never both
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeIdentity {
    Labels(LabelSet),
    Type(TypeRef),
}

impl NodeIdentity {
    pub fn labels<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
        NodeIdentity::Labels(LabelSet::new(labels))
    }

    pub fn of_type(ty: &TypeRef) -> Self {
        NodeIdentity::Type(ty.clone())
    }

    pub fn clr_type(&self) -> Option<&TypeRef> {
        match self {
            NodeIdentity::Type(ty) => Some(ty),
            NodeIdentity::Labels(_) => None,
        }
    }

    pub fn label_set(&self) -> Option<&LabelSet> {
        match self {
            NodeIdentity::Labels(labels) => Some(labels),
            NodeIdentity::Type(_) => None,
        }
    }

    /// Whether the identity is a host type (as opposed to a shadow node)
    pub fn is_typed(&self) -> bool {
        matches!(self, NodeIdentity::Type(_))
    }

    /// Human-readable name used in errors and default labels
    pub fn display_name(&self) -> String {
        match self {
            NodeIdentity::Labels(labels) => labels.to_string(),
            NodeIdentity::Type(ty) => ty.short_name().to_string(),
        }
    }
}

impl fmt::Display for NodeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeIdentity::Labels(labels) => write!(f, "({})", labels),
            NodeIdentity::Type(ty) => f.write_str(ty.name()),
        }
    }
}

/// Reference to a node by label or by host type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeReference {
    Label(String),
    Type(TypeRef),
}

impl NodeReference {
    pub fn to_identity(&self) -> NodeIdentity {
        match self {
            NodeReference::Label(label) => NodeIdentity::Labels(LabelSet::single(label.clone())),
            NodeReference::Type(ty) => NodeIdentity::Type(ty.clone()),
        }
    }

    /// Stored form: the label, or the full type name
    pub fn as_annotation_value(&self) -> String {
        match self {
            NodeReference::Label(label) => label.clone(),
            NodeReference::Type(ty) => ty.name().to_string(),
        }
    }
}

impl From<&str> for NodeReference {
    fn from(label: &str) -> Self {
        NodeReference::Label(label.to_string())
    }
}

impl From<String> for NodeReference {
    fn from(label: String) -> Self {
        NodeReference::Label(label)
    }
}

impl From<TypeRef> for NodeReference {
    fn from(ty: TypeRef) -> Self {
        NodeReference::Type(ty)
    }
}

impl From<&TypeRef> for NodeReference {
    fn from(ty: &TypeRef) -> Self {
        NodeReference::Type(ty.clone())
    }
}

/// Metadata identified by labels or a host type
pub trait HasLabelsOrType {
    fn identity(&self) -> &NodeIdentity;

    fn clr_type(&self) -> Option<&TypeRef> {
        self.identity().clr_type()
    }

    fn display_name(&self) -> String {
        self.identity().display_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::BTreeMap;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_label_set_dedup_keeps_first_order() {
        let set = LabelSet::new(["B", "A", "B"]);
        assert_eq!(set.as_slice(), &["B".to_string(), "A".to_string()]);
    }

    #[test]
    fn test_try_new_rejects_blank() {
        assert!(LabelSet::try_new(&["Person", ""]).is_err());
        assert!(LabelSet::try_new::<&str>(&[]).is_err());
    }

    #[test]
    fn test_identity_map_lookup_is_order_independent() {
        let mut map = BTreeMap::new();
        map.insert(NodeIdentity::labels(["Person", "Employee"]), 1);
        assert_eq!(map.get(&NodeIdentity::labels(["Employee", "Person"])), Some(&1));
    }

    #[test]
    fn test_union() {
        let a = LabelSet::new(["Dog"]);
        let b = LabelSet::new(["Animal", "Dog"]);
        assert_eq!(a.union(&b).as_slice(), &["Dog".to_string(), "Animal".to_string()]);
    }

    #[test]
    fn test_serde_roundtrip_as_array() {
        let set = LabelSet::new(["A", "B"]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["A","B"]"#);
    }

    proptest! {
        #[test]
        fn prop_permuted_label_sets_are_equal(
            labels in proptest::collection::btree_set("[A-Za-z]{1,8}", 1..6),
            seed in any::<u64>(),
        ) {
            let ordered: Vec<String> = labels.into_iter().collect();
            let mut permuted = ordered.clone();
            let len = permuted.len();
            permuted.rotate_left((seed as usize) % len);
            if seed % 2 == 0 {
                permuted.reverse();
            }

            let a = NodeIdentity::labels(ordered);
            let b = NodeIdentity::labels(permuted);
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(hash_of(&a), hash_of(&b));
            prop_assert_eq!(a.cmp(&b), Ordering::Equal);
        }
    }
}
