//! Cypher pattern expression tree
//!
//! Expressions compare structurally. Label and relationship-kind sets
//! compare without regard to order; aliases, query sources and ranges
//! compare by value.

use std::fmt;

use crate::errors::{OgmError, Result};
use crate::shared::models::{LabelSet, TypeRef};
use crate::shared::utils::check_identifier;

use super::query_source::QuerySource;
use super::value::CypherValue;

/// Shared contract of expressions that stand for a node or relationship
/// produced by a query source
pub trait QuerySourceBearing {
    fn alias(&self) -> Option<&str>;

    /// Rejects empty or whitespace aliases
    fn set_alias(&mut self, alias: &str) -> Result<()>;

    fn query_source(&self) -> Option<&QuerySource>;

    fn set_query_source(&mut self, source: QuerySource);

    /// Whether this expression was produced for `source`, comparing
    /// canonical owners
    fn handles_query_source(&self, source: &QuerySource) -> bool {
        self.query_source()
            .map_or(false, |own| own.canonical() == source.canonical())
    }
}

fn checked_alias(alias: &str) -> Result<String> {
    if alias.trim().is_empty() {
        return Err(OgmError::invalid_argument(
            "alias",
            "must not be empty or whitespace",
        ));
    }
    Ok(alias.to_string())
}

macro_rules! query_source_bearing {
    ($ty:ty) => {
        impl QuerySourceBearing for $ty {
            fn alias(&self) -> Option<&str> {
                self.alias.as_deref()
            }

            fn set_alias(&mut self, alias: &str) -> Result<()> {
                self.alias = Some(checked_alias(alias)?);
                Ok(())
            }

            fn query_source(&self) -> Option<&QuerySource> {
                self.query_source.as_ref()
            }

            fn set_query_source(&mut self, source: QuerySource) {
                self.query_source = Some(source);
            }
        }
    };
}

// ── node pattern ─────────────────────────────────────────────────────────

/// `(alias:Label1:Label2)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePatternExpression {
    labels: LabelSet,
    alias: Option<String>,
    query_source: Option<QuerySource>,
}

impl NodePatternExpression {
    pub fn new(labels: LabelSet) -> Self {
        Self {
            labels,
            alias: None,
            query_source: None,
        }
    }

    pub fn aliased(labels: LabelSet, alias: &str) -> Result<Self> {
        let mut node = Self::new(labels);
        node.set_alias(alias)?;
        Ok(node)
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }
}

query_source_bearing!(NodePatternExpression);

// ── relationship detail ──────────────────────────────────────────────────

/// Variable-length hop bounds. Both bounds absent renders as `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HopRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl HopRange {
    pub fn new(min: Option<u32>, max: Option<u32>) -> Result<Self> {
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(OgmError::invalid_argument(
                    "range",
                    format!("minimum {} exceeds maximum {}", min, max),
                ));
            }
        }
        Ok(Self { min, max })
    }

    pub fn exactly(hops: u32) -> Self {
        Self {
            min: Some(hops),
            max: Some(hops),
        }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }
}

/// `[alias:Kind1|:Kind2*min..max]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelationshipDetailExpression {
    kinds: LabelSet,
    alias: Option<String>,
    query_source: Option<QuerySource>,
    range: Option<HopRange>,
}

impl RelationshipDetailExpression {
    pub fn new(kinds: LabelSet) -> Self {
        Self {
            kinds,
            alias: None,
            query_source: None,
            range: None,
        }
    }

    pub fn with_range(mut self, range: HopRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn kinds(&self) -> &LabelSet {
        &self.kinds
    }

    pub fn range(&self) -> Option<HopRange> {
        self.range
    }
}

query_source_bearing!(RelationshipDetailExpression);

// ── relationship pattern ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `<-[..]-`
    Left,
    /// `-[..]->`
    Right,
    /// `<-[..]->`
    Both,
    /// `-[..]-`
    Undirected,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelationshipPatternExpression {
    pub direction: Direction,
    pub detail: Option<RelationshipDetailExpression>,
}

impl RelationshipPatternExpression {
    pub fn new(direction: Direction, detail: Option<RelationshipDetailExpression>) -> Self {
        Self { direction, detail }
    }
}

// ── pattern ──────────────────────────────────────────────────────────────

/// Head node followed by `(relationship, node)` hops
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternExpression {
    pub head: NodePatternExpression,
    pub chain: Vec<(RelationshipPatternExpression, NodePatternExpression)>,
}

impl PatternExpression {
    pub fn new(head: NodePatternExpression) -> Self {
        Self {
            head,
            chain: Vec::new(),
        }
    }

    pub fn then(
        mut self,
        relationship: RelationshipPatternExpression,
        node: NodePatternExpression,
    ) -> Self {
        self.chain.push((relationship, node));
        self
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodePatternExpression> {
        std::iter::once(&self.head).chain(self.chain.iter().map(|(_, node)| node))
    }
}

// ── match ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchExpression {
    labels: LabelSet,
    alias: Option<String>,
    query_source: Option<QuerySource>,
    predicate: Option<Box<CypherExpression>>,
    optional: bool,
}

impl MatchExpression {
    pub fn new(labels: LabelSet) -> Self {
        Self {
            labels,
            alias: None,
            query_source: None,
            predicate: None,
            optional: false,
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn predicate(&self) -> Option<&CypherExpression> {
        self.predicate.as_deref()
    }

    /// AND the predicate onto any existing one
    pub fn add_where(&mut self, predicate: CypherExpression) {
        self.predicate = Some(Box::new(match self.predicate.take() {
            Some(existing) => CypherExpression::binary(BinaryOperator::And, *existing, predicate),
            None => predicate,
        }));
    }
}

query_source_bearing!(MatchExpression);

// ── storage ──────────────────────────────────────────────────────────────

/// `alias.name`, typed by the property's value type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageExpression {
    pub alias: String,
    pub name: String,
    pub value_type: TypeRef,
}

impl StorageExpression {
    pub fn new(alias: &str, name: &str, value_type: TypeRef) -> Result<Self> {
        check_identifier("name", name)?;
        Ok(Self {
            alias: checked_alias(alias)?,
            name: name.to_string(),
            value_type,
        })
    }
}

// ── expression ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Equal => "=",
            BinaryOperator::NotEqual => "<>",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CypherExpression {
    NodePattern(NodePatternExpression),
    RelationshipDetail(RelationshipDetailExpression),
    RelationshipPattern(RelationshipPatternExpression),
    Pattern(PatternExpression),
    Match(MatchExpression),
    Storage(StorageExpression),
    Constant(CypherValue),
    Parameter(String),
    Binary {
        op: BinaryOperator,
        left: Box<CypherExpression>,
        right: Box<CypherExpression>,
    },
    Not(Box<CypherExpression>),
    IsNull(Box<CypherExpression>),
}

impl CypherExpression {
    pub fn constant(value: impl Into<CypherValue>) -> Self {
        CypherExpression::Constant(value.into())
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        CypherExpression::Parameter(name.into())
    }

    pub fn binary(op: BinaryOperator, left: CypherExpression, right: CypherExpression) -> Self {
        CypherExpression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn equal(left: CypherExpression, right: CypherExpression) -> Self {
        Self::binary(BinaryOperator::Equal, left, right)
    }

    pub fn not(operand: CypherExpression) -> Self {
        CypherExpression::Not(Box::new(operand))
    }

    pub fn is_null(operand: CypherExpression) -> Self {
        CypherExpression::IsNull(Box::new(operand))
    }

    /// The query-source contract, for node and relationship expressions
    pub fn as_query_source_bearing(&self) -> Option<&dyn QuerySourceBearing> {
        match self {
            CypherExpression::NodePattern(e) => Some(e),
            CypherExpression::RelationshipDetail(e) => Some(e),
            CypherExpression::Match(e) => Some(e),
            _ => None,
        }
    }
}

macro_rules! expression_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for CypherExpression {
                fn from(e: $ty) -> Self {
                    CypherExpression::$variant(e)
                }
            }
        )*
    };
}

expression_from!(
    NodePattern(NodePatternExpression),
    RelationshipDetail(RelationshipDetailExpression),
    RelationshipPattern(RelationshipPatternExpression),
    Pattern(PatternExpression),
    Match(MatchExpression),
    Storage(StorageExpression),
    Constant(CypherValue),
);

macro_rules! display_via_writer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    let mut writer = crate::features::cypher::infrastructure::CypherWriter::new();
                    writer.write(self);
                    f.write_str(writer.as_str())
                }
            }
        )*
    };
}

display_via_writer!(
    CypherExpression,
    NodePatternExpression,
    RelationshipDetailExpression,
    RelationshipPatternExpression,
    PatternExpression,
    MatchExpression,
    StorageExpression,
);

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> LabelSet {
        LabelSet::new(items.iter().copied())
    }

    #[test]
    fn test_node_patterns_compare_labels_as_sets() {
        let a = NodePatternExpression::aliased(labels(&["A", "B"]), "n").unwrap();
        let b = NodePatternExpression::aliased(labels(&["B", "A"]), "n").unwrap();
        let c = NodePatternExpression::aliased(labels(&["B", "A"]), "m").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_blank_alias_rejected() {
        let mut node = NodePatternExpression::new(labels(&["A"]));
        assert!(matches!(
            node.set_alias("  "),
            Err(OgmError::InvalidArgument { .. })
        ));
        assert_eq!(node.alias(), None);
    }

    #[test]
    fn test_handles_canonical_query_source() {
        let main = QuerySource::main("c");
        let mut node = NodePatternExpression::new(labels(&["Customer"]));
        assert!(!node.handles_query_source(&main));

        node.set_query_source(QuerySource::group_by("g", main.clone()));
        assert!(node.handles_query_source(&main));
        assert!(!node.handles_query_source(&QuerySource::main("o")));
    }

    #[test]
    fn test_add_where_and_combines() {
        let mut m = MatchExpression::new(labels(&["A"]));
        m.add_where(CypherExpression::constant(true));
        m.add_where(CypherExpression::constant(false));
        assert_eq!(
            m.predicate(),
            Some(&CypherExpression::binary(
                BinaryOperator::And,
                CypherExpression::constant(true),
                CypherExpression::constant(false),
            ))
        );
    }

    #[test]
    fn test_hop_range_bounds_checked() {
        assert!(HopRange::new(Some(3), Some(1)).is_err());
        assert_eq!(HopRange::new(Some(1), Some(1)).unwrap(), HopRange::exactly(1));
    }

    #[test]
    fn test_pattern_equality_is_pairwise() {
        let node = |l: &str| NodePatternExpression::new(labels(&[l]));
        let rel = RelationshipPatternExpression::new(Direction::Right, None);
        let a = PatternExpression::new(node("A")).then(rel.clone(), node("B"));
        let b = PatternExpression::new(node("A")).then(rel.clone(), node("B"));
        let c = PatternExpression::new(node("B")).then(rel, node("A"));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.nodes().count(), 2);
    }
}
