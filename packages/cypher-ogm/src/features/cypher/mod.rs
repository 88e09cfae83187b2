//! Cypher query-expression model
//!
//! Graph-pattern expressions (nodes, relationships, paths, matches) as a
//! visitable tree, lowered to literal Cypher text by [`CypherWriter`].

pub mod domain;
pub mod infrastructure;

pub use domain::{
    BinaryOperator, CypherExpression, CypherValue, Direction, ExpressionVisitor, HopRange,
    MatchExpression, NodePatternExpression, PatternExpression, QuerySource, QuerySourceBearing,
    RelationshipDetailExpression, RelationshipPatternExpression, StorageExpression,
};
pub use infrastructure::{CypherWriter, PatternFactory};
