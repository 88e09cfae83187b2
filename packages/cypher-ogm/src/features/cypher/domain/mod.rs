//! Cypher expression domain

mod expression;
mod query_source;
mod value;
mod visitor;

pub use expression::{
    BinaryOperator, CypherExpression, Direction, HopRange, MatchExpression, NodePatternExpression,
    PatternExpression, QuerySourceBearing, RelationshipDetailExpression,
    RelationshipPatternExpression, StorageExpression,
};
pub use query_source::QuerySource;
pub use value::CypherValue;
pub use visitor::{walk_expression, walk_match, walk_pattern, walk_relationship_pattern, ExpressionVisitor};
