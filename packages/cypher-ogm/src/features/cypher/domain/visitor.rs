//! Expression visitor
//!
//! Every `visit_*` method defaults to the matching `walk_*` function, which
//! visits the children. A visitor overrides only the kinds it cares about.

use super::expression::{
    BinaryOperator, CypherExpression, MatchExpression, NodePatternExpression, PatternExpression,
    RelationshipDetailExpression, RelationshipPatternExpression, StorageExpression,
};
use super::value::CypherValue;

pub trait ExpressionVisitor {
    fn visit_expression(&mut self, expression: &CypherExpression) {
        walk_expression(self, expression);
    }

    fn visit_node_pattern(&mut self, _node: &NodePatternExpression) {}

    fn visit_relationship_detail(&mut self, _detail: &RelationshipDetailExpression) {}

    fn visit_relationship_pattern(&mut self, relationship: &RelationshipPatternExpression) {
        walk_relationship_pattern(self, relationship);
    }

    fn visit_pattern(&mut self, pattern: &PatternExpression) {
        walk_pattern(self, pattern);
    }

    fn visit_match(&mut self, expression: &MatchExpression) {
        walk_match(self, expression);
    }

    fn visit_storage(&mut self, _storage: &StorageExpression) {}

    fn visit_constant(&mut self, _value: &CypherValue) {}

    fn visit_parameter(&mut self, _name: &str) {}

    fn visit_binary(
        &mut self,
        _op: BinaryOperator,
        left: &CypherExpression,
        right: &CypherExpression,
    ) {
        left.accept(self);
        right.accept(self);
    }

    fn visit_not(&mut self, operand: &CypherExpression) {
        operand.accept(self);
    }

    fn visit_is_null(&mut self, operand: &CypherExpression) {
        operand.accept(self);
    }
}

impl CypherExpression {
    /// Dispatch to the visitor method for this expression kind
    pub fn accept<V: ExpressionVisitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_expression(self);
    }
}

pub fn walk_expression<V: ExpressionVisitor + ?Sized>(visitor: &mut V, expression: &CypherExpression) {
    match expression {
        CypherExpression::NodePattern(e) => visitor.visit_node_pattern(e),
        CypherExpression::RelationshipDetail(e) => visitor.visit_relationship_detail(e),
        CypherExpression::RelationshipPattern(e) => visitor.visit_relationship_pattern(e),
        CypherExpression::Pattern(e) => visitor.visit_pattern(e),
        CypherExpression::Match(e) => visitor.visit_match(e),
        CypherExpression::Storage(e) => visitor.visit_storage(e),
        CypherExpression::Constant(v) => visitor.visit_constant(v),
        CypherExpression::Parameter(name) => visitor.visit_parameter(name),
        CypherExpression::Binary { op, left, right } => visitor.visit_binary(*op, left, right),
        CypherExpression::Not(operand) => visitor.visit_not(operand),
        CypherExpression::IsNull(operand) => visitor.visit_is_null(operand),
    }
}

pub fn walk_relationship_pattern<V: ExpressionVisitor + ?Sized>(
    visitor: &mut V,
    relationship: &RelationshipPatternExpression,
) {
    if let Some(detail) = &relationship.detail {
        visitor.visit_relationship_detail(detail);
    }
}

pub fn walk_pattern<V: ExpressionVisitor + ?Sized>(visitor: &mut V, pattern: &PatternExpression) {
    visitor.visit_node_pattern(&pattern.head);
    for (relationship, node) in &pattern.chain {
        visitor.visit_relationship_pattern(relationship);
        visitor.visit_node_pattern(node);
    }
}

pub fn walk_match<V: ExpressionVisitor + ?Sized>(visitor: &mut V, expression: &MatchExpression) {
    if let Some(predicate) = expression.predicate() {
        predicate.accept(visitor);
    }
}
