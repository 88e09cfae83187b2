//! Cypher text rendering

use std::fmt::Write as _;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::features::cypher::domain::{
    BinaryOperator, CypherExpression, Direction, ExpressionVisitor, HopRange, MatchExpression,
    NodePatternExpression, PatternExpression, QuerySourceBearing, RelationshipDetailExpression,
    RelationshipPatternExpression, StorageExpression,
};
use crate::features::cypher::domain::CypherValue;
use crate::shared::models::LabelSet;

static PLAIN_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

/// Backtick-quote names that are not plain identifiers
pub fn escape_identifier(name: &str) -> String {
    if PLAIN_IDENTIFIER.is_match(name) {
        name.to_string()
    } else {
        format!("`{}`", name.replace('`', "``"))
    }
}

/// Anything the writer can render
pub trait WriteCypher {
    fn write_to(&self, writer: &mut CypherWriter);
}

/// Renders expressions to Cypher text
#[derive(Debug, Default)]
pub struct CypherWriter {
    out: String,
}

impl CypherWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write<E: WriteCypher + ?Sized>(&mut self, expression: &E) -> &mut Self {
        expression.write_to(self);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn finish(self) -> String {
        self.out
    }

    /// Render one expression to a string
    pub fn render<E: WriteCypher + ?Sized>(expression: &E) -> String {
        let mut writer = Self::new();
        writer.write(expression);
        writer.finish()
    }

    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn labels(&mut self, labels: &LabelSet, separator: &str) {
        for (i, label) in labels.iter().enumerate() {
            if i > 0 {
                self.push(separator);
            }
            self.push(":");
            self.push(&escape_identifier(label));
        }
    }

    fn alias(&mut self, alias: Option<&str>) {
        if let Some(alias) = alias {
            self.push(&escape_identifier(alias));
        }
    }

    fn range(&mut self, range: HopRange) {
        self.push("*");
        match (range.min, range.max) {
            (None, None) => {}
            (Some(min), None) => {
                let _ = write!(self.out, "{}..", min);
            }
            (None, Some(max)) => {
                let _ = write!(self.out, "..{}", max);
            }
            (Some(min), Some(max)) => {
                let _ = write!(self.out, "{}..{}", min, max);
            }
        }
    }

    fn operand(&mut self, operand: &CypherExpression) {
        if matches!(operand, CypherExpression::Binary { .. }) {
            self.push("(");
            operand.accept(self);
            self.push(")");
        } else {
            operand.accept(self);
        }
    }
}

impl ExpressionVisitor for CypherWriter {
    fn visit_node_pattern(&mut self, node: &NodePatternExpression) {
        self.push("(");
        self.alias(node.alias());
        self.labels(node.labels(), "");
        self.push(")");
    }

    fn visit_relationship_detail(&mut self, detail: &RelationshipDetailExpression) {
        self.push("[");
        self.alias(detail.alias());
        self.labels(detail.kinds(), "|");
        if let Some(range) = detail.range() {
            self.range(range);
        }
        self.push("]");
    }

    fn visit_relationship_pattern(&mut self, relationship: &RelationshipPatternExpression) {
        let (left, right) = match relationship.direction {
            Direction::Left => ("<-", "-"),
            Direction::Right => ("-", "->"),
            Direction::Both => ("<-", "->"),
            Direction::Undirected => ("-", "-"),
        };
        self.push(left);
        if let Some(detail) = &relationship.detail {
            self.visit_relationship_detail(detail);
        }
        self.push(right);
    }

    fn visit_pattern(&mut self, pattern: &PatternExpression) {
        self.visit_node_pattern(&pattern.head);
        for (relationship, node) in &pattern.chain {
            self.visit_relationship_pattern(relationship);
            self.visit_node_pattern(node);
        }
    }

    fn visit_match(&mut self, expression: &MatchExpression) {
        if expression.is_optional() {
            self.push("OPTIONAL ");
        }
        self.push("MATCH (");
        self.alias(expression.alias());
        self.labels(expression.labels(), "");
        self.push(")");
        if let Some(predicate) = expression.predicate() {
            self.push(" WHERE ");
            predicate.accept(self);
        }
    }

    fn visit_storage(&mut self, storage: &StorageExpression) {
        let _ = write!(
            self.out,
            "{}.{}",
            escape_identifier(&storage.alias),
            escape_identifier(&storage.name)
        );
    }

    fn visit_constant(&mut self, value: &CypherValue) {
        let _ = write!(self.out, "{}", value);
    }

    fn visit_parameter(&mut self, name: &str) {
        self.push("$");
        self.push(&escape_identifier(name));
    }

    fn visit_binary(&mut self, op: BinaryOperator, left: &CypherExpression, right: &CypherExpression) {
        self.operand(left);
        self.push(" ");
        self.push(op.symbol());
        self.push(" ");
        self.operand(right);
    }

    fn visit_not(&mut self, operand: &CypherExpression) {
        self.push("NOT ");
        self.operand(operand);
    }

    fn visit_is_null(&mut self, operand: &CypherExpression) {
        self.operand(operand);
        self.push(" IS NULL");
    }
}

impl WriteCypher for CypherExpression {
    fn write_to(&self, writer: &mut CypherWriter) {
        self.accept(writer);
    }
}

macro_rules! write_cypher {
    ($($ty:ty => $visit:ident),* $(,)?) => {
        $(
            impl WriteCypher for $ty {
                fn write_to(&self, writer: &mut CypherWriter) {
                    writer.$visit(self);
                }
            }
        )*
    };
}

write_cypher!(
    NodePatternExpression => visit_node_pattern,
    RelationshipDetailExpression => visit_relationship_detail,
    RelationshipPatternExpression => visit_relationship_pattern,
    PatternExpression => visit_pattern,
    MatchExpression => visit_match,
    StorageExpression => visit_storage,
);
