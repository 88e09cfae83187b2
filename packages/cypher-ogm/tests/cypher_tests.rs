//! Cypher patterns from model metadata, relationship joins and raw commands

mod common;

use common::*;
use pretty_assertions::assert_eq;

use cypher_ogm::features::cypher::{
    CypherExpression, CypherValue, Direction, HopRange, QuerySourceBearing,
    RelationshipDetailExpression, RelationshipPatternExpression,
};
use cypher_ogm::features::pattern_join::{JoinContext, JoinSelectors};
use cypher_ogm::{
    execute_cypher_raw, CommandExecutor, CypherWriter, GraphType, ModelBuilder, NavigationRef,
    NodeReference, OgmError, PatternFactory, PropertyRef, RawCommand, Result,
};

fn order_customer_fk(model: &cypher_ogm::GraphModel) -> cypher_ogm::ForeignKeyId {
    model
        .graph()
        .foreign_keys_between(node_of::<Order>(model), node_of::<Customer>(model))[0]
}

// ═══════════════════════════════════════════════════════════════════════════
// Pattern factory
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_node_pattern_uses_resolved_labels() {
    let model = shop_model();
    let factory = PatternFactory::new(&model);

    let customer = factory.node(node_of::<Customer>(&model), "c").unwrap();
    assert_eq!(CypherWriter::render(&customer), "(c:Customer)");

    let customizer = factory.node(node_of::<Customizer>(&model), "z").unwrap();
    assert_eq!(CypherWriter::render(&customizer), "(z:Customizer:Customer)");
}

#[test]
fn test_node_pattern_escapes_labels() {
    let mut builder = ModelBuilder::new().unwrap();
    let audit = builder.entity_labels(&["Audit Log"]).unwrap().id();
    let model = builder.build().unwrap();

    let pattern = PatternFactory::new(&model).node(audit, "a").unwrap();
    assert_eq!(CypherWriter::render(&pattern), "(a:`Audit Log`)");
}

#[test]
fn test_navigation_patterns_follow_relationship_direction() {
    let model = shop_model();
    let factory = PatternFactory::new(&model);
    let customer = node_of::<Customer>(&model);
    let order = node_of::<Order>(&model);

    let outgoing = factory
        .navigation(&NavigationRef::new(customer, "Orders"), "c", "o")
        .unwrap();
    assert_eq!(
        CypherWriter::render(&outgoing),
        "(c:Customer)-[:ORDERS]->(o:Order)"
    );

    let incoming = factory
        .navigation(&NavigationRef::new(order, "Customer"), "o", "c")
        .unwrap();
    assert_eq!(
        CypherWriter::render(&incoming),
        "(o:Order)<-[:ORDERS]-(c:Customer)"
    );
}

#[test]
fn test_relationship_pattern_with_configured_start() {
    let mut builder = shop_builder();
    builder
        .entity::<Order>()
        .unwrap()
        .has_one("Customer", Customer::type_descriptor())
        .unwrap()
        .with_many(Some("Orders"))
        .unwrap()
        .has_relationship("PLACED_BY", Some(NodeReference::from("Order")))
        .unwrap();
    let model = builder.build().unwrap();
    let factory = PatternFactory::new(&model);
    let fk = order_customer_fk(&model);

    let from_order = factory.relationship(fk, node_of::<Order>(&model), Some("r")).unwrap();
    assert_eq!(from_order.direction, Direction::Right);
    assert_eq!(CypherWriter::render(&from_order), "-[r:PLACED_BY]->");

    let from_customer = factory.relationship(fk, node_of::<Customer>(&model), None).unwrap();
    assert_eq!(CypherWriter::render(&from_customer), "<-[:PLACED_BY]-");
}

#[test]
fn test_relationship_from_derived_node() {
    let model = shop_model();
    let factory = PatternFactory::new(&model);
    let fk = order_customer_fk(&model);

    let relationship = factory
        .relationship(fk, node_of::<Customizer>(&model), None)
        .unwrap();
    assert_eq!(relationship.direction, Direction::Right);
}

#[test]
fn test_relationship_from_unrelated_node_is_rejected() {
    let mut builder = shop_builder();
    builder.entity::<Product>().unwrap();
    let model = builder.build().unwrap();
    let fk = order_customer_fk(&model);

    let result = PatternFactory::new(&model)
        .relationship(fk, node_of::<Product>(&model), None)
        .map(|_| ());
    assert_invalid_argument(result, "from");
}

#[test]
fn test_match_with_predicates() {
    let model = shop_model();
    let factory = PatternFactory::new(&model);
    let customer = node_of::<Customer>(&model);

    let mut expression = factory.match_node(customer, "c").unwrap();
    assert_eq!(expression.alias(), Some("c"));
    let id = factory.storage(&PropertyRef::new(customer, "Id"), "c").unwrap().unwrap();
    let email = factory.storage(&PropertyRef::new(customer, "Email"), "c").unwrap().unwrap();
    expression.add_where(CypherExpression::equal(
        CypherExpression::Storage(id),
        CypherExpression::parameter("id"),
    ));
    expression.add_where(CypherExpression::not(CypherExpression::is_null(
        CypherExpression::Storage(email),
    )));

    assert_eq!(
        CypherWriter::render(&expression),
        "MATCH (c:Customer) WHERE (c.Id = $id) AND NOT c.col_email IS NULL"
    );
    assert_eq!(
        CypherWriter::render(&expression.clone().optional(true)),
        "OPTIONAL MATCH (c:Customer) WHERE (c.Id = $id) AND NOT c.col_email IS NULL"
    );
}

#[test]
fn test_storage_expression_uses_storage_name() {
    let mut builder = shop_builder();
    builder
        .entity::<Order>()
        .unwrap()
        .property("PlacedAt")
        .unwrap()
        .has_storage_name("placed at")
        .unwrap();
    let model = builder.build().unwrap();

    let placed = PropertyRef::new(node_of::<Order>(&model), "PlacedAt");
    let storage = PatternFactory::new(&model).storage(&placed, "o").unwrap().unwrap();
    assert_eq!(storage.name, "placed at");
    assert_eq!(storage.value_type.name(), "DateTime");
    assert_eq!(CypherWriter::render(&storage), "o.`placed at`");
}

#[test]
fn test_foreign_key_property_has_no_storage() {
    let mut builder = shop_builder();
    builder
        .entity::<Order>()
        .unwrap()
        .has_one("Customer", Customer::type_descriptor())
        .unwrap()
        .with_many(Some("Orders"))
        .unwrap()
        .has_foreign_key(&["CustomerId"])
        .unwrap();
    let model = builder.build().unwrap();

    let fk_property = PropertyRef::new(node_of::<Order>(&model), "CustomerId");
    assert!(PatternFactory::new(&model).storage(&fk_property, "o").unwrap().is_none());
}

#[test]
fn test_variable_length_relationship() {
    let detail = RelationshipDetailExpression::new(cypher_ogm::LabelSet::new(["KNOWS", "LIKES"]))
        .with_range(HopRange::new(Some(1), Some(3)).unwrap());
    let pattern = RelationshipPatternExpression::new(Direction::Undirected, Some(detail));
    assert_eq!(CypherWriter::render(&pattern), "-[:KNOWS|:LIKES*1..3]-");

    assert_invalid_argument(HopRange::new(Some(4), Some(2)), "range");
}

// ═══════════════════════════════════════════════════════════════════════════
// Relationship join
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_join_matches_both_endpoints() {
    let mut context = JoinContext::new();
    let plan = context.plan(&JoinSelectors::new("Id", "A", "B", "Id")).unwrap();

    let rows = plan.evaluate(
        &records::customers(&[1, 7]),
        &records::placed(&[(1, 2), (1, 3), (7, 9)]),
        &records::orders(&[2, 3]),
    );

    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(row.shape(), plan.output_shape());
        assert_eq!(row.slots().len(), 3);
        assert_eq!(row.slot(0).unwrap()["Id"], CypherValue::Integer(1));
    }
    let inner: Vec<&CypherValue> = rows.iter().map(|r| &r.slot(2).unwrap()["Id"]).collect();
    assert_eq!(inner, [&CypherValue::Integer(2), &CypherValue::Integer(3)]);
}

#[test]
fn test_join_without_match_is_empty() {
    let mut context = JoinContext::new();
    let plan = context.plan(&JoinSelectors::new("Id", "A", "B", "Id")).unwrap();

    let rows = plan.evaluate(
        &records::customers(&[1]),
        &records::placed(&[(5, 2)]),
        &records::orders(&[2]),
    );
    assert!(rows.is_empty());
}

#[test]
fn test_join_plans_share_shapes() {
    let mut context = JoinContext::new();
    let first = context.plan(&JoinSelectors::new("Id", "A", "B", "Id")).unwrap();
    let second = context.plan(&JoinSelectors::new("Key", "From", "To", "Key")).unwrap();

    assert_eq!(first.output_shape(), second.output_shape());
    assert_eq!(context.shapes().len(), 3);

    let blank = context.plan(&JoinSelectors::new("Id", " ", "B", "Id")).map(|_| ());
    assert_invalid_argument(blank, "start_key");
}

// ═══════════════════════════════════════════════════════════════════════════
// Raw commands
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct RecordingExecutor {
    graph: bool,
    commands: Vec<RawCommand>,
}

impl CommandExecutor for RecordingExecutor {
    fn provider(&self) -> &str {
        if self.graph {
            "Graph.Test"
        } else {
            "Relational.Test"
        }
    }

    fn is_graph_provider(&self) -> bool {
        self.graph
    }

    fn execute(&mut self, command: &RawCommand) -> Result<usize> {
        self.commands.push(command.clone());
        Ok(command.parameters().len())
    }
}

#[test]
fn test_raw_command_runs_on_graph_provider() {
    init_tracing();
    let mut executor = RecordingExecutor {
        graph: true,
        ..Default::default()
    };

    let affected = execute_cypher_raw(
        &mut executor,
        "MATCH (c:Customer) WHERE c.Id = {0} SET c.Name = {1}",
        vec![CypherValue::from(1i64), CypherValue::from("Ada")],
    )
    .unwrap();

    assert_eq!(affected, 2);
    let command = &executor.commands[0];
    assert_eq!(
        command.text(),
        "MATCH (c:Customer) WHERE c.Id = $p0 SET c.Name = $p1"
    );
    assert_eq!(
        command.parameters(),
        [
            ("p0".to_string(), CypherValue::Integer(1)),
            ("p1".to_string(), CypherValue::String("Ada".to_string())),
        ]
    );
}

#[test]
fn test_raw_command_requires_graph_provider() {
    let mut executor = RecordingExecutor::default();
    let result = execute_cypher_raw(&mut executor, "MATCH (n) RETURN n", vec![]);

    match result {
        Err(OgmError::ServiceUnavailable { provider, .. }) => {
            assert_eq!(provider, "Relational.Test")
        }
        other => panic!("expected service unavailable, got {other:?}"),
    }
    assert!(executor.commands.is_empty());
}

#[test]
fn test_raw_command_placeholder_without_value() {
    let mut executor = RecordingExecutor {
        graph: true,
        ..Default::default()
    };
    let result = execute_cypher_raw(&mut executor, "MATCH (n) WHERE n.Id = {1}", vec![CypherValue::Null]);

    assert_invalid_argument(result, "parameters");
    assert!(executor.commands.is_empty());
}
