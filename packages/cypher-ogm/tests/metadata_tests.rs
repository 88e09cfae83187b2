//! Graph model mutations and schema invariants

mod common;

use common::*;
use pretty_assertions::assert_eq;

use cypher_ogm::features::metadata::domain::{IgnoredMember, NodeKind};
use cypher_ogm::{
    scalars, ConfigurationSource, GraphType, NodeIdentity, OgmError, PropertyRef, SchemaError,
};

const EXPLICIT: ConfigurationSource = ConfigurationSource::Explicit;
const CONVENTION: ConfigurationSource = ConfigurationSource::Convention;

// ═══════════════════════════════════════════════════════════════════════════
// Nodes
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_add_entity_is_found_by_identity() {
    let mut model = bare_model();
    let customer = add_entity::<Customer>(&mut model);

    assert_eq!(model.graph().find_node_by_type(&Customer::type_descriptor()), Some(customer));
    assert_eq!(model.graph().node(customer).unwrap().kind(), NodeKind::Entity);
    assert_eq!(model.graph().node_count(), 1);
}

#[test]
fn test_duplicate_entity_rejected() {
    let mut model = bare_model();
    add_shadow(&mut model, &["A", "B"]);

    let err = expect_schema_error(
        model.add_entity(NodeIdentity::labels(["B", "A"]), EXPLICIT),
    );
    assert!(matches!(err, SchemaError::DuplicateEntity { .. }), "{err}");
    assert_eq!(model.graph().find_node_by_labels(&["B", "A"]).is_some(), true);
}

#[test]
fn test_dependent_clashes_with_entity() {
    let mut model = bare_model();
    let customer = add_entity::<Customer>(&mut model);
    add_entity::<Address>(&mut model);

    let err = expect_schema_error(model.add_dependent_entity(
        NodeIdentity::of_type(&Address::type_descriptor()),
        "Address",
        customer,
        EXPLICIT,
    ));
    assert!(matches!(err, SchemaError::ClashingNonDependentEntity { .. }));
}

#[test]
fn test_entity_clashes_with_dependent() {
    let mut model = bare_model();
    let customer = add_entity::<Customer>(&mut model);
    model
        .add_dependent_entity(
            NodeIdentity::of_type(&Address::type_descriptor()),
            "Address",
            customer,
            EXPLICIT,
        )
        .unwrap();

    let err = expect_schema_error(
        model.add_entity(NodeIdentity::of_type(&Address::type_descriptor()), EXPLICIT),
    );
    assert!(matches!(err, SchemaError::ClashingDependentEntity { .. }));
}

#[test]
fn test_same_dependent_type_under_two_owners() {
    let mut model = bare_model();
    let customer = add_entity::<Customer>(&mut model);
    let supplier = add_entity::<Supplier>(&mut model);
    let address = NodeIdentity::of_type(&Address::type_descriptor());

    let a = model
        .add_dependent_entity(address.clone(), "Address", customer, EXPLICIT)
        .unwrap()
        .unwrap();
    let b = model
        .add_dependent_entity(address.clone(), "Address", supplier, EXPLICIT)
        .unwrap()
        .unwrap();

    assert_ne!(a, b);
    assert_eq!(model.graph().dependents_with_identity(&address).len(), 2);
    assert_eq!(model.graph().find_node(&address), None);
}

// ═══════════════════════════════════════════════════════════════════════════
// Inheritance
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_circular_inheritance_rejected_without_changes() {
    let mut model = bare_model();
    let a = add_shadow(&mut model, &["A"]);
    let b = add_shadow(&mut model, &["B"]);
    let c = add_shadow(&mut model, &["C"]);

    model.set_base_type(b, Some(a), EXPLICIT).unwrap();
    model.set_base_type(c, Some(b), EXPLICIT).unwrap();

    let err = expect_schema_error(model.set_base_type(a, Some(c), EXPLICIT));
    assert!(matches!(err, SchemaError::CircularInheritance { .. }), "{err}");

    let graph = model.graph();
    assert_eq!(graph.node(a).unwrap().base(), None);
    assert_eq!(graph.node(b).unwrap().base(), Some(a));
    assert_eq!(graph.node(c).unwrap().base(), Some(b));
}

#[test]
fn test_self_inheritance_rejected() {
    let mut model = bare_model();
    let a = add_shadow(&mut model, &["A"]);

    let err = expect_schema_error(model.set_base_type(a, Some(a), EXPLICIT));
    assert!(matches!(err, SchemaError::CircularInheritance { .. }));
}

#[test]
fn test_typed_and_shadow_nodes_do_not_mix() {
    let mut model = bare_model();
    let customer = add_entity::<Customer>(&mut model);
    let shadow = add_shadow(&mut model, &["Person"]);

    let err = expect_schema_error(model.set_base_type(customer, Some(shadow), EXPLICIT));
    assert!(matches!(err, SchemaError::NonClrBaseType { .. }));

    let err = expect_schema_error(model.set_base_type(shadow, Some(customer), EXPLICIT));
    assert!(matches!(err, SchemaError::NonShadowBaseType { .. }));
}

#[test]
fn test_base_type_must_be_assignable() {
    let mut model = bare_model();
    let customer = add_entity::<Customer>(&mut model);
    let customizer = add_entity::<Customizer>(&mut model);
    let order = add_entity::<Order>(&mut model);

    let err = expect_schema_error(model.set_base_type(order, Some(customer), EXPLICIT));
    assert!(matches!(err, SchemaError::NotAssignableClrBaseType { .. }));

    model.set_base_type(customizer, Some(customer), EXPLICIT).unwrap();
    assert!(model.graph().is_ancestor_of(customer, customizer));
    assert_eq!(model.graph().descendants(customer), vec![customizer]);
}

#[test]
fn test_dependent_cannot_derive() {
    let mut model = bare_model();
    let a = add_shadow(&mut model, &["A"]);
    let b = add_shadow(&mut model, &["B"]);
    let dependent = model
        .add_dependent_entity(NodeIdentity::labels(["Line"]), "Lines", a, EXPLICIT)
        .unwrap()
        .unwrap();

    let err = expect_schema_error(model.set_base_type(dependent, Some(b), EXPLICIT));
    assert!(matches!(err, SchemaError::DependentDerived { .. }));

    let err = expect_schema_error(model.set_base_type(b, Some(dependent), EXPLICIT));
    assert!(matches!(err, SchemaError::DependentBaseType { .. }));
}

#[test]
fn test_duplicate_properties_on_base_rejected() {
    let mut model = bare_model();
    let a = add_shadow(&mut model, &["A"]);
    let b = add_shadow(&mut model, &["B"]);
    model.add_property(a, "Name", &scalars::string(), EXPLICIT).unwrap();
    model.add_property(b, "Name", &scalars::string(), EXPLICIT).unwrap();

    let err = expect_schema_error(model.set_base_type(b, Some(a), EXPLICIT));
    assert!(matches!(err, SchemaError::DuplicatePropertiesOnBase { .. }));
    assert_eq!(model.graph().node(b).unwrap().base(), None);
}

#[test]
fn test_base_change_refused_when_a_collision_is_stronger() {
    let mut model = bare_model();
    let a = add_shadow(&mut model, &["A"]);
    let b = add_shadow(&mut model, &["B"]);
    model.add_property(a, "X", &scalars::string(), CONVENTION).unwrap();
    model.add_property(a, "Y", &scalars::string(), EXPLICIT).unwrap();
    model.add_property(b, "X", &scalars::string(), EXPLICIT).unwrap();
    model.add_property(b, "Y", &scalars::string(), EXPLICIT).unwrap();

    let changed = model
        .node_builder(a)
        .has_base_type(Some(b), ConfigurationSource::DataAnnotation)
        .unwrap();

    assert_eq!(changed, None);
    let node = model.graph().node(a).unwrap();
    assert_eq!(node.base(), None);
    assert!(node.property("X").is_some());
    assert!(node.property("Y").is_some());
}

#[test]
fn test_base_change_removes_weaker_collisions() {
    let mut model = bare_model();
    let a = add_shadow(&mut model, &["A"]);
    let b = add_shadow(&mut model, &["B"]);
    model.add_property(a, "X", &scalars::string(), CONVENTION).unwrap();
    model.add_property(a, "Z", &scalars::string(), EXPLICIT).unwrap();
    model.add_property(b, "X", &scalars::string(), EXPLICIT).unwrap();

    model
        .node_builder(a)
        .has_base_type(Some(b), ConfigurationSource::DataAnnotation)
        .unwrap();

    let node = model.graph().node(a).unwrap();
    assert_eq!(node.base(), Some(b));
    assert!(node.property("X").is_none());
    assert!(node.property("Z").is_some());
}

#[test]
fn test_base_change_removes_dangling_foreign_keys() {
    let mut model = bare_model();
    let base = add_shadow(&mut model, &["Base"]);
    let derived = add_shadow(&mut model, &["Derived"]);
    let other = add_shadow(&mut model, &["Other"]);

    model.set_base_type(derived, Some(base), EXPLICIT).unwrap();
    model
        .add_property(base, "OtherId", &scalars::nullable(&scalars::int64()), EXPLICIT)
        .unwrap();
    let fk = model
        .add_foreign_key(derived, &["OtherId"], other, EXPLICIT)
        .unwrap()
        .unwrap();
    assert!(model.graph().foreign_key(fk).is_some());

    model.set_base_type(derived, None, EXPLICIT).unwrap();
    assert!(model.graph().foreign_key(fk).is_none());
    assert!(model.graph().foreign_keys_between(derived, other).is_empty());
}

#[test]
fn test_remove_node_reparents_derived_nodes() {
    let mut model = bare_model();
    let a = add_shadow(&mut model, &["A"]);
    let b = add_shadow(&mut model, &["B"]);
    let c = add_shadow(&mut model, &["C"]);
    model.set_base_type(b, Some(a), EXPLICIT).unwrap();
    model.set_base_type(c, Some(b), EXPLICIT).unwrap();

    let removed = model.remove_node(b).unwrap();
    assert!(removed.is_some());
    assert!(model.graph().node(b).is_none());
    assert_eq!(model.graph().node(c).unwrap().base(), Some(a));
    assert_eq!(model.graph().descendants(a), vec![c]);
}

#[test]
fn test_remove_node_removes_dependents_and_foreign_keys() {
    let mut model = bare_model();
    let owner = add_shadow(&mut model, &["Owner"]);
    let other = add_shadow(&mut model, &["Other"]);
    let line = model
        .add_dependent_entity(NodeIdentity::labels(["Line"]), "Lines", owner, EXPLICIT)
        .unwrap()
        .unwrap();
    let fk = model.add_foreign_key(other, &[], owner, EXPLICIT).unwrap().unwrap();

    model.remove_node(owner).unwrap();

    assert!(model.graph().node(line).is_none());
    assert!(model.graph().foreign_key(fk).is_none());
    assert_eq!(model.graph().node_count(), 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// Properties and foreign keys
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_member_property_requires_backing_member() {
    let mut model = bare_model();
    let customer = add_entity::<Customer>(&mut model);

    let name = model.add_member_property(customer, "Name", EXPLICIT).unwrap().unwrap();
    let property = model.property(&name).unwrap();
    assert!(!property.is_shadow());
    assert_eq!(property.value_type(), &scalars::string());

    let err = expect_schema_error(model.add_member_property(customer, "Missing", EXPLICIT));
    assert!(matches!(err, SchemaError::MissingBackingMember { .. }));
}

#[test]
fn test_property_names_unique_across_hierarchy() {
    let mut model = bare_model();
    let a = add_shadow(&mut model, &["A"]);
    let b = add_shadow(&mut model, &["B"]);
    model.set_base_type(b, Some(a), EXPLICIT).unwrap();
    model.add_property(b, "Code", &scalars::string(), EXPLICIT).unwrap();

    let err = expect_schema_error(model.add_property(a, "Code", &scalars::string(), EXPLICIT));
    assert!(matches!(err, SchemaError::DuplicateProperty { .. }));

    let err = expect_schema_error(model.add_property(b, "Code", &scalars::int32(), EXPLICIT));
    assert!(matches!(err, SchemaError::DuplicateProperty { .. }));
}

#[test]
fn test_blank_property_name_rejected() {
    let mut model = bare_model();
    let a = add_shadow(&mut model, &["A"]);
    assert_invalid_argument(model.add_property(a, "  ", &scalars::string(), EXPLICIT), "name");
}

#[test]
fn test_non_nullable_type_cannot_be_nullable() {
    let mut model = bare_model();
    let a = add_shadow(&mut model, &["A"]);
    let count = model.add_property(a, "Count", &scalars::int32(), EXPLICIT).unwrap().unwrap();
    let label = model.add_property(a, "Label", &scalars::string(), EXPLICIT).unwrap().unwrap();

    let err = expect_schema_error(model.set_property_nullable(&count, true, EXPLICIT));
    assert!(matches!(err, SchemaError::CannotBeNullable { .. }));

    model.set_property_nullable(&label, false, EXPLICIT).unwrap();
    assert!(!model.property(&label).unwrap().is_nullable());
}

#[test]
fn test_foreign_key_property_must_exist() {
    let mut model = bare_model();
    let a = add_shadow(&mut model, &["A"]);
    let b = add_shadow(&mut model, &["B"]);

    let err = expect_schema_error(model.add_foreign_key(a, &["BId"], b, EXPLICIT));
    assert!(matches!(err, SchemaError::ForeignKeyPropertyNotFound { .. }));
}

#[test]
fn test_foreign_key_property_listed_twice_rejected() {
    let mut model = bare_model();
    let a = add_shadow(&mut model, &["A"]);
    let b = add_shadow(&mut model, &["B"]);
    model.add_property(a, "BId", &scalars::int64(), EXPLICIT).unwrap();

    assert_invalid_argument(model.add_foreign_key(a, &["BId", "BId"], b, EXPLICIT), "properties");
}

#[test]
fn test_removing_property_removes_foreign_key() {
    let mut model = bare_model();
    let a = add_shadow(&mut model, &["A"]);
    let b = add_shadow(&mut model, &["B"]);
    let key = model
        .add_property(a, "BId", &scalars::nullable(&scalars::int64()), EXPLICIT)
        .unwrap()
        .unwrap();
    let fk = model.add_foreign_key(a, &["BId"], b, EXPLICIT).unwrap().unwrap();
    assert!(model.graph().is_foreign_key_property(&key));

    model.remove_property(&key).unwrap();
    assert!(model.graph().foreign_key(fk).is_none());
}

#[test]
fn test_relationship_required_follows_carrying_properties() {
    let mut model = bare_model();
    let a = add_shadow(&mut model, &["A"]);
    let b = add_shadow(&mut model, &["B"]);
    let key = model
        .add_property(a, "BId", &scalars::nullable(&scalars::int64()), EXPLICIT)
        .unwrap()
        .unwrap();
    let fk = model.add_foreign_key(a, &["BId"], b, EXPLICIT).unwrap().unwrap();
    let bare = model.add_foreign_key(b, &[], a, EXPLICIT).unwrap().unwrap();

    assert!(!model.graph().is_required(fk));
    assert!(model.graph().is_required(bare));

    model.set_property_nullable(&key, false, EXPLICIT).unwrap();
    assert!(model.graph().is_required(fk));
}

#[test]
fn test_navigation_names_cannot_shadow_properties() {
    let mut model = bare_model();
    let a = add_shadow(&mut model, &["A"]);
    let b = add_shadow(&mut model, &["B"]);
    model.add_property(a, "Owner", &scalars::string(), EXPLICIT).unwrap();
    let fk = model.add_foreign_key(a, &[], b, EXPLICIT).unwrap().unwrap();

    let err = expect_schema_error(model.add_navigation(fk, "Owner", true, None, EXPLICIT));
    assert!(matches!(err, SchemaError::ConflictingProperty { .. }));
}

#[test]
fn test_navigations_point_at_both_ends() {
    let mut model = bare_model();
    let order = add_shadow(&mut model, &["Order"]);
    let customer = add_shadow(&mut model, &["Customer"]);
    let fk = model.add_foreign_key(order, &[], customer, EXPLICIT).unwrap().unwrap();

    let to_customer = model.add_navigation(fk, "Customer", true, None, EXPLICIT).unwrap().unwrap();
    let to_orders = model.add_navigation(fk, "Orders", false, None, EXPLICIT).unwrap().unwrap();

    let graph = model.graph();
    let forward = graph.navigation(&to_customer).unwrap();
    let inverse = graph.navigation(&to_orders).unwrap();
    assert_eq!(graph.navigation_target(forward), Some(customer));
    assert_eq!(graph.navigation_target(inverse), Some(order));
    assert!(inverse.is_collection());
    assert!(!forward.is_collection());
    assert_eq!(graph.foreign_key(fk).unwrap().dependent_to_principal(), Some("Customer"));

    model.remove_navigation(&to_orders).unwrap();
    assert_eq!(model.graph().foreign_key(fk).unwrap().principal_to_dependent(), None);
}

// ═══════════════════════════════════════════════════════════════════════════
// Ignore
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_ignored_entity_is_removed_and_stays_out() {
    let mut model = cypher_model();
    let customer = add_entity::<Customer>(&mut model);
    let identity = NodeIdentity::of_type(&Customer::type_descriptor());

    assert!(model.ignore(IgnoredMember::Node(identity.clone()), EXPLICIT).unwrap());
    assert!(model.graph().node(customer).is_none());

    let again = model.add_entity(identity.clone(), CONVENTION).unwrap();
    assert_eq!(again, None);

    let forced = model.add_entity(identity, EXPLICIT).unwrap();
    assert!(forced.is_some());
}

#[test]
fn test_weaker_ignore_refused() {
    let mut model = cypher_model();
    let customer = add_entity::<Customer>(&mut model);
    let identity = NodeIdentity::of_type(&Customer::type_descriptor());

    assert!(!model.ignore(IgnoredMember::Node(identity), CONVENTION).unwrap());
    assert!(model.graph().node(customer).is_some());
}

#[test]
fn test_ignored_member_removed() {
    let mut model = cypher_model();
    let customer = add_entity::<Customer>(&mut model);
    assert!(property_names(&model, customer).contains(&"Name".to_string()));

    let identity = NodeIdentity::of_type(&Customer::type_descriptor());
    assert!(model.ignore(IgnoredMember::member(&identity, "Name"), EXPLICIT).unwrap());
    assert!(!property_names(&model, customer).contains(&"Name".to_string()));

    let rediscovered = model.add_member_property(customer, "Name", CONVENTION).unwrap();
    assert_eq!(rediscovered, None);
}

#[test]
fn test_missing_handles_report_not_found() {
    let mut model = bare_model();
    let a = add_shadow(&mut model, &["A"]);
    model.remove_node(a).unwrap();

    let result = model.set_base_type(a, None, EXPLICIT);
    assert!(matches!(result, Err(OgmError::NotFound { .. })), "{result:?}");
    let result = model.cypher_property(&PropertyRef::new(a, "Missing"));
    assert!(matches!(result, Err(OgmError::NotFound { .. })));
}
