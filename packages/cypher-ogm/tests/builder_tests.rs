//! Fluent model configuration

mod common;

use common::*;
use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;
use serde_json::json;

use cypher_ogm::config::OgmOptions;
use cypher_ogm::features::metadata::domain::NodeKind;
use cypher_ogm::shared::models::HasConfigurationSource;
use cypher_ogm::{
    scalars, ConfigurationSource, ConflictPolicy, ConventionSet, GeneratedValueKind, GraphModel,
    GraphType, ModelBuilder, NodeIdentity, NodeReference, OgmError, PropertyRef, SchemaError,
    TypeBuilder, TypeRef,
};

static PURCHASE: Lazy<TypeRef> = Lazy::new(|| {
    TypeBuilder::class("Shop.Purchase")
        .property("Quantity", &scalars::int32())
        .build()
});

fn order_customer_fk(model: &GraphModel) -> cypher_ogm::ForeignKeyId {
    let order = node_of::<Order>(model);
    let customer = node_of::<Customer>(model);
    model.graph().foreign_keys_between(order, customer)[0]
}

// ═══════════════════════════════════════════════════════════════════════════
// Entities
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_entity_is_configured_explicitly() {
    let model = shop_model();
    let customer = node_of::<Customer>(&model);

    let node = model.graph().node(customer).unwrap();
    assert_eq!(node.kind(), NodeKind::Entity);
    assert_eq!(node.configuration_source(), ConfigurationSource::Explicit);
}

#[test]
fn test_shadow_entity_by_labels() {
    let mut builder = ModelBuilder::new().unwrap();
    let audit = builder.entity_labels(&["Audit", "Log"]).unwrap().id();
    builder.entity_labels(&["Log", "Audit"]).unwrap();
    let model = builder.build().unwrap();

    assert_eq!(model.graph().node_count(), 1);
    assert_labels(&model, audit, &["Log", "Audit"]);
}

#[test]
fn test_blank_labels_rejected() {
    let mut builder = ModelBuilder::new().unwrap();
    assert_invalid_argument(builder.entity_labels(&[]).map(|e| e.id()), "labels");
    assert_invalid_argument(builder.entity_labels(&["Audit", " "]).map(|e| e.id()), "labels");

    let mut customer = builder.entity::<Customer>().unwrap();
    let empty: [&str; 0] = [];
    assert_invalid_argument(customer.has_labels(&empty).map(|_| ()), "labels");
}

#[test]
fn test_base_type_can_be_removed_and_restored() {
    let mut builder = shop_builder();
    builder.entity::<Customizer>().unwrap().has_no_base().unwrap();
    let customizer = node_of::<Customizer>(builder.model());
    assert_eq!(builder.model().graph().node(customizer).unwrap().base(), None);
    assert_labels(builder.model(), customizer, &["Customizer"]);

    builder
        .entity::<Customizer>()
        .unwrap()
        .has_base_type::<Customer>()
        .unwrap();
    let model = builder.build().unwrap();
    let customer = node_of::<Customer>(&model);
    assert_eq!(model.graph().node(customizer).unwrap().base(), Some(customer));
}

#[test]
fn test_explicit_base_not_replaced_by_discovery() {
    let mut builder = ModelBuilder::new().unwrap();
    builder.entity::<Customizer>().unwrap().has_no_base().unwrap();
    builder.entity::<Customer>().unwrap();
    let model = builder.build().unwrap();

    let customizer = node_of::<Customizer>(&model);
    assert_eq!(model.graph().node(customizer).unwrap().base(), None);
}

#[test]
fn test_ignore_type_removes_entity_and_relationships() {
    let mut builder = shop_builder();
    let fk = order_customer_fk(builder.model());
    builder.ignore::<Order>().unwrap();
    let model = builder.build().unwrap();

    assert!(model.graph().find_node_by_type(&Order::type_descriptor()).is_none());
    assert!(model.foreign_key(fk).is_none());
    let customer = node_of::<Customer>(&model);
    assert!(model.graph().node(customer).unwrap().navigation("Orders").is_none());
}

#[test]
fn test_ignore_member() {
    let mut builder = shop_builder();
    builder.entity::<Customer>().unwrap().ignore("Name").unwrap();
    let model = builder.build().unwrap();

    let customer = node_of::<Customer>(&model);
    assert!(!property_names(&model, customer).contains(&"Name".to_string()));
}

#[test]
fn test_batched_configuration() {
    let mut builder = ModelBuilder::new().unwrap();
    builder
        .batch(|b| {
            b.entity::<Customizer>()?;
            b.entity::<Customer>()?;
            assert!(b.model().dispatcher().is_delaying());
            Ok(())
        })
        .unwrap();
    let model = builder.build().unwrap();

    let customer = node_of::<Customer>(&model);
    let customizer = node_of::<Customizer>(&model);
    assert_eq!(model.graph().node(customizer).unwrap().base(), Some(customer));
}

// ═══════════════════════════════════════════════════════════════════════════
// Properties
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_property_configuration() {
    let mut builder = shop_builder();
    builder
        .entity::<Customer>()
        .unwrap()
        .property("Name")
        .unwrap()
        .has_storage_name("full_name")
        .unwrap()
        .has_storage_type("TEXT")
        .unwrap()
        .has_storage_order(1)
        .unwrap()
        .is_required(true)
        .unwrap();
    let model = builder.build().unwrap();

    let name = PropertyRef::new(node_of::<Customer>(&model), "Name");
    let view = model.cypher_property(&name).unwrap();
    assert_eq!(view.storage_name().as_deref(), Some("full_name"));
    assert_eq!(view.storage_type().as_deref(), Some("TEXT"));
    assert_eq!(view.storage_order(), Some(1));
    assert!(!view.property().is_nullable());
}

#[test]
fn test_property_requires_backing_member() {
    let mut builder = shop_builder();
    let result = builder.entity::<Customer>().unwrap().property("Missing").map(|p| p.handle().clone());
    let err = expect_schema_error(result);
    assert!(matches!(err, SchemaError::MissingBackingMember { .. }));
}

#[test]
fn test_shadow_property() {
    let mut builder = shop_builder();
    let handle = builder
        .entity::<Order>()
        .unwrap()
        .property_of_type("Reference", &scalars::guid())
        .unwrap()
        .handle()
        .clone();
    let model = builder.build().unwrap();

    let property = model.property(&handle).unwrap();
    assert!(property.is_shadow());
    assert_eq!(
        model.cypher_property(&handle).unwrap().storage_type().as_deref(),
        Some("STRING")
    );
}

#[test]
fn test_cannot_make_value_type_optional() {
    let mut builder = shop_builder();
    let mut customer = builder.entity::<Customer>().unwrap();
    let result = customer.property("Id").unwrap().is_required(false).map(|_| ());
    let err = expect_schema_error(result);
    assert!(matches!(err, SchemaError::CannotBeNullable { .. }));
}

#[test]
fn test_fluent_generated_values_replace_each_other() {
    let mut builder = shop_builder();
    let handle = builder
        .entity::<Order>()
        .unwrap()
        .property("PlacedAt")
        .unwrap()
        .has_default_value(json!("2024-01-01"))
        .unwrap()
        .has_computed_storage_constraint("datetime()")
        .unwrap()
        .handle()
        .clone();
    let model = builder.build().unwrap();

    let view = model.cypher_property(&handle).unwrap();
    assert_eq!(view.generated_value(), Some(GeneratedValueKind::ComputedStorageConstraint));
    assert_eq!(view.default_value(), None);
    assert_eq!(view.computed_storage_constraint(), Some("datetime()"));
}

#[test]
fn test_generated_value_conflict_throws_by_default() {
    let mut model = shop_model();
    let total = PropertyRef::new(node_of::<Order>(&model), "Total");

    model.cypher_property_mut(&total).unwrap().set_default_value(json!(0)).unwrap();
    let result = model
        .cypher_property_mut(&total)
        .unwrap()
        .set_default_storage_constraint(Some("0.0"));

    match result {
        Err(OgmError::ConflictingGeneratedValue { requested, existing, property, .. }) => {
            assert_eq!(requested, GeneratedValueKind::DefaultStorageConstraint);
            assert_eq!(existing, GeneratedValueKind::DefaultValue);
            assert_eq!(property, "Total");
        }
        other => panic!("expected a generated value conflict, got {other:?}"),
    }
    let view = model.cypher_property(&total).unwrap();
    assert_eq!(view.default_value(), Some(&json!(0)));
    assert_eq!(view.default_storage_constraint(), None);
}

#[test]
fn test_generated_value_conflict_clears_with_clear_policy() {
    init_tracing();
    let options = OgmOptions::new().conflict_policy(ConflictPolicy::Clear);
    let mut builder = ModelBuilder::with_options(ConventionSet::cypher_defaults(), options).unwrap();
    builder.entity::<Order>().unwrap();
    let mut model = builder.build().unwrap();
    let total = PropertyRef::new(node_of::<Order>(&model), "Total");

    model.cypher_property_mut(&total).unwrap().set_default_value(json!(0)).unwrap();
    model
        .cypher_property_mut(&total)
        .unwrap()
        .set_default_storage_constraint(Some("0.0"))
        .unwrap();

    let view = model.cypher_property(&total).unwrap();
    assert_eq!(view.default_value(), None);
    assert_eq!(view.default_storage_constraint(), Some("0.0"));
    assert_eq!(view.generated_value(), Some(GeneratedValueKind::DefaultStorageConstraint));
}

#[test]
fn test_clearing_a_generated_value_never_conflicts() {
    let mut model = shop_model();
    let total = PropertyRef::new(node_of::<Order>(&model), "Total");

    model.cypher_property_mut(&total).unwrap().set_default_value(json!(0)).unwrap();
    model
        .cypher_property_mut(&total)
        .unwrap()
        .set_computed_storage_constraint(None)
        .unwrap();
    assert_eq!(
        model.cypher_property(&total).unwrap().generated_value(),
        Some(GeneratedValueKind::DefaultValue)
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Relationships
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_relationship_defaults() {
    let model = shop_model();
    let fk = order_customer_fk(&model);
    let customer = node_of::<Customer>(&model);
    let order = node_of::<Order>(&model);

    let view = model.cypher_foreign_key(fk).unwrap();
    assert_eq!(view.relationship_name().as_deref(), Some("ORDERS"));
    assert_eq!(view.start(), customer);
    assert_eq!(view.end(), order);

    let key = view.foreign_key();
    assert_eq!(key.dependent_to_principal(), Some("Customer"));
    assert_eq!(key.principal_to_dependent(), Some("Orders"));
    assert!(!key.is_unique());
    assert!(model.graph().is_required(fk));

    let orders = model.cypher_navigation(&cypher_ogm::NavigationRef::new(customer, "Orders")).unwrap();
    assert!(orders.is_outgoing());
    assert!(orders.navigation().is_collection());
    let back = model.cypher_navigation(&cypher_ogm::NavigationRef::new(order, "Customer")).unwrap();
    assert!(!back.is_outgoing());
    assert_eq!(back.relationship_name().as_deref(), Some("ORDERS"));
}

#[test]
fn test_relationship_name_without_principal_navigation() {
    let mut builder = ModelBuilder::new().unwrap();
    let fk = builder
        .entity::<Order>()
        .unwrap()
        .has_one("BillingCustomer", Customer::type_descriptor())
        .unwrap()
        .with_many(None)
        .unwrap()
        .id();
    let model = builder.build().unwrap();

    assert_eq!(
        model.cypher_foreign_key(fk).unwrap().relationship_name().as_deref(),
        Some("BILLING_CUSTOMER")
    );
}

#[test]
fn test_has_relationship_is_idempotent() {
    let mut builder = shop_builder();
    for _ in 0..2 {
        builder
            .entity::<Order>()
            .unwrap()
            .has_one("Customer", Customer::type_descriptor())
            .unwrap()
            .with_many(Some("Orders"))
            .unwrap()
            .has_relationship("PLACED", None)
            .unwrap();
    }
    let model = builder.build().unwrap();

    let order = node_of::<Order>(&model);
    let customer = node_of::<Customer>(&model);
    let fks = model.graph().foreign_keys_between(order, customer);
    assert_eq!(fks.len(), 1);
    let view = model.cypher_foreign_key(fks[0]).unwrap();
    assert_eq!(view.relationship_name().as_deref(), Some("PLACED"));
    assert_eq!(view.start(), customer);
}

#[test]
fn test_relationship_start_from_dependent() {
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

    let fk = order_customer_fk(&model);
    let view = model.cypher_foreign_key(fk).unwrap();
    assert_eq!(view.start(), node_of::<Order>(&model));
    assert_eq!(view.end(), node_of::<Customer>(&model));
}

#[test]
fn test_relationship_start_must_be_an_end() {
    let mut builder = shop_builder();
    builder.entity::<Product>().unwrap();
    let result = builder
        .entity::<Order>()
        .unwrap()
        .has_one("Customer", Customer::type_descriptor())
        .unwrap()
        .with_many(Some("Orders"))
        .unwrap()
        .has_relationship("PLACED", Some(NodeReference::Type(Product::type_descriptor())))
        .map(|r| r.id());
    assert_invalid_argument(result, "start");
}

#[test]
fn test_relationship_type_node() {
    let mut builder = shop_builder();
    let fk = builder
        .entity::<Order>()
        .unwrap()
        .has_one("Customer", Customer::type_descriptor())
        .unwrap()
        .with_many(Some("Orders"))
        .unwrap()
        .has_relationship_type(&PURCHASE, None)
        .unwrap()
        .id();
    let model = builder.build().unwrap();

    let view = model.cypher_foreign_key(fk).unwrap();
    assert_eq!(view.relationship_type(), Some("Shop.Purchase"));
    let purchase = view.relationship_node().unwrap();
    let node = model.graph().node(purchase).unwrap();
    assert_eq!(node.kind(), NodeKind::Relationship);
    assert!(node.property("Quantity").is_some());
}

#[test]
fn test_relationship_node_kind_is_fixed() {
    let mut builder = shop_builder();
    let result = builder
        .entity::<Order>()
        .unwrap()
        .has_one("Customer", Customer::type_descriptor())
        .unwrap()
        .with_many(Some("Orders"))
        .unwrap()
        .has_relationship_type(&Product::type_descriptor(), None)
        .map(|r| r.id());
    assert!(result.is_ok());

    let err = expect_schema_error(builder.entity::<Product>().map(|e| e.id()));
    assert!(matches!(err, SchemaError::NodeKindMismatch { .. }));
}

#[test]
fn test_collection_cannot_have_collection_inverse() {
    let mut builder = shop_builder();
    let result = builder
        .entity::<Customer>()
        .unwrap()
        .has_many("Orders", Order::type_descriptor())
        .unwrap()
        .with_many(Some("Customers"))
        .map(|r| r.id());
    assert_invalid_argument(result, "inverse");
}

#[test]
fn test_has_many_with_one_matches_has_one_with_many() {
    let mut builder = ModelBuilder::new().unwrap();
    let fk = builder
        .entity::<Customer>()
        .unwrap()
        .has_many("Orders", Order::type_descriptor())
        .unwrap()
        .with_one(Some("Customer"))
        .unwrap()
        .id();
    let model = builder.build().unwrap();

    let key = model.foreign_key(fk).unwrap();
    assert_eq!(key.declaring_node(), node_of::<Order>(&model));
    assert_eq!(key.principal_node(), node_of::<Customer>(&model));
    assert_eq!(key.principal_to_dependent(), Some("Orders"));
}

#[test]
fn test_one_to_one() {
    let mut builder = shop_builder();
    let fk = builder
        .entity::<Order>()
        .unwrap()
        .has_one("Invoice", NodeReference::from("Invoice"))
        .unwrap()
        .with_one(Some("Order"))
        .unwrap()
        .id();
    let model = builder.build().unwrap();

    let key = model.foreign_key(fk).unwrap();
    assert!(key.is_unique());
    let invoice = model.graph().find_node(&NodeIdentity::labels(["Invoice"])).unwrap();
    let inverse = model.graph().node(invoice).unwrap().navigation("Order").unwrap();
    assert!(!inverse.is_collection());
}

#[test]
fn test_foreign_key_and_requiredness() {
    let mut builder = shop_builder();
    let fk = builder
        .entity::<Order>()
        .unwrap()
        .has_one("Customer", Customer::type_descriptor())
        .unwrap()
        .with_many(Some("Orders"))
        .unwrap()
        .has_foreign_key(&["CustomerId"])
        .unwrap()
        .id();
    assert!(!builder.model().graph().is_required(fk));

    builder
        .entity::<Order>()
        .unwrap()
        .has_one("Customer", Customer::type_descriptor())
        .unwrap()
        .with_many(Some("Orders"))
        .unwrap()
        .is_required(true)
        .unwrap();
    let model = builder.build().unwrap();

    assert!(model.graph().is_required(fk));
    assert_eq!(model.foreign_key(fk).unwrap().properties(), ["CustomerId".to_string()]);
}

#[test]
fn test_owned_entity() {
    let mut builder = shop_builder();
    let address = builder
        .entity::<Customer>()
        .unwrap()
        .owns_one("ShippingAddress", Address::type_descriptor())
        .unwrap()
        .id();
    let model = builder.build().unwrap();

    let customer = node_of::<Customer>(&model);
    let node = model.graph().node(address).unwrap();
    assert_eq!(node.defining_navigation().unwrap().node, customer);
    let fk = model.graph().foreign_keys_between(address, customer)[0];
    let key = model.foreign_key(fk).unwrap();
    assert!(key.is_ownership());
    assert!(key.is_unique());
    assert_eq!(
        model.cypher_foreign_key(fk).unwrap().relationship_name().as_deref(),
        Some("SHIPPING_ADDRESS")
    );
}

#[test]
fn test_ignore_member_of_owned_entity() {
    let mut builder = shop_builder();
    let address = builder
        .entity::<Customer>()
        .unwrap()
        .owns_one("ShippingAddress", Address::type_descriptor())
        .unwrap()
        .id();
    assert!(property_names(builder.model(), address).contains(&"Street".to_string()));

    let ignored = builder
        .model_mut()
        .node_builder(address)
        .ignore_member("Street", ConfigurationSource::Explicit)
        .unwrap();
    assert!(ignored);

    let readded = builder
        .model_mut()
        .node_builder(address)
        .property("Street", &scalars::string(), ConfigurationSource::Convention)
        .unwrap();
    assert!(readded.is_none());

    let model = builder.build().unwrap();
    let names = property_names(&model, address);
    assert!(!names.contains(&"Street".to_string()));
    assert!(names.contains(&"City".to_string()));
}

#[test]
fn test_fluent_ignore_on_owned_entity() {
    let mut builder = shop_builder();
    let address = builder
        .entity::<Customer>()
        .unwrap()
        .owns_one("BillingAddress", Address::type_descriptor())
        .unwrap()
        .ignore("City")
        .unwrap()
        .id();
    let model = builder.build().unwrap();

    assert!(!property_names(&model, address).contains(&"City".to_string()));
}
