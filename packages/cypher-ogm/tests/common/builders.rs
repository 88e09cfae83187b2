//! Model construction helpers

use std::sync::Once;

use cypher_ogm::features::metadata::domain::NodeId;
use cypher_ogm::{
    ConfigurationSource, ConventionSet, GraphModel, GraphType, ModelBuilder, NodeIdentity,
    TypeRef,
};

use super::fixtures::{Customer, Customizer, Order};

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness; `RUST_LOG` filters it
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Model with the built-in conventions
pub fn cypher_model() -> GraphModel {
    init_tracing();
    GraphModel::new(ConventionSet::cypher_defaults()).unwrap()
}

/// Model without conventions
pub fn bare_model() -> GraphModel {
    init_tracing();
    GraphModel::new(ConventionSet::new()).unwrap()
}

pub fn add_type(model: &mut GraphModel, ty: &TypeRef) -> NodeId {
    model
        .add_entity(NodeIdentity::of_type(ty), ConfigurationSource::Explicit)
        .unwrap()
        .expect("entity was vetoed")
}

pub fn add_entity<T: GraphType>(model: &mut GraphModel) -> NodeId {
    add_type(model, &T::type_descriptor())
}

pub fn add_shadow(model: &mut GraphModel, labels: &[&str]) -> NodeId {
    model
        .add_entity(NodeIdentity::labels(labels.iter().copied()), ConfigurationSource::Explicit)
        .unwrap()
        .expect("entity was vetoed")
}

pub fn node_of<T: GraphType>(model: &GraphModel) -> NodeId {
    model
        .graph()
        .find_node_by_type(&T::type_descriptor())
        .expect("type is not part of the graph")
}

/// Customer, Customizer and Order, with `Order.Customer` / `Customer.Orders`
pub fn shop_builder() -> ModelBuilder {
    init_tracing();
    let mut builder = ModelBuilder::new().unwrap();
    builder.entity::<Customer>().unwrap();
    builder.entity::<Customizer>().unwrap();
    builder
        .entity::<Order>()
        .unwrap()
        .has_one("Customer", Customer::type_descriptor())
        .unwrap()
        .with_many(Some("Orders"))
        .unwrap();
    builder
}

pub fn shop_model() -> GraphModel {
    shop_builder().build().unwrap()
}
