//! Shop domain host types

use once_cell::sync::Lazy;

use cypher_ogm::shared::models::{
    scalars, GraphType, LabelsAttribute, MemberAttribute, RelationshipTarget, StorageAttribute,
    TypeAttribute, TypeBuilder, TypeDescriptor, TypeRef,
};

static ORDER: Lazy<TypeRef> = Lazy::new(|| {
    TypeBuilder::class("Shop.Order")
        .property("Id", &scalars::int32())
        .property("Total", &scalars::decimal())
        .property("PlacedAt", &scalars::date_time())
        .build()
});

static CUSTOMER: Lazy<TypeRef> = Lazy::new(|| {
    TypeBuilder::class("Shop.Customer")
        .property("Id", &scalars::int32())
        .property("Name", &scalars::string())
        .property_with(
            "Email",
            &scalars::string(),
            vec![MemberAttribute::Storage(
                StorageAttribute::named("col_email").unwrap(),
            )],
        )
        .property_with("Notes", &scalars::string(), vec![MemberAttribute::NotMapped])
        .property("Orders", &TypeDescriptor::collection_of(&ORDER))
        .build()
});

static CUSTOMIZER: Lazy<TypeRef> = Lazy::new(|| {
    TypeBuilder::class("Shop.Customizer")
        .base(&CUSTOMER)
        .property("Theme", &scalars::string())
        .build()
});

static PRODUCT: Lazy<TypeRef> = Lazy::new(|| {
    TypeBuilder::class("Shop.Product")
        .property("Id", &scalars::int64())
        .property_with(
            "Sku",
            &scalars::string(),
            vec![MemberAttribute::Storage(
                StorageAttribute::new(Some("col_name"), Some("NVARCHAR"), Some(2)).unwrap(),
            )],
        )
        .property("Price", &scalars::double())
        .property("Photo", &scalars::bytes())
        .build()
});

static SUPPLIER: Lazy<TypeRef> = Lazy::new(|| {
    TypeBuilder::class("Shop.Supplier")
        .property("Id", &scalars::guid())
        .property_with(
            "Products",
            &TypeDescriptor::collection_of(&PRODUCT),
            vec![MemberAttribute::Relationship(
                RelationshipTarget::named("SUPPLIES").unwrap(),
            )],
        )
        .build()
});

static TAG: Lazy<TypeRef> = Lazy::new(|| {
    TypeBuilder::class("Shop.Tag")
        .property("Name", &scalars::string())
        .attribute(TypeAttribute::Labels(
            LabelsAttribute::new(&["Label", "Tag"]).unwrap(),
        ))
        .build()
});

static ADDRESS: Lazy<TypeRef> = Lazy::new(|| {
    TypeBuilder::class("Shop.Address")
        .property("Street", &scalars::string())
        .property("City", &scalars::string())
        .build()
});

pub struct Customer;
pub struct Customizer;
pub struct Order;
pub struct Product;
pub struct Supplier;
pub struct Tag;
pub struct Address;

macro_rules! graph_type {
    ($($ty:ident => $descriptor:ident),* $(,)?) => {
        $(
            impl GraphType for $ty {
                fn type_descriptor() -> TypeRef {
                    $descriptor.clone()
                }
            }
        )*
    };
}

graph_type!(
    Customer => CUSTOMER,
    Customizer => CUSTOMIZER,
    Order => ORDER,
    Product => PRODUCT,
    Supplier => SUPPLIER,
    Tag => TAG,
    Address => ADDRESS,
);

/// Records used by the join tests
pub mod records {
    use cypher_ogm::features::pattern_join::{record, Record};

    pub fn customers(ids: &[i64]) -> Vec<Record> {
        ids.iter()
            .map(|id| record([("Id", *id)]))
            .collect()
    }

    pub fn placed(pairs: &[(i64, i64)]) -> Vec<Record> {
        pairs
            .iter()
            .map(|(a, b)| record([("A", *a), ("B", *b)]))
            .collect()
    }

    pub fn orders(ids: &[i64]) -> Vec<Record> {
        customers(ids)
    }
}
