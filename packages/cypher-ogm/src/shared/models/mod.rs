//! Shared models
//!
//! - `ConfigurationSource`: precedence token for every configurable setting
//! - `LabelSet` / `NodeIdentity`: order-independent node identity
//! - `TypeDescriptor`: host type with base chain, members and attributes

pub mod configuration_source;
pub mod identity;
pub mod type_descriptor;

pub use configuration_source::{ConfigurationSource, HasConfigurationSource};
pub use identity::{HasLabelsOrType, LabelSet, NodeIdentity, NodeReference};
pub use type_descriptor::{
    scalars, GraphType, LabelsAttribute, MemberAttribute, MemberDescriptor, MemberKind,
    RelationshipTarget, StorageAttribute, TypeAttribute, TypeBuilder, TypeDescriptor, TypeKind,
    TypeRef,
};
