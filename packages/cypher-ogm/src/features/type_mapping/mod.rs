//! Storage type mapping
//!
//! A [`TypeMapper`] resolves the storage type a host value type is written
//! as. Property discovery only maps members that have a mapping, and the
//! property view falls back to the mapped store type when no storage type
//! is configured.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::shared::models::{scalars, TypeDescriptor, TypeKind, TypeRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    /// Cypher type name, e.g. `INTEGER`
    pub store_type: String,
    /// Host type values are read back as
    pub value_type: TypeRef,
}

/// Host value type to storage type resolution
pub trait TypeMapper: Send + Sync {
    fn find_mapping(&self, value_type: &TypeDescriptor) -> Option<TypeMapping>;

    fn find_mapping_by_store_type(&self, store_type: &str) -> Option<TypeMapping>;

    fn is_mapped(&self, value_type: &TypeDescriptor) -> bool {
        self.find_mapping(value_type).is_some()
    }
}

static SCALAR_STORE_TYPES: Lazy<Vec<(TypeRef, &'static str)>> = Lazy::new(|| {
    vec![
        (scalars::int64(), "INTEGER"),
        (scalars::int32(), "INTEGER"),
        (scalars::double(), "FLOAT"),
        (scalars::decimal(), "FLOAT"),
        (scalars::string(), "STRING"),
        (scalars::guid(), "STRING"),
        (scalars::boolean(), "BOOLEAN"),
        (scalars::date_time(), "DATETIME"),
        (scalars::bytes(), "BYTE_ARRAY"),
    ]
});

/// Default mapper for the built-in scalars. Nullable scalars map like
/// their underlying type; classes and collections have no mapping.
#[derive(Debug, Clone)]
pub struct CypherTypeMapper {
    by_type: FxHashMap<String, &'static str>,
}

impl CypherTypeMapper {
    pub fn new() -> Self {
        let by_type = SCALAR_STORE_TYPES
            .iter()
            .map(|(ty, store)| (ty.name().to_string(), *store))
            .collect();
        Self { by_type }
    }
}

impl Default for CypherTypeMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeMapper for CypherTypeMapper {
    fn find_mapping(&self, value_type: &TypeDescriptor) -> Option<TypeMapping> {
        let scalar = value_type.unwrap_nullable();
        if scalar.kind() != TypeKind::Scalar {
            return None;
        }
        let store_type = self.by_type.get(scalar.name())?;
        let value_type = SCALAR_STORE_TYPES
            .iter()
            .find(|(ty, _)| ty.name() == scalar.name())
            .map(|(ty, _)| ty.clone())?;
        Some(TypeMapping {
            store_type: store_type.to_string(),
            value_type,
        })
    }

    /// First registered host type for the store type (`INTEGER` reads back
    /// as `Int64`)
    fn find_mapping_by_store_type(&self, store_type: &str) -> Option<TypeMapping> {
        SCALAR_STORE_TYPES
            .iter()
            .find(|(_, store)| store.eq_ignore_ascii_case(store_type))
            .map(|(ty, store)| TypeMapping {
                store_type: store.to_string(),
                value_type: ty.clone(),
            })
    }
}
