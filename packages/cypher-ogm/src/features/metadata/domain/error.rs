//! Schema invariant violations
//!
//! Raised synchronously by the mutating call. The offending mutation is never
//! partially applied.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("The entity '{entity}' cannot have a base type because it is a dependent entity with a defining navigation")]
    DependentDerived { entity: String },

    #[error("The entity '{entity}' cannot derive from the shadow entity '{base}'. A typed entity can only derive from a typed entity")]
    NonClrBaseType { entity: String, base: String },

    #[error("The shadow entity '{entity}' cannot derive from the typed entity '{base}'. A shadow entity can only derive from a shadow entity")]
    NonShadowBaseType { entity: String, base: String },

    #[error("The entity '{entity}' cannot derive from '{base}' because its type does not derive from the type of '{base}'")]
    NotAssignableClrBaseType { entity: String, base: String },

    #[error("The entity '{entity}' cannot derive from '{base}' because '{base}' is a dependent entity")]
    DependentBaseType { entity: String, base: String },

    #[error("The entity '{entity}' cannot derive from '{base}' because that would create circular inheritance")]
    CircularInheritance { entity: String, base: String },

    #[error("The entity '{entity}' cannot derive from '{base}' because both declare the properties: {properties}")]
    DuplicatePropertiesOnBase {
        entity: String,
        base: String,
        properties: String,
    },

    #[error("The entity '{entity}' cannot derive from '{base}' because both declare the navigations: {navigations}")]
    DuplicateNavigationsOnBase {
        entity: String,
        base: String,
        navigations: String,
    },

    #[error("The node '{entity}' cannot derive from '{base}' because one is an entity and the other a relationship node")]
    BaseKindMismatch { entity: String, base: String },

    #[error("The node '{entity}' is already part of the graph")]
    DuplicateEntity { entity: String },

    #[error("The entity '{entity}' cannot be added because a dependent entity with the same identity already exists")]
    ClashingDependentEntity { entity: String },

    #[error("The dependent entity '{entity}' cannot be added because an entity with the same identity already exists")]
    ClashingNonDependentEntity { entity: String },

    #[error("The member '{member}' of type '{member_type}' cannot back the property '{entity}.{property}' of type '{property_type}'")]
    BadBackingFieldType {
        member: String,
        member_type: String,
        entity: String,
        property: String,
        property_type: String,
    },

    #[error("No member named '{member}' was found on the type of '{entity}'")]
    MissingBackingMember { member: String, entity: String },

    #[error("The member '{member}' is declared on '{declaring_type}', which is not part of the type of '{entity}'")]
    BackingFieldOnIncompatibleType {
        member: String,
        declaring_type: String,
        entity: String,
    },

    #[error("The property '{property}' cannot be added to '{entity}' because a property with the same name exists on '{duplicate_entity}'")]
    DuplicateProperty {
        property: String,
        entity: String,
        duplicate_entity: String,
    },

    #[error("The property '{property}' cannot be added to '{entity}' because a navigation with the same name exists on '{navigation_entity}'")]
    ConflictingNavigation {
        property: String,
        entity: String,
        navigation_entity: String,
    },

    #[error("The navigation '{navigation}' cannot be added to '{entity}' because a navigation with the same name exists on '{duplicate_entity}'")]
    DuplicateNavigation {
        navigation: String,
        entity: String,
        duplicate_entity: String,
    },

    #[error("The navigation '{navigation}' cannot be added to '{entity}' because a property with the same name exists on '{property_entity}'")]
    ConflictingProperty {
        navigation: String,
        entity: String,
        property_entity: String,
    },

    #[error("The foreign key property '{property}' was not found on '{entity}' or its base types")]
    ForeignKeyPropertyNotFound { property: String, entity: String },

    #[error("The navigation '{navigation}' on '{entity}' does not belong to a relationship between '{entity}' and '{target}'")]
    NavigationTargetMismatch {
        navigation: String,
        entity: String,
        target: String,
    },

    #[error("The property '{entity}.{property}' cannot be nullable because its type '{property_type}' is not nullable")]
    CannotBeNullable {
        property: String,
        entity: String,
        property_type: String,
    },

    #[error("'{entity}' is a {actual} node but a {expected} node was expected")]
    NodeKindMismatch {
        entity: String,
        expected: String,
        actual: String,
    },

    #[error("The properties '{first}' and '{second}' on '{entity}' are both mapped to the storage name '{storage_name}'")]
    DuplicateStorageName {
        entity: String,
        storage_name: String,
        first: String,
        second: String,
    },
}

impl SchemaError {
    /// Stable identifier for matching in tests and logs
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::DependentDerived { .. } => "dependent_derived",
            SchemaError::NonClrBaseType { .. } => "non_clr_base_type",
            SchemaError::NonShadowBaseType { .. } => "non_shadow_base_type",
            SchemaError::NotAssignableClrBaseType { .. } => "not_assignable_clr_base_type",
            SchemaError::DependentBaseType { .. } => "dependent_base_type",
            SchemaError::CircularInheritance { .. } => "circular_inheritance",
            SchemaError::DuplicatePropertiesOnBase { .. } => "duplicate_properties_on_base",
            SchemaError::DuplicateNavigationsOnBase { .. } => "duplicate_navigations_on_base",
            SchemaError::BaseKindMismatch { .. } => "base_kind_mismatch",
            SchemaError::DuplicateEntity { .. } => "duplicate_entity",
            SchemaError::ClashingDependentEntity { .. } => "clashing_dependent_entity",
            SchemaError::ClashingNonDependentEntity { .. } => "clashing_non_dependent_entity",
            SchemaError::BadBackingFieldType { .. } => "bad_backing_field_type",
            SchemaError::MissingBackingMember { .. } => "missing_backing_member",
            SchemaError::BackingFieldOnIncompatibleType { .. } => {
                "backing_field_on_incompatible_type"
            }
            SchemaError::DuplicateProperty { .. } => "duplicate_property",
            SchemaError::ConflictingNavigation { .. } => "conflicting_navigation",
            SchemaError::DuplicateNavigation { .. } => "duplicate_navigation",
            SchemaError::ConflictingProperty { .. } => "conflicting_property",
            SchemaError::ForeignKeyPropertyNotFound { .. } => "foreign_key_property_not_found",
            SchemaError::NavigationTargetMismatch { .. } => "navigation_target_mismatch",
            SchemaError::CannotBeNullable { .. } => "cannot_be_nullable",
            SchemaError::NodeKindMismatch { .. } => "node_kind_mismatch",
            SchemaError::DuplicateStorageName { .. } => "duplicate_storage_name",
        }
    }
}
