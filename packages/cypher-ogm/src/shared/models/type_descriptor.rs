//! Host type descriptors
//!
//! Entity types are described explicitly instead of being discovered through
//! reflection. A descriptor carries the base chain, declared members and the
//! attributes conventions read when an entity or property is added.

use once_cell::sync::Lazy;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::errors::{OgmError, Result};
use crate::shared::utils::{check_identifier, check_labels};

/// Shared handle to a type descriptor
pub type TypeRef = Arc<TypeDescriptor>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Entity-capable type with members
    Class,
    /// Value type mapped to a storage type
    Scalar,
    /// Sequence of another type, used for collection navigations
    Collection,
}

/// Host type: name, base chain, declared members and attributes
///
/// Equality, hashing and ordering use the full name only.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: String,
    short_name: String,
    kind: TypeKind,
    nullable: bool,
    underlying: Option<TypeRef>,
    base: Option<TypeRef>,
    members: Vec<MemberDescriptor>,
    attributes: Vec<TypeAttribute>,
}

impl TypeDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_class(&self) -> bool {
        self.kind == TypeKind::Class
    }

    /// Whether a value of this type may be absent
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Wrapped type of a nullable scalar, or element type of a collection
    pub fn underlying(&self) -> Option<&TypeRef> {
        self.underlying.as_ref()
    }

    /// The type with any nullable wrapper removed
    pub fn unwrap_nullable(&self) -> &TypeDescriptor {
        match (&self.underlying, self.kind) {
            (Some(inner), TypeKind::Scalar) => inner,
            _ => self,
        }
    }

    pub fn base(&self) -> Option<&TypeRef> {
        self.base.as_ref()
    }

    /// Base chain, nearest first
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors {
            next: self.base.as_deref(),
        }
    }

    /// Whether `other` is this type, derives from it, or is the non-nullable
    /// form of this nullable type
    pub fn is_assignable_from(&self, other: &TypeDescriptor) -> bool {
        if self == other || other.ancestors().any(|a| a == self) {
            return true;
        }
        match (&self.underlying, self.kind) {
            (Some(inner), TypeKind::Scalar) => inner.as_ref() == other,
            _ => false,
        }
    }

    /// Members declared directly on this type
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// Members of this type and its ancestors, most derived first
    pub fn all_members(&self) -> impl Iterator<Item = &MemberDescriptor> {
        std::iter::once(self)
            .chain(self.ancestors())
            .flat_map(|t| t.members.iter())
    }

    /// Find a member by name on this type or an ancestor
    pub fn find_member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.all_members().find(|m| m.name == name)
    }

    pub fn attributes(&self) -> &[TypeAttribute] {
        &self.attributes
    }

    pub fn labels_attribute(&self) -> Option<&LabelsAttribute> {
        self.attributes.iter().find_map(|a| match a {
            TypeAttribute::Labels(labels) => Some(labels),
        })
    }

    /// Descriptor for a collection of `element`
    pub fn collection_of(element: &TypeRef) -> TypeRef {
        Arc::new(TypeDescriptor {
            name: format!("Collection<{}>", element.name),
            short_name: format!("Collection<{}>", element.short_name),
            kind: TypeKind::Collection,
            nullable: true,
            underlying: Some(element.clone()),
            base: None,
            members: Vec::new(),
            attributes: Vec::new(),
        })
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for TypeDescriptor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeDescriptor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Iterator over a type's base chain
pub struct Ancestors<'a> {
    next: Option<&'a TypeDescriptor>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a TypeDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.base.as_deref();
        Some(current)
    }
}

/// Fluent construction of class descriptors
///
/// ```rust,ignore
/// let customer = TypeBuilder::class("Shop.Customer")
///     .property("Id", &scalars::int32())
///     .property("Name", &scalars::string())
///     .build();
/// ```
#[derive(Debug)]
pub struct TypeBuilder {
    descriptor: TypeDescriptor,
}

impl TypeBuilder {
    pub fn class(name: impl Into<String>) -> Self {
        let name = name.into();
        let short_name = short_name_of(&name);
        Self {
            descriptor: TypeDescriptor {
                name,
                short_name,
                kind: TypeKind::Class,
                nullable: true,
                underlying: None,
                base: None,
                members: Vec::new(),
                attributes: Vec::new(),
            },
        }
    }

    pub fn base(mut self, base: &TypeRef) -> Self {
        self.descriptor.base = Some(base.clone());
        self
    }

    pub fn property(self, name: impl Into<String>, member_type: &TypeRef) -> Self {
        self.member(name, member_type, MemberKind::Property, Vec::new())
    }

    pub fn property_with(
        self,
        name: impl Into<String>,
        member_type: &TypeRef,
        attributes: Vec<MemberAttribute>,
    ) -> Self {
        self.member(name, member_type, MemberKind::Property, attributes)
    }

    pub fn field(self, name: impl Into<String>, member_type: &TypeRef) -> Self {
        self.member(name, member_type, MemberKind::Field, Vec::new())
    }

    pub fn attribute(mut self, attribute: TypeAttribute) -> Self {
        self.descriptor.attributes.push(attribute);
        self
    }

    pub fn build(self) -> TypeRef {
        Arc::new(self.descriptor)
    }

    fn member(
        mut self,
        name: impl Into<String>,
        member_type: &TypeRef,
        kind: MemberKind,
        attributes: Vec<MemberAttribute>,
    ) -> Self {
        self.descriptor.members.push(MemberDescriptor {
            name: name.into(),
            member_type: member_type.clone(),
            kind,
            declaring_type: self.descriptor.name.clone(),
            attributes,
        });
        self
    }
}

fn short_name_of(name: &str) -> String {
    name.rsplit(['.', ':'])
        .find(|segment| !segment.is_empty())
        .unwrap_or(name)
        .to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Property,
    Field,
}

/// Declared property or field of a host type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    pub name: String,
    pub member_type: TypeRef,
    pub kind: MemberKind,
    /// Full name of the declaring type
    pub declaring_type: String,
    pub attributes: Vec<MemberAttribute>,
}

impl MemberDescriptor {
    pub fn storage_attribute(&self) -> Option<&StorageAttribute> {
        self.attributes.iter().find_map(|a| match a {
            MemberAttribute::Storage(storage) => Some(storage),
            _ => None,
        })
    }

    pub fn relationship_attribute(&self) -> Option<&RelationshipTarget> {
        self.attributes.iter().find_map(|a| match a {
            MemberAttribute::Relationship(target) => Some(target),
            _ => None,
        })
    }

    pub fn is_not_mapped(&self) -> bool {
        self.attributes
            .iter()
            .any(|a| matches!(a, MemberAttribute::NotMapped))
    }

    /// Whether this member can back a value of type `property_type`
    pub fn is_compatible_with(&self, property_type: &TypeDescriptor) -> bool {
        self.member_type.is_assignable_from(property_type)
            || property_type.is_assignable_from(&self.member_type)
    }

    /// Whether the declaring type is `owner` or one of its ancestors
    pub fn is_declared_on(&self, owner: &TypeDescriptor) -> bool {
        std::iter::once(owner)
            .chain(owner.ancestors())
            .any(|t| t.name() == self.declaring_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeAttribute {
    Labels(LabelsAttribute),
}

/// Class-level label list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelsAttribute {
    labels: Vec<String>,
}

impl LabelsAttribute {
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Result<Self> {
        check_labels(labels)?;
        Ok(Self {
            labels: labels.iter().map(|l| l.as_ref().to_string()).collect(),
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberAttribute {
    Storage(StorageAttribute),
    Relationship(RelationshipTarget),
    NotMapped,
}

/// Member-level storage overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageAttribute {
    pub name: Option<String>,
    pub type_name: Option<String>,
    pub order: Option<u32>,
}

impl StorageAttribute {
    pub fn new(name: Option<&str>, type_name: Option<&str>, order: Option<i64>) -> Result<Self> {
        if let Some(name) = name {
            check_identifier("name", name)?;
        }
        if let Some(type_name) = type_name {
            check_identifier("type_name", type_name)?;
        }
        let order = match order {
            None => None,
            Some(order) => Some(u32::try_from(order).map_err(|_| {
                OgmError::invalid_argument("order", format!("{} is not a valid order", order))
            })?),
        };
        Ok(Self {
            name: name.map(str::to_string),
            type_name: type_name.map(str::to_string),
            order,
        })
    }

    pub fn named(name: &str) -> Result<Self> {
        Self::new(Some(name), None, None)
    }
}

/// Target of a member-level relationship attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationshipTarget {
    Named(String),
    Typed(TypeRef),
}

impl RelationshipTarget {
    pub fn named(name: &str) -> Result<Self> {
        check_identifier("name", name)?;
        Ok(RelationshipTarget::Named(name.to_string()))
    }
}

/// Host types that describe themselves
pub trait GraphType {
    fn type_descriptor() -> TypeRef;
}

/// Built-in scalar descriptors
pub mod scalars {
    use super::*;

    fn scalar(name: &str, nullable: bool) -> TypeRef {
        Arc::new(TypeDescriptor {
            name: name.to_string(),
            short_name: name.to_string(),
            kind: TypeKind::Scalar,
            nullable,
            underlying: None,
            base: None,
            members: Vec::new(),
            attributes: Vec::new(),
        })
    }

    static INT32: Lazy<TypeRef> = Lazy::new(|| scalar("Int32", false));
    static INT64: Lazy<TypeRef> = Lazy::new(|| scalar("Int64", false));
    static DOUBLE: Lazy<TypeRef> = Lazy::new(|| scalar("Double", false));
    static DECIMAL: Lazy<TypeRef> = Lazy::new(|| scalar("Decimal", false));
    static BOOLEAN: Lazy<TypeRef> = Lazy::new(|| scalar("Boolean", false));
    static STRING: Lazy<TypeRef> = Lazy::new(|| scalar("String", true));
    static DATE_TIME: Lazy<TypeRef> = Lazy::new(|| scalar("DateTime", false));
    static GUID: Lazy<TypeRef> = Lazy::new(|| scalar("Guid", false));
    static BYTES: Lazy<TypeRef> = Lazy::new(|| scalar("Bytes", true));

    pub fn int32() -> TypeRef {
        INT32.clone()
    }

    pub fn int64() -> TypeRef {
        INT64.clone()
    }

    pub fn double() -> TypeRef {
        DOUBLE.clone()
    }

    pub fn decimal() -> TypeRef {
        DECIMAL.clone()
    }

    pub fn boolean() -> TypeRef {
        BOOLEAN.clone()
    }

    pub fn string() -> TypeRef {
        STRING.clone()
    }

    pub fn date_time() -> TypeRef {
        DATE_TIME.clone()
    }

    pub fn guid() -> TypeRef {
        GUID.clone()
    }

    pub fn bytes() -> TypeRef {
        BYTES.clone()
    }

    /// Nullable wrapper; reference-like types are returned unchanged
    pub fn nullable(of: &TypeRef) -> TypeRef {
        if of.is_nullable() {
            return of.clone();
        }
        Arc::new(TypeDescriptor {
            name: format!("Nullable<{}>", of.name),
            short_name: format!("{}?", of.short_name),
            kind: TypeKind::Scalar,
            nullable: true,
            underlying: Some(of.clone()),
            base: None,
            members: Vec::new(),
            attributes: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animal_hierarchy() -> (TypeRef, TypeRef, TypeRef) {
        let animal = TypeBuilder::class("Zoo.Animal")
            .property("Id", &scalars::int32())
            .build();
        let dog = TypeBuilder::class("Zoo.Dog")
            .base(&animal)
            .property("Breed", &scalars::string())
            .build();
        let puppy = TypeBuilder::class("Zoo.Puppy").base(&dog).build();
        (animal, dog, puppy)
    }

    #[test]
    fn test_short_name() {
        let (animal, _, _) = animal_hierarchy();
        assert_eq!(animal.short_name(), "Animal");
        assert_eq!(TypeBuilder::class("crate::models::Order").build().short_name(), "Order");
        assert_eq!(TypeBuilder::class("Plain").build().short_name(), "Plain");
    }

    #[test]
    fn test_ancestors_and_assignability() {
        let (animal, dog, puppy) = animal_hierarchy();
        let chain: Vec<&str> = puppy.ancestors().map(|t| t.name()).collect();
        assert_eq!(chain, vec!["Zoo.Dog", "Zoo.Animal"]);

        assert!(animal.is_assignable_from(&puppy));
        assert!(dog.is_assignable_from(&dog));
        assert!(!puppy.is_assignable_from(&animal));
    }

    #[test]
    fn test_find_member_walks_hierarchy() {
        let (_, _, puppy) = animal_hierarchy();
        let id = puppy.find_member("Id").unwrap();
        assert_eq!(id.declaring_type, "Zoo.Animal");
        assert!(id.is_declared_on(&puppy));
        assert!(puppy.find_member("Missing").is_none());
    }

    #[test]
    fn test_nullable_scalars() {
        let int = scalars::int32();
        let nullable_int = scalars::nullable(&int);
        assert!(!int.is_nullable());
        assert!(nullable_int.is_nullable());
        assert_eq!(nullable_int.unwrap_nullable(), int.as_ref());
        assert!(nullable_int.is_assignable_from(&int));
        assert!(!int.is_assignable_from(&nullable_int));
        assert_eq!(scalars::nullable(&scalars::string()), scalars::string());
    }

    #[test]
    fn test_labels_attribute_validation() {
        assert!(LabelsAttribute::new(&["Person"]).is_ok());
        assert!(LabelsAttribute::new::<&str>(&[]).is_err());
        assert!(LabelsAttribute::new(&["Person", "  "]).is_err());
    }

    #[test]
    fn test_storage_attribute_validation() {
        let attr = StorageAttribute::new(Some("col_name"), None, Some(3)).unwrap();
        assert_eq!(attr.order, Some(3));
        assert!(StorageAttribute::new(None, None, Some(-1)).is_err());
        assert!(StorageAttribute::new(Some(" "), None, None).is_err());
    }

    #[test]
    fn test_member_compatibility() {
        let (animal, dog, _) = animal_hierarchy();
        let member = MemberDescriptor {
            name: "_pet".to_string(),
            member_type: animal.clone(),
            kind: MemberKind::Field,
            declaring_type: "Zoo.Owner".to_string(),
            attributes: Vec::new(),
        };
        assert!(member.is_compatible_with(&dog));
        assert!(!member.is_compatible_with(&scalars::int32()));
    }
}
