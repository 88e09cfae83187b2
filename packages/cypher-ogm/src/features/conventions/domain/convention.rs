//! Convention traits, one per event
//!
//! Handlers receive the model and the handle of the item the event is about
//! and return the handle the chain should continue with. Returning `None`
//! vetoes: remaining handlers are skipped and the mutation that raised the
//! event reports `None` to its caller.

use crate::errors::Result;
use crate::features::metadata::domain::{ForeignKeyId, NavigationRef, NodeId, PropertyRef};
use crate::features::metadata::GraphModel;
use crate::shared::models::NodeIdentity;

/// Common supertrait, used for logging
pub trait Convention {
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

pub trait GraphInitializedConvention: Convention {
    fn apply(&self, model: &mut GraphModel) -> Result<()>;
}

pub trait EntityAddedConvention: Convention {
    fn apply(&self, model: &mut GraphModel, node: NodeId) -> Result<Option<NodeId>>;
}

pub trait EntityIgnoredConvention: Convention {
    /// Return `false` to stop the remaining handlers
    fn apply(&self, model: &mut GraphModel, identity: &NodeIdentity) -> Result<bool>;
}

pub trait BaseEntityChangedConvention: Convention {
    fn apply(
        &self,
        model: &mut GraphModel,
        node: NodeId,
        previous: Option<NodeId>,
    ) -> Result<Option<NodeId>>;
}

pub trait PropertyAddedConvention: Convention {
    fn apply(&self, model: &mut GraphModel, property: PropertyRef) -> Result<Option<PropertyRef>>;
}

pub trait PropertyNullabilityChangedConvention: Convention {
    fn apply(&self, model: &mut GraphModel, property: PropertyRef) -> Result<Option<PropertyRef>>;
}

pub trait ForeignKeyAddedConvention: Convention {
    fn apply(&self, model: &mut GraphModel, fk: ForeignKeyId) -> Result<Option<ForeignKeyId>>;
}

pub trait ForeignKeyUniquenessChangedConvention: Convention {
    fn apply(&self, model: &mut GraphModel, fk: ForeignKeyId) -> Result<Option<ForeignKeyId>>;
}

pub trait ForeignKeyOwnershipChangedConvention: Convention {
    fn apply(&self, model: &mut GraphModel, fk: ForeignKeyId) -> Result<Option<ForeignKeyId>>;
}

pub trait NavigationAddedConvention: Convention {
    fn apply(
        &self,
        model: &mut GraphModel,
        navigation: NavigationRef,
    ) -> Result<Option<NavigationRef>>;
}

pub trait NavigationRemovedConvention: Convention {
    /// Return `false` to stop the remaining handlers
    fn apply(
        &self,
        model: &mut GraphModel,
        source: NodeId,
        target: NodeId,
        name: &str,
    ) -> Result<bool>;
}

pub trait GraphBuiltConvention: Convention {
    fn apply(&self, model: &mut GraphModel) -> Result<()>;
}
