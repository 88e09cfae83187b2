//! Applies member-level relationship attributes to new navigations

use crate::errors::Result;
use crate::features::annotations::resolved_labels;
use crate::features::conventions::domain::{Convention, NavigationAddedConvention};
use crate::features::metadata::domain::NavigationRef;
use crate::features::metadata::GraphModel;
use crate::shared::models::{
    ConfigurationSource, HasLabelsOrType, NodeReference, RelationshipTarget,
};

/// The relationship starts at the node declaring the attributed navigation
#[derive(Debug, Default, Clone, Copy)]
pub struct RelationshipAttributeConvention;

impl Convention for RelationshipAttributeConvention {
    fn name(&self) -> &str {
        "RelationshipAttribute"
    }
}

impl NavigationAddedConvention for RelationshipAttributeConvention {
    fn apply(
        &self,
        model: &mut GraphModel,
        navigation: NavigationRef,
    ) -> Result<Option<NavigationRef>> {
        let Some(nav) = model.navigation(&navigation) else {
            return Ok(None);
        };
        let Some(target) = nav.member().and_then(|m| m.relationship_attribute()).cloned() else {
            return Ok(Some(navigation));
        };
        let fk = nav.foreign_key();

        let start = match model.node(navigation.node).and_then(|n| n.clr_type()) {
            Some(ty) => NodeReference::Type(ty.clone()),
            None => match resolved_labels(model, navigation.node).iter().next() {
                Some(label) => NodeReference::Label(label.to_string()),
                None => return Ok(Some(navigation)),
            },
        };

        let source = ConfigurationSource::DataAnnotation;
        let mut builder = model.relationship_builder(fk);
        match &target {
            RelationshipTarget::Named(name) => {
                builder.has_relationship(name, Some(&start), source)?;
            }
            RelationshipTarget::Typed(ty) => {
                builder.has_relationship_type(ty, Some(&start), source)?;
            }
        }
        Ok(model.navigation(&navigation).is_some().then_some(navigation))
    }
}
