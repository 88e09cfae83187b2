//! Convention traits, the convention set and queued events

mod convention;
mod convention_set;
mod event;

pub use convention::*;
pub use convention_set::ConventionSet;
pub use event::ConventionEvent;
