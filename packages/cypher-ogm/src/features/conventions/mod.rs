//! Convention Dispatch Engine
//!
//! Conventions are ordered handlers keyed by graph event. Outside a batch
//! they run as soon as the event is raised; inside one the event is queued
//! and replayed when the outermost batch ends, until no new events appear.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{ConventionBatch, ConventionDispatcher};
pub use domain::{Convention, ConventionEvent, ConventionSet};
