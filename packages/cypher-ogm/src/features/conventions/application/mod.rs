mod dispatcher;

pub use dispatcher::{ConventionBatch, ConventionDispatcher};
