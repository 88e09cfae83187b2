mod record;
mod shape;

pub use record::{record, JoinedRow, Record};
pub use shape::{ShapeId, ShapeRegistry};
