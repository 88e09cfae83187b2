mod model;

pub use model::GraphModel;
