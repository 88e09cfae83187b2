//! Cypher rendering and metadata-driven pattern construction

mod pattern_factory;
mod writer;

pub use pattern_factory::PatternFactory;
pub use writer::{escape_identifier, CypherWriter, WriteCypher};
