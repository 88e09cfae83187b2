//! Feature modules

pub mod annotations;
pub mod builder;
pub mod conventions;
pub mod cypher;
pub mod metadata;
pub mod pattern_join;
pub mod raw_command;
pub mod type_mapping;
