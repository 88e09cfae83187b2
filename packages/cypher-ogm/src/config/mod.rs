//! Model configuration
//!
//! [`OgmOptions`] holds the tunables of a graph model. Options are built in
//! code or loaded from a versioned YAML file, validated through
//! [`Validatable`], and remember where each value came from.
//!
//! ```rust,ignore
//! use cypher_ogm::config::OgmOptions;
//!
//! let options = OgmOptions::new().max_convention_iterations(1024);
//! let options = OgmOptions::from_yaml("ogm.yaml")?;
//! ```

pub mod error;
pub mod io;
pub mod options;
pub mod provenance;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use io::OptionsFileV1;
pub use options::{OgmOptions, DEFAULT_MAX_CONVENTION_ITERATIONS};
pub use provenance::{ConfigProvenance, ConfigSource};
pub use validation::Validatable;
