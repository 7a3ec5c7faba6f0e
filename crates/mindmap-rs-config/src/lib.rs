//! Configuration for the mindmap service.
//!
//! Typed config model, JSON5 schema checks and the layered loader used by the
//! binary and by anyone embedding the pipeline.

mod error;
mod loader;
mod model;

pub use error::ConfigError;
pub use loader::{ConfigLayer, ConfigLayerSource, LayeredConfig, LayeredConfigOptions};
pub use model::*;
