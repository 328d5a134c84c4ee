//! Configuration loading and management for the Compa-Ratio Band Engine.
//!
//! This module loads the band resolution policy and the declarative field
//! mapping from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use compa_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/default").unwrap();
//! println!("Default currency: {}", loader.config().policy().default_currency);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BandPolicy, EmployeeFieldMapping, EngineConfig, EngineFile, EngineMetadata, EstimationPolicy,
    FieldMapping, GroupFallback, PositioningFieldMapping, PositioningPolicy,
};
