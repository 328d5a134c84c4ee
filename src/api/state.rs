//! Application state for the Compa-Ratio Band Engine API.
//!
//! Handlers share the configuration loaded at startup. A request may carry
//! its own field mapping; [`AppState::config_for`] builds the configuration
//! that request runs with.

use std::borrow::Cow;
use std::sync::Arc;

use crate::config::{ConfigLoader, EngineConfig, FieldMapping};
use crate::error::EngineResult;

/// Shared application state.
///
/// The loaded configuration is never mutated after startup, so clones of
/// the state share it without locking.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the configuration for one request.
    ///
    /// Without an override this borrows the server configuration. An
    /// override replaces the whole field mapping and is validated first;
    /// metadata and band policy always come from the server.
    pub fn config_for(
        &self,
        field_mapping: Option<FieldMapping>,
    ) -> EngineResult<Cow<'_, EngineConfig>> {
        let base = self.config.config();
        match field_mapping {
            None => Ok(Cow::Borrowed(base)),
            Some(mapping) => base.with_mapping(mapping).map(Cow::Owned),
        }
    }
}
