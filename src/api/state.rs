//! Application state for the Vacation Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, VacationPolicy};

/// Shared application state.
///
/// Holds only the immutable policy; request history lives with the caller.
#[derive(Clone)]
pub struct AppState {
    /// The loaded vacation policy.
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

    /// Returns the active policy.
    pub fn policy(&self) -> &VacationPolicy {
        self.config.policy()
    }
}
