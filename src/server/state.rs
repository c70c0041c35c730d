//! Server state.

use crate::config::StudioConfig;
use crate::studio::Studio;

/// Application state shared across handlers.
pub struct AppState {
    pub config: StudioConfig,
    pub studio: Studio,
}

impl AppState {
    pub fn new(config: StudioConfig, studio: Studio) -> Self {
        Self { config, studio }
    }
}
