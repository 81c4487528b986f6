use std::sync::Arc;

use crate::core::config::{load_config, ScoutConfig};
use crate::extraction::StrategyRegistry;

/// Shared, read-only state handed to every request handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub registry: Arc<StrategyRegistry>,
    pub max_html_bytes: usize,
}

impl AppState {
    /// State built from the discovered config file (or defaults).
    pub fn new() -> Self {
        Self::from_config(load_config())
    }

    /// Registry and request limits from `config` (env-var fallback for unset fields).
    pub fn from_config(config: ScoutConfig) -> Self {
        Self {
            registry: Arc::new(config.registry()),
            max_html_bytes: config.resolve_max_html_bytes(),
        }
    }

    pub fn with_max_html_bytes(mut self, max: usize) -> Self {
        self.max_html_bytes = max;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
