//! Application state for the settlement API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::SettlementEngine;
use crate::config::{ConfigLoader, EconomicConfig};

/// Shared application state.
///
/// Holds the loaded configuration and an engine built over its tables.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    engine: Arc<SettlementEngine>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        let engine = SettlementEngine::new(config.tables().clone());
        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the settlement engine.
    pub fn engine(&self) -> &SettlementEngine {
        &self.engine
    }

    /// Returns the request economy, or the configured default when absent.
    pub fn economy_or_default(&self, economy: Option<EconomicConfig>) -> EconomicConfig {
        economy.unwrap_or_else(|| self.config.economy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_request_economy_overrides_default() {
        let state = AppState::new(ConfigLoader::default());
        let supplied = EconomicConfig {
            uma: Decimal::from(100),
            minimum_wage: Decimal::from(300),
        };

        assert_eq!(state.economy_or_default(Some(supplied)), supplied);
        assert_eq!(state.economy_or_default(None), EconomicConfig::default());
    }
}
