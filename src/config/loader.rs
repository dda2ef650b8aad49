//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statute tables
//! and default economic values from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EconomicConfig, ImssRates, IsrTable, StatuteConfig, StatutoryTables};

/// Loads and provides access to the statute configuration.
///
/// # Directory Structure
///
/// ```text
/// config/mx2026/
/// ├── statute.yaml   # Reference year, prior-year UMA, LFT days, exemption ceilings
/// ├── isr.yaml       # Monthly ISR brackets and employment subsidy
/// ├── imss.yaml      # Employee IMSS contribution rates
/// └── economy.yaml   # Default UMA and minimum wage
/// ```
///
/// # Example
///
/// ```no_run
/// use finiquito_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/mx2026").unwrap();
/// println!("Reference year: {}", loader.tables().statute.reference_year);
/// println!("UMA: {}", loader.economy().uma);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    tables: StatutoryTables,
    economy: EconomicConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing, contains invalid YAML,
    /// or the ISR table fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let statute = Self::load_yaml::<StatuteConfig>(&path.join("statute.yaml"))?;

        let isr_path = path.join("isr.yaml");
        let isr = Self::load_yaml::<IsrTable>(&isr_path)?;
        isr.validate()
            .map_err(|message| EngineError::ConfigParseError {
                path: isr_path.display().to_string(),
                message,
            })?;

        let imss = Self::load_yaml::<ImssRates>(&path.join("imss.yaml"))?;
        let economy = Self::load_yaml::<EconomicConfig>(&path.join("economy.yaml"))?;

        tracing::debug!(
            reference_year = statute.reference_year,
            brackets = isr.brackets.len(),
            "Loaded statute configuration"
        );

        Ok(Self {
            tables: StatutoryTables { statute, isr, imss },
            economy,
        })
    }

    /// Builds a loader from in-memory tables, bypassing the filesystem.
    pub fn from_parts(tables: StatutoryTables, economy: EconomicConfig) -> Self {
        Self { tables, economy }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the statute tables.
    pub fn tables(&self) -> &StatutoryTables {
        &self.tables
    }

    /// Returns the default economic values.
    pub fn economy(&self) -> EconomicConfig {
        self.economy
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::from_parts(StatutoryTables::mx_2026(), EconomicConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/mx2026"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.tables().statute.reference_year, 2026);
        assert_eq!(loader.economy().uma, dec("117.31"));
        assert_eq!(loader.economy().minimum_wage, dec("315.04"));
    }

    #[test]
    fn test_yaml_tables_match_builtin_tables() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.tables(), &StatutoryTables::mx_2026());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("statute.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_top_bracket_is_open_ended() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let top = loader.tables().isr.brackets.last().unwrap();
        assert_eq!(top.lower_limit, dec("425642.00"));
        assert_eq!(top.upper_limit, None);
    }

    #[test]
    fn test_default_loader_uses_builtin_tables() {
        let loader = ConfigLoader::default();
        assert_eq!(loader.tables().statute.prior_year_uma, dec("113.14"));
        assert_eq!(loader.economy(), EconomicConfig::default());
    }
}
