//! Configuration loading and management for the settlement engine.
//!
//! This module provides functionality to load the statute tables for a
//! reference year from YAML files: ISR brackets and subsidy, IMSS rates,
//! exemption ceilings, and the default UMA and minimum wage.
//!
//! # Example
//!
//! ```no_run
//! use finiquito_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/mx2026").unwrap();
//! println!("Loaded tables for {}", config.tables().statute.reference_year);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EconomicConfig, ExemptionLimits, ImssRates, IsrBracket, IsrTable, SeveranceRules,
    StatuteConfig, StatutoryTables, SubsidyConfig, VacationTable,
};
