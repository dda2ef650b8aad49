//! Core data models for the settlement engine.
//!
//! This module contains all the domain models used throughout the engine.

mod adjustments;
mod employee;
mod settlement_result;

pub(crate) use adjustments::parse_decimal_lenient;
pub use adjustments::{
    AdjustmentInputs, MAX_INPUT_MAGNITUDE, RawAdjustments, SettlementOptions, SeveranceOverrides,
    SeveranceSettings, check_input_range, within_input_range,
};
pub use employee::{CalculationType, EmployeeRecord};
pub use settlement_result::{
    AuditStep, AuditTrace, AuditWarning, ComponentSource, MonthlyIsr, OrdinaryWithholding,
    PerceptionBreakdown, SettlementResult, SeveranceBreakdown, SeveranceComponent, SeveranceTax,
    SocialSecurityContribution, TaxWithholding, TaxableSplit,
};
