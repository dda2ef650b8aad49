//! Calculation logic for the settlement engine.
//!
//! This module contains the calendar utilities, UMA resolution, proportional
//! benefits, integrated daily wage, exemption splitting, severance
//! indemnity, ISR withholding, IMSS contribution, and the
//! [`SettlementEngine`] that runs them in order.

mod calendar;
mod exemptions;
mod income_tax;
mod integrated_wage;
mod proportional_benefits;
mod rounding;
mod settlement;
mod severance;
mod social_security;
mod uma;

pub use calendar::{
    anniversary_in_year, days_between, days_in_year, days_worked_in_year, default_salary_days,
    is_leap_year, last_anniversary, seniority_years,
};
pub use exemptions::{PerceptionSplitResult, split_overtime, split_perceptions, split_with_ceiling};
pub use income_tax::{
    OrdinaryWithholdingResult, SeveranceTaxResult, calculate_monthly_isr,
    calculate_ordinary_withholding, calculate_severance_withholding, find_bracket,
};
pub use integrated_wage::{IntegratedWage, IntegratedWageResult, calculate_integrated_daily_wage};
pub use proportional_benefits::{
    PROPORTIONAL_BENEFITS_CLAUSE, ProportionalBenefits, ProportionalBenefitsResult,
    calculate_proportional_benefits,
};
pub use rounding::{round_money, round_rate};
pub use settlement::SettlementEngine;
pub use severance::{SeveranceInputs, SeveranceResult, calculate_severance, resolve_component};
pub use social_security::{SocialSecurityResult, calculate_social_security};
pub use uma::{UmaResolution, UmaResolutionResult, is_reference_first_month, resolve_uma};
