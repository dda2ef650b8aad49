//! UMA resolution.
//!
//! The UMA is revalued in February, so a termination in January of the
//! reference year still uses the prior year's UMA and the January subsidy
//! percentage.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::{EconomicConfig, StatutoryTables};
use crate::models::AuditStep;

/// The UMA and subsidy percentage that apply to a termination date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UmaResolution {
    /// UMA to use for every UMA-indexed ceiling.
    pub uma: Decimal,
    /// Employment subsidy percentage for the termination month.
    pub subsidy_percent: Decimal,
    /// True if the prior year's UMA replaced the supplied one.
    pub prior_year_substituted: bool,
}

/// The result of resolving the UMA, including the audit step.
#[derive(Debug, Clone)]
pub struct UmaResolutionResult {
    /// The resolved values.
    pub resolution: UmaResolution,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// Returns true if the date falls in January of the reference year.
pub fn is_reference_first_month(date: NaiveDate, tables: &StatutoryTables) -> bool {
    date.year() == tables.statute.reference_year && date.month() == 1
}

/// Resolves the UMA and subsidy percentage for a termination date.
///
/// # Examples
///
/// ```
/// use finiquito_engine::calculation::resolve_uma;
/// use finiquito_engine::config::{EconomicConfig, StatutoryTables};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let tables = StatutoryTables::mx_2026();
/// let january = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
/// let result = resolve_uma(january, &EconomicConfig::default(), &tables, 1);
/// assert_eq!(result.resolution.uma, Decimal::new(11314, 2));
/// ```
pub fn resolve_uma(
    termination_date: NaiveDate,
    economy: &EconomicConfig,
    tables: &StatutoryTables,
    step_number: u32,
) -> UmaResolutionResult {
    let subsidy = &tables.isr.subsidy;
    let first_month = is_reference_first_month(termination_date, tables);

    let resolution = if first_month {
        UmaResolution {
            uma: tables.statute.prior_year_uma,
            subsidy_percent: subsidy.first_month_percent,
            prior_year_substituted: true,
        }
    } else {
        UmaResolution {
            uma: economy.uma,
            subsidy_percent: subsidy.other_month_percent,
            prior_year_substituted: false,
        }
    };

    if first_month {
        tracing::debug!(
            termination_date = %termination_date,
            supplied_uma = %economy.uma,
            uma = %resolution.uma,
            "Substituting prior-year UMA for January termination"
        );
    }

    let reasoning = if first_month {
        format!(
            "Termination {} falls in January {}: prior-year UMA ${} replaces ${}, subsidy {}",
            termination_date,
            tables.statute.reference_year,
            resolution.uma,
            economy.uma,
            resolution.subsidy_percent
        )
    } else {
        format!(
            "Using supplied UMA ${}, subsidy {}",
            resolution.uma, resolution.subsidy_percent
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "uma_resolution".to_string(),
        rule_name: "UMA Resolution".to_string(),
        clause_ref: "DOF UMA 2026".to_string(),
        input: serde_json::json!({
            "termination_date": termination_date.to_string(),
            "supplied_uma": economy.uma.to_string(),
            "reference_year": tables.statute.reference_year
        }),
        output: serde_json::json!({
            "uma": resolution.uma.to_string(),
            "subsidy_percent": resolution.subsidy_percent.to_string(),
            "prior_year_substituted": resolution.prior_year_substituted
        }),
        reasoning,
    };

    UmaResolutionResult {
        resolution,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_january_of_reference_year_uses_prior_uma() {
        let tables = StatutoryTables::mx_2026();
        let economy = EconomicConfig::default();
        let result = resolve_uma(date(2026, 1, 31), &economy, &tables, 1);

        assert_eq!(result.resolution.uma, dec("113.14"));
        assert_eq!(result.resolution.subsidy_percent, dec("0.1559"));
        assert!(result.resolution.prior_year_substituted);
        assert_eq!(
            result.audit_step.output["prior_year_substituted"].as_bool(),
            Some(true)
        );
    }

    #[test]
    fn test_february_uses_supplied_uma() {
        let tables = StatutoryTables::mx_2026();
        let economy = EconomicConfig {
            uma: dec("120.00"),
            minimum_wage: dec("315.04"),
        };
        let result = resolve_uma(date(2026, 2, 1), &economy, &tables, 3);

        assert_eq!(result.resolution.uma, dec("120.00"));
        assert_eq!(result.resolution.subsidy_percent, dec("0.1502"));
        assert!(!result.resolution.prior_year_substituted);
        assert_eq!(result.audit_step.step_number, 3);
    }

    #[test]
    fn test_january_of_other_year_uses_supplied_uma() {
        let tables = StatutoryTables::mx_2026();
        let result = resolve_uma(date(2025, 1, 10), &EconomicConfig::default(), &tables, 1);

        assert_eq!(result.resolution.uma, dec("117.31"));
        assert_eq!(result.resolution.subsidy_percent, dec("0.1502"));
    }
}
