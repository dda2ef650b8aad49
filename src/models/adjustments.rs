//! Per-calculation inputs supplied by the caller.
//!
//! Adjustments are transient: they are supplied fresh with every
//! recomputation and never persisted.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest magnitude accepted for any caller-supplied amount or day count.
///
/// Products of two bounded inputs stay well inside `Decimal`'s range, so no
/// calculation step can overflow.
pub const MAX_INPUT_MAGNITUDE: i64 = 1_000_000_000_000;

/// Returns true if `value` lies within [`MAX_INPUT_MAGNITUDE`].
pub fn within_input_range(value: Decimal) -> bool {
    value.abs() <= Decimal::from(MAX_INPUT_MAGNITUDE)
}

/// Rejects a caller-supplied value outside [`MAX_INPUT_MAGNITUDE`].
pub fn check_input_range(field: &str, value: Decimal) -> EngineResult<()> {
    if within_input_range(value) {
        Ok(())
    } else {
        Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("{} exceeds magnitude {}", value, MAX_INPUT_MAGNITUDE),
        })
    }
}

/// Numeric adjustments for one settlement.
///
/// All amounts default to zero. `salary_days_override` is the only field
/// whose absence differs from zero: `None` means "use the computed default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentInputs {
    /// Taxable income of the prior half-month period of the same month.
    pub prior_period_income: Decimal,
    /// ISR withheld in the prior half-month period.
    pub prior_period_tax: Decimal,
    /// Additional overtime owed at double rate, as a peso amount.
    pub extra_double_overtime: Decimal,
    /// Overtime owed at triple rate, as a peso amount.
    pub extra_triple_overtime: Decimal,
    /// Explicit number of salary days to pay.
    pub salary_days_override: Option<Decimal>,
    /// Additional fully taxable perception.
    pub additional_perception: Decimal,
}

/// Adjustments as typed by a user, before numeric parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAdjustments {
    /// Prior period taxable income.
    pub prior_period_income: Option<String>,
    /// Prior period withheld ISR.
    pub prior_period_tax: Option<String>,
    /// Extra double-rate overtime amount.
    pub extra_double_overtime: Option<String>,
    /// Extra triple-rate overtime amount.
    pub extra_triple_overtime: Option<String>,
    /// Salary days override.
    pub salary_days_override: Option<String>,
    /// Additional perception amount.
    pub additional_perception: Option<String>,
}

impl AdjustmentInputs {
    /// Parses user-typed adjustments without ever failing.
    ///
    /// Unparsable or out-of-range amounts become zero; an unparsable, blank,
    /// or out-of-range salary-days override becomes "not supplied".
    ///
    /// # Examples
    ///
    /// ```
    /// use finiquito_engine::models::{AdjustmentInputs, RawAdjustments};
    /// use rust_decimal::Decimal;
    ///
    /// let raw = RawAdjustments {
    ///     prior_period_income: Some("abc".to_string()),
    ///     salary_days_override: Some("0".to_string()),
    ///     ..Default::default()
    /// };
    /// let parsed = AdjustmentInputs::from_raw(&raw);
    /// assert_eq!(parsed.prior_period_income, Decimal::ZERO);
    /// assert_eq!(parsed.salary_days_override, Some(Decimal::ZERO));
    /// ```
    pub fn from_raw(raw: &RawAdjustments) -> Self {
        let amount = |field: &Option<String>| {
            field
                .as_deref()
                .and_then(parse_decimal_lenient)
                .unwrap_or(Decimal::ZERO)
        };

        Self {
            prior_period_income: amount(&raw.prior_period_income),
            prior_period_tax: amount(&raw.prior_period_tax),
            extra_double_overtime: amount(&raw.extra_double_overtime),
            extra_triple_overtime: amount(&raw.extra_triple_overtime),
            salary_days_override: raw
                .salary_days_override
                .as_deref()
                .and_then(parse_decimal_lenient),
            additional_perception: amount(&raw.additional_perception),
        }
    }
}

/// Parses a decimal, tolerating whitespace and thousands separators.
///
/// Values beyond [`MAX_INPUT_MAGNITUDE`] are treated as unparsable.
pub(crate) fn parse_decimal_lenient(text: &str) -> Option<Decimal> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .ok()
        .filter(|value| within_input_range(*value))
}

impl AdjustmentInputs {
    fn check_range(&self) -> EngineResult<()> {
        check_input_range("adjustments.prior_period_income", self.prior_period_income)?;
        check_input_range("adjustments.prior_period_tax", self.prior_period_tax)?;
        check_input_range("adjustments.extra_double_overtime", self.extra_double_overtime)?;
        check_input_range("adjustments.extra_triple_overtime", self.extra_triple_overtime)?;
        check_input_range("adjustments.additional_perception", self.additional_perception)?;
        if let Some(days) = self.salary_days_override {
            check_input_range("adjustments.salary_days_override", days)?;
        }
        Ok(())
    }
}

/// Enables each severance component independently. All default to enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeveranceSettings {
    /// Include the 90-day constitutional indemnity.
    pub include_indemnity_90_days: bool,
    /// Include 20 days of wage per year of service.
    pub include_20_days_per_year: bool,
    /// Include the seniority premium.
    pub include_seniority_premium: bool,
    /// Include the proportional seniority premium for the current year.
    pub include_proportional_seniority_premium: bool,
}

impl Default for SeveranceSettings {
    fn default() -> Self {
        Self {
            include_indemnity_90_days: true,
            include_20_days_per_year: true,
            include_seniority_premium: true,
            include_proportional_seniority_premium: true,
        }
    }
}

/// Explicit peso amounts that replace computed severance components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeveranceOverrides {
    /// Replaces the 90-day indemnity.
    pub indemnity_90_days: Option<Decimal>,
    /// Replaces the 20-days-per-year component.
    pub twenty_days_per_year: Option<Decimal>,
    /// Replaces the seniority premium.
    pub seniority_premium: Option<Decimal>,
    /// Replaces the proportional seniority premium.
    pub proportional_seniority_premium: Option<Decimal>,
}

/// Everything a single settlement needs besides the employee and economy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementOptions {
    /// Numeric adjustments.
    pub adjustments: AdjustmentInputs,
    /// Severance component toggles.
    pub severance_settings: SeveranceSettings,
    /// Severance component overrides.
    pub severance_overrides: SeveranceOverrides,
}

impl SettlementOptions {
    /// Rejects adjustments or overrides beyond [`MAX_INPUT_MAGNITUDE`].
    pub fn validate(&self) -> EngineResult<()> {
        self.adjustments.check_range()?;

        let overrides = &self.severance_overrides;
        let fields = [
            ("severance_overrides.indemnity_90_days", overrides.indemnity_90_days),
            ("severance_overrides.twenty_days_per_year", overrides.twenty_days_per_year),
            ("severance_overrides.seniority_premium", overrides.seniority_premium),
            (
                "severance_overrides.proportional_seniority_premium",
                overrides.proportional_seniority_premium,
            ),
        ];
        for (field, value) in fields {
            if let Some(amount) = value {
                check_input_range(field, amount)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_lenient_strips_separators() {
        assert_eq!(parse_decimal_lenient(" 1,234.50 "), Some(dec("1234.50")));
    }

    #[test]
    fn test_parse_lenient_rejects_text_and_blank() {
        assert_eq!(parse_decimal_lenient("n/a"), None);
        assert_eq!(parse_decimal_lenient("   "), None);
    }

    #[test]
    fn test_from_raw_defaults_invalid_amounts_to_zero() {
        let raw = RawAdjustments {
            prior_period_income: Some("5000".to_string()),
            prior_period_tax: Some("x".to_string()),
            extra_double_overtime: None,
            extra_triple_overtime: Some("".to_string()),
            salary_days_override: None,
            additional_perception: Some("250.75".to_string()),
        };

        let parsed = AdjustmentInputs::from_raw(&raw);
        assert_eq!(parsed.prior_period_income, dec("5000"));
        assert_eq!(parsed.prior_period_tax, Decimal::ZERO);
        assert_eq!(parsed.extra_double_overtime, Decimal::ZERO);
        assert_eq!(parsed.extra_triple_overtime, Decimal::ZERO);
        assert_eq!(parsed.additional_perception, dec("250.75"));
    }

    #[test]
    fn test_from_raw_keeps_zero_override_distinct_from_absent() {
        let zero = RawAdjustments {
            salary_days_override: Some("0".to_string()),
            ..Default::default()
        };
        let invalid = RawAdjustments {
            salary_days_override: Some("ten".to_string()),
            ..Default::default()
        };

        assert_eq!(
            AdjustmentInputs::from_raw(&zero).salary_days_override,
            Some(Decimal::ZERO)
        );
        assert_eq!(AdjustmentInputs::from_raw(&invalid).salary_days_override, None);
    }

    #[test]
    fn test_from_raw_drops_out_of_range_values() {
        let raw = RawAdjustments {
            additional_perception: Some("79228162514264337593543950335".to_string()),
            salary_days_override: Some("1000000000001".to_string()),
            ..Default::default()
        };

        let parsed = AdjustmentInputs::from_raw(&raw);
        assert_eq!(parsed.additional_perception, Decimal::ZERO);
        assert_eq!(parsed.salary_days_override, None);
    }

    #[test]
    fn test_options_validate_rejects_huge_override() {
        let options = SettlementOptions {
            adjustments: AdjustmentInputs {
                salary_days_override: Some(Decimal::MAX),
                ..Default::default()
            },
            ..Default::default()
        };

        match options.validate() {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "adjustments.salary_days_override")
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_options_validate_rejects_huge_severance_override() {
        let options = SettlementOptions {
            severance_overrides: SeveranceOverrides {
                seniority_premium: Some(Decimal::MIN),
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(matches!(
            options.validate(),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_options_validate_accepts_defaults_and_limit() {
        assert!(SettlementOptions::default().validate().is_ok());
        let limit = Decimal::from(MAX_INPUT_MAGNITUDE);
        assert!(check_input_range("x", limit).is_ok());
        assert!(check_input_range("x", -limit).is_ok());
        assert!(check_input_range("x", limit + Decimal::ONE).is_err());
    }

    #[test]
    fn test_severance_settings_default_all_enabled() {
        let settings = SeveranceSettings::default();
        assert!(settings.include_indemnity_90_days);
        assert!(settings.include_20_days_per_year);
        assert!(settings.include_seniority_premium);
        assert!(settings.include_proportional_seniority_premium);
    }

    #[test]
    fn test_partial_settings_deserialize_with_defaults() {
        let settings: SeveranceSettings =
            serde_json::from_str(r#"{"include_seniority_premium": false}"#).unwrap();
        assert!(settings.include_indemnity_90_days);
        assert!(!settings.include_seniority_premium);
    }

    #[test]
    fn test_sparse_overrides_deserialize() {
        let overrides: SeveranceOverrides =
            serde_json::from_str(r#"{"indemnity_90_days": "10000"}"#).unwrap();
        assert_eq!(overrides.indemnity_90_days, Some(dec("10000")));
        assert_eq!(overrides.seniority_premium, None);
    }
}
