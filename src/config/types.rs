//! Configuration types for settlement calculation.
//!
//! This module contains the strongly-typed statute tables that are
//! deserialized from YAML configuration files, plus the built-in tables for
//! the 2026 reference year.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Economy-wide values supplied by the caller on every calculation.
///
/// Both values change over time and are owned outside the engine; the engine
/// only ever reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomicConfig {
    /// The current UMA (Unidad de Medida y Actualización) daily value.
    pub uma: Decimal,
    /// The general daily minimum wage.
    pub minimum_wage: Decimal,
}

impl Default for EconomicConfig {
    /// UMA and minimum wage in force for 2026.
    fn default() -> Self {
        Self {
            uma: Decimal::new(11731, 2),
            minimum_wage: Decimal::new(31504, 2),
        }
    }
}

/// Vacation-day entitlement by seniority year (LFT Art. 76).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationTable {
    /// Days for seniority years 1, 2, 3, ... listed explicitly.
    pub first_years: Vec<u32>,
    /// Width in years of each band after the explicit years.
    pub band_years: u32,
    /// Days added per band after the explicit years.
    pub band_increment: u32,
}

impl VacationTable {
    /// Returns the vacation days owed for the given seniority year.
    ///
    /// Year 0 owes nothing. Past the explicit years each started band adds
    /// `band_increment` days with no upper cap.
    ///
    /// ```
    /// use finiquito_engine::config::StatutoryTables;
    ///
    /// let table = &StatutoryTables::mx_2026().statute.vacation_days;
    /// assert_eq!(table.days_for_year(1), 12);
    /// assert_eq!(table.days_for_year(6), 22);
    /// assert_eq!(table.days_for_year(11), 24);
    /// ```
    pub fn days_for_year(&self, year: u32) -> u32 {
        if year == 0 {
            return 0;
        }
        let explicit = self.first_years.len() as u32;
        if year <= explicit {
            return self.first_years[(year - 1) as usize];
        }
        let last = self.first_years.last().copied().unwrap_or(0);
        let bands = (year - explicit).div_ceil(self.band_years.max(1));
        last + bands * self.band_increment
    }
}

/// Statutory tax-exemption ceilings expressed as multiples of UMA (LISR Art. 93).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExemptionLimits {
    /// Year-end bonus ceiling, in UMA.
    pub year_end_bonus_uma: Decimal,
    /// Vacation premium ceiling, in UMA.
    pub vacation_premium_uma: Decimal,
    /// Double-rate overtime ceiling, in UMA.
    pub overtime_uma: Decimal,
    /// Share of double-rate overtime eligible for exemption.
    pub overtime_exempt_share: Decimal,
    /// Severance exemption, in UMA per seniority year.
    pub severance_uma_per_year: Decimal,
}

/// Severance indemnity day counts (LFT Arts. 50 and 162).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveranceRules {
    /// Days of integrated wage paid as the constitutional indemnity.
    pub indemnity_days: Decimal,
    /// Days of integrated wage paid per seniority year.
    pub days_per_year: Decimal,
    /// Seniority premium days per year of service.
    pub seniority_premium_days_per_year: Decimal,
    /// Seniority premium wage cap as a multiple of the minimum wage.
    pub seniority_premium_wage_cap: Decimal,
}

/// Labor-law and exemption parameters from statute.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatuteConfig {
    /// The reference year the tables are valid for.
    pub reference_year: i32,
    /// UMA of the previous year, still in force during January.
    pub prior_year_uma: Decimal,
    /// Year-end bonus (aguinaldo) days per full year.
    pub year_end_bonus_days: Decimal,
    /// Vacation premium rate (prima vacacional).
    pub vacation_premium_rate: Decimal,
    /// Vacation entitlement table.
    pub vacation_days: VacationTable,
    /// Exemption ceilings.
    pub exemptions: ExemptionLimits,
    /// Severance day counts.
    pub severance: SeveranceRules,
}

/// One row of the monthly ISR table (LISR Art. 96).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsrBracket {
    /// Lower limit of the bracket, inclusive.
    pub lower_limit: Decimal,
    /// Upper limit of the bracket; `None` for the open-ended top bracket.
    #[serde(default)]
    pub upper_limit: Option<Decimal>,
    /// Fixed quota owed at the lower limit.
    pub fixed_quota: Decimal,
    /// Marginal rate applied over the lower limit.
    pub rate: Decimal,
}

/// Employment subsidy parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsidyConfig {
    /// Monthly income at or below which the subsidy is granted.
    pub income_limit: Decimal,
    /// Percent of UMA granted in the first month of the reference year.
    pub first_month_percent: Decimal,
    /// Percent of UMA granted in every other month.
    pub other_month_percent: Decimal,
    /// Days per month used to convert daily UMA to a monthly amount.
    pub monthly_factor: Decimal,
}

/// ISR configuration from isr.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsrTable {
    /// Brackets sorted by lower limit, ascending.
    pub brackets: Vec<IsrBracket>,
    /// Employment subsidy.
    pub subsidy: SubsidyConfig,
}

impl IsrTable {
    /// Checks that brackets ascend without overlap and only the last is open-ended.
    pub fn validate(&self) -> Result<(), String> {
        let Some((last, rest)) = self.brackets.split_last() else {
            return Err("ISR table has no brackets".to_string());
        };
        if last.upper_limit.is_some() {
            return Err("last ISR bracket must have no upper limit".to_string());
        }
        for (i, bracket) in rest.iter().enumerate() {
            let upper = bracket
                .upper_limit
                .ok_or_else(|| format!("ISR bracket {} is open-ended but not last", i + 1))?;
            if upper < bracket.lower_limit {
                return Err(format!("ISR bracket {} has upper below lower limit", i + 1));
            }
            if self.brackets[i + 1].lower_limit <= upper {
                return Err(format!("ISR brackets {} and {} overlap", i + 1, i + 2));
            }
        }
        Ok(())
    }
}

/// Employee IMSS contribution rates from imss.yaml (LSS Arts. 25, 106, 107, 147, 168).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImssRates {
    /// Sickness and maternity, on SBC above the excess threshold.
    pub sickness_maternity_excess: Decimal,
    /// Disability and life.
    pub disability_life: Decimal,
    /// Unemployment at advanced age and old age.
    pub unemployment_old_age: Decimal,
    /// Sickness and maternity cash benefits.
    pub cash_benefits: Decimal,
    /// Medical expenses for pensioners.
    pub pensioner_medical: Decimal,
    /// SBC cap as a multiple of UMA.
    pub sbc_cap_uma: Decimal,
    /// Excess threshold as a multiple of UMA.
    pub excess_threshold_uma: Decimal,
}

/// The complete statute configuration for one reference year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryTables {
    /// Labor-law and exemption parameters.
    pub statute: StatuteConfig,
    /// ISR table and subsidy.
    pub isr: IsrTable,
    /// IMSS employee rates.
    pub imss: ImssRates,
}

impl StatutoryTables {
    /// Builds the tables in force for the 2026 reference year.
    pub fn mx_2026() -> Self {
        let bracket = |lower: i64, upper: Option<i64>, quota: i64, rate: i64| IsrBracket {
            lower_limit: Decimal::new(lower, 2),
            upper_limit: upper.map(|u| Decimal::new(u, 2)),
            fixed_quota: Decimal::new(quota, 2),
            rate: Decimal::new(rate, 4),
        };

        Self {
            statute: StatuteConfig {
                reference_year: 2026,
                prior_year_uma: Decimal::new(11314, 2),
                year_end_bonus_days: Decimal::from(15),
                vacation_premium_rate: Decimal::new(25, 2),
                vacation_days: VacationTable {
                    first_years: vec![12, 14, 16, 18, 20],
                    band_years: 5,
                    band_increment: 2,
                },
                exemptions: ExemptionLimits {
                    year_end_bonus_uma: Decimal::from(30),
                    vacation_premium_uma: Decimal::from(15),
                    overtime_uma: Decimal::from(5),
                    overtime_exempt_share: Decimal::new(5, 1),
                    severance_uma_per_year: Decimal::from(90),
                },
                severance: SeveranceRules {
                    indemnity_days: Decimal::from(90),
                    days_per_year: Decimal::from(20),
                    seniority_premium_days_per_year: Decimal::from(12),
                    seniority_premium_wage_cap: Decimal::from(2),
                },
            },
            isr: IsrTable {
                brackets: vec![
                    bracket(1, Some(84459), 0, 192),
                    bracket(84460, Some(716851), 1622, 640),
                    bracket(716852, Some(1259802), 42095, 1088),
                    bracket(1259803, Some(1464464), 101168, 1600),
                    bracket(1464465, Some(1753364), 133914, 1792),
                    bracket(1753365, Some(3536283), 185684, 2136),
                    bracket(3536284, Some(5573668), 566516, 2352),
                    bracket(5573669, Some(10641050), 1045709, 3000),
                    bracket(10641051, Some(14188066), 2565923, 3200),
                    bracket(14188067, Some(42564199), 3700969, 3400),
                    bracket(42564200, None, 13348854, 3500),
                ],
                subsidy: SubsidyConfig {
                    income_limit: Decimal::new(1149266, 2),
                    first_month_percent: Decimal::new(1559, 4),
                    other_month_percent: Decimal::new(1502, 4),
                    monthly_factor: Decimal::new(304, 1),
                },
            },
            imss: ImssRates {
                sickness_maternity_excess: Decimal::new(4, 3),
                disability_life: Decimal::new(625, 5),
                unemployment_old_age: Decimal::new(1125, 5),
                cash_benefits: Decimal::new(25, 4),
                pensioner_medical: Decimal::new(375, 5),
                sbc_cap_uma: Decimal::from(25),
                excess_threshold_uma: Decimal::from(3),
            },
        }
    }
}

impl Default for StatutoryTables {
    fn default() -> Self {
        Self::mx_2026()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_vacation_days_explicit_years() {
        let table = StatutoryTables::mx_2026().statute.vacation_days;
        let days: Vec<u32> = (0..=5).map(|y| table.days_for_year(y)).collect();
        assert_eq!(days, vec![0, 12, 14, 16, 18, 20]);
    }

    #[test]
    fn test_vacation_days_bands() {
        let table = StatutoryTables::mx_2026().statute.vacation_days;
        assert_eq!(table.days_for_year(6), 22);
        assert_eq!(table.days_for_year(10), 22);
        assert_eq!(table.days_for_year(11), 24);
        assert_eq!(table.days_for_year(25), 28);
        assert_eq!(table.days_for_year(46), 38);
    }

    #[test]
    fn test_vacation_days_uncapped_past_table() {
        let table = StatutoryTables::mx_2026().statute.vacation_days;
        assert_eq!(table.days_for_year(51), 40);
        assert_eq!(table.days_for_year(56), 42);
    }

    #[test]
    fn test_builtin_isr_table_is_valid() {
        assert!(StatutoryTables::mx_2026().isr.validate().is_ok());
    }

    #[test]
    fn test_isr_table_rejects_overlap() {
        let mut isr = StatutoryTables::mx_2026().isr;
        isr.brackets[1].lower_limit = dec("800.00");
        let err = isr.validate().unwrap_err();
        assert!(err.contains("overlap"));
    }

    #[test]
    fn test_isr_table_rejects_bounded_top_bracket() {
        let mut isr = StatutoryTables::mx_2026().isr;
        isr.brackets.last_mut().unwrap().upper_limit = Some(dec("999999.99"));
        assert!(isr.validate().is_err());
    }

    #[test]
    fn test_isr_table_rejects_empty() {
        let mut isr = StatutoryTables::mx_2026().isr;
        isr.brackets.clear();
        assert!(isr.validate().is_err());
    }

    #[test]
    fn test_default_economic_config() {
        let economy = EconomicConfig::default();
        assert_eq!(economy.uma, dec("117.31"));
        assert_eq!(economy.minimum_wage, dec("315.04"));
    }

    #[test]
    fn test_builtin_rates() {
        let tables = StatutoryTables::mx_2026();
        assert_eq!(tables.isr.brackets[3].rate, dec("0.16"));
        assert_eq!(tables.isr.subsidy.monthly_factor, dec("30.4"));
        assert_eq!(tables.imss.disability_life, dec("0.00625"));
        assert_eq!(tables.statute.prior_year_uma, dec("113.14"));
    }
}
