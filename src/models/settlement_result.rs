//! Settlement result models.
//!
//! This module contains the [`SettlementResult`] type and the itemized
//! breakdowns it is assembled from. Every intermediate figure is part of the
//! contracted output so that a statement can be rendered and audited without
//! recomputation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CalculationType, EmployeeRecord};

/// A gross amount split into its taxable and exempt parts.
///
/// Invariant: `taxable + exempt == gross`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxableSplit {
    /// The gross amount paid.
    pub gross: Decimal,
    /// The part subject to ISR.
    pub taxable: Decimal,
    /// The part exempt from ISR.
    pub exempt: Decimal,
}

impl TaxableSplit {
    /// A perception with no statutory exemption.
    pub fn fully_taxable(gross: Decimal) -> Self {
        Self {
            gross,
            taxable: gross,
            exempt: Decimal::ZERO,
        }
    }
}

/// Ordinary perceptions of a settlement with their tax splits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerceptionBreakdown {
    /// Salary days paid for the current half-month period.
    pub salary_days: Decimal,
    /// Salary continuation.
    pub salary: TaxableSplit,
    /// Proportional year-end bonus days, rounded to 2 places.
    pub year_end_bonus_days: Decimal,
    /// Year-end bonus (aguinaldo).
    pub year_end_bonus: TaxableSplit,
    /// Proportional vacation days, rounded to 2 places.
    pub vacation_days: Decimal,
    /// Proportional vacation pay.
    pub vacation: TaxableSplit,
    /// Vacation premium (prima vacacional).
    pub vacation_premium: TaxableSplit,
    /// Pending vacation days from prior years.
    pub pending_vacation_days: Decimal,
    /// Pending vacation pay.
    pub pending_vacation: TaxableSplit,
    /// Additional perception supplied by the caller.
    pub additional_perception: TaxableSplit,
    /// Double and triple rate overtime.
    pub overtime: TaxableSplit,
    /// Sum of all gross perceptions, rounded to 2 places.
    pub total: Decimal,
    /// Days worked in the termination calendar year, inclusive.
    pub days_worked_in_year: i64,
    /// Days since the last hire anniversary, inclusive.
    pub days_since_last_anniversary: i64,
    /// Length of the termination year (365 or 366).
    pub days_in_year: i64,
    /// Vacation entitlement for the running seniority year.
    pub vacation_days_per_year: u32,
    /// Proportional vacation days before rounding.
    pub unrounded_vacation_days: Decimal,
    /// Proportional year-end bonus days before rounding.
    pub unrounded_year_end_bonus_days: Decimal,
}

impl PerceptionBreakdown {
    /// Sum of the taxable parts of every category.
    pub fn taxable_total(&self) -> Decimal {
        self.categories().iter().map(|split| split.taxable).sum()
    }

    /// Sum of the exempt parts of every category.
    pub fn exempt_total(&self) -> Decimal {
        self.categories().iter().map(|split| split.exempt).sum()
    }

    fn categories(&self) -> [TaxableSplit; 7] {
        [
            self.salary,
            self.year_end_bonus,
            self.vacation,
            self.vacation_premium,
            self.pending_vacation,
            self.additional_perception,
            self.overtime,
        ]
    }
}

/// How the final amount of a severance component was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentSource {
    /// Toggle off and no override: zero.
    Disabled,
    /// Toggle on and no override: the computed amount.
    Computed,
    /// An explicit override replaced the computed amount.
    Overridden,
}

/// One severance component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveranceComponent {
    /// Amount after applying the toggle, before any override.
    pub calculated: Decimal,
    /// Final amount paid.
    pub amount: Decimal,
    /// How `amount` was decided.
    pub source: ComponentSource,
}

/// Severance indemnity of a liquidación.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveranceBreakdown {
    /// 90 days of integrated wage.
    pub indemnity_90_days: SeveranceComponent,
    /// 20 days of integrated wage per year of service.
    pub twenty_days_per_year: SeveranceComponent,
    /// 12 days of capped wage per year of service.
    pub seniority_premium: SeveranceComponent,
    /// Seniority premium accrued in the termination year.
    pub proportional_seniority_premium: SeveranceComponent,
    /// Wage base for the seniority premium: min(SDI, 2 × minimum wage).
    pub seniority_premium_wage_base: Decimal,
    /// Extra double-rate overtime supplied with the calculation.
    pub extra_double_overtime: Decimal,
    /// Extra triple-rate overtime supplied with the calculation.
    pub extra_triple_overtime: Decimal,
    /// Sum of the four final component amounts.
    pub total: Decimal,
}

/// Bracket lookup and subsidy for one monthly income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyIsr {
    /// Monthly taxable income looked up.
    pub taxable_income: Decimal,
    /// Lower limit of the bracket found (zero if income ≤ 0).
    pub lower_limit: Decimal,
    /// Upper limit of the bracket found; `None` for the top bracket.
    pub upper_limit: Option<Decimal>,
    /// Income over the lower limit.
    pub surplus: Decimal,
    /// Marginal rate of the bracket.
    pub rate: Decimal,
    /// Surplus × rate.
    pub marginal_tax: Decimal,
    /// Fixed quota of the bracket.
    pub fixed_quota: Decimal,
    /// Marginal tax + fixed quota.
    pub tax_before_subsidy: Decimal,
    /// Employment subsidy granted.
    pub subsidy: Decimal,
    /// max(0, tax before subsidy − subsidy).
    pub monthly_tax: Decimal,
}

/// ISR on ordinary perceptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdinaryWithholding {
    /// Taxable perceptions of the current half-month period.
    pub period_taxable_income: Decimal,
    /// Taxable part of the year-end bonus.
    pub year_end_bonus_taxable: Decimal,
    /// Taxable part of the vacation premium.
    pub vacation_premium_taxable: Decimal,
    /// Taxable part of pending vacation.
    pub pending_vacation_taxable: Decimal,
    /// Taxable part of overtime.
    pub overtime_taxable: Decimal,
    /// Prior-period income counted (zero on or before day 15).
    pub prior_period_taxable_income: Decimal,
    /// Prior-period ISR credited (zero on or before day 15).
    pub prior_period_tax: Decimal,
    /// Monthly bracket computation.
    pub monthly: MonthlyIsr,
    /// max(0, monthly tax − prior-period tax), rounded to 2 places.
    pub withholding: Decimal,
}

/// ISR on severance income at the last-month effective rate (LISR Art. 95).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveranceTax {
    /// Severance total subject to the calculation.
    pub total_income: Decimal,
    /// 90 UMA per seniority year.
    pub exempt: Decimal,
    /// max(0, total − exempt).
    pub taxable: Decimal,
    /// Daily salary × 30.
    pub last_monthly_ordinary_income: Decimal,
    /// Bracket computation on the reference monthly income.
    pub reference: MonthlyIsr,
    /// Reference tax / reference income, rounded to 4 places.
    pub effective_rate: Decimal,
    /// Taxable × effective rate, rounded to 2 places.
    pub withholding: Decimal,
}

/// Full ISR audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxWithholding {
    /// Ordinary withholding.
    pub ordinary: OrdinaryWithholding,
    /// Severance withholding; absent for a finiquito.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severance: Option<SeveranceTax>,
    /// Ordinary plus severance withholding.
    pub total: Decimal,
}

/// Employee IMSS contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialSecurityContribution {
    /// Contribution-base wage: min(SDI, 25 UMA).
    pub sbc: Decimal,
    /// Salary days the contribution covers.
    pub salary_days: Decimal,
    /// UMA used.
    pub uma: Decimal,
    /// max(0, SBC − 3 UMA).
    pub excess_sbc: Decimal,
    /// Sickness and maternity on the excess.
    pub sickness_maternity: Decimal,
    /// Disability and life.
    pub disability_life: Decimal,
    /// Unemployment at advanced age and old age.
    pub unemployment_old_age: Decimal,
    /// Cash benefits.
    pub cash_benefits: Decimal,
    /// Pensioner medical expenses.
    pub pensioner_medical: Decimal,
    /// Sum of the five branches, rounded to 2 places.
    pub total: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statute article for this rule.
    pub clause_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag results the caller should investigate; they never change
/// the computed figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The audit trace of one settlement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete settlement of one employee.
///
/// Invariant: `net_total == gross_total − deductions_total`, where
/// `gross_total` is ordinary perceptions plus severance and
/// `deductions_total` is ordinary ISR plus severance ISR plus IMSS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResult {
    /// The employee settled.
    pub employee: EmployeeRecord,
    /// Finiquito or liquidación.
    pub calculation_type: CalculationType,
    /// Ordinary perceptions.
    pub perceptions: PerceptionBreakdown,
    /// Severance indemnity; absent for a finiquito.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severance: Option<SeveranceBreakdown>,
    /// ISR withheld.
    pub tax: TaxWithholding,
    /// IMSS withheld.
    pub social_security: SocialSecurityContribution,
    /// Integrated daily wage (SDI).
    pub integrated_daily_wage: Decimal,
    /// Daily share of the year-end bonus included in SDI.
    pub daily_year_end_bonus: Decimal,
    /// Daily share of the vacation premium included in SDI.
    pub daily_vacation_premium: Decimal,
    /// Completed years of service.
    pub seniority_years: u32,
    /// UMA actually applied after the January substitution rule.
    pub resolved_uma: Decimal,
    /// Perceptions total plus severance total.
    pub gross_total: Decimal,
    /// ISR plus IMSS.
    pub deductions_total: Decimal,
    /// Gross total minus deductions; may be negative.
    pub net_total: Decimal,
    /// Audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn split(gross: &str, taxable: &str, exempt: &str) -> TaxableSplit {
        TaxableSplit {
            gross: dec(gross),
            taxable: dec(taxable),
            exempt: dec(exempt),
        }
    }

    fn create_sample_breakdown() -> PerceptionBreakdown {
        PerceptionBreakdown {
            salary_days: dec("5"),
            salary: TaxableSplit::fully_taxable(dec("2500.00")),
            year_end_bonus_days: dec("7.05"),
            year_end_bonus: split("3525.00", "0.00", "3525.00"),
            vacation_days: dec("7.95"),
            vacation: TaxableSplit::fully_taxable(dec("3975.00")),
            vacation_premium: split("993.75", "0.00", "993.75"),
            pending_vacation_days: Decimal::ZERO,
            pending_vacation: TaxableSplit::default(),
            additional_perception: TaxableSplit::default(),
            overtime: split("1000.00", "500.00", "500.00"),
            total: dec("11993.75"),
            days_worked_in_year: 172,
            days_since_last_anniversary: 158,
            days_in_year: 366,
            vacation_days_per_year: 20,
            unrounded_vacation_days: dec("8.633879781"),
            unrounded_year_end_bonus_days: dec("7.049180327"),
        }
    }

    #[test]
    fn test_fully_taxable_has_no_exemption() {
        let split = TaxableSplit::fully_taxable(dec("1234.56"));
        assert_eq!(split.taxable, dec("1234.56"));
        assert_eq!(split.exempt, Decimal::ZERO);
    }

    #[test]
    fn test_taxable_and_exempt_totals() {
        let breakdown = create_sample_breakdown();
        assert_eq!(breakdown.taxable_total(), dec("6975.00"));
        assert_eq!(breakdown.exempt_total(), dec("5018.75"));
        assert_eq!(
            breakdown.taxable_total() + breakdown.exempt_total(),
            breakdown.total
        );
    }

    #[test]
    fn test_component_source_serialization() {
        assert_eq!(
            serde_json::to_string(&ComponentSource::Overridden).unwrap(),
            "\"overridden\""
        );
        let source: ComponentSource = serde_json::from_str("\"disabled\"").unwrap();
        assert_eq!(source, ComponentSource::Disabled);
    }

    #[test]
    fn test_absent_severance_tax_is_omitted_from_json() {
        let monthly = MonthlyIsr {
            taxable_income: Decimal::ZERO,
            lower_limit: Decimal::ZERO,
            upper_limit: None,
            surplus: Decimal::ZERO,
            rate: Decimal::ZERO,
            marginal_tax: Decimal::ZERO,
            fixed_quota: Decimal::ZERO,
            tax_before_subsidy: Decimal::ZERO,
            subsidy: Decimal::ZERO,
            monthly_tax: Decimal::ZERO,
        };
        let withholding = TaxWithholding {
            ordinary: OrdinaryWithholding {
                period_taxable_income: Decimal::ZERO,
                year_end_bonus_taxable: Decimal::ZERO,
                vacation_premium_taxable: Decimal::ZERO,
                pending_vacation_taxable: Decimal::ZERO,
                overtime_taxable: Decimal::ZERO,
                prior_period_taxable_income: Decimal::ZERO,
                prior_period_tax: Decimal::ZERO,
                monthly,
                withholding: Decimal::ZERO,
            },
            severance: None,
            total: Decimal::ZERO,
        };

        let json = serde_json::to_value(&withholding).unwrap();
        assert!(json.get("severance").is_none());
        assert!(json.get("ordinary").is_some());
    }
}
