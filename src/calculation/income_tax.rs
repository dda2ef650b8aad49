//! Income tax (ISR) withholding.
//!
//! Ordinary perceptions go through the monthly bracket table and the
//! employment subsidy (LISR Art. 96). Severance is taxed at the effective
//! rate of the employee's last ordinary monthly salary (LISR Art. 95).

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::{IsrBracket, IsrTable, StatutoryTables};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AdjustmentInputs, AuditStep, MonthlyIsr, OrdinaryWithholding, PerceptionBreakdown,
    SeveranceTax,
};

use super::rounding::{round_money, round_rate};

/// Last day of the first half-month period.
const FIRST_PERIOD_LAST_DAY: u32 = 15;

/// Days in the reference month used to annualize a daily salary.
const REFERENCE_MONTH_DAYS: i64 = 30;

/// Smallest income that counts as taxable: one cent.
const MIN_TAXABLE_INCOME: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Finds the bracket covering a monthly taxable income.
///
/// Brackets are treated as contiguous: the covering bracket is the last one
/// whose lower limit does not exceed the income.
///
/// Income below one cent has no bracket and is taxed at zero. Sub-cent
/// amounts arise from halving double-rate overtime and are not a table miss.
/// Income of one cent or more below the first lower limit means the table
/// does not cover it and is a `BracketNotFound` error.
pub fn find_bracket(income: Decimal, table: &IsrTable) -> EngineResult<Option<&IsrBracket>> {
    if income < MIN_TAXABLE_INCOME {
        return Ok(None);
    }

    table
        .brackets
        .iter()
        .rev()
        .find(|bracket| bracket.lower_limit <= income)
        .map(Some)
        .ok_or(EngineError::BracketNotFound { income })
}

/// Computes monthly ISR after the employment subsidy.
///
/// The subsidy is granted when income is at or below the subsidy ceiling.
///
/// # Examples
///
/// ```
/// use finiquito_engine::calculation::calculate_monthly_isr;
/// use finiquito_engine::config::StatutoryTables;
/// use rust_decimal::Decimal;
///
/// let tables = StatutoryTables::mx_2026();
/// let isr = calculate_monthly_isr(
///     Decimal::from(30000),
///     Decimal::new(11731, 2),
///     Decimal::new(1502, 4),
///     &tables.isr,
/// )
/// .unwrap();
/// assert_eq!(isr.subsidy, Decimal::ZERO);
/// assert!(isr.monthly_tax > Decimal::ZERO);
/// ```
pub fn calculate_monthly_isr(
    income: Decimal,
    uma: Decimal,
    subsidy_percent: Decimal,
    table: &IsrTable,
) -> EngineResult<MonthlyIsr> {
    let bracket = find_bracket(income, table)?;

    let (lower_limit, upper_limit, rate, fixed_quota) = match bracket {
        Some(b) => (b.lower_limit, b.upper_limit, b.rate, b.fixed_quota),
        None => (Decimal::ZERO, None, Decimal::ZERO, Decimal::ZERO),
    };

    let surplus = if bracket.is_some() {
        income - lower_limit
    } else {
        Decimal::ZERO
    };
    let marginal_tax = surplus * rate;
    let tax_before_subsidy = marginal_tax + fixed_quota;

    let subsidy = if income <= table.subsidy.income_limit {
        uma * subsidy_percent * table.subsidy.monthly_factor
    } else {
        Decimal::ZERO
    };
    let monthly_tax = (tax_before_subsidy - subsidy).max(Decimal::ZERO);

    Ok(MonthlyIsr {
        taxable_income: income,
        lower_limit,
        upper_limit,
        surplus,
        rate,
        marginal_tax,
        fixed_quota,
        tax_before_subsidy,
        subsidy,
        monthly_tax,
    })
}

/// The result of computing ordinary withholding, including the audit step.
#[derive(Debug, Clone)]
pub struct OrdinaryWithholdingResult {
    /// The ordinary withholding detail.
    pub withholding: OrdinaryWithholding,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes ISR withheld on ordinary perceptions for the settlement period.
///
/// Prior-period income and tax only count when the termination falls in the
/// second half of the month.
///
/// # Arguments
///
/// * `perceptions` - Perceptions with their taxable splits
/// * `termination_date` - The last day of employment
/// * `adjustments` - Prior-period income and tax
/// * `uma` - The resolved UMA
/// * `subsidy_percent` - The resolved subsidy percentage
/// * `table` - ISR brackets and subsidy
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_ordinary_withholding(
    perceptions: &PerceptionBreakdown,
    termination_date: NaiveDate,
    adjustments: &AdjustmentInputs,
    uma: Decimal,
    subsidy_percent: Decimal,
    table: &IsrTable,
    step_number: u32,
) -> EngineResult<OrdinaryWithholdingResult> {
    let second_half = termination_date.day() > FIRST_PERIOD_LAST_DAY;
    let (prior_income, prior_tax) = if second_half {
        (adjustments.prior_period_income, adjustments.prior_period_tax)
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let period_taxable_income = perceptions.taxable_total();
    let monthly = calculate_monthly_isr(
        period_taxable_income + prior_income,
        uma,
        subsidy_percent,
        table,
    )?;
    let withholding = round_money((monthly.monthly_tax - prior_tax).max(Decimal::ZERO));

    let audit_step = AuditStep {
        step_number,
        rule_id: "isr_ordinary".to_string(),
        rule_name: "ISR Ordinary Withholding".to_string(),
        clause_ref: "LISR Art. 96".to_string(),
        input: serde_json::json!({
            "period_taxable_income": period_taxable_income.to_string(),
            "prior_period_income": prior_income.to_string(),
            "prior_period_tax": prior_tax.to_string(),
            "second_half_of_month": second_half,
            "uma": uma.to_string(),
            "subsidy_percent": subsidy_percent.to_string()
        }),
        output: serde_json::json!({
            "lower_limit": monthly.lower_limit.to_string(),
            "rate": monthly.rate.to_string(),
            "fixed_quota": monthly.fixed_quota.to_string(),
            "tax_before_subsidy": monthly.tax_before_subsidy.to_string(),
            "subsidy": monthly.subsidy.to_string(),
            "monthly_tax": monthly.monthly_tax.to_string(),
            "withholding": withholding.to_string()
        }),
        reasoning: format!(
            "ISR on ${} = ${} - subsidy ${} = ${}; less prior ${} = ${}",
            monthly.taxable_income,
            round_money(monthly.tax_before_subsidy),
            round_money(monthly.subsidy),
            round_money(monthly.monthly_tax),
            prior_tax,
            withholding
        ),
    };

    Ok(OrdinaryWithholdingResult {
        withholding: OrdinaryWithholding {
            period_taxable_income,
            year_end_bonus_taxable: perceptions.year_end_bonus.taxable,
            vacation_premium_taxable: perceptions.vacation_premium.taxable,
            pending_vacation_taxable: perceptions.pending_vacation.taxable,
            overtime_taxable: perceptions.overtime.taxable,
            prior_period_taxable_income: prior_income,
            prior_period_tax: prior_tax,
            monthly,
            withholding,
        },
        audit_step,
    })
}

/// The result of computing severance withholding, including the audit step.
#[derive(Debug, Clone)]
pub struct SeveranceTaxResult {
    /// The severance tax detail.
    pub tax: SeveranceTax,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes ISR withheld on severance at the last-salary effective rate.
///
/// # Arguments
///
/// * `severance_total` - Sum of the severance components
/// * `seniority_years` - Completed years of service
/// * `daily_salary` - The employee's daily salary
/// * `uma` - The resolved UMA
/// * `subsidy_percent` - The resolved subsidy percentage
/// * `tables` - Statute tables
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_severance_withholding(
    severance_total: Decimal,
    seniority_years: u32,
    daily_salary: Decimal,
    uma: Decimal,
    subsidy_percent: Decimal,
    tables: &StatutoryTables,
    step_number: u32,
) -> EngineResult<SeveranceTaxResult> {
    let exempt = tables.statute.exemptions.severance_uma_per_year
        * uma
        * Decimal::from(seniority_years);
    let taxable = (severance_total - exempt).max(Decimal::ZERO);

    let reference_income = daily_salary * Decimal::from(REFERENCE_MONTH_DAYS);
    let reference = calculate_monthly_isr(reference_income, uma, subsidy_percent, &tables.isr)?;
    let effective_rate = if reference_income.is_zero() {
        Decimal::ZERO
    } else {
        round_rate(reference.monthly_tax / reference_income)
    };
    let withholding = round_money(taxable * effective_rate);

    let audit_step = AuditStep {
        step_number,
        rule_id: "isr_severance".to_string(),
        rule_name: "ISR Severance Withholding".to_string(),
        clause_ref: "LISR Art. 95".to_string(),
        input: serde_json::json!({
            "severance_total": severance_total.to_string(),
            "seniority_years": seniority_years,
            "daily_salary": daily_salary.to_string(),
            "uma": uma.to_string()
        }),
        output: serde_json::json!({
            "exempt": exempt.to_string(),
            "taxable": taxable.to_string(),
            "reference_income": reference_income.to_string(),
            "reference_tax": reference.monthly_tax.to_string(),
            "effective_rate": effective_rate.to_string(),
            "withholding": withholding.to_string()
        }),
        reasoning: format!(
            "(${} - ${} exempt) x {} effective rate = ${}",
            severance_total, exempt, effective_rate, withholding
        ),
    };

    Ok(SeveranceTaxResult {
        tax: SeveranceTax {
            total_income: severance_total,
            exempt,
            taxable,
            last_monthly_ordinary_income: reference_income,
            reference,
            effective_rate,
            withholding,
        },
        audit_step,
    })
}
