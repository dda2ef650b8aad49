//! Exemption/taxable splitting of ordinary perceptions (LISR Art. 93).
//!
//! Year-end bonus, vacation premium, and double-rate overtime are exempt up
//! to UMA-indexed ceilings. Salary, vacation, pending vacation, additional
//! perceptions, and triple-rate overtime are fully taxable.

use rust_decimal::Decimal;

use crate::config::ExemptionLimits;
use crate::models::{AdjustmentInputs, AuditStep, PerceptionBreakdown, TaxableSplit};

use super::proportional_benefits::ProportionalBenefits;
use super::rounding::round_money;

/// Splits a gross amount against an exemption ceiling.
///
/// `exempt = min(gross, ceiling)` and `taxable = gross − exempt`.
///
/// ```
/// use finiquito_engine::calculation::split_with_ceiling;
/// use rust_decimal::Decimal;
///
/// let split = split_with_ceiling(Decimal::from(5000), Decimal::from(3519));
/// assert_eq!(split.exempt, Decimal::from(3519));
/// assert_eq!(split.taxable, Decimal::from(1481));
/// ```
pub fn split_with_ceiling(gross: Decimal, ceiling: Decimal) -> TaxableSplit {
    let exempt = gross.min(ceiling);
    TaxableSplit {
        gross,
        taxable: gross - exempt,
        exempt,
    }
}

/// Splits double- and triple-rate overtime.
///
/// Half of double-rate overtime is exempt up to the UMA ceiling; triple-rate
/// overtime is always taxable.
pub fn split_overtime(
    double_rate: Decimal,
    triple_rate: Decimal,
    uma: Decimal,
    limits: &ExemptionLimits,
) -> TaxableSplit {
    let gross = double_rate + triple_rate;
    let potential = (double_rate * limits.overtime_exempt_share).max(Decimal::ZERO);
    let exempt = potential.min(limits.overtime_uma * uma);
    TaxableSplit {
        gross,
        taxable: gross - exempt,
        exempt,
    }
}

/// The result of splitting perceptions, including the audit step.
#[derive(Debug, Clone)]
pub struct PerceptionSplitResult {
    /// Perceptions with their taxable/exempt splits.
    pub perceptions: PerceptionBreakdown,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Builds the perception breakdown from proportional benefits.
///
/// # Arguments
///
/// * `benefits` - Proportional benefits already computed
/// * `pending_vacation_days` - Pending vacation days on the employee record
/// * `accrued_overtime` - Double-rate overtime on the employee record
/// * `adjustments` - Extra overtime and additional perception
/// * `uma` - The resolved UMA
/// * `limits` - Exemption ceilings
/// * `step_number` - The step number for audit trail sequencing
pub fn split_perceptions(
    benefits: &ProportionalBenefits,
    pending_vacation_days: Decimal,
    accrued_overtime: Decimal,
    adjustments: &AdjustmentInputs,
    uma: Decimal,
    limits: &ExemptionLimits,
    step_number: u32,
) -> PerceptionSplitResult {
    let bonus_ceiling = limits.year_end_bonus_uma * uma;
    let premium_ceiling = limits.vacation_premium_uma * uma;

    let double_rate = accrued_overtime + adjustments.extra_double_overtime;
    let overtime = split_overtime(double_rate, adjustments.extra_triple_overtime, uma, limits);

    let salary = TaxableSplit::fully_taxable(benefits.salary_amount);
    let year_end_bonus = split_with_ceiling(benefits.year_end_bonus_amount, bonus_ceiling);
    let vacation = TaxableSplit::fully_taxable(benefits.vacation_amount);
    let vacation_premium = split_with_ceiling(benefits.vacation_premium_amount, premium_ceiling);
    let pending_vacation = TaxableSplit::fully_taxable(benefits.pending_vacation_amount);
    let additional_perception = TaxableSplit::fully_taxable(adjustments.additional_perception);

    let total = round_money(
        salary.gross
            + year_end_bonus.gross
            + vacation.gross
            + vacation_premium.gross
            + pending_vacation.gross
            + additional_perception.gross
            + overtime.gross,
    );

    let perceptions = PerceptionBreakdown {
        salary_days: benefits.salary_days,
        salary,
        year_end_bonus_days: benefits.year_end_bonus_days,
        year_end_bonus,
        vacation_days: benefits.vacation_days,
        vacation,
        vacation_premium,
        pending_vacation_days,
        pending_vacation,
        additional_perception,
        overtime,
        total,
        days_worked_in_year: benefits.days_worked_in_year,
        days_since_last_anniversary: benefits.days_since_last_anniversary,
        days_in_year: benefits.days_in_year,
        vacation_days_per_year: benefits.vacation_days_per_year,
        unrounded_vacation_days: benefits.unrounded_vacation_days,
        unrounded_year_end_bonus_days: benefits.unrounded_year_end_bonus_days,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "exemption_split".to_string(),
        rule_name: "Exemption Split".to_string(),
        clause_ref: "LISR Art. 93 fr. I, XIV".to_string(),
        input: serde_json::json!({
            "uma": uma.to_string(),
            "year_end_bonus": year_end_bonus.gross.to_string(),
            "vacation_premium": vacation_premium.gross.to_string(),
            "double_rate_overtime": double_rate.to_string(),
            "triple_rate_overtime": adjustments.extra_triple_overtime.to_string()
        }),
        output: serde_json::json!({
            "year_end_bonus_ceiling": bonus_ceiling.to_string(),
            "year_end_bonus_exempt": year_end_bonus.exempt.to_string(),
            "vacation_premium_ceiling": premium_ceiling.to_string(),
            "vacation_premium_exempt": vacation_premium.exempt.to_string(),
            "overtime_exempt": overtime.exempt.to_string(),
            "taxable_total": perceptions.taxable_total().to_string(),
            "exempt_total": perceptions.exempt_total().to_string()
        }),
        reasoning: format!(
            "Bonus exempt up to {} UMA (${}), premium up to {} UMA (${}), overtime up to {} UMA",
            limits.year_end_bonus_uma.normalize(),
            bonus_ceiling,
            limits.vacation_premium_uma.normalize(),
            premium_ceiling,
            limits.overtime_uma.normalize()
        ),
    };

    PerceptionSplitResult {
        perceptions,
        audit_step,
    }
}
