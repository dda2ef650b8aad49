//! Employee IMSS contribution withheld from the settlement.

use rust_decimal::Decimal;

use crate::config::ImssRates;
use crate::models::{AuditStep, SocialSecurityContribution};

use super::rounding::round_money;

/// The result of computing the IMSS contribution, including the audit step.
#[derive(Debug, Clone)]
pub struct SocialSecurityResult {
    /// The contribution by branch.
    pub contribution: SocialSecurityContribution,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the employee share of IMSS for the salary days being paid.
///
/// The contribution base is the SDI capped at 25 UMA. Sickness and
/// maternity applies only to the part of the base above 3 UMA; the other
/// four branches apply to the whole base.
///
/// # Examples
///
/// ```
/// use finiquito_engine::calculation::calculate_social_security;
/// use finiquito_engine::config::StatutoryTables;
/// use rust_decimal::Decimal;
///
/// let tables = StatutoryTables::mx_2026();
/// let result = calculate_social_security(
///     Decimal::new(52740, 2),
///     Decimal::from(5),
///     Decimal::new(11731, 2),
///     &tables.imss,
///     1,
/// );
/// assert_eq!(result.contribution.total, Decimal::new(6614, 2));
/// ```
pub fn calculate_social_security(
    sdi: Decimal,
    salary_days: Decimal,
    uma: Decimal,
    rates: &ImssRates,
    step_number: u32,
) -> SocialSecurityResult {
    let sbc = sdi.min(rates.sbc_cap_uma * uma);
    let excess_sbc = (sbc - rates.excess_threshold_uma * uma).max(Decimal::ZERO);

    let sickness_maternity = excess_sbc * rates.sickness_maternity_excess * salary_days;
    let disability_life = sbc * rates.disability_life * salary_days;
    let unemployment_old_age = sbc * rates.unemployment_old_age * salary_days;
    let cash_benefits = sbc * rates.cash_benefits * salary_days;
    let pensioner_medical = sbc * rates.pensioner_medical * salary_days;

    let total = round_money(
        sickness_maternity + disability_life + unemployment_old_age + cash_benefits
            + pensioner_medical,
    );

    let audit_step = AuditStep {
        step_number,
        rule_id: "imss_employee_share".to_string(),
        rule_name: "IMSS Employee Contribution".to_string(),
        clause_ref: "LSS Arts. 25, 106, 107, 147, 168".to_string(),
        input: serde_json::json!({
            "sdi": sdi.to_string(),
            "salary_days": salary_days.to_string(),
            "uma": uma.to_string()
        }),
        output: serde_json::json!({
            "sbc": sbc.to_string(),
            "excess_sbc": excess_sbc.to_string(),
            "sickness_maternity": sickness_maternity.to_string(),
            "disability_life": disability_life.to_string(),
            "unemployment_old_age": unemployment_old_age.to_string(),
            "cash_benefits": cash_benefits.to_string(),
            "pensioner_medical": pensioner_medical.to_string(),
            "total": total.to_string()
        }),
        reasoning: format!(
            "SBC ${} (excess ${}) over {} days = ${}",
            sbc, excess_sbc, salary_days, total
        ),
    };

    SocialSecurityResult {
        contribution: SocialSecurityContribution {
            sbc,
            salary_days,
            uma,
            excess_sbc,
            sickness_maternity,
            disability_life,
            unemployment_old_age,
            cash_benefits,
            pensioner_medical,
            total,
        },
        audit_step,
    }
}
