//! Integrated daily wage (SDI) calculation.
//!
//! SDI is the daily salary plus the daily share of the annual year-end bonus
//! and vacation premium entitlements (LSS Art. 27).

use rust_decimal::Decimal;

use crate::config::StatuteConfig;
use crate::models::AuditStep;

use super::rounding::round_money;

/// Integrated daily wage and its components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegratedWage {
    /// Daily salary × bonus days / 365.
    pub daily_year_end_bonus: Decimal,
    /// Daily salary × vacation days × premium rate / 365.
    pub daily_vacation_premium: Decimal,
    /// Sum of salary and both daily shares, rounded to 2 places.
    pub sdi: Decimal,
}

/// The result of computing SDI, including the audit step.
#[derive(Debug, Clone)]
pub struct IntegratedWageResult {
    /// The computed wage.
    pub wage: IntegratedWage,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the integrated daily wage.
///
/// # Examples
///
/// ```
/// use finiquito_engine::calculation::calculate_integrated_daily_wage;
/// use finiquito_engine::config::StatutoryTables;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let statute = StatutoryTables::mx_2026().statute;
/// let result = calculate_integrated_daily_wage(Decimal::from(500), 20, &statute, 1);
/// assert_eq!(result.wage.sdi, Decimal::from_str("527.40").unwrap());
/// ```
pub fn calculate_integrated_daily_wage(
    daily_salary: Decimal,
    vacation_days_per_year: u32,
    statute: &StatuteConfig,
    step_number: u32,
) -> IntegratedWageResult {
    let days_per_year = Decimal::from(365);
    let daily_year_end_bonus = daily_salary * statute.year_end_bonus_days / days_per_year;
    let daily_vacation_premium = daily_salary
        * Decimal::from(vacation_days_per_year)
        * statute.vacation_premium_rate
        / days_per_year;
    let sdi = round_money(daily_salary + daily_year_end_bonus + daily_vacation_premium);

    let audit_step = AuditStep {
        step_number,
        rule_id: "integrated_daily_wage".to_string(),
        rule_name: "Integrated Daily Wage".to_string(),
        clause_ref: "LSS Art. 27".to_string(),
        input: serde_json::json!({
            "daily_salary": daily_salary.to_string(),
            "vacation_days_per_year": vacation_days_per_year
        }),
        output: serde_json::json!({
            "daily_year_end_bonus": daily_year_end_bonus.to_string(),
            "daily_vacation_premium": daily_vacation_premium.to_string(),
            "sdi": sdi.to_string()
        }),
        reasoning: format!(
            "${} + ${} + ${} = ${}",
            daily_salary,
            round_money(daily_year_end_bonus),
            round_money(daily_vacation_premium),
            sdi
        ),
    };

    IntegratedWageResult {
        wage: IntegratedWage {
            daily_year_end_bonus,
            daily_vacation_premium,
            sdi,
        },
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatutoryTables;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_sdi_for_fifth_year_employee() {
        let statute = StatutoryTables::mx_2026().statute;
        let result = calculate_integrated_daily_wage(dec("500"), 20, &statute, 1);

        // 500 + 20.5479 + 6.8493 = 527.3972
        assert_eq!(result.wage.sdi, dec("527.40"));
        assert_eq!(round_money(result.wage.daily_year_end_bonus), dec("20.55"));
        assert_eq!(round_money(result.wage.daily_vacation_premium), dec("6.85"));
    }

    #[test]
    fn test_sdi_for_first_year_employee() {
        let statute = StatutoryTables::mx_2026().statute;
        let result = calculate_integrated_daily_wage(dec("315.04"), 12, &statute, 1);

        // 315.04 + 12.9468 + 2.5894 = 330.5762
        assert_eq!(result.wage.sdi, dec("330.58"));
    }

    #[test]
    fn test_audit_step() {
        let statute = StatutoryTables::mx_2026().statute;
        let result = calculate_integrated_daily_wage(dec("500"), 20, &statute, 4);

        assert_eq!(result.audit_step.step_number, 4);
        assert_eq!(result.audit_step.rule_id, "integrated_daily_wage");
        assert_eq!(result.audit_step.output["sdi"].as_str().unwrap(), "527.40");
    }
}
