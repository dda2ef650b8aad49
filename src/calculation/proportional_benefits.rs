//! Proportional benefit calculation.
//!
//! Computes the salary owed for the running half-month period, proportional
//! vacation and year-end bonus days, and their peso amounts (LFT Arts. 76,
//! 80 and 87). Every amount is rounded to 2 places where it is computed.

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::config::StatuteConfig;
use crate::error::EngineResult;
use crate::models::{AuditStep, EmployeeRecord};

use super::calendar::{
    days_between, days_in_year, days_worked_in_year, default_salary_days, last_anniversary,
};
use super::rounding::round_money;

/// Clause reference for the proportional benefits.
pub const PROPORTIONAL_BENEFITS_CLAUSE: &str = "LFT Arts. 76, 80, 87";

/// Proportional entitlements of a terminated employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProportionalBenefits {
    /// Salary days paid; the override if one was supplied.
    pub salary_days: Decimal,
    /// Salary days × daily salary.
    pub salary_amount: Decimal,
    /// Vacation entitlement for seniority + 1.
    pub vacation_days_per_year: u32,
    /// 365 or 366.
    pub days_in_year: i64,
    /// Inclusive days since the last anniversary.
    pub days_since_last_anniversary: i64,
    /// Inclusive days worked in the termination year.
    pub days_worked_in_year: i64,
    /// Proportional vacation days before rounding.
    pub unrounded_vacation_days: Decimal,
    /// Proportional vacation days.
    pub vacation_days: Decimal,
    /// Vacation days × daily salary.
    pub vacation_amount: Decimal,
    /// Vacation amount × premium rate.
    pub vacation_premium_amount: Decimal,
    /// Proportional year-end bonus days before rounding.
    pub unrounded_year_end_bonus_days: Decimal,
    /// Proportional year-end bonus days.
    pub year_end_bonus_days: Decimal,
    /// Year-end bonus days × daily salary.
    pub year_end_bonus_amount: Decimal,
    /// Pending vacation days × daily salary.
    pub pending_vacation_amount: Decimal,
}

/// The result of computing proportional benefits, including the audit step.
#[derive(Debug, Clone)]
pub struct ProportionalBenefitsResult {
    /// The computed benefits.
    pub benefits: ProportionalBenefits,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes proportional benefits for an employee.
///
/// # Arguments
///
/// * `employee` - The terminated employee
/// * `seniority_years` - Completed years of service
/// * `salary_days_override` - Replaces the half-month default when `Some`
/// * `statute` - Labor-law parameters
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_proportional_benefits(
    employee: &EmployeeRecord,
    seniority_years: u32,
    salary_days_override: Option<Decimal>,
    statute: &StatuteConfig,
    step_number: u32,
) -> EngineResult<ProportionalBenefitsResult> {
    let hire = employee.hire_date;
    let termination = employee.termination_date;
    let daily_salary = employee.daily_salary;

    let computed_salary_days = Decimal::from(default_salary_days(termination));
    let salary_days = salary_days_override.unwrap_or(computed_salary_days);
    let salary_amount = round_money(daily_salary * salary_days);

    let vacation_days_per_year = statute.vacation_days.days_for_year(seniority_years + 1);
    let year_length = days_in_year(termination.year());
    let anniversary = last_anniversary(hire, termination)?;
    let since_anniversary = days_between(anniversary, termination);
    let worked_in_year = days_worked_in_year(hire, termination);

    let year_length_dec = Decimal::from(year_length);
    let unrounded_vacation_days = Decimal::from(vacation_days_per_year) / year_length_dec
        * Decimal::from(since_anniversary);
    let vacation_days = round_money(unrounded_vacation_days);
    let vacation_amount = round_money(vacation_days * daily_salary);
    let vacation_premium_amount = round_money(vacation_amount * statute.vacation_premium_rate);

    let unrounded_year_end_bonus_days =
        statute.year_end_bonus_days / year_length_dec * Decimal::from(worked_in_year);
    let year_end_bonus_days = round_money(unrounded_year_end_bonus_days);
    let year_end_bonus_amount = round_money(year_end_bonus_days * daily_salary);

    let pending_vacation_amount = round_money(employee.pending_vacation_days * daily_salary);

    let benefits = ProportionalBenefits {
        salary_days,
        salary_amount,
        vacation_days_per_year,
        days_in_year: year_length,
        days_since_last_anniversary: since_anniversary,
        days_worked_in_year: worked_in_year,
        unrounded_vacation_days,
        vacation_days,
        vacation_amount,
        vacation_premium_amount,
        unrounded_year_end_bonus_days,
        year_end_bonus_days,
        year_end_bonus_amount,
        pending_vacation_amount,
    };

    let salary_source = if salary_days_override.is_some() {
        "override"
    } else {
        "half_month_default"
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "proportional_benefits".to_string(),
        rule_name: "Proportional Benefits".to_string(),
        clause_ref: PROPORTIONAL_BENEFITS_CLAUSE.to_string(),
        input: serde_json::json!({
            "hire_date": hire.to_string(),
            "termination_date": termination.to_string(),
            "daily_salary": daily_salary.to_string(),
            "seniority_years": seniority_years,
            "salary_days_override": salary_days_override.map(|d| d.to_string())
        }),
        output: serde_json::json!({
            "salary_days": salary_days.to_string(),
            "salary_days_source": salary_source,
            "salary_amount": salary_amount.to_string(),
            "vacation_days_per_year": vacation_days_per_year,
            "days_in_year": year_length,
            "last_anniversary": anniversary.to_string(),
            "days_since_last_anniversary": since_anniversary,
            "days_worked_in_year": worked_in_year,
            "vacation_days": vacation_days.to_string(),
            "vacation_amount": vacation_amount.to_string(),
            "vacation_premium_amount": vacation_premium_amount.to_string(),
            "year_end_bonus_days": year_end_bonus_days.to_string(),
            "year_end_bonus_amount": year_end_bonus_amount.to_string(),
            "pending_vacation_amount": pending_vacation_amount.to_string()
        }),
        reasoning: format!(
            "Vacation {}/{} x {} days = {} days; year-end bonus {}/{} x {} days = {} days",
            vacation_days_per_year,
            year_length,
            since_anniversary,
            vacation_days,
            statute.year_end_bonus_days.normalize(),
            year_length,
            worked_in_year,
            year_end_bonus_days
        ),
    };

    Ok(ProportionalBenefitsResult {
        benefits,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatutoryTables;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_employee(hire: (i32, u32, u32), termination: (i32, u32, u32)) -> EmployeeRecord {
        EmployeeRecord {
            id: "1001".to_string(),
            full_name: "ANA LOPEZ".to_string(),
            tax_id: "LOAA900101XXX".to_string(),
            position: "CAJERA".to_string(),
            location: "MONTERREY".to_string(),
            hire_date: NaiveDate::from_ymd_opt(hire.0, hire.1, hire.2).unwrap(),
            termination_date: NaiveDate::from_ymd_opt(termination.0, termination.1, termination.2)
                .unwrap(),
            daily_salary: dec("500"),
            pending_vacation_days: Decimal::ZERO,
            accrued_overtime: Decimal::ZERO,
        }
    }

    fn statute() -> StatuteConfig {
        StatutoryTables::mx_2026().statute
    }

    /// PB-001: leap-year termination after the 15th
    #[test]
    fn test_leap_year_termination_after_fifteenth() {
        let employee = create_test_employee((2020, 1, 15), (2024, 6, 20));
        let result = calculate_proportional_benefits(&employee, 4, None, &statute(), 1).unwrap();
        let b = result.benefits;

        assert_eq!(b.salary_days, dec("5"));
        assert_eq!(b.salary_amount, dec("2500.00"));
        assert_eq!(b.days_in_year, 366);
        assert_eq!(b.vacation_days_per_year, 20);
        // 2024-01-15..=2024-06-20
        assert_eq!(b.days_since_last_anniversary, 158);
        assert_eq!(b.days_worked_in_year, 172);
        // 20 / 366 * 158 = 8.6338...
        assert_eq!(b.vacation_days, dec("8.63"));
        assert_eq!(b.vacation_amount, dec("4315.00"));
        assert_eq!(b.vacation_premium_amount, dec("1078.75"));
        // 15 / 366 * 172 = 7.0491...
        assert_eq!(b.year_end_bonus_days, dec("7.05"));
        assert_eq!(b.year_end_bonus_amount, dec("3525.00"));
    }

    /// PB-002: salary days override replaces the default
    #[test]
    fn test_salary_days_override_replaces_default() {
        let employee = create_test_employee((2020, 1, 15), (2024, 6, 20));
        let result =
            calculate_proportional_benefits(&employee, 4, Some(dec("12")), &statute(), 1).unwrap();

        assert_eq!(result.benefits.salary_days, dec("12"));
        assert_eq!(result.benefits.salary_amount, dec("6000.00"));
        assert_eq!(
            result.audit_step.output["salary_days_source"].as_str().unwrap(),
            "override"
        );
    }

    #[test]
    fn test_salary_and_pending_vacation_rounded_to_cents() {
        let mut employee = create_test_employee((2020, 1, 15), (2024, 6, 20));
        employee.daily_salary = dec("333.333");
        employee.pending_vacation_days = dec("2.5");
        let result = calculate_proportional_benefits(&employee, 4, None, &statute(), 1).unwrap();

        // 5 x 333.333 = 1666.665
        assert_eq!(result.benefits.salary_amount, dec("1666.67"));
        // 2.5 x 333.333 = 833.3325
        assert_eq!(result.benefits.pending_vacation_amount, dec("833.33"));
    }

    /// PB-003: zero override is honoured, not treated as absent
    #[test]
    fn test_zero_override_pays_no_salary() {
        let employee = create_test_employee((2020, 1, 15), (2024, 6, 20));
        let result =
            calculate_proportional_benefits(&employee, 4, Some(Decimal::ZERO), &statute(), 1)
                .unwrap();

        assert_eq!(result.benefits.salary_amount, Decimal::ZERO);
    }

    /// PB-004: first-year employee uses 12 vacation days and the hire date as start
    #[test]
    fn test_first_year_employee() {
        let employee = create_test_employee((2025, 3, 1), (2025, 3, 10));
        let result = calculate_proportional_benefits(&employee, 0, None, &statute(), 1).unwrap();
        let b = result.benefits;

        assert_eq!(b.vacation_days_per_year, 12);
        assert_eq!(b.days_in_year, 365);
        assert_eq!(b.days_since_last_anniversary, 10);
        assert_eq!(b.days_worked_in_year, 10);
        assert_eq!(b.salary_days, dec("10"));
        // 12 / 365 * 10 = 0.3287...
        assert_eq!(b.vacation_days, dec("0.33"));
        // 15 / 365 * 10 = 0.4109...
        assert_eq!(b.year_end_bonus_days, dec("0.41"));
        assert_eq!(b.year_end_bonus_amount, dec("205.00"));
    }

    #[test]
    fn test_pending_vacation_amount() {
        let mut employee = create_test_employee((2020, 1, 15), (2024, 6, 20));
        employee.pending_vacation_days = dec("3");
        let result = calculate_proportional_benefits(&employee, 4, None, &statute(), 1).unwrap();

        assert_eq!(result.benefits.pending_vacation_amount, dec("1500.00"));
    }

    #[test]
    fn test_audit_step_fields() {
        let employee = create_test_employee((2020, 1, 15), (2024, 6, 20));
        let result = calculate_proportional_benefits(&employee, 4, None, &statute(), 2).unwrap();

        assert_eq!(result.audit_step.step_number, 2);
        assert_eq!(result.audit_step.rule_id, "proportional_benefits");
        assert_eq!(
            result.audit_step.output["last_anniversary"].as_str().unwrap(),
            "2024-01-15"
        );
        assert!(result.audit_step.reasoning.contains("20/366"));
    }
}
