//! Settlement orchestration.
//!
//! [`SettlementEngine`] runs every calculator in order, threads the audit
//! step numbers through, and aggregates perceptions, severance, and
//! deductions into a [`SettlementResult`].

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::{EconomicConfig, StatutoryTables};
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, CalculationType, EmployeeRecord, SettlementOptions,
    SettlementResult, TaxWithholding, check_input_range,
};

use super::calendar::seniority_years;
use super::exemptions::split_perceptions;
use super::income_tax::{calculate_ordinary_withholding, calculate_severance_withholding};
use super::integrated_wage::calculate_integrated_daily_wage;
use super::proportional_benefits::calculate_proportional_benefits;
use super::severance::{SeveranceInputs, calculate_severance};
use super::social_security::calculate_social_security;
use super::uma::resolve_uma;

/// Computes settlements against a fixed set of statute tables.
///
/// The engine holds no mutable state; one instance can be shared across
/// threads and called any number of times.
///
/// # Example
///
/// ```
/// use finiquito_engine::calculation::SettlementEngine;
/// use finiquito_engine::config::EconomicConfig;
/// use finiquito_engine::models::{
///     CalculationType, EmployeeRecord, SettlementOptions,
/// };
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = EmployeeRecord {
///     id: "1001".to_string(),
///     full_name: "ANA LOPEZ".to_string(),
///     tax_id: "LOAA900101XXX".to_string(),
///     position: "CAJERA".to_string(),
///     location: "MONTERREY".to_string(),
///     hire_date: NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
///     termination_date: NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
///     daily_salary: Decimal::from(500),
///     pending_vacation_days: Decimal::ZERO,
///     accrued_overtime: Decimal::ZERO,
/// };
///
/// let engine = SettlementEngine::default();
/// let result = engine
///     .compute(
///         &employee,
///         EconomicConfig::default(),
///         CalculationType::Finiquito,
///         &SettlementOptions::default(),
///     )
///     .unwrap();
/// assert_eq!(result.seniority_years, 4);
/// assert_eq!(result.net_total, result.gross_total - result.deductions_total);
/// ```
#[derive(Debug, Clone)]
pub struct SettlementEngine {
    tables: StatutoryTables,
}

impl SettlementEngine {
    /// Creates an engine over the given statute tables.
    pub fn new(tables: StatutoryTables) -> Self {
        Self { tables }
    }

    /// Returns the statute tables in use.
    pub fn tables(&self) -> &StatutoryTables {
        &self.tables
    }

    /// Computes the settlement of one employee.
    ///
    /// # Arguments
    ///
    /// * `employee` - The terminated employee
    /// * `economy` - Caller-supplied UMA and minimum wage
    /// * `calculation_type` - Finiquito or liquidación
    /// * `options` - Adjustments, severance toggles, and severance overrides
    ///
    /// # Errors
    ///
    /// Returns `InvalidEmployee` for a non-positive or out-of-range salary or
    /// a hire date after the termination date, `InvalidInput` for an
    /// adjustment, override, or economy value beyond
    /// [`MAX_INPUT_MAGNITUDE`](crate::models::MAX_INPUT_MAGNITUDE), and
    /// `BracketNotFound` if taxable income falls outside the ISR table.
    pub fn compute(
        &self,
        employee: &EmployeeRecord,
        economy: EconomicConfig,
        calculation_type: CalculationType,
        options: &SettlementOptions,
    ) -> EngineResult<SettlementResult> {
        employee.validate()?;
        options.validate()?;
        check_input_range("economy.uma", economy.uma)?;
        check_input_range("economy.minimum_wage", economy.minimum_wage)?;

        let tables = &self.tables;
        let statute = &tables.statute;
        let adjustments = &options.adjustments;
        let mut audit_steps: Vec<AuditStep> = Vec::new();
        let mut warnings: Vec<AuditWarning> = Vec::new();
        let mut step_number: u32 = 1;

        // UMA in force for the termination date
        let uma_result = resolve_uma(employee.termination_date, &economy, tables, step_number);
        let resolution = uma_result.resolution;
        audit_steps.push(uma_result.audit_step);
        step_number += 1;

        if resolution.prior_year_substituted {
            warnings.push(AuditWarning {
                code: "PRIOR_YEAR_UMA".to_string(),
                message: format!(
                    "January {} termination uses prior-year UMA {} instead of {}",
                    statute.reference_year, resolution.uma, economy.uma
                ),
                severity: "low".to_string(),
            });
        }

        let years = seniority_years(employee.hire_date, employee.termination_date);

        let benefits_result = calculate_proportional_benefits(
            employee,
            years,
            adjustments.salary_days_override,
            statute,
            step_number,
        )?;
        let benefits = benefits_result.benefits;
        audit_steps.push(benefits_result.audit_step);
        step_number += 1;

        let wage_result = calculate_integrated_daily_wage(
            employee.daily_salary,
            benefits.vacation_days_per_year,
            statute,
            step_number,
        );
        let wage = wage_result.wage;
        audit_steps.push(wage_result.audit_step);
        step_number += 1;

        let split_result = split_perceptions(
            &benefits,
            employee.pending_vacation_days,
            employee.accrued_overtime,
            adjustments,
            resolution.uma,
            &statute.exemptions,
            step_number,
        );
        let perceptions = split_result.perceptions;
        audit_steps.push(split_result.audit_step);
        step_number += 1;

        let severance = if calculation_type.includes_severance() {
            let severance_result = calculate_severance(
                &SeveranceInputs {
                    sdi: wage.sdi,
                    seniority_years: years,
                    days_worked_in_year: benefits.days_worked_in_year,
                    minimum_wage: economy.minimum_wage,
                },
                &options.severance_settings,
                &options.severance_overrides,
                adjustments,
                &statute.severance,
                step_number,
            );
            audit_steps.push(severance_result.audit_step);
            step_number += 1;
            Some(severance_result.breakdown)
        } else {
            None
        };

        let ordinary_result = calculate_ordinary_withholding(
            &perceptions,
            employee.termination_date,
            adjustments,
            resolution.uma,
            resolution.subsidy_percent,
            &tables.isr,
            step_number,
        )?;
        let ordinary = ordinary_result.withholding;
        audit_steps.push(ordinary_result.audit_step);
        step_number += 1;

        let severance_tax = match &severance {
            Some(breakdown) => {
                let tax_result = calculate_severance_withholding(
                    breakdown.total,
                    years,
                    employee.daily_salary,
                    resolution.uma,
                    resolution.subsidy_percent,
                    tables,
                    step_number,
                )?;
                audit_steps.push(tax_result.audit_step);
                step_number += 1;
                Some(tax_result.tax)
            }
            None => None,
        };

        let social_result = calculate_social_security(
            wage.sdi,
            perceptions.salary_days,
            resolution.uma,
            &tables.imss,
            step_number,
        );
        let social_security = social_result.contribution;
        audit_steps.push(social_result.audit_step);
        step_number += 1;

        // Aggregation
        let severance_total = severance.as_ref().map_or(Decimal::ZERO, |s| s.total);
        let severance_withholding = severance_tax.as_ref().map_or(Decimal::ZERO, |t| t.withholding);
        let tax_total = ordinary.withholding + severance_withholding;

        let gross_total = perceptions.total + severance_total;
        let deductions_total = tax_total + social_security.total;
        let net_total = gross_total - deductions_total;

        audit_steps.push(AuditStep {
            step_number,
            rule_id: "settlement_totals".to_string(),
            rule_name: "Settlement Totals".to_string(),
            clause_ref: "LFT Art. 84".to_string(),
            input: serde_json::json!({
                "perceptions_total": perceptions.total.to_string(),
                "severance_total": severance_total.to_string(),
                "ordinary_tax": ordinary.withholding.to_string(),
                "severance_tax": severance_withholding.to_string(),
                "social_security": social_security.total.to_string()
            }),
            output: serde_json::json!({
                "gross_total": gross_total.to_string(),
                "deductions_total": deductions_total.to_string(),
                "net_total": net_total.to_string()
            }),
            reasoning: format!(
                "${} gross - ${} deductions = ${} net",
                gross_total, deductions_total, net_total
            ),
        });

        if net_total < Decimal::ZERO {
            warn!(
                employee_id = %employee.id,
                net_total = %net_total,
                "Settlement net total is negative"
            );
            warnings.push(AuditWarning {
                code: "NEGATIVE_NET".to_string(),
                message: format!(
                    "Net total {} is negative; deductions {} exceed gross {}",
                    net_total, deductions_total, gross_total
                ),
                severity: "high".to_string(),
            });
        }

        debug!(
            employee_id = %employee.id,
            calculation_type = calculation_type.as_str(),
            gross_total = %gross_total,
            net_total = %net_total,
            "Settlement computed"
        );

        Ok(SettlementResult {
            employee: employee.clone(),
            calculation_type,
            perceptions,
            severance,
            tax: TaxWithholding {
                ordinary,
                severance: severance_tax,
                total: tax_total,
            },
            social_security,
            integrated_daily_wage: wage.sdi,
            daily_year_end_bonus: wage.daily_year_end_bonus,
            daily_vacation_premium: wage.daily_vacation_premium,
            seniority_years: years,
            resolved_uma: resolution.uma,
            gross_total,
            deductions_total,
            net_total,
            audit_trace: AuditTrace {
                steps: audit_steps,
                warnings,
            },
        })
    }

    /// Computes settlements for a batch of employees with default options.
    ///
    /// Fails on the first employee that cannot be settled.
    pub fn compute_batch(
        &self,
        employees: &[EmployeeRecord],
        economy: EconomicConfig,
        calculation_type: CalculationType,
    ) -> EngineResult<Vec<SettlementResult>> {
        let options = SettlementOptions::default();
        employees
            .iter()
            .map(|employee| self.compute(employee, economy, calculation_type, &options))
            .collect()
    }
}

impl Default for SettlementEngine {
    fn default() -> Self {
        Self::new(StatutoryTables::mx_2026())
    }
}
