//! Severance indemnity calculation (LFT Arts. 50 and 162).
//!
//! Each of the four components is computed under its toggle, then resolved
//! against an optional override. An override always wins, including over a
//! disabled toggle.

use rust_decimal::Decimal;

use crate::config::SeveranceRules;
use crate::models::{
    AdjustmentInputs, AuditStep, ComponentSource, SeveranceBreakdown, SeveranceComponent,
    SeveranceOverrides, SeveranceSettings,
};

use super::rounding::round_money;

/// Resolves one severance component.
///
/// | toggle | override | amount     | source     |
/// |--------|----------|------------|------------|
/// | off    | none     | 0          | Disabled   |
/// | on     | none     | computed   | Computed   |
/// | any    | some(x)  | x          | Overridden |
///
/// ```
/// use finiquito_engine::calculation::resolve_component;
/// use finiquito_engine::models::ComponentSource;
/// use rust_decimal::Decimal;
///
/// let c = resolve_component(false, Decimal::from(900), Some(Decimal::from(100)));
/// assert_eq!(c.calculated, Decimal::ZERO);
/// assert_eq!(c.amount, Decimal::from(100));
/// assert_eq!(c.source, ComponentSource::Overridden);
/// ```
pub fn resolve_component(
    enabled: bool,
    computed: Decimal,
    override_amount: Option<Decimal>,
) -> SeveranceComponent {
    let calculated = if enabled { computed } else { Decimal::ZERO };
    match override_amount {
        Some(amount) => SeveranceComponent {
            calculated,
            amount,
            source: ComponentSource::Overridden,
        },
        None if enabled => SeveranceComponent {
            calculated,
            amount: calculated,
            source: ComponentSource::Computed,
        },
        None => SeveranceComponent {
            calculated,
            amount: Decimal::ZERO,
            source: ComponentSource::Disabled,
        },
    }
}

/// Inputs the severance calculator needs from earlier steps.
#[derive(Debug, Clone, Copy)]
pub struct SeveranceInputs {
    /// Integrated daily wage.
    pub sdi: Decimal,
    /// Completed years of service.
    pub seniority_years: u32,
    /// Days worked in the termination calendar year.
    pub days_worked_in_year: i64,
    /// General daily minimum wage.
    pub minimum_wage: Decimal,
}

/// The result of computing severance, including the audit step.
#[derive(Debug, Clone)]
pub struct SeveranceResult {
    /// The severance breakdown.
    pub breakdown: SeveranceBreakdown,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the four severance components and their total.
///
/// # Arguments
///
/// * `inputs` - SDI, seniority, days worked, and minimum wage
/// * `settings` - Component toggles
/// * `overrides` - Component overrides
/// * `adjustments` - Echoed extra overtime amounts
/// * `rules` - Severance day counts
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_severance(
    inputs: &SeveranceInputs,
    settings: &SeveranceSettings,
    overrides: &SeveranceOverrides,
    adjustments: &AdjustmentInputs,
    rules: &SeveranceRules,
    step_number: u32,
) -> SeveranceResult {
    let years = Decimal::from(inputs.seniority_years);
    let premium_wage_base = inputs
        .sdi
        .min(rules.seniority_premium_wage_cap * inputs.minimum_wage);

    let indemnity_90_days = resolve_component(
        settings.include_indemnity_90_days,
        rules.indemnity_days * inputs.sdi,
        overrides.indemnity_90_days,
    );
    let twenty_days_per_year = resolve_component(
        settings.include_20_days_per_year,
        rules.days_per_year * inputs.sdi * years,
        overrides.twenty_days_per_year,
    );
    let seniority_premium = resolve_component(
        settings.include_seniority_premium,
        rules.seniority_premium_days_per_year * premium_wage_base * years,
        overrides.seniority_premium,
    );
    let proportional_days = rules.seniority_premium_days_per_year / Decimal::from(365)
        * Decimal::from(inputs.days_worked_in_year);
    let proportional_seniority_premium = resolve_component(
        settings.include_proportional_seniority_premium,
        round_money(premium_wage_base * proportional_days),
        overrides.proportional_seniority_premium,
    );

    let total = indemnity_90_days.amount
        + twenty_days_per_year.amount
        + seniority_premium.amount
        + proportional_seniority_premium.amount;

    let breakdown = SeveranceBreakdown {
        indemnity_90_days,
        twenty_days_per_year,
        seniority_premium,
        proportional_seniority_premium,
        seniority_premium_wage_base: premium_wage_base,
        extra_double_overtime: adjustments.extra_double_overtime,
        extra_triple_overtime: adjustments.extra_triple_overtime,
        total,
    };

    let component_json = |c: &SeveranceComponent| {
        serde_json::json!({
            "calculated": c.calculated.to_string(),
            "amount": c.amount.to_string(),
            "source": c.source
        })
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "severance_indemnity".to_string(),
        rule_name: "Severance Indemnity".to_string(),
        clause_ref: "LFT Arts. 50, 162".to_string(),
        input: serde_json::json!({
            "sdi": inputs.sdi.to_string(),
            "seniority_years": inputs.seniority_years,
            "days_worked_in_year": inputs.days_worked_in_year,
            "minimum_wage": inputs.minimum_wage.to_string(),
            "settings": settings,
            "overrides": overrides
        }),
        output: serde_json::json!({
            "seniority_premium_wage_base": premium_wage_base.to_string(),
            "indemnity_90_days": component_json(&indemnity_90_days),
            "twenty_days_per_year": component_json(&twenty_days_per_year),
            "seniority_premium": component_json(&seniority_premium),
            "proportional_seniority_premium": component_json(&proportional_seniority_premium),
            "total": total.to_string()
        }),
        reasoning: format!(
            "${} + ${} + ${} + ${} = ${}",
            indemnity_90_days.amount,
            twenty_days_per_year.amount,
            seniority_premium.amount,
            proportional_seniority_premium.amount,
            total
        ),
    };

    SeveranceResult {
        breakdown,
        audit_step,
    }
}
