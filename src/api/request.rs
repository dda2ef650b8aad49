//! Request types for the settlement API.
//!
//! This module defines the JSON request structures for the `/settlements`
//! and `/settlements/batch` endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EconomicConfig;
use crate::models::{
    AdjustmentInputs, CalculationType, EmployeeRecord, RawAdjustments, SettlementOptions,
    SeveranceOverrides, SeveranceSettings,
};

/// Request body for the `/settlements` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementRequest {
    /// The terminated employee.
    pub employee: EmployeeRequest,
    /// Finiquito or liquidación.
    pub calculation_type: CalculationType,
    /// UMA and minimum wage; the server defaults apply when absent.
    #[serde(default)]
    pub economy: Option<EconomicConfig>,
    /// Adjustments as typed by the user.
    #[serde(default)]
    pub adjustments: AdjustmentsRequest,
    /// Severance component toggles.
    #[serde(default)]
    pub severance_settings: SeveranceSettings,
    /// Severance component overrides.
    #[serde(default)]
    pub severance_overrides: SeveranceOverrides,
}

impl SettlementRequest {
    /// Builds the engine options, parsing adjustments leniently.
    pub fn options(&self) -> SettlementOptions {
        SettlementOptions {
            adjustments: AdjustmentInputs::from_raw(&self.adjustments.to_raw()),
            severance_settings: self.severance_settings,
            severance_overrides: self.severance_overrides,
        }
    }
}

/// Employee information in a settlement request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Employee number.
    pub id: String,
    /// Full name.
    #[serde(default)]
    pub full_name: String,
    /// Tax ID (RFC).
    #[serde(default)]
    pub tax_id: String,
    /// Job position.
    #[serde(default)]
    pub position: String,
    /// Work location.
    #[serde(default)]
    pub location: String,
    /// The date employment started.
    pub hire_date: NaiveDate,
    /// The last day of employment.
    pub termination_date: NaiveDate,
    /// Daily salary.
    pub daily_salary: Decimal,
    /// Pending vacation days from prior years.
    #[serde(default)]
    pub pending_vacation_days: Decimal,
    /// Overtime owed at double rate.
    #[serde(default)]
    pub accrued_overtime: Decimal,
}

impl From<EmployeeRequest> for EmployeeRecord {
    fn from(req: EmployeeRequest) -> Self {
        EmployeeRecord {
            id: req.id,
            full_name: req.full_name,
            tax_id: req.tax_id,
            position: req.position,
            location: req.location,
            hire_date: req.hire_date,
            termination_date: req.termination_date,
            daily_salary: req.daily_salary,
            pending_vacation_days: req.pending_vacation_days,
            accrued_overtime: req.accrued_overtime,
        }
    }
}

/// A number typed by a user: either a JSON number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LenientNumber {
    /// A well-formed number.
    Number(Decimal),
    /// Text that may or may not parse as a number.
    Text(String),
}

impl LenientNumber {
    fn into_text(self) -> String {
        match self {
            LenientNumber::Number(value) => value.to_string(),
            LenientNumber::Text(text) => text,
        }
    }
}

/// Adjustments in a settlement request.
///
/// Every field accepts a number or a string; unparsable values are treated
/// as zero, or as "not supplied" for the salary-days override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentsRequest {
    /// Prior period taxable income.
    pub prior_period_income: Option<LenientNumber>,
    /// Prior period withheld ISR.
    pub prior_period_tax: Option<LenientNumber>,
    /// Extra double-rate overtime amount.
    pub extra_double_overtime: Option<LenientNumber>,
    /// Extra triple-rate overtime amount.
    pub extra_triple_overtime: Option<LenientNumber>,
    /// Salary days override.
    pub salary_days_override: Option<LenientNumber>,
    /// Additional perception amount.
    pub additional_perception: Option<LenientNumber>,
}

impl AdjustmentsRequest {
    /// Converts to the textual form the lenient parser consumes.
    pub fn to_raw(&self) -> RawAdjustments {
        let text = |field: &Option<LenientNumber>| field.clone().map(LenientNumber::into_text);
        RawAdjustments {
            prior_period_income: text(&self.prior_period_income),
            prior_period_tax: text(&self.prior_period_tax),
            extra_double_overtime: text(&self.extra_double_overtime),
            extra_triple_overtime: text(&self.extra_triple_overtime),
            salary_days_override: text(&self.salary_days_override),
            additional_perception: text(&self.additional_perception),
        }
    }
}

/// Request body for the `/settlements/batch` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Tab-separated employee rows, header line first.
    pub rows: String,
    /// Finiquito or liquidación, applied to every row.
    pub calculation_type: CalculationType,
    /// UMA and minimum wage; the server defaults apply when absent.
    #[serde(default)]
    pub economy: Option<EconomicConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_settlement_request() {
        let json = r#"{
            "employee": {
                "id": "1001",
                "full_name": "ANA LOPEZ",
                "hire_date": "2020-01-15",
                "termination_date": "2024-06-20",
                "daily_salary": "500.00"
            },
            "calculation_type": "liquidacion",
            "severance_overrides": { "indemnity_90_days": "10000" }
        }"#;

        let request: SettlementRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employee.id, "1001");
        assert_eq!(request.calculation_type, CalculationType::Liquidacion);
        assert!(request.economy.is_none());
        assert_eq!(request.severance_overrides.indemnity_90_days, Some(dec("10000")));
        assert!(request.severance_settings.include_seniority_premium);
    }

    #[test]
    fn test_adjustments_accept_numbers_and_text() {
        let json = r#"{
            "prior_period_income": 5000.5,
            "prior_period_tax": "1,200",
            "extra_double_overtime": "abc",
            "salary_days_override": "0"
        }"#;

        let request: AdjustmentsRequest = serde_json::from_str(json).unwrap();
        let parsed = AdjustmentInputs::from_raw(&request.to_raw());

        assert_eq!(parsed.prior_period_income, dec("5000.5"));
        assert_eq!(parsed.prior_period_tax, dec("1200"));
        assert_eq!(parsed.extra_double_overtime, Decimal::ZERO);
        assert_eq!(parsed.salary_days_override, Some(Decimal::ZERO));
        assert_eq!(parsed.additional_perception, Decimal::ZERO);
    }

    #[test]
    fn test_employee_conversion() {
        let req = EmployeeRequest {
            id: "1001".to_string(),
            full_name: "ANA LOPEZ".to_string(),
            tax_id: String::new(),
            position: String::new(),
            location: String::new(),
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
            termination_date: NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
            daily_salary: dec("500"),
            pending_vacation_days: dec("2"),
            accrued_overtime: Decimal::ZERO,
        };

        let employee: EmployeeRecord = req.into();
        assert_eq!(employee.id, "1001");
        assert_eq!(employee.pending_vacation_days, dec("2"));
    }

    #[test]
    fn test_deserialize_batch_request() {
        let json = r#"{
            "rows": "header\n1001\t15/1/2020",
            "calculation_type": "finiquito",
            "economy": { "uma": "117.31", "minimum_wage": "315.04" }
        }"#;

        let request: BatchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.calculation_type, CalculationType::Finiquito);
        assert_eq!(request.economy.unwrap().uma, dec("117.31"));
    }
}
