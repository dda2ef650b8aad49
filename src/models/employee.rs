//! Employee record and calculation type.
//!
//! This module defines the [`EmployeeRecord`] consumed read-only by the engine
//! and the [`CalculationType`] that selects between an ordinary settlement and
//! one that includes severance indemnity.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::adjustments::{MAX_INPUT_MAGNITUDE, within_input_range};

/// Selects which settlement is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationType {
    /// Ordinary end-of-employment settlement, no severance indemnity.
    Finiquito,
    /// Settlement including severance indemnity.
    #[serde(alias = "liquidación")]
    Liquidacion,
}

impl CalculationType {
    /// Returns true if severance indemnity applies.
    pub fn includes_severance(self) -> bool {
        self == CalculationType::Liquidacion
    }

    /// Returns the snake_case name used in audit output.
    pub fn as_str(self) -> &'static str {
        match self {
            CalculationType::Finiquito => "finiquito",
            CalculationType::Liquidacion => "liquidacion",
        }
    }
}

/// A terminated employee, as produced by ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Employee number.
    pub id: String,
    /// Full name.
    pub full_name: String,
    /// Tax ID (RFC).
    pub tax_id: String,
    /// Job position.
    pub position: String,
    /// Work location.
    pub location: String,
    /// The date employment started.
    pub hire_date: NaiveDate,
    /// The last day of employment.
    pub termination_date: NaiveDate,
    /// Daily salary; must be greater than zero.
    pub daily_salary: Decimal,
    /// Vacation days earned in prior years and not yet taken.
    #[serde(default)]
    pub pending_vacation_days: Decimal,
    /// Overtime owed at double rate, as a peso amount.
    #[serde(default)]
    pub accrued_overtime: Decimal,
}

impl EmployeeRecord {
    /// Checks the facts every calculation relies on.
    ///
    /// # Examples
    ///
    /// ```
    /// use finiquito_engine::models::EmployeeRecord;
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
    ///     daily_salary: Decimal::new(500, 0),
    ///     pending_vacation_days: Decimal::ZERO,
    ///     accrued_overtime: Decimal::ZERO,
    /// };
    /// assert!(employee.validate().is_ok());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.daily_salary <= Decimal::ZERO {
            return Err(EngineError::InvalidEmployee {
                field: "daily_salary".to_string(),
                message: format!("must be greater than zero, got {}", self.daily_salary),
            });
        }
        let magnitudes = [
            ("daily_salary", self.daily_salary),
            ("pending_vacation_days", self.pending_vacation_days),
            ("accrued_overtime", self.accrued_overtime),
        ];
        for (field, value) in magnitudes {
            if !within_input_range(value) {
                return Err(EngineError::InvalidEmployee {
                    field: field.to_string(),
                    message: format!("{} exceeds magnitude {}", value, MAX_INPUT_MAGNITUDE),
                });
            }
        }
        if self.hire_date > self.termination_date {
            return Err(EngineError::InvalidEmployee {
                field: "hire_date".to_string(),
                message: format!(
                    "{} is after termination date {}",
                    self.hire_date, self.termination_date
                ),
            });
        }
        Ok(())
    }
}
