//! Seniority and calendar utilities.
//!
//! All functions operate on date-only values, so daylight-saving and
//! time-zone shifts cannot affect a day count.

use chrono::{Datelike, NaiveDate};

use crate::error::{EngineError, EngineResult};

/// Inclusive whole-day count between two dates, in either order.
///
/// Equal dates count as one day.
///
/// ```
/// use finiquito_engine::calculation::days_between;
/// use chrono::NaiveDate;
///
/// let a = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let b = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
/// assert_eq!(days_between(a, b), 20);
/// assert_eq!(days_between(b, a), 20);
/// assert_eq!(days_between(a, a), 1);
/// ```
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days().abs() + 1
}

/// Completed years of service: `floor(days_between / 365.25)`.
pub fn seniority_years(hire_date: NaiveDate, termination_date: NaiveDate) -> u32 {
    // days / 365.25 == days * 4 / 1461, kept in integers
    let days = days_between(hire_date, termination_date);
    (days * 4 / 1461) as u32
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// 366 in leap years, 365 otherwise.
pub fn days_in_year(year: i32) -> i64 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// The hire anniversary falling in `year`.
///
/// A February 29 hire date falls on March 1 in non-leap years.
pub fn anniversary_in_year(hire_date: NaiveDate, year: i32) -> EngineResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, hire_date.month(), hire_date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("anniversary of {} in year {} is out of range", hire_date, year),
        })
}

/// The most recent hire anniversary on or before the termination date.
pub fn last_anniversary(
    hire_date: NaiveDate,
    termination_date: NaiveDate,
) -> EngineResult<NaiveDate> {
    let same_year = anniversary_in_year(hire_date, termination_date.year())?;
    if same_year > termination_date {
        anniversary_in_year(hire_date, termination_date.year() - 1)
    } else {
        Ok(same_year)
    }
}

/// Days worked in the termination calendar year, inclusive.
///
/// Counting starts at the later of the hire date and January 1.
pub fn days_worked_in_year(hire_date: NaiveDate, termination_date: NaiveDate) -> i64 {
    if hire_date.year() >= termination_date.year() {
        days_between(hire_date, termination_date)
    } else {
        i64::from(termination_date.ordinal())
    }
}

/// Salary days owed since the last half-month boundary.
///
/// Day 1–15 pays the day of month; day 16–31 pays the days after the 15th.
pub fn default_salary_days(termination_date: NaiveDate) -> u32 {
    let day = termination_date.day();
    if day > 15 { day - 15 } else { day }
}
