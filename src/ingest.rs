//! Ingestion of tab-separated employee rows.
//!
//! The input is a spreadsheet export pasted as text: a header line followed
//! by one tab-separated row per employee. Rows that cannot produce a valid
//! [`EmployeeRecord`] are dropped, never defaulted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeRecord, parse_decimal_lenient};

/// Minimum number of columns a row needs.
pub const MIN_COLUMNS: usize = 11;

const COL_ID: usize = 0;
const COL_HIRE_DATE: usize = 1;
const COL_TERMINATION_DATE: usize = 2;
const COL_FULL_NAME: usize = 6;
const COL_DAILY_SALARY: usize = 7;
const COL_TAX_ID: usize = 8;
const COL_POSITION: usize = 9;
const COL_LOCATION: usize = 10;
const COL_OVERTIME: usize = 13;
const COL_PENDING_VACATION: usize = 18;

/// Parses a `d/m/yyyy` date.
///
/// Day must be 1–31, month 1–12, and year after 1900; the date must also
/// exist on the calendar.
///
/// ```
/// use finiquito_engine::ingest::parse_row_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(parse_row_date("20/6/2024"), NaiveDate::from_ymd_opt(2024, 6, 20));
/// assert_eq!(parse_row_date("31/2/2024"), None);
/// assert_eq!(parse_row_date("2024-06-20"), None);
/// ```
pub fn parse_row_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().split('/');
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let year: i32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    if !(1..=31).contains(&day) || !(1..=12).contains(&month) || year <= 1900 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses one row, returning the reason it was rejected on failure.
fn parse_row(row: &str) -> Result<EmployeeRecord, &'static str> {
    let columns: Vec<&str> = row.split('\t').collect();
    if columns.len() < MIN_COLUMNS {
        return Err("too few columns");
    }

    let cell = |index: usize| columns.get(index).map_or("", |c| c.trim());
    let optional_amount = |index: usize| parse_decimal_lenient(cell(index)).unwrap_or(Decimal::ZERO);

    let hire_date = parse_row_date(cell(COL_HIRE_DATE)).ok_or("invalid hire date")?;
    let termination_date =
        parse_row_date(cell(COL_TERMINATION_DATE)).ok_or("invalid termination date")?;
    let daily_salary = parse_decimal_lenient(cell(COL_DAILY_SALARY))
        .filter(|salary| *salary > Decimal::ZERO)
        .ok_or("daily salary missing or not positive")?;

    let employee = EmployeeRecord {
        id: cell(COL_ID).to_string(),
        full_name: cell(COL_FULL_NAME).to_string(),
        tax_id: cell(COL_TAX_ID).to_string(),
        position: cell(COL_POSITION).to_string(),
        location: cell(COL_LOCATION).to_string(),
        hire_date,
        termination_date,
        daily_salary,
        pending_vacation_days: optional_amount(COL_PENDING_VACATION),
        accrued_overtime: optional_amount(COL_OVERTIME),
    };

    employee
        .validate()
        .map_err(|_| "hire date after termination date")?;
    Ok(employee)
}

/// Parses employee rows, silently dropping invalid ones.
///
/// The first line is a header and is always skipped.
///
/// # Examples
///
/// ```
/// use finiquito_engine::ingest::parse_employee_rows;
///
/// let text = "header\n\
///     1001\t15/1/2020\t20/6/2024\t\t\t\tANA LOPEZ\t500.00\tLOAA900101XXX\tCAJERA\tMONTERREY\n\
///     1002\tnot a date\t20/6/2024\t\t\t\tBAD ROW\t500\tX\tY\tZ";
/// let employees = parse_employee_rows(text);
/// assert_eq!(employees.len(), 1);
/// assert_eq!(employees[0].full_name, "ANA LOPEZ");
/// ```
pub fn parse_employee_rows(text: &str) -> Vec<EmployeeRecord> {
    text.trim()
        .lines()
        .enumerate()
        .skip(1)
        .filter_map(|(index, row)| match parse_row(row) {
            Ok(employee) => Some(employee),
            Err(reason) => {
                debug!(line = index + 1, reason, "Dropping employee row");
                None
            }
        })
        .collect()
}

/// Parses employee rows, failing if none are valid.
pub fn parse_employee_batch(text: &str) -> EngineResult<Vec<EmployeeRecord>> {
    let employees = parse_employee_rows(text);
    if employees.is_empty() {
        return Err(EngineError::NoValidRecords);
    }
    Ok(employees)
}
