//! Calendar month helpers

use chrono::{Datelike, Months, NaiveDate};

/// First and last day of the given month, `None` for an invalid month
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((first, last))
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    month_bounds(year, month)
        .map(|(_, last)| last.day())
        .unwrap_or(0)
}

/// First and last day of the month before the one containing `today`
pub fn previous_month_bounds(today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let previous = today.checked_sub_months(Months::new(1))?;
    month_bounds(previous.year(), previous.month())
}
