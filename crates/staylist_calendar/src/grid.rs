// --- File: crates/staylist_calendar/src/grid.rs ---
//! Month grid: one row per listing, one column per day of the month.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use staylist_common::{DataSource, ListingId};

use crate::error::CalendarError;
use crate::status::CellStatus;

/// Day format used everywhere in the calendar and on the store.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Identity of one cell in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CellKey {
    pub listing_id: ListingId,
    pub date: String,
}

impl CellKey {
    pub fn new(listing_id: ListingId, date: impl Into<String>) -> Self {
        Self {
            listing_id,
            date: date.into(),
        }
    }
}

/// Parses a `YYYY-MM-DD` day. Only the zero-padded form is accepted, since the
/// day is compared as a string against the stored blocklists.
pub fn parse_day(date: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(date, DAY_FORMAT)
        .ok()
        .filter(|day| day.format(DAY_FORMAT).to_string() == date)
        .ok_or_else(|| CalendarError::InvalidDate(date.to_string()))
}

/// Checks every date of a selection, returning the first bad one.
pub fn validate_days(dates: &[String]) -> Result<(), CalendarError> {
    dates.iter().try_for_each(|date| parse_day(date).map(|_| ()))
}

/// All days of `year`-`month` in order, formatted as `YYYY-MM-DD`.
pub fn month_days(year: i32, month: u32) -> Result<Vec<String>, CalendarError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CalendarError::InvalidDate(format!("{:04}-{:02}", year, month)))?;
    Ok(first
        .iter_days()
        .take_while(|day| day.month() == month)
        .map(|day| day.format(DAY_FORMAT).to_string())
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GridRow {
    pub listing_id: ListingId,
    pub title: String,
    /// One status per day, aligned with [`MonthGrid::days`].
    pub cells: Vec<CellStatus>,
}

/// Rendered state of one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub days: Vec<String>,
    pub rows: Vec<GridRow>,
    /// Route the listings were last loaded from, if they were loaded at all.
    pub source: Option<DataSource>,
}

impl MonthGrid {
    pub fn status(&self, listing_id: ListingId, date: &str) -> Option<CellStatus> {
        let column = self.days.iter().position(|day| day == date)?;
        self.rows
            .iter()
            .find(|row| row.listing_id == listing_id)
            .and_then(|row| row.cells.get(column).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day_requires_padded_form() {
        assert!(parse_day("2024-06-01").is_ok());
        assert_eq!(
            parse_day("2024-6-1"),
            Err(CalendarError::InvalidDate("2024-6-1".to_string()))
        );
        assert!(parse_day("2024-02-30").is_err());
        assert!(parse_day("").is_err());
    }

    #[test]
    fn test_month_days_handles_leap_years() {
        let days = month_days(2024, 2).unwrap();
        assert_eq!(days.len(), 29);
        assert_eq!(days.first().map(String::as_str), Some("2024-02-01"));
        assert_eq!(days.last().map(String::as_str), Some("2024-02-29"));

        assert_eq!(month_days(2023, 2).unwrap().len(), 28);
        assert_eq!(month_days(2024, 12).unwrap().len(), 31);
        assert!(month_days(2024, 13).is_err());
    }

    #[test]
    fn test_validate_days_reports_first_bad_date() {
        let dates = vec![
            "2024-06-01".to_string(),
            "June 2nd".to_string(),
            "2024-13-01".to_string(),
        ];
        assert_eq!(
            validate_days(&dates),
            Err(CalendarError::InvalidDate("June 2nd".to_string()))
        );
    }
}
