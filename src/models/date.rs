//! Calendar date parsing.

use chrono::{Datelike, NaiveDate};

use crate::error::{EngineError, EngineResult};

/// Parses a `YYYY-MM-DD` calendar date.
///
/// Fails fast on anything that is not a real calendar date in years
/// 1 through 9999. There is no sentinel "invalid date" value: callers get
/// [`EngineError::MalformedDate`] and decide how to degrade.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use roster_engine::models::parse_calendar_date;
///
/// assert_eq!(
///     parse_calendar_date("2025-10-06").unwrap(),
///     NaiveDate::from_ymd_opt(2025, 10, 6).unwrap()
/// );
/// assert!(parse_calendar_date("2025-02-30").is_err());
/// assert!(parse_calendar_date("not a date").is_err());
/// ```
pub fn parse_calendar_date(input: &str) -> EngineResult<NaiveDate> {
    let trimmed = input.trim();
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|e| {
        EngineError::MalformedDate {
            input: input.to_string(),
            message: e.to_string(),
        }
    })?;

    if !(1..=9999).contains(&date.year()) {
        return Err(EngineError::MalformedDate {
            input: input.to_string(),
            message: "year must be between 1 and 9999".to_string(),
        });
    }

    Ok(date)
}
