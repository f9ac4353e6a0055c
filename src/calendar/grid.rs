//! Month calendar grid generation.
//!
//! Every month is rendered as the same 6 x 7 block of days starting on a
//! Sunday, so calendar views never need a partial last row. Months are
//! 0-indexed throughout (January = 0).

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::IntervalRecord;

use super::overlap::DateSpan;

/// Number of weeks in a month grid.
pub const GRID_WEEKS: usize = 6;

/// Number of days per grid row.
pub const DAYS_PER_WEEK: usize = 7;

/// Number of cells in a month grid.
pub const GRID_CELLS: usize = GRID_WEEKS * DAYS_PER_WEEK;

/// First day of the 0-indexed `month` in `year`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidMonth`] for a month above 11 or a year
/// outside 1 through 9999.
pub fn month_start(year: i32, month: u32) -> EngineResult<NaiveDate> {
    let invalid = || EngineError::InvalidMonth { year, month };

    if !(1..=9999).contains(&year) || month > 11 {
        return Err(invalid());
    }
    NaiveDate::from_ymd_opt(year, month + 1, 1).ok_or_else(invalid)
}

/// The first through last day of the 0-indexed `month` in `year`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use roster_engine::calendar::month_span;
///
/// let february = month_span(2024, 1).unwrap();
/// assert_eq!(february.end(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(february.len_days(), 29);
/// ```
pub fn month_span(year: i32, month: u32) -> EngineResult<DateSpan> {
    let first = month_start(year, month)?;
    let next_first = if month == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 2, 1)
    }
    .ok_or(EngineError::InvalidMonth { year, month })?;

    DateSpan::new(first, next_first - Duration::days(1))
}

/// Generates the 42-day grid for the 0-indexed `month` of `year`.
///
/// The grid starts on the Sunday on or before the 1st of the month (which
/// may fall in the previous month) and runs for 42 consecutive days.
///
/// # Errors
///
/// Returns [`EngineError::InvalidMonth`] for a month above 11 or a year
/// outside 1 through 9999.
///
/// # Example
///
/// ```
/// use chrono::{Datelike, NaiveDate, Weekday};
/// use roster_engine::calendar::generate_month_grid;
///
/// // October 2025 (0-indexed month 9) starts on a Wednesday.
/// let grid = generate_month_grid(2025, 9).unwrap();
/// assert_eq!(grid[0], NaiveDate::from_ymd_opt(2025, 9, 28).unwrap());
/// assert_eq!(grid[0].weekday(), Weekday::Sun);
/// assert_eq!(grid[41], NaiveDate::from_ymd_opt(2025, 11, 8).unwrap());
/// ```
pub fn generate_month_grid(year: i32, month: u32) -> EngineResult<[NaiveDate; GRID_CELLS]> {
    let first = month_start(year, month)?;
    let lead_days = i64::from(first.weekday().num_days_from_sunday());
    let grid_start = first - Duration::days(lead_days);

    Ok(std::array::from_fn(|offset| {
        grid_start + Duration::days(offset as i64)
    }))
}

/// A grid day with the flags a calendar view needs to style it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    /// The calendar day shown in the cell.
    pub date: NaiveDate,
    /// True if the day equals the supplied `today`.
    pub is_today: bool,
    /// True if the day belongs to the month being displayed.
    pub is_current_month: bool,
}

/// Generates the month grid with per-cell `is_today` and
/// `is_current_month` flags.
///
/// Both flags are derived by comparison; nothing about "today" is stored.
pub fn annotate_grid(year: i32, month: u32, today: NaiveDate) -> EngineResult<Vec<GridCell>> {
    let month_days = month_span(year, month)?;
    let grid = generate_month_grid(year, month)?;

    Ok(grid
        .into_iter()
        .map(|date| GridCell {
            date,
            is_today: date == today,
            is_current_month: month_days.contains(date),
        })
        .collect())
}

/// Records whose interval covers `date`, in input order.
pub fn records_on(records: &[IntervalRecord], date: NaiveDate) -> Vec<&IntervalRecord> {
    records
        .iter()
        .filter(|record| record.span().contains(date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordStatus;
    use chrono::Weekday;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    /// October 2025 grid.
    #[test]
    fn test_october_2025_grid() {
        let grid = generate_month_grid(2025, 9).unwrap();

        assert_eq!(grid.len(), GRID_CELLS);
        assert_eq!(grid[0], make_date("2025-09-28"));
        assert!(grid.contains(&make_date("2025-10-31")));
        assert_eq!(grid[41], make_date("2025-11-08"));
    }

    #[test]
    fn test_month_starting_on_sunday_has_no_lead_days() {
        // June 2025 starts on a Sunday.
        let grid = generate_month_grid(2025, 5).unwrap();
        assert_eq!(grid[0], make_date("2025-06-01"));
    }

    #[test]
    fn test_saturday_start_31_day_month_fits() {
        // March 2025 starts on a Saturday and has 31 days.
        let grid = generate_month_grid(2025, 2).unwrap();
        assert_eq!(grid[0], make_date("2025-02-23"));
        assert_eq!(grid[6], make_date("2025-03-01"));
        assert!(grid.contains(&make_date("2025-03-31")));
        assert_eq!(grid[41], make_date("2025-04-05"));
    }

    #[test]
    fn test_january_grid_reaches_into_previous_year() {
        // January 2026 starts on a Thursday.
        let grid = generate_month_grid(2026, 0).unwrap();
        assert_eq!(grid[0], make_date("2025-12-28"));
    }

    #[test]
    fn test_every_row_starts_on_sunday() {
        let grid = generate_month_grid(2024, 1).unwrap();
        for row in grid.chunks(DAYS_PER_WEEK) {
            assert_eq!(row[0].weekday(), Weekday::Sun);
        }
    }

    #[test]
    fn test_invalid_months_are_rejected() {
        assert_eq!(
            generate_month_grid(2025, 12),
            Err(EngineError::InvalidMonth {
                year: 2025,
                month: 12
            })
        );
        assert!(generate_month_grid(0, 5).is_err());
        assert!(generate_month_grid(10000, 5).is_err());
    }

    #[test]
    fn test_month_span_for_december() {
        let span = month_span(2025, 11).unwrap();
        assert_eq!(span.start(), make_date("2025-12-01"));
        assert_eq!(span.end(), make_date("2025-12-31"));
    }

    #[test]
    fn test_month_span_in_final_supported_year() {
        let span = month_span(9999, 11).unwrap();
        assert_eq!(span.end(), make_date("9999-12-31"));
    }

    #[test]
    fn test_annotated_cells() {
        let today = make_date("2025-10-15");
        let cells = annotate_grid(2025, 9, today).unwrap();

        assert_eq!(cells.len(), GRID_CELLS);
        assert_eq!(cells.iter().filter(|c| c.is_today).count(), 1);
        assert_eq!(cells.iter().filter(|c| c.is_current_month).count(), 31);
        assert!(!cells[0].is_current_month);
        assert!(cells[3].is_current_month); // 2025-10-01
    }

    #[test]
    fn test_today_outside_grid_flags_nothing() {
        let cells = annotate_grid(2025, 9, make_date("2026-03-01")).unwrap();
        assert!(cells.iter().all(|c| !c.is_today));
    }

    #[test]
    fn test_records_on_matches_ranges_and_single_days() {
        let records = vec![
            IntervalRecord::new(
                "leave_001",
                "emp_001",
                make_date("2025-10-05"),
                make_date("2025-10-07"),
                RecordStatus::Approved,
            ),
            IntervalRecord::new(
                "shift_001",
                "emp_001",
                make_date("2025-10-06"),
                make_date("2025-10-06"),
                RecordStatus::Scheduled,
            ),
        ];

        let ids: Vec<_> = records_on(&records, make_date("2025-10-06"))
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["leave_001", "shift_001"]);
        assert_eq!(records_on(&records, make_date("2025-10-07")).len(), 1);
        assert!(records_on(&records, make_date("2025-10-08")).is_empty());
    }
}
