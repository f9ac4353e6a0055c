//! Validation of candidate dates and ranges against occupied days.
//!
//! Single dates are a membership check on an [`OccupancySet`]. Ranges are
//! validated first, then every occupied day inside them is reported so the
//! form can show exactly which days are unavailable.
//!
//! Leave forms keep the end date at or after the start date with
//! [`clamp_end_date`]: when the user picks a start date later than the
//! current end date, the end date snaps forward to match. The validator
//! itself never clamps; an inverted candidate range is an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{IntervalRecord, parse_calendar_date};

use super::occupancy::{OccupancySet, build_occupancy_within, build_owner_occupancy_within};
use super::overlap::DateSpan;

/// Returns true if `date` is already occupied.
pub fn is_date_blocked(occupancy: &OccupancySet, date: NaiveDate) -> bool {
    occupancy.contains(date)
}

/// Outcome of validating a candidate date range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    /// True if at least one candidate day is occupied.
    pub conflict: bool,
    /// Occupied candidate days, ascending, without repeats.
    pub conflicting_dates: Vec<NaiveDate>,
    /// Ids of the records occupying those days, ascending, without repeats.
    pub conflicting_record_ids: Vec<String>,
    /// Stored records whose end date precedes their start date. Their
    /// swapped span still blocks, but the data needs fixing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invalid_record_ids: Vec<String>,
}

impl ConflictReport {
    /// Returns true if the range is free and every stored record was well
    /// formed.
    pub fn is_clear(&self) -> bool {
        !self.conflict && self.invalid_record_ids.is_empty()
    }
}

/// Checks a candidate range against an already built occupancy set.
///
/// # Errors
///
/// - [`EngineError::InvalidRange`] if `candidate_end` precedes
///   `candidate_start`
/// - [`EngineError::OutsideWindow`] if the set was built for a window that
///   does not contain the whole candidate range
pub fn check_range(
    occupancy: &OccupancySet,
    candidate_start: NaiveDate,
    candidate_end: NaiveDate,
) -> EngineResult<ConflictReport> {
    let candidate = DateSpan::new(candidate_start, candidate_end)?;
    if !occupancy.evaluates(candidate) {
        return Err(EngineError::OutsideWindow {
            start: candidate_start,
            end: candidate_end,
        });
    }

    let conflicting_dates: Vec<_> = occupancy.occupied_within(candidate).collect();
    let conflicting_record_ids = occupancy
        .contributors_within(candidate)
        .into_iter()
        .map(str::to_string)
        .collect();

    Ok(ConflictReport {
        conflict: !conflicting_dates.is_empty(),
        conflicting_dates,
        conflicting_record_ids,
        invalid_record_ids: occupancy.invalid_record_ids().to_vec(),
    })
}

/// Validates a candidate range against the occupied days of `records`.
///
/// The record whose id equals `exclude_id` is ignored, so revalidating an
/// edited record's own unchanged range reports no conflict. Records are
/// clipped to the candidate range, so the cost follows the candidate's
/// length however long the stored records are.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRange`] if `candidate_end` precedes
/// `candidate_start`. An inverted range is never treated as empty.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use roster_engine::calendar::validate_range;
/// use roster_engine::models::{IntervalRecord, RecordStatus};
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 10, day).unwrap();
/// let records = vec![
///     IntervalRecord::new("leave_001", "emp_001", d(5), d(7), RecordStatus::Approved),
/// ];
///
/// let report = validate_range(&records, None, d(1), d(6)).unwrap();
/// assert!(report.conflict);
/// assert_eq!(report.conflicting_dates, vec![d(5), d(6)]);
///
/// let report = validate_range(&records, Some("leave_001"), d(5), d(7)).unwrap();
/// assert!(!report.conflict);
///
/// assert!(validate_range(&records, None, d(10), d(8)).is_err());
/// ```
pub fn validate_range(
    records: &[IntervalRecord],
    exclude_id: Option<&str>,
    candidate_start: NaiveDate,
    candidate_end: NaiveDate,
) -> EngineResult<ConflictReport> {
    let candidate = DateSpan::new(candidate_start, candidate_end)?;
    let occupancy = build_occupancy_within(records, exclude_id, candidate);
    let report = check_range(&occupancy, candidate_start, candidate_end)?;

    debug!(
        candidate_start = %candidate_start,
        candidate_end = %candidate_end,
        conflicts = report.conflicting_dates.len(),
        invalid_records = report.invalid_record_ids.len(),
        "Validated candidate range"
    );

    Ok(report)
}

/// Validates a candidate range against one employee's records.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRange`] if `candidate_end` precedes
/// `candidate_start`.
pub fn validate_owner_range(
    records: &[IntervalRecord],
    owner_id: &str,
    exclude_id: Option<&str>,
    candidate_start: NaiveDate,
    candidate_end: NaiveDate,
) -> EngineResult<ConflictReport> {
    let candidate = DateSpan::new(candidate_start, candidate_end)?;
    let occupancy = build_owner_occupancy_within(records, owner_id, exclude_id, candidate);
    check_range(&occupancy, candidate_start, candidate_end)
}

/// Returns the end date a form should show after the start date changes.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use roster_engine::calendar::clamp_end_date;
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 10, day).unwrap();
///
/// // Start moved past the end: the end snaps forward.
/// assert_eq!(clamp_end_date(d(12), d(9)), d(12));
/// // Otherwise the end is kept.
/// assert_eq!(clamp_end_date(d(5), d(9)), d(9));
/// ```
pub fn clamp_end_date(candidate_start: NaiveDate, candidate_end: NaiveDate) -> NaiveDate {
    candidate_end.max(candidate_start)
}

/// Availability of a date typed or picked in a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateAvailability {
    /// The date parsed and is not occupied.
    Free(NaiveDate),
    /// The date parsed and is occupied.
    Blocked(NaiveDate),
    /// The input is not a calendar date.
    Invalid(EngineError),
}

impl DateAvailability {
    /// Returns true only for [`DateAvailability::Free`].
    ///
    /// Unparseable input is unselectable: wrongly blocking a valid date is
    /// preferable to allowing a double booking.
    pub fn is_selectable(&self) -> bool {
        matches!(self, DateAvailability::Free(_))
    }
}

/// Parses `input` and checks it against `occupancy`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use roster_engine::calendar::{DateAvailability, build_occupancy, check_date_str};
/// use roster_engine::models::{IntervalRecord, RecordStatus};
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 10, day).unwrap();
/// let records = vec![
///     IntervalRecord::new("leave_001", "emp_001", d(5), d(7), RecordStatus::Approved),
/// ];
/// let occupancy = build_occupancy(&records, None);
///
/// assert_eq!(check_date_str(&occupancy, "2025-10-06"), DateAvailability::Blocked(d(6)));
/// assert_eq!(check_date_str(&occupancy, "2025-10-08"), DateAvailability::Free(d(8)));
/// assert!(!check_date_str(&occupancy, "Invalid Date").is_selectable());
/// ```
pub fn check_date_str(occupancy: &OccupancySet, input: &str) -> DateAvailability {
    match parse_calendar_date(input) {
        Ok(date) if is_date_blocked(occupancy, date) => DateAvailability::Blocked(date),
        Ok(date) => DateAvailability::Free(date),
        Err(err) => DateAvailability::Invalid(err),
    }
}
