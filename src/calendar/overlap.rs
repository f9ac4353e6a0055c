//! Closed date interval primitives.
//!
//! Everything else in the engine composes [`overlaps`] and [`DateSpan`].
//! All intervals are closed: both the start and the end day are included.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::models::IntervalRecord;

/// Returns true if the closed intervals `[a_start, a_end]` and
/// `[b_start, b_end]` share at least one day.
///
/// Callers must pass well-formed intervals (`start <= end`); this function
/// does not validate and gives meaningless answers for inverted input.
/// Use [`DateSpan::new`] when the input is untrusted.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use roster_engine::calendar::overlaps;
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 10, day).unwrap();
///
/// // Touching on a single shared day counts as overlap.
/// assert!(overlaps(d(5), d(7), d(7), d(9)));
/// // A single-day interval inside a longer one.
/// assert!(overlaps(d(6), d(6), d(5), d(7)));
/// // Adjacent days do not overlap.
/// assert!(!overlaps(d(5), d(7), d(8), d(10)));
/// ```
pub fn overlaps(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && b_start <= a_end
}

/// A validated closed interval of calendar days.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use roster_engine::calendar::DateSpan;
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
///
/// let span = DateSpan::new(d(10, 30), d(11, 2)).unwrap();
/// assert_eq!(span.len_days(), 4);
/// assert_eq!(span.days().last(), Some(d(11, 2)));
///
/// assert!(DateSpan::new(d(11, 2), d(10, 30)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateSpan {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateSpan {
    /// Creates a span, rejecting `end < start` with
    /// [`EngineError::InvalidRange`].
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if end < start {
            return Err(EngineError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a span covering exactly one day.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Creates a span from two dates in either order.
    pub(crate) fn ordered(a: NaiveDate, b: NaiveDate) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// First day of the span.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the span.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if `date` lies within the span.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns true if the two spans share at least one day.
    pub fn overlaps(&self, other: &DateSpan) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }

    /// Returns the days common to both spans, if any.
    pub fn intersection(&self, other: &DateSpan) -> Option<DateSpan> {
        if !self.overlaps(other) {
            return None;
        }
        Some(DateSpan {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        })
    }

    /// Number of days in the span. Always at least one.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Iterates every day of the span in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let start = self.start;
        (0..self.len_days()).map(move |offset| start + Duration::days(offset))
    }
}

impl IntervalRecord {
    /// Returns the days covered by the record.
    ///
    /// An inverted record (`end_date < start_date`) is read with its ends
    /// swapped, so the result always covers every day the record names.
    /// Use [`IntervalRecord::is_inverted`] to detect that case.
    pub fn span(&self) -> DateSpan {
        DateSpan::ordered(self.start_date, self.end_date)
    }
}
