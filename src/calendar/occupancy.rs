//! Occupied-date computation.
//!
//! Builds the set of calendar days already taken by leave or shift records,
//! skipping records whose status frees their dates and, optionally, the one
//! record currently being edited.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::models::IntervalRecord;

use super::overlap::DateSpan;

/// The calendar days occupied by a collection of records.
///
/// Days are kept in ascending order together with the span each occupying
/// record contributes, so callers can ask either "is this day taken?" or
/// "which records take it?".
///
/// A set can be built for a window of interest with
/// [`build_occupancy_within`]. Records are then clipped to the window, so
/// the cost follows the window's length rather than the records' lengths.
/// Such a set knows nothing about days outside its window and reports them
/// as occupied.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use roster_engine::calendar::build_occupancy;
/// use roster_engine::models::{IntervalRecord, RecordStatus};
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 10, day).unwrap();
/// let records = vec![
///     IntervalRecord::new("leave_001", "emp_001", d(5), d(7), RecordStatus::Approved),
///     IntervalRecord::new("leave_002", "emp_001", d(9), d(9), RecordStatus::Rejected),
/// ];
///
/// let occupancy = build_occupancy(&records, None);
/// assert_eq!(occupancy.len(), 3);
/// assert!(occupancy.contains(d(6)));
/// assert!(!occupancy.contains(d(9)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancySet {
    days: BTreeSet<NaiveDate>,
    contributions: Vec<(DateSpan, String)>,
    window: Option<DateSpan>,
    invalid_record_ids: Vec<String>,
}

impl OccupancySet {
    /// Returns true if `date` is occupied.
    ///
    /// Dates outside the window of a windowed set are always occupied.
    pub fn contains(&self, date: NaiveDate) -> bool {
        !self.evaluates(DateSpan::single(date)) || self.days.contains(&date)
    }

    /// Number of distinct occupied days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns true if no day is occupied.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// The window the set was built for, if any.
    pub fn window(&self) -> Option<DateSpan> {
        self.window
    }

    /// Returns true if every day of `span` lies inside the set's window.
    pub fn evaluates(&self, span: DateSpan) -> bool {
        self.window
            .is_none_or(|window| window.contains(span.start()) && window.contains(span.end()))
    }

    /// Iterates the occupied days in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().copied()
    }

    /// Ids of the records occupying `date`, in ascending order.
    pub fn contributors(&self, date: NaiveDate) -> Vec<&str> {
        self.contributors_within(DateSpan::single(date))
    }

    /// Ids of the records occupying any day of `span`, ascending, without
    /// repeats.
    pub fn contributors_within(&self, span: DateSpan) -> Vec<&str> {
        self.contributions
            .iter()
            .filter(|(contributed, _)| contributed.overlaps(&span))
            .map(|(_, id)| id.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Occupied days within `span`, ascending.
    pub fn occupied_within(&self, span: DateSpan) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.range(span.start()..=span.end()).copied()
    }

    /// Ids of stored records whose end date precedes their start date.
    ///
    /// Such records still occupy the days between their two dates. They are
    /// listed whether or not they reach into the window.
    pub fn invalid_record_ids(&self) -> &[String] {
        &self.invalid_record_ids
    }

    fn insert_record(&mut self, record: &IntervalRecord) {
        if record.is_inverted() {
            warn!(
                record_id = %record.id,
                start_date = %record.start_date,
                end_date = %record.end_date,
                "Stored record ends before it starts; blocking the swapped range"
            );
            self.invalid_record_ids.push(record.id.clone());
        }

        let span = match self.window {
            Some(window) => record.span().intersection(&window),
            None => Some(record.span()),
        };
        if let Some(span) = span {
            self.contributions.push((span, record.id.clone()));
        }
    }

    /// Expands the contributed spans into days, merging overlaps first so
    /// every day is visited once.
    fn fill_days(&mut self) {
        let mut spans: Vec<DateSpan> = self.contributions.iter().map(|(span, _)| *span).collect();
        spans.sort_by_key(|span| span.start());

        let mut merged: Vec<DateSpan> = Vec::with_capacity(spans.len());
        for span in spans {
            match merged.last_mut() {
                Some(last) if span.start() <= last.end() => {
                    *last = DateSpan::ordered(last.start(), last.end().max(span.end()));
                }
                _ => merged.push(span),
            }
        }

        self.days = merged.iter().flat_map(|span| span.days()).collect();
    }
}

/// Builds the occupied days for a collection of records.
///
/// Records with a non-occupying status (`rejected`, `cancelled`) are
/// skipped, as is the record whose id equals `exclude_id`, so that editing
/// a record never conflicts with its own interval. Every remaining record
/// contributes each day from its start date to its end date inclusive.
///
/// The records are not filtered by owner; pass one employee's records, or
/// use [`build_owner_occupancy`]. Nothing bounds the span of a record here;
/// use [`build_occupancy_within`] for untrusted input.
pub fn build_occupancy(records: &[IntervalRecord], exclude_id: Option<&str>) -> OccupancySet {
    collect_occupancy(scoped_records(records, None, exclude_id), None)
}

/// Builds the occupied days inside `window` only.
///
/// Same as [`build_occupancy`], with every record clipped to `window`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use roster_engine::calendar::{DateSpan, build_occupancy_within};
/// use roster_engine::models::{IntervalRecord, RecordStatus};
///
/// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
/// let records = vec![IntervalRecord::new(
///     "leave_001", "emp_001", d(1, 1, 1), d(9999, 12, 31), RecordStatus::Approved,
/// )];
///
/// let occupancy = build_occupancy_within(&records, None, DateSpan::single(d(2025, 10, 6)));
/// assert_eq!(occupancy.len(), 1);
/// assert_eq!(occupancy.contributors(d(2025, 10, 6)), vec!["leave_001"]);
/// ```
pub fn build_occupancy_within(
    records: &[IntervalRecord],
    exclude_id: Option<&str>,
    window: DateSpan,
) -> OccupancySet {
    collect_occupancy(scoped_records(records, None, exclude_id), Some(window))
}

/// Builds the occupied days for one employee.
///
/// Same as [`build_occupancy`] restricted to records whose `owner_id`
/// matches `owner_id`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use roster_engine::calendar::build_owner_occupancy;
/// use roster_engine::models::{IntervalRecord, RecordStatus};
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 10, day).unwrap();
/// let records = vec![
///     IntervalRecord::new("leave_001", "emp_001", d(5), d(5), RecordStatus::Approved),
///     IntervalRecord::new("leave_002", "emp_002", d(6), d(6), RecordStatus::Approved),
/// ];
///
/// let occupancy = build_owner_occupancy(&records, "emp_001", None);
/// assert!(occupancy.contains(d(5)));
/// assert!(!occupancy.contains(d(6)));
/// ```
pub fn build_owner_occupancy(
    records: &[IntervalRecord],
    owner_id: &str,
    exclude_id: Option<&str>,
) -> OccupancySet {
    collect_occupancy(scoped_records(records, Some(owner_id), exclude_id), None)
}

/// Builds one employee's occupied days inside `window` only.
pub fn build_owner_occupancy_within(
    records: &[IntervalRecord],
    owner_id: &str,
    exclude_id: Option<&str>,
    window: DateSpan,
) -> OccupancySet {
    collect_occupancy(
        scoped_records(records, Some(owner_id), exclude_id),
        Some(window),
    )
}

/// The first through last day occupied by the matching records, or `None`
/// if no record occupies anything.
///
/// Cheap to compute, so callers can bound the size of a set before building
/// it.
pub fn occupied_extent(
    records: &[IntervalRecord],
    owner_id: Option<&str>,
    exclude_id: Option<&str>,
) -> Option<DateSpan> {
    scoped_records(records, owner_id, exclude_id)
        .map(IntervalRecord::span)
        .reduce(|a, b| DateSpan::ordered(a.start().min(b.start()), a.end().max(b.end())))
}

/// Occupying records, optionally limited to one owner, minus `exclude_id`.
fn scoped_records<'a>(
    records: &'a [IntervalRecord],
    owner_id: Option<&'a str>,
    exclude_id: Option<&'a str>,
) -> impl Iterator<Item = &'a IntervalRecord> + 'a {
    records
        .iter()
        .filter(|r| r.is_occupying())
        .filter(move |r| owner_id.is_none_or(|owner| r.owner_id == owner))
        .filter(move |r| exclude_id != Some(r.id.as_str()))
}

fn collect_occupancy<'a>(
    records: impl Iterator<Item = &'a IntervalRecord>,
    window: Option<DateSpan>,
) -> OccupancySet {
    let mut occupancy = OccupancySet {
        window,
        ..OccupancySet::default()
    };
    let mut considered = 0usize;

    for record in records {
        considered += 1;
        occupancy.insert_record(record);
    }
    occupancy.fill_days();

    debug!(
        occupying_records = considered,
        occupied_days = occupancy.len(),
        window = ?window,
        "Built occupancy set"
    );

    occupancy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordStatus;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn record(id: &str, start: &str, end: &str, status: RecordStatus) -> IntervalRecord {
        IntervalRecord::new(id, "emp_001", make_date(start), make_date(end), status)
    }

    #[test]
    fn test_empty_records_occupy_nothing() {
        let occupancy = build_occupancy(&[], None);
        assert!(occupancy.is_empty());
        assert!(occupancy.invalid_record_ids().is_empty());
    }

    #[test]
    fn test_single_day_record_adds_one_day() {
        let records = vec![record(
            "shift_001",
            "2025-10-06",
            "2025-10-06",
            RecordStatus::Scheduled,
        )];
        let occupancy = build_occupancy(&records, None);
        assert_eq!(occupancy.dates().collect::<Vec<_>>(), vec![make_date("2025-10-06")]);
    }

    #[test]
    fn test_range_crossing_month_boundary() {
        let records = vec![record("leave_001", "2025-10-30", "2025-11-02", RecordStatus::Pending)];
        let occupancy = build_occupancy(&records, None);
        assert_eq!(
            occupancy.dates().collect::<Vec<_>>(),
            vec![
                make_date("2025-10-30"),
                make_date("2025-10-31"),
                make_date("2025-11-01"),
                make_date("2025-11-02"),
            ]
        );
    }

    #[test]
    fn test_rejected_and_cancelled_are_skipped() {
        let records = vec![
            record("leave_001", "2025-10-01", "2025-10-03", RecordStatus::Rejected),
            record("leave_002", "2025-10-04", "2025-10-06", RecordStatus::Cancelled),
        ];
        assert!(build_occupancy(&records, None).is_empty());
    }

    #[test]
    fn test_every_occupying_status_counts() {
        let records = vec![
            record("r1", "2025-10-01", "2025-10-01", RecordStatus::Pending),
            record("r2", "2025-10-02", "2025-10-02", RecordStatus::Approved),
            record("r3", "2025-10-03", "2025-10-03", RecordStatus::Scheduled),
            record("r4", "2025-10-04", "2025-10-04", RecordStatus::InProgress),
            record("r5", "2025-10-05", "2025-10-05", RecordStatus::Completed),
        ];
        assert_eq!(build_occupancy(&records, None).len(), 5);
    }

    #[test]
    fn test_excluded_record_is_skipped() {
        let records = vec![
            record("leave_001", "2025-10-05", "2025-10-07", RecordStatus::Approved),
            record("leave_002", "2025-10-10", "2025-10-10", RecordStatus::Approved),
        ];
        let occupancy = build_occupancy(&records, Some("leave_001"));
        assert_eq!(occupancy.dates().collect::<Vec<_>>(), vec![make_date("2025-10-10")]);
    }

    #[test]
    fn test_overlapping_records_collapse_and_track_contributors() {
        let records = vec![
            record("leave_b", "2025-10-05", "2025-10-07", RecordStatus::Approved),
            record("leave_a", "2025-10-06", "2025-10-08", RecordStatus::Pending),
        ];
        let occupancy = build_occupancy(&records, None);

        assert_eq!(occupancy.len(), 4);
        assert_eq!(occupancy.contributors(make_date("2025-10-05")), vec!["leave_b"]);
        assert_eq!(
            occupancy.contributors(make_date("2025-10-06")),
            vec!["leave_a", "leave_b"]
        );
        assert!(occupancy.contributors(make_date("2025-10-09")).is_empty());
    }

    #[test]
    fn test_inverted_record_fails_closed() {
        let records = vec![record("leave_bad", "2025-10-07", "2025-10-05", RecordStatus::Approved)];
        let occupancy = build_occupancy(&records, None);

        assert_eq!(occupancy.len(), 3);
        assert!(occupancy.contains(make_date("2025-10-06")));
        assert_eq!(occupancy.invalid_record_ids(), ["leave_bad".to_string()]);
    }

    #[test]
    fn test_occupied_within_is_range_limited() {
        let records = vec![record("leave_001", "2025-10-01", "2025-10-10", RecordStatus::Approved)];
        let occupancy = build_occupancy(&records, None);
        let span = DateSpan::new(make_date("2025-10-09"), make_date("2025-10-12")).unwrap();

        let days: Vec<_> = occupancy.occupied_within(span).collect();
        assert_eq!(days, vec![make_date("2025-10-09"), make_date("2025-10-10")]);
    }

    #[test]
    fn test_owner_occupancy_ignores_other_employees() {
        let mut other = record("leave_002", "2025-10-06", "2025-10-06", RecordStatus::Approved);
        other.owner_id = "emp_002".to_string();
        let records = vec![
            record("leave_001", "2025-10-05", "2025-10-05", RecordStatus::Approved),
            other,
        ];

        let occupancy = build_owner_occupancy(&records, "emp_001", None);
        assert_eq!(occupancy.dates().collect::<Vec<_>>(), vec![make_date("2025-10-05")]);

        let occupancy = build_owner_occupancy(&records, "emp_003", None);
        assert!(occupancy.is_empty());
    }

    #[test]
    fn test_whole_calendar_record_clipped_to_single_day_window() {
        let records = vec![record("leave_000", "0001-01-01", "9999-12-31", RecordStatus::Approved)];
        let day = make_date("2025-10-06");

        let occupancy = build_occupancy_within(&records, None, DateSpan::single(day));

        assert_eq!(occupancy.dates().collect::<Vec<_>>(), vec![day]);
        assert_eq!(occupancy.contributors(day), vec!["leave_000"]);
        assert_eq!(occupancy.window(), Some(DateSpan::single(day)));
    }

    #[test]
    fn test_windowed_set_blocks_days_outside_window() {
        let window = DateSpan::new(make_date("2025-10-01"), make_date("2025-10-31")).unwrap();
        let occupancy = build_occupancy_within(&[], None, window);

        assert!(!occupancy.contains(make_date("2025-10-15")));
        assert!(occupancy.contains(make_date("2025-11-01")));
        assert!(occupancy.evaluates(DateSpan::single(make_date("2025-10-31"))));
        assert!(!occupancy.evaluates(
            DateSpan::new(make_date("2025-10-30"), make_date("2025-11-02")).unwrap()
        ));
    }

    #[test]
    fn test_windowed_set_matches_unwindowed_inside_window() {
        let records = vec![
            record("leave_a", "2025-09-25", "2025-10-03", RecordStatus::Approved),
            record("leave_b", "2025-10-02", "2025-10-04", RecordStatus::Pending),
            record("leave_c", "2025-10-20", "2025-11-10", RecordStatus::Scheduled),
        ];
        let window = DateSpan::new(make_date("2025-10-01"), make_date("2025-10-31")).unwrap();

        let full = build_occupancy(&records, None);
        let windowed = build_occupancy_within(&records, None, window);

        assert_eq!(
            windowed.dates().collect::<Vec<_>>(),
            full.occupied_within(window).collect::<Vec<_>>()
        );
        for date in window.days() {
            assert_eq!(windowed.contributors(date), full.contributors(date));
        }
    }

    #[test]
    fn test_inverted_record_outside_window_is_still_reported() {
        let records = vec![record("leave_bad", "2024-03-07", "2024-03-05", RecordStatus::Approved)];
        let window = DateSpan::single(make_date("2025-10-06"));

        let occupancy = build_occupancy_within(&records, None, window);

        assert!(occupancy.is_empty());
        assert_eq!(occupancy.invalid_record_ids(), ["leave_bad".to_string()]);
    }

    #[test]
    fn test_contributors_within_span() {
        let records = vec![
            record("leave_b", "2025-10-01", "2025-10-02", RecordStatus::Approved),
            record("leave_a", "2025-10-05", "2025-10-06", RecordStatus::Approved),
            record("leave_c", "2025-10-09", "2025-10-09", RecordStatus::Approved),
        ];
        let occupancy = build_occupancy(&records, None);
        let span = DateSpan::new(make_date("2025-10-02"), make_date("2025-10-05")).unwrap();

        assert_eq!(occupancy.contributors_within(span), vec!["leave_a", "leave_b"]);
    }

    #[test]
    fn test_occupied_extent() {
        let mut other = record("leave_003", "2025-12-01", "2025-12-01", RecordStatus::Approved);
        other.owner_id = "emp_002".to_string();
        let records = vec![
            record("leave_001", "2025-10-05", "2025-10-07", RecordStatus::Approved),
            record("leave_002", "2025-11-01", "2025-10-30", RecordStatus::Pending),
            record("leave_004", "2026-01-01", "2026-01-01", RecordStatus::Cancelled),
            other,
        ];

        assert_eq!(
            occupied_extent(&records, Some("emp_001"), None),
            Some(DateSpan::new(make_date("2025-10-05"), make_date("2025-11-01")).unwrap())
        );
        assert_eq!(
            occupied_extent(&records, None, Some("leave_003")).map(|s| s.end()),
            Some(make_date("2025-11-01"))
        );
        assert_eq!(occupied_extent(&records, Some("emp_009"), None), None);
    }
}
