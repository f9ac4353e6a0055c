//! Monthly schedule statistics.
//!
//! Summarizes the records of one month into the counters shown on
//! dashboard tiles: how many record-days fall in the month, split by shift
//! type and by status, and how many hours were worked net of breaks.
//!
//! Shift times are wall-clock strings without dates. A shift whose end time
//! is earlier than its start time is taken to cross midnight; the part
//! before midnight counts toward the shift's own day and the part after
//! midnight is reported separately as carried-over hours. A custom shift
//! whose end time precedes its start for any other reason (a data-entry
//! slip, say) looks the same, so every record that went through this rule
//! is listed in [`MonthStats::midnight_crossing_ids`].
//!
//! A shift belongs to the month it starts in. Its carried-over hours are
//! reported with that month, never with the month after.

use std::collections::BTreeMap;

use chrono::{NaiveTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ShiftPresets;
use crate::error::{EngineError, EngineResult};
use crate::models::{IntervalRecord, RecordStatus, ShiftType, parse_clock_time};

use super::grid::month_span;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
const SECONDS_PER_HOUR: i64 = 60 * 60;

/// Statistics for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthStats {
    /// The year aggregated.
    pub year: i32,
    /// The 0-indexed month aggregated.
    pub month: u32,
    /// Number of record-days inside the month. A single-day shift adds one;
    /// a leave spanning three days of the month adds three.
    pub total_count: u32,
    /// Record-days per shift type. Records without a shift type are only
    /// counted in `total_count` and `count_by_status`.
    pub count_by_shift_type: BTreeMap<ShiftType, u32>,
    /// Record-days per status.
    pub count_by_status: BTreeMap<RecordStatus, u32>,
    /// Hours worked on the shifts' own days, net of breaks.
    pub total_hours: Decimal,
    /// Hours worked after midnight by shifts crossing into the next day.
    ///
    /// These hours belong to the month of the shift's start date, even when
    /// the shift starts on the last day of the month and the after-midnight
    /// part falls in the next month.
    pub carried_over_hours: Decimal,
    /// Ids of records whose end time preceded their start time.
    pub midnight_crossing_ids: Vec<String>,
    /// Ids of records whose shift times could not be parsed. They are still
    /// counted but add no hours.
    pub unparsed_record_ids: Vec<String>,
}

impl MonthStats {
    fn empty(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            total_count: 0,
            count_by_shift_type: BTreeMap::new(),
            count_by_status: BTreeMap::new(),
            total_hours: Decimal::ZERO,
            carried_over_hours: Decimal::ZERO,
            midnight_crossing_ids: Vec::new(),
            unparsed_record_ids: Vec::new(),
        }
    }

    /// Total hours worked including the part carried past midnight.
    pub fn worked_hours(&self) -> Decimal {
        self.total_hours + self.carried_over_hours
    }
}

/// Worked time of one shift, split at midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftHours {
    /// Seconds worked on the shift's own day, net of break.
    pub on_date_seconds: i64,
    /// Seconds worked after midnight, net of any break left over.
    pub carried_over_seconds: i64,
    /// True if the end time preceded the start time.
    pub crosses_midnight: bool,
}

impl ShiftHours {
    /// Hours worked on the shift's own day.
    pub fn on_date_hours(&self) -> Decimal {
        seconds_to_hours(self.on_date_seconds)
    }

    /// Hours worked after midnight.
    pub fn carried_over_hours(&self) -> Decimal {
        seconds_to_hours(self.carried_over_seconds)
    }
}

/// Computes the worked time of a shift from its wall-clock times.
///
/// When `end < start` the shift crosses midnight: the end is read as a
/// next-day time, so 24 hours are added before subtracting. The break is
/// deducted from the on-date part first and any remainder from the
/// carried-over part; neither goes below zero. Equal start and end times
/// mean a zero-length shift.
///
/// # Example
///
/// ```
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
/// use roster_engine::calendar::shift_hours;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
///
/// let day = shift_hours(t(7, 0), t(15, 0), 30);
/// assert_eq!(day.on_date_hours(), Decimal::new(75, 1)); // 7.5
///
/// let night = shift_hours(t(22, 0), t(6, 0), 30);
/// assert!(night.crosses_midnight);
/// assert_eq!(night.on_date_hours(), Decimal::new(15, 1)); // 1.5
/// assert_eq!(night.carried_over_hours(), Decimal::new(6, 0));
/// ```
pub fn shift_hours(start: NaiveTime, end: NaiveTime, break_minutes: u32) -> ShiftHours {
    let start_secs = i64::from(start.num_seconds_from_midnight());
    let end_secs = i64::from(end.num_seconds_from_midnight());
    let crosses_midnight = end_secs < start_secs;

    let (mut on_date, mut carried) = if crosses_midnight {
        (SECONDS_PER_DAY - start_secs, end_secs)
    } else {
        (end_secs - start_secs, 0)
    };

    let mut break_left = i64::from(break_minutes) * 60;
    let from_on_date = break_left.min(on_date);
    on_date -= from_on_date;
    break_left -= from_on_date;
    carried -= break_left.min(carried);

    ShiftHours {
        on_date_seconds: on_date,
        carried_over_seconds: carried,
        crosses_midnight,
    }
}

/// Aggregates the records falling in the 0-indexed `month` of `year`.
///
/// Cancelled records are ignored. Every remaining record contributes one
/// unit per day of its interval inside the month, so single-day shifts
/// count once and multi-day leave counts once per day. Shift hours come
/// from the record's own `start_time`/`end_time`; records without times add
/// no hours.
///
/// # Errors
///
/// Returns [`EngineError::InvalidMonth`] for a month above 11
/// or a year outside 1 through 9999.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use roster_engine::calendar::aggregate_month;
/// use roster_engine::models::{IntervalRecord, ShiftType};
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 10, day).unwrap();
/// let records = vec![
///     IntervalRecord::shift("s1", "emp_001", d(6), ShiftType::Morning, "07:00", "15:00", 30),
///     IntervalRecord::shift("s2", "emp_001", d(7), ShiftType::Night, "22:00", "06:00", 30),
/// ];
///
/// let stats = aggregate_month(&records, 2025, 9).unwrap();
/// assert_eq!(stats.total_count, 2);
/// assert_eq!(stats.total_hours, Decimal::new(9, 0)); // 7.5 + 1.5
/// assert_eq!(stats.carried_over_hours, Decimal::new(6, 0));
/// ```
pub fn aggregate_month(
    records: &[IntervalRecord],
    year: i32,
    month: u32,
) -> EngineResult<MonthStats> {
    aggregate(records, year, month, None)
}

/// Aggregates like [`aggregate_month`], filling in shift times from
/// `presets`.
///
/// A record with a shift type but no start or end time takes the preset
/// times and break duration for its shift type. Records with explicit
/// times keep them.
///
/// # Errors
///
/// Returns [`EngineError::InvalidMonth`] for a month above 11
/// or a year outside 1 through 9999.
pub fn aggregate_month_with_presets(
    records: &[IntervalRecord],
    year: i32,
    month: u32,
    presets: &ShiftPresets,
) -> EngineResult<MonthStats> {
    aggregate(records, year, month, Some(presets))
}

fn aggregate(
    records: &[IntervalRecord],
    year: i32,
    month: u32,
    presets: Option<&ShiftPresets>,
) -> EngineResult<MonthStats> {
    let window = month_span(year, month)?;
    let mut stats = MonthStats::empty(year, month);
    let mut on_date_seconds: i64 = 0;
    let mut carried_seconds: i64 = 0;

    for record in records
        .iter()
        .filter(|r| r.status != RecordStatus::Cancelled)
    {
        let Some(in_month) = record.span().intersection(&window) else {
            continue;
        };
        let units = in_month.len_days() as u32;

        stats.total_count += units;
        *stats.count_by_status.entry(record.status).or_insert(0) += units;
        if let Some(shift_type) = record.metadata.shift_type {
            *stats.count_by_shift_type.entry(shift_type).or_insert(0) += units;
        }

        match resolve_hours(record, presets) {
            Ok(Some(hours)) => {
                if hours.crosses_midnight {
                    stats.midnight_crossing_ids.push(record.id.clone());
                }
                on_date_seconds += hours.on_date_seconds * i64::from(units);
                carried_seconds += hours.carried_over_seconds * i64::from(units);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(record_id = %record.id, error = %err, "Shift times could not be parsed");
                stats.unparsed_record_ids.push(record.id.clone());
            }
        }
    }

    stats.total_hours = seconds_to_hours(on_date_seconds);
    stats.carried_over_hours = seconds_to_hours(carried_seconds);

    debug!(
        year,
        month,
        total_count = stats.total_count,
        total_hours = %stats.total_hours,
        "Aggregated month"
    );

    Ok(stats)
}

/// Works out the shift hours of a record, if it has any.
///
/// A record with only one of its two times set is malformed.
fn resolve_hours(
    record: &IntervalRecord,
    presets: Option<&ShiftPresets>,
) -> EngineResult<Option<ShiftHours>> {
    let meta = &record.metadata;

    match (meta.start_time.as_deref(), meta.end_time.as_deref()) {
        (Some(start), Some(end)) => {
            let start = parse_clock_time(start)?;
            let end = parse_clock_time(end)?;
            Ok(Some(shift_hours(start, end, meta.break_duration_minutes)))
        }
        (None, None) => {
            let preset = meta
                .shift_type
                .zip(presets)
                .and_then(|(shift_type, presets)| presets.get(&shift_type));
            match preset {
                Some(preset) => {
                    let start = parse_clock_time(&preset.start_time)?;
                    let end = parse_clock_time(&preset.end_time)?;
                    Ok(Some(shift_hours(start, end, preset.break_minutes)))
                }
                None => Ok(None),
            }
        }
        (Some(time), None) | (None, Some(time)) => Err(EngineError::MalformedTime {
            input: time.to_string(),
            message: "shift has only one of start_time and end_time".to_string(),
        }),
    }
}

fn seconds_to_hours(seconds: i64) -> Decimal {
    Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR)
}
