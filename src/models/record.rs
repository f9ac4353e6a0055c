//! Interval record model and related types.
//!
//! An [`IntervalRecord`] is the common shape of leave requests and shift
//! assignments as far as date occupancy is concerned: an owner, a closed
//! `[start_date, end_date]` interval, a status, and an opaque metadata
//! payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::shift::ShiftType;

/// Lifecycle status of a leave request or shift assignment.
///
/// Leave records use `Pending`, `Approved`, `Rejected` and `Cancelled`.
/// Shift records use `Scheduled`, `InProgress`, `Completed` and `Cancelled`.
///
/// # Example
///
/// ```
/// use roster_engine::models::RecordStatus;
///
/// assert!(RecordStatus::Approved.is_occupying());
/// assert!(RecordStatus::InProgress.is_occupying());
/// assert!(!RecordStatus::Rejected.is_occupying());
/// assert!(!RecordStatus::Cancelled.is_occupying());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordStatus {
    /// Leave submitted and awaiting a decision.
    Pending,
    /// Leave approved.
    Approved,
    /// Leave rejected.
    Rejected,
    /// Leave or shift withdrawn.
    Cancelled,
    /// Shift rostered but not yet started.
    Scheduled,
    /// Shift currently being worked.
    #[serde(alias = "in_progress")]
    InProgress,
    /// Shift finished.
    Completed,
}

impl RecordStatus {
    /// Returns true if a record in this status blocks the dates it covers.
    ///
    /// `Rejected` and `Cancelled` free their dates; every other status
    /// occupies them.
    pub fn is_occupying(self) -> bool {
        !matches!(self, RecordStatus::Rejected | RecordStatus::Cancelled)
    }

    /// Returns the wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            RecordStatus::Pending => "pending",
            RecordStatus::Approved => "approved",
            RecordStatus::Rejected => "rejected",
            RecordStatus::Cancelled => "cancelled",
            RecordStatus::Scheduled => "scheduled",
            RecordStatus::InProgress => "in-progress",
            RecordStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload carried alongside a record.
///
/// Occupancy and conflict checks never look at this. The schedule
/// aggregator reads the shift type, times and break duration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Shift type for roster records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_type: Option<ShiftType>,
    /// Shift start as `HH:MM` or `HH:MM:SS`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// Shift end as `HH:MM` or `HH:MM:SS`. May be earlier than the start
    /// for shifts that cross midnight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Unpaid break taken during the shift, in minutes.
    #[serde(default)]
    pub break_duration_minutes: u32,
    /// Leave category (e.g. "annual", "sick").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leave_type: Option<String>,
    /// Department the record belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A leave request or shift assignment reduced to its date interval.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use roster_engine::models::{IntervalRecord, RecordStatus};
///
/// let leave = IntervalRecord::new(
///     "leave_001",
///     "emp_001",
///     NaiveDate::from_ymd_opt(2025, 10, 5).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 10, 7).unwrap(),
///     RecordStatus::Approved,
/// );
///
/// assert!(leave.covers(NaiveDate::from_ymd_opt(2025, 10, 6).unwrap()));
/// assert!(!leave.covers(NaiveDate::from_ymd_opt(2025, 10, 8).unwrap()));
/// assert_eq!(leave.day_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalRecord {
    /// Unique identifier for the record.
    pub id: String,
    /// Identifier of the employee the record belongs to.
    pub owner_id: String,
    /// First calendar day of the record (inclusive).
    pub start_date: NaiveDate,
    /// Last calendar day of the record (inclusive).
    pub end_date: NaiveDate,
    /// Lifecycle status.
    pub status: RecordStatus,
    /// Payload not interpreted by occupancy checks.
    #[serde(default)]
    pub metadata: RecordMetadata,
}

impl IntervalRecord {
    /// Creates a record with empty metadata.
    pub fn new(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: RecordStatus,
    ) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            start_date,
            end_date,
            status,
            metadata: RecordMetadata::default(),
        }
    }

    /// Creates a single-day shift record.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use roster_engine::models::{IntervalRecord, RecordStatus, ShiftType};
    ///
    /// let shift = IntervalRecord::shift(
    ///     "shift_001",
    ///     "emp_001",
    ///     NaiveDate::from_ymd_opt(2025, 10, 6).unwrap(),
    ///     ShiftType::Night,
    ///     "22:00",
    ///     "06:00",
    ///     30,
    /// );
    /// assert!(shift.is_single_day());
    /// assert_eq!(shift.status, RecordStatus::Scheduled);
    /// ```
    pub fn shift(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        date: NaiveDate,
        shift_type: ShiftType,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        break_duration_minutes: u32,
    ) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            start_date: date,
            end_date: date,
            status: RecordStatus::Scheduled,
            metadata: RecordMetadata {
                shift_type: Some(shift_type),
                start_time: Some(start_time.into()),
                end_time: Some(end_time.into()),
                break_duration_minutes,
                ..RecordMetadata::default()
            },
        }
    }

    /// Returns the record with a different status.
    pub fn with_status(mut self, status: RecordStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns true if the record's status blocks the dates it covers.
    pub fn is_occupying(&self) -> bool {
        self.status.is_occupying()
    }

    /// Returns true if the record starts and ends on the same day.
    pub fn is_single_day(&self) -> bool {
        self.start_date == self.end_date
    }

    /// Returns true if the stored interval is inverted (`end < start`).
    pub fn is_inverted(&self) -> bool {
        self.end_date < self.start_date
    }

    /// Returns true if `date` falls within the record's interval.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Number of calendar days covered, or zero for an inverted record.
    pub fn day_count(&self) -> i64 {
        if self.is_inverted() {
            0
        } else {
            (self.end_date - self.start_date).num_days() + 1
        }
    }
}
