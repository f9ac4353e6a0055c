//! Configuration types for the roster engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the `roster.yaml` configuration file.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::calendar::DateSpan;
use crate::error::{EngineError, EngineResult};
use crate::models::ShiftType;

/// Longest date range the service evaluates when nothing is configured.
pub const DEFAULT_MAX_SPAN_DAYS: u32 = 731;

/// Metadata about the organisation the roster belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganisationMetadata {
    /// Human-readable organisation name.
    pub name: String,
    /// Version or effective date of the configuration.
    pub version: String,
}

/// Default times for one shift type.
///
/// Times are wall-clock strings (`HH:MM` or `HH:MM:SS`). An end time
/// earlier than the start time means the shift crosses midnight.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShiftPreset {
    /// Display label for the shift type.
    pub label: String,
    /// Default start time.
    pub start_time: String,
    /// Default end time.
    pub end_time: String,
    /// Default unpaid break, in minutes.
    #[serde(default)]
    pub break_minutes: u32,
}

/// Shift presets keyed by shift type.
pub type ShiftPresets = BTreeMap<ShiftType, ShiftPreset>;

/// Bounds on the work a single request may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Limits {
    /// Longest candidate range or occupancy window, in days.
    #[serde(default = "default_max_span_days")]
    pub max_span_days: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_span_days: DEFAULT_MAX_SPAN_DAYS,
        }
    }
}

impl Limits {
    /// Returns `span` unchanged if it fits the day limit.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SpanTooLong`] for a longer span.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use roster_engine::calendar::DateSpan;
    /// use roster_engine::config::Limits;
    ///
    /// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
    /// let limits = Limits { max_span_days: 31 };
    ///
    /// assert!(limits.check_span(DateSpan::new(d(2025, 10, 1), d(2025, 10, 31)).unwrap()).is_ok());
    /// assert!(limits.check_span(DateSpan::new(d(2025, 10, 1), d(2025, 11, 1)).unwrap()).is_err());
    /// ```
    pub fn check_span(&self, span: DateSpan) -> EngineResult<DateSpan> {
        if span.len_days() > i64::from(self.max_span_days) {
            return Err(EngineError::SpanTooLong {
                start: span.start(),
                end: span.end(),
                max_days: self.max_span_days,
            });
        }
        Ok(span)
    }
}

fn default_max_span_days() -> u32 {
    DEFAULT_MAX_SPAN_DAYS
}

/// The complete roster configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Organisation metadata.
    pub organisation: OrganisationMetadata,
    /// Shift presets. May be empty.
    #[serde(default)]
    pub shift_types: ShiftPresets,
    /// Request limits. Defaults apply when the section is missing.
    #[serde(default)]
    pub limits: Limits,
}
