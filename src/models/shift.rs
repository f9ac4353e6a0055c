//! Shift type model and clock-time parsing.
//!
//! Shift records carry their times as strings (`"22:00"`), so this module
//! also owns the parsing of those strings into [`NaiveTime`] values.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The rostered shift pattern of a shift record.
///
/// # Example
///
/// ```
/// use roster_engine::models::ShiftType;
///
/// assert_eq!(ShiftType::Night.to_string(), "night");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    /// Early day shift.
    Morning,
    /// Late day shift.
    Afternoon,
    /// Overnight shift, usually crossing midnight.
    Night,
    /// Any shift with ad-hoc times.
    Custom,
}

impl ShiftType {
    /// All shift types, in display order.
    pub const ALL: [ShiftType; 4] = [
        ShiftType::Morning,
        ShiftType::Afternoon,
        ShiftType::Night,
        ShiftType::Custom,
    ];

    /// Returns the wire name of the shift type.
    pub fn as_str(self) -> &'static str {
        match self {
            ShiftType::Morning => "morning",
            ShiftType::Afternoon => "afternoon",
            ShiftType::Night => "night",
            ShiftType::Custom => "custom",
        }
    }
}

impl std::fmt::Display for ShiftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a clock time written as `HH:MM` or `HH:MM:SS`.
///
/// # Errors
///
/// Returns [`EngineError::MalformedTime`] when the input matches neither
/// format or names an impossible time.
///
/// # Example
///
/// ```
/// use chrono::NaiveTime;
/// use roster_engine::models::parse_clock_time;
///
/// assert_eq!(
///     parse_clock_time("22:00").unwrap(),
///     NaiveTime::from_hms_opt(22, 0, 0).unwrap()
/// );
/// assert_eq!(
///     parse_clock_time("06:30:15").unwrap(),
///     NaiveTime::from_hms_opt(6, 30, 15).unwrap()
/// );
/// assert!(parse_clock_time("25:00").is_err());
/// ```
pub fn parse_clock_time(input: &str) -> EngineResult<NaiveTime> {
    let trimmed = input.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|e| EngineError::MalformedTime {
            input: input.to_string(),
            message: e.to_string(),
        })
}
