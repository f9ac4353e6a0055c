//! Error types for the roster engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions the occupancy engine can report. Errors are
//! always returned as values so callers can degrade per calendar cell
//! instead of aborting a whole view.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the roster engine.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use roster_engine::error::EngineError;
///
/// let error = EngineError::InvalidRange {
///     start: NaiveDate::from_ymd_opt(2025, 10, 10).unwrap(),
///     end: NaiveDate::from_ymd_opt(2025, 10, 8).unwrap(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid date range: end 2025-10-08 is before start 2025-10-10"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A date range whose end precedes its start.
    #[error("Invalid date range: end {end} is before start {start}")]
    InvalidRange {
        /// The start of the range.
        start: NaiveDate,
        /// The end of the range.
        end: NaiveDate,
    },

    /// A date range longer than the configured day limit.
    #[error("Date range {start} to {end} is longer than the {max_days}-day limit")]
    SpanTooLong {
        /// The start of the range.
        start: NaiveDate,
        /// The end of the range.
        end: NaiveDate,
        /// The configured limit, in days.
        max_days: u32,
    },

    /// A range checked against an occupancy set built for a narrower window.
    #[error("Date range {start} to {end} lies outside the evaluated window")]
    OutsideWindow {
        /// The start of the range.
        start: NaiveDate,
        /// The end of the range.
        end: NaiveDate,
    },

    /// A date string that could not be parsed as a calendar date.
    #[error("Malformed date '{input}': {message}")]
    MalformedDate {
        /// The raw input.
        input: String,
        /// A description of the parse failure.
        message: String,
    },

    /// A clock time string that could not be parsed.
    #[error("Malformed time '{input}': {message}")]
    MalformedTime {
        /// The raw input.
        input: String,
        /// A description of the parse failure.
        message: String,
    },

    /// A year/month pair outside the supported calendar.
    ///
    /// Months are 0-indexed (January = 0).
    #[error("Invalid month {month} for year {year}")]
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested 0-indexed month.
        month: u32,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
