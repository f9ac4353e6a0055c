//! Core data models for the roster engine.
//!
//! This module contains the record types handed to the engine by the
//! hosting screen, plus parsing for the date and time strings they carry.

mod date;
mod record;
mod shift;

pub use date::parse_calendar_date;
pub use record::{IntervalRecord, RecordMetadata, RecordStatus};
pub use shift::{ShiftType, parse_clock_time};
