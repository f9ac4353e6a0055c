//! Request types for the roster engine API.
//!
//! Every request carries the records to evaluate; the service keeps no
//! record state of its own. Candidate dates arrive as strings so malformed
//! input can be reported instead of rejected at deserialization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::IntervalRecord;

/// Request body for the `/occupancy` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyRequest {
    /// Records to evaluate.
    #[serde(default)]
    pub records: Vec<IntervalRecord>,
    /// Id of a record being edited, which must not block its own dates.
    #[serde(default)]
    pub exclude_id: Option<String>,
    /// Restricts evaluation to one employee's records.
    #[serde(default)]
    pub owner_id: Option<String>,
    /// First day of the window to evaluate. Must be given with `end`.
    #[serde(default)]
    pub start: Option<NaiveDate>,
    /// Last day of the window to evaluate. Must be given with `start`.
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

/// Request body for the `/validate/date` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateCheckRequest {
    /// Records to evaluate.
    #[serde(default)]
    pub records: Vec<IntervalRecord>,
    /// Id of a record being edited.
    #[serde(default)]
    pub exclude_id: Option<String>,
    /// Restricts evaluation to one employee's records.
    #[serde(default)]
    pub owner_id: Option<String>,
    /// Candidate date as `YYYY-MM-DD`.
    pub date: String,
}

/// Request body for the `/validate/range` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeCheckRequest {
    /// Records to evaluate.
    #[serde(default)]
    pub records: Vec<IntervalRecord>,
    /// Id of a record being edited.
    #[serde(default)]
    pub exclude_id: Option<String>,
    /// Restricts evaluation to one employee's records.
    #[serde(default)]
    pub owner_id: Option<String>,
    /// First candidate day as `YYYY-MM-DD`.
    pub start: String,
    /// Last candidate day as `YYYY-MM-DD`.
    pub end: String,
}

/// Request body for the `/calendar` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarRequest {
    /// Year to display.
    pub year: i32,
    /// 0-indexed month to display (January = 0).
    pub month: u32,
    /// Records to place on the grid.
    #[serde(default)]
    pub records: Vec<IntervalRecord>,
    /// The day to flag as today. Defaults to the server's local date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Request body for the `/stats` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsRequest {
    /// Year to aggregate.
    pub year: i32,
    /// 0-indexed month to aggregate (January = 0).
    pub month: u32,
    /// Records to aggregate.
    #[serde(default)]
    pub records: Vec<IntervalRecord>,
}
