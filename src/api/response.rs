//! Response types for the roster engine API.
//!
//! This module defines the success bodies of each endpoint, the error
//! response structure, and the mapping from engine errors to HTTP status
//! codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::MonthStats;
use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<&EngineError> for ApiError {
    fn from(error: &EngineError) -> Self {
        match error {
            EngineError::InvalidRange { .. } => ApiError::with_details(
                "INVALID_RANGE",
                error.to_string(),
                "The end date must be on or after the start date",
            ),
            EngineError::SpanTooLong { max_days, .. } => ApiError::with_details(
                "SPAN_TOO_LONG",
                error.to_string(),
                format!("Narrow the range or window to at most {} days", max_days),
            ),
            EngineError::OutsideWindow { .. } => ApiError::with_details(
                "OUTSIDE_WINDOW",
                error.to_string(),
                "The range must lie inside the window the occupancy was built for",
            ),
            EngineError::MalformedDate { .. } => ApiError::with_details(
                "MALFORMED_DATE",
                error.to_string(),
                "Dates must be valid calendar dates written as YYYY-MM-DD",
            ),
            EngineError::MalformedTime { .. } => ApiError::with_details(
                "MALFORMED_TIME",
                error.to_string(),
                "Times must be written as HH:MM or HH:MM:SS",
            ),
            EngineError::InvalidMonth { .. } => ApiError::with_details(
                "INVALID_MONTH",
                error.to_string(),
                "Months are 0-indexed (January = 0) and years run from 1 to 9999",
            ),
            EngineError::ConfigNotFound { .. } => {
                ApiError::with_details("CONFIG_ERROR", "Configuration error", error.to_string())
            }
            EngineError::ConfigParseError { .. } => ApiError::with_details(
                "CONFIG_ERROR",
                "Configuration parse error",
                error.to_string(),
            ),
        }
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let status = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        };
        ApiErrorResponse {
            status,
            error: ApiError::from(&error),
        }
    }
}

/// Response body for the `/occupancy` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyResponse {
    /// Occupied days, ascending.
    pub dates: Vec<NaiveDate>,
    /// Stored records whose end date precedes their start date.
    pub invalid_record_ids: Vec<String>,
}

/// Outcome of checking a single candidate date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    /// The date is free.
    Free,
    /// The date is occupied.
    Blocked,
    /// The input was not a calendar date.
    Invalid,
}

/// Response body for the `/validate/date` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateCheckResponse {
    /// The candidate date as submitted.
    pub date: String,
    /// Availability of the date.
    pub status: AvailabilityStatus,
    /// False for blocked and invalid dates.
    pub selectable: bool,
    /// Ids of records occupying the date.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocking_record_ids: Vec<String>,
    /// Stored records whose end date precedes their start date. Empty when
    /// the candidate date itself is invalid.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invalid_record_ids: Vec<String>,
    /// Why the date could not be evaluated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<ApiError>,
}

/// One grid cell of the `/calendar` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarCellResponse {
    /// The calendar day.
    pub date: NaiveDate,
    /// True if the day is today.
    pub is_today: bool,
    /// True if the day belongs to the displayed month.
    pub is_current_month: bool,
    /// Ids of the records covering the day.
    pub record_ids: Vec<String>,
}

/// Response body for the `/calendar` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarResponse {
    /// Displayed year.
    pub year: i32,
    /// Displayed 0-indexed month.
    pub month: u32,
    /// The 42 grid cells, Sunday first.
    pub cells: Vec<CalendarCellResponse>,
    /// Statistics for the displayed month.
    pub stats: MonthStats,
}
