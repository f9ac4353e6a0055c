//! HTTP request handlers for the roster engine API.
//!
//! This module contains the handler functions for all API endpoints. Each
//! handler recomputes everything from the records in its request body.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Local;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calendar::{
    DateAvailability, DateSpan, OccupancySet, aggregate_month_with_presets, annotate_grid,
    build_occupancy, build_occupancy_within, build_owner_occupancy, build_owner_occupancy_within,
    check_date_str, check_range, occupied_extent, records_on,
};
use crate::error::EngineError;
use crate::models::{IntervalRecord, parse_calendar_date};

use super::request::{
    CalendarRequest, DateCheckRequest, OccupancyRequest, RangeCheckRequest, StatsRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, AvailabilityStatus, CalendarCellResponse, CalendarResponse,
    DateCheckResponse, OccupancyResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/occupancy", post(occupancy_handler))
        .route("/validate/date", post(validate_date_handler))
        .route("/validate/range", post(validate_range_handler))
        .route("/calendar", post(calendar_handler))
        .route("/stats", post(stats_handler))
        .with_state(state)
}

/// Handler for POST /occupancy.
///
/// With a `start`/`end` window the records are clipped to it. Without one,
/// the days from the earliest to the latest occupied day must fit the
/// configured limit.
async fn occupancy_handler(
    State(state): State<AppState>,
    payload: Result<Json<OccupancyRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing occupancy request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let limits = state.config().limits();
    let owner_id = request.owner_id.as_deref();
    let exclude_id = request.exclude_id.as_deref();

    let window = match (request.start, request.end) {
        (Some(start), Some(end)) => {
            match DateSpan::new(start, end).and_then(|span| limits.check_span(span)) {
                Ok(span) => Some(span),
                Err(err) => return engine_error_response(err, correlation_id),
            }
        }
        (None, None) => {
            let extent = occupied_extent(&request.records, owner_id, exclude_id);
            if let Some(Err(err)) = extent.map(|span| limits.check_span(span)) {
                return engine_error_response(err, correlation_id);
            }
            None
        }
        _ => {
            return bad_request(
                ApiError::validation_error("start and end must be given together"),
                correlation_id,
            );
        }
    };

    let occupancy = scoped_occupancy(&request.records, owner_id, exclude_id, window);

    info!(
        correlation_id = %correlation_id,
        records = request.records.len(),
        occupied_days = occupancy.len(),
        invalid_records = occupancy.invalid_record_ids().len(),
        "Occupancy computed"
    );

    json_ok(OccupancyResponse {
        dates: occupancy.dates().collect(),
        invalid_record_ids: occupancy.invalid_record_ids().to_vec(),
    })
}

/// Handler for POST /validate/date.
///
/// Always answers 200: a malformed date is reported as `invalid` and not
/// selectable, so the form can keep rendering the rest of the calendar.
async fn validate_date_handler(
    payload: Result<Json<DateCheckRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing date validation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    // Only the candidate day is evaluated; an unparseable date needs no records.
    let occupancy = match parse_calendar_date(&request.date) {
        Ok(date) => scoped_occupancy(
            &request.records,
            request.owner_id.as_deref(),
            request.exclude_id.as_deref(),
            Some(DateSpan::single(date)),
        ),
        Err(_) => OccupancySet::default(),
    };
    let availability = check_date_str(&occupancy, &request.date);
    let selectable = availability.is_selectable();

    let (status, blocking_record_ids, reason) = match availability {
        DateAvailability::Free(_) => (AvailabilityStatus::Free, Vec::new(), None),
        DateAvailability::Blocked(date) => (
            AvailabilityStatus::Blocked,
            occupancy
                .contributors(date)
                .into_iter()
                .map(str::to_string)
                .collect(),
            None,
        ),
        DateAvailability::Invalid(err) => {
            warn!(
                correlation_id = %correlation_id,
                date = %request.date,
                error = %err,
                "Candidate date is malformed; treating as blocked"
            );
            (AvailabilityStatus::Invalid, Vec::new(), Some(ApiError::from(&err)))
        }
    };

    json_ok(DateCheckResponse {
        date: request.date,
        status,
        selectable,
        blocking_record_ids,
        invalid_record_ids: occupancy.invalid_record_ids().to_vec(),
        reason,
    })
}

/// Handler for POST /validate/range.
async fn validate_range_handler(
    State(state): State<AppState>,
    payload: Result<Json<RangeCheckRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing range validation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let candidate = match (
        parse_calendar_date(&request.start),
        parse_calendar_date(&request.end),
    ) {
        (Ok(start), Ok(end)) => DateSpan::new(start, end),
        (Err(err), _) | (_, Err(err)) => Err(err),
    }
    .and_then(|span| state.config().limits().check_span(span));

    let candidate = match candidate {
        Ok(span) => span,
        Err(err) => return engine_error_response(err, correlation_id),
    };

    let occupancy = scoped_occupancy(
        &request.records,
        request.owner_id.as_deref(),
        request.exclude_id.as_deref(),
        Some(candidate),
    );

    match check_range(&occupancy, candidate.start(), candidate.end()) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                start = %candidate.start(),
                end = %candidate.end(),
                conflict = report.conflict,
                conflicting_days = report.conflicting_dates.len(),
                invalid_records = report.invalid_record_ids.len(),
                "Range validated"
            );
            json_ok(report)
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /calendar.
async fn calendar_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalendarRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calendar request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let started = Instant::now();
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());

    let cells = match annotate_grid(request.year, request.month, today) {
        Ok(cells) => cells,
        Err(err) => return engine_error_response(err, correlation_id),
    };
    let stats = match aggregate_month_with_presets(
        &request.records,
        request.year,
        request.month,
        state.config().shift_presets(),
    ) {
        Ok(stats) => stats,
        Err(err) => return engine_error_response(err, correlation_id),
    };

    let cells = cells
        .into_iter()
        .map(|cell| CalendarCellResponse {
            date: cell.date,
            is_today: cell.is_today,
            is_current_month: cell.is_current_month,
            record_ids: records_on(&request.records, cell.date)
                .into_iter()
                .map(|record| record.id.clone())
                .collect(),
        })
        .collect();

    info!(
        correlation_id = %correlation_id,
        year = request.year,
        month = request.month,
        records = request.records.len(),
        duration_us = started.elapsed().as_micros(),
        "Calendar rendered"
    );

    json_ok(CalendarResponse {
        year: request.year,
        month: request.month,
        cells,
        stats,
    })
}

/// Handler for POST /stats.
async fn stats_handler(
    State(state): State<AppState>,
    payload: Result<Json<StatsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing stats request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match aggregate_month_with_presets(
        &request.records,
        request.year,
        request.month,
        state.config().shift_presets(),
    ) {
        Ok(stats) => {
            info!(
                correlation_id = %correlation_id,
                total_count = stats.total_count,
                total_hours = %stats.total_hours,
                "Month aggregated"
            );
            json_ok(stats)
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Builds the occupancy set for a request, optionally limited to one owner
/// and to a window of days.
fn scoped_occupancy(
    records: &[IntervalRecord],
    owner_id: Option<&str>,
    exclude_id: Option<&str>,
    window: Option<DateSpan>,
) -> OccupancySet {
    match (owner_id, window) {
        (Some(owner_id), Some(window)) => {
            build_owner_occupancy_within(records, owner_id, exclude_id, window)
        }
        (Some(owner_id), None) => build_owner_occupancy(records, owner_id, exclude_id),
        (None, Some(window)) => build_occupancy_within(records, exclude_id, window),
        (None, None) => build_occupancy(records, exclude_id),
    }
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request rejected");
    let api_error: ApiErrorResponse = err.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    bad_request(error, correlation_id)
}

fn bad_request(error: ApiError, correlation_id: Uuid) -> Response {
    warn!(correlation_id = %correlation_id, code = %error.code, "Bad request");
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::RecordStatus;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::NaiveDate;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config").expect("Failed to load config");
        AppState::new(config)
    }

    /// The shipped configuration with a one-week day limit.
    fn create_week_limited_state() -> AppState {
        let yaml = std::fs::read_to_string("./config/roster.yaml")
            .unwrap()
            .replace("max_span_days: 731", "max_span_days: 7");
        let config = ConfigLoader::from_yaml_str(&yaml, "week-limit").unwrap();
        AppState::new(config)
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    async fn send(
        state: AppState,
        uri: &str,
        content_type: Option<&str>,
        body: String,
    ) -> Response {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header("Content-Type", content_type);
        }
        create_router(state)
            .oneshot(builder.body(Body::from(body)).unwrap())
            .await
            .unwrap()
    }

    async fn error_body(response: Response) -> ApiError {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    // ------------------------------------------------------------------
    // JSON rejection mapping
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_syntax_error_maps_to_malformed_json() {
        let response = send(
            create_test_state(),
            "/validate/range",
            Some("application/json"),
            "{invalid json".to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let error = error_body(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
        assert!(error.message.starts_with("Invalid JSON syntax"));
    }

    #[tokio::test]
    async fn test_missing_field_maps_to_validation_error() {
        let body = r#"{"records": [], "start": "2025-10-06"}"#.to_string();
        let response = send(
            create_test_state(),
            "/validate/range",
            Some("application/json"),
            body,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = error_body(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("end"));
    }

    #[tokio::test]
    async fn test_wrong_field_type_maps_to_malformed_json() {
        let body = r#"{"records": [], "year": "2025", "month": 9}"#.to_string();
        let response = send(create_test_state(), "/stats", Some("application/json"), body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_body(response).await.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_unknown_status_maps_to_malformed_json() {
        let body = r#"{
            "records": [{
                "id": "leave_001",
                "owner_id": "emp_001",
                "start_date": "2025-10-06",
                "end_date": "2025-10-08",
                "status": "on_hold"
            }],
            "date": "2025-10-07"
        }"#
        .to_string();
        let response = send(
            create_test_state(),
            "/validate/date",
            Some("application/json"),
            body,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_body(response).await.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_content_type_is_rejected() {
        let body = r#"{"records": [], "date": "2025-10-07"}"#.to_string();
        let response = send(create_test_state(), "/validate/date", None, body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = error_body(response).await;
        assert_eq!(error.code, "MISSING_CONTENT_TYPE");
        assert_eq!(error.message, "Content-Type must be application/json");
    }

    #[tokio::test]
    async fn test_wrong_content_type_is_rejected() {
        let body = r#"{"records": [], "date": "2025-10-07"}"#.to_string();
        let response = send(create_test_state(), "/validate/date", Some("text/plain"), body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_body(response).await.code, "MISSING_CONTENT_TYPE");
    }

    // ------------------------------------------------------------------
    // Day limit and windows
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_range_over_configured_limit_is_rejected() {
        let body = serde_json::json!({
            "records": [],
            "start": "2025-10-01",
            "end": "2025-10-08",
        });
        let response = send(
            create_week_limited_state(),
            "/validate/range",
            Some("application/json"),
            body.to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = error_body(response).await;
        assert_eq!(error.code, "SPAN_TOO_LONG");
        assert!(error.details.unwrap().contains("7 days"));
    }

    #[tokio::test]
    async fn test_range_at_configured_limit_is_accepted() {
        let body = serde_json::json!({
            "records": [],
            "start": "2025-10-01",
            "end": "2025-10-07",
        });
        let response = send(
            create_week_limited_state(),
            "/validate/range",
            Some("application/json"),
            body.to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_occupancy_without_window_checks_extent() {
        let records = vec![
            IntervalRecord::new(
                "leave_001",
                "emp_001",
                make_date("2025-10-01"),
                make_date("2025-10-02"),
                RecordStatus::Approved,
            ),
            IntervalRecord::new(
                "leave_002",
                "emp_001",
                make_date("2025-10-20"),
                make_date("2025-10-21"),
                RecordStatus::Approved,
            ),
        ];
        let body = serde_json::json!({ "records": records });
        let response = send(
            create_week_limited_state(),
            "/occupancy",
            Some("application/json"),
            body.to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_body(response).await.code, "SPAN_TOO_LONG");
    }

    #[tokio::test]
    async fn test_occupancy_window_clips_records() {
        let records = vec![IntervalRecord::new(
            "leave_001",
            "emp_001",
            make_date("0001-01-01"),
            make_date("9999-12-31"),
            RecordStatus::Approved,
        )];
        let body = serde_json::json!({
            "records": records,
            "start": "2025-10-06",
            "end": "2025-10-08",
        });
        let response = send(
            create_week_limited_state(),
            "/occupancy",
            Some("application/json"),
            body.to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let occupancy: OccupancyResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            occupancy.dates,
            vec![
                make_date("2025-10-06"),
                make_date("2025-10-07"),
                make_date("2025-10-08"),
            ]
        );
    }

    #[tokio::test]
    async fn test_occupancy_half_window_is_a_validation_error() {
        let body = serde_json::json!({ "records": [], "start": "2025-10-06" });
        let response = send(
            create_test_state(),
            "/occupancy",
            Some("application/json"),
            body.to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = error_body(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert_eq!(error.message, "start and end must be given together");
    }

    #[tokio::test]
    async fn test_inverted_occupancy_window_is_rejected() {
        let body = serde_json::json!({
            "records": [],
            "start": "2025-10-08",
            "end": "2025-10-06",
        });
        let response = send(
            create_test_state(),
            "/occupancy",
            Some("application/json"),
            body.to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_body(response).await.code, "INVALID_RANGE");
    }
}
