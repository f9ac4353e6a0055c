//! HTTP API module for the roster engine.
//!
//! Exposes occupancy, date and range validation, calendar grids and
//! monthly statistics as a stateless JSON service for portal screens and
//! backend validation.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CalendarRequest, DateCheckRequest, OccupancyRequest, RangeCheckRequest, StatsRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, AvailabilityStatus, CalendarCellResponse, CalendarResponse,
    DateCheckResponse, OccupancyResponse,
};
pub use state::AppState;
