//! Date-interval logic for leave and shift calendars.
//!
//! This module contains the closed-interval overlap primitive, the
//! occupied-date set built from leave and shift records, validation of
//! candidate dates and ranges against that set, month grid generation for
//! calendar rendering, and the monthly statistics shown on dashboards.
//! Every function here is pure: records go in, values come out.

mod aggregate;
mod conflict;
mod grid;
mod occupancy;
mod overlap;

pub use aggregate::{
    MonthStats, ShiftHours, aggregate_month, aggregate_month_with_presets, shift_hours,
};
pub use conflict::{
    ConflictReport, DateAvailability, check_date_str, check_range, clamp_end_date,
    is_date_blocked, validate_owner_range, validate_range,
};
pub use grid::{
    DAYS_PER_WEEK, GRID_CELLS, GRID_WEEKS, GridCell, annotate_grid, generate_month_grid,
    month_span, month_start, records_on,
};
pub use occupancy::{
    OccupancySet, build_occupancy, build_occupancy_within, build_owner_occupancy,
    build_owner_occupancy_within, occupied_extent,
};
pub use overlap::{DateSpan, overlaps};
