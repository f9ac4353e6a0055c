//! Leave and shift occupancy engine for hospital workforce rostering.
//!
//! This crate decides which calendar days existing leave and shift records
//! occupy, validates proposed dates and date ranges against them, lays
//! records out on month calendar grids, and computes the monthly figures
//! shown on roster dashboards. The [`api`] module serves the same logic
//! over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
