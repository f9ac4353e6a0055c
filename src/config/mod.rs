//! Configuration loading and management for the roster engine.
//!
//! This module loads the roster configuration from YAML: organisation
//! metadata, the default times of each shift type, and request limits.
//!
//! # Example
//!
//! ```no_run
//! use roster_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Loaded roster for: {}", config.organisation().name);
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader};
pub use types::{
    DEFAULT_MAX_SPAN_DAYS, Limits, OrganisationMetadata, RosterConfig, ShiftPreset, ShiftPresets,
};
