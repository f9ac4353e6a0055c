//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the roster
//! configuration from YAML.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{ShiftType, parse_clock_time};

use super::types::{Limits, OrganisationMetadata, RosterConfig, ShiftPreset, ShiftPresets};

/// Name of the configuration file inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "roster.yaml";

/// Loads and provides access to the roster configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// └── roster.yaml   # Organisation metadata and shift presets
/// ```
///
/// # Example
///
/// ```no_run
/// use roster_engine::config::ConfigLoader;
/// use roster_engine::models::ShiftType;
///
/// let loader = ConfigLoader::load("./config")?;
/// if let Some(night) = loader.get_preset(ShiftType::Night) {
///     println!("Night shift: {} - {}", night.start_time, night.end_time);
/// }
/// # Ok::<(), roster_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: RosterConfig,
}

impl ConfigLoader {
    /// Loads configuration from `roster.yaml` in the specified directory.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if the file cannot be read
    /// - [`EngineError::ConfigParseError`] if the YAML is invalid, a
    ///   preset carries an unparseable time, or the day limit is zero
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let config_path = path.as_ref().join(CONFIG_FILE_NAME);
        let path_str = config_path.display().to_string();

        let content = fs::read_to_string(&config_path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let loader = Self::from_yaml_str(&content, &path_str)?;
        info!(
            path = %path_str,
            organisation = %loader.organisation().name,
            presets = loader.shift_presets().len(),
            max_span_days = loader.limits().max_span_days,
            "Loaded roster configuration"
        );
        Ok(loader)
    }

    /// Parses configuration from a YAML string.
    ///
    /// `source` names the origin of the content in error messages.
    ///
    /// # Example
    ///
    /// ```
    /// use roster_engine::config::ConfigLoader;
    ///
    /// let yaml = r#"
    /// organisation:
    ///   name: "Ward 7"
    ///   version: "2025-10"
    /// "#;
    /// let loader = ConfigLoader::from_yaml_str(yaml, "inline").unwrap();
    /// assert!(loader.shift_presets().is_empty());
    /// ```
    pub fn from_yaml_str(content: &str, source: &str) -> EngineResult<Self> {
        let config: RosterConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: source.to_string(),
                message: e.to_string(),
            })?;

        for (shift_type, preset) in &config.shift_types {
            Self::validate_preset(preset).map_err(|e| {
                EngineError::ConfigParseError {
                    path: source.to_string(),
                    message: format!("shift type '{}': {}", shift_type, e),
                }
            })?;
        }

        if config.limits.max_span_days == 0 {
            return Err(EngineError::ConfigParseError {
                path: source.to_string(),
                message: "limits.max_span_days must be at least 1".to_string(),
            });
        }

        Ok(Self { config })
    }

    fn validate_preset(preset: &ShiftPreset) -> EngineResult<()> {
        parse_clock_time(&preset.start_time)?;
        parse_clock_time(&preset.end_time)?;
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// Returns the organisation metadata.
    pub fn organisation(&self) -> &OrganisationMetadata {
        &self.config.organisation
    }

    /// Returns all shift presets.
    pub fn shift_presets(&self) -> &ShiftPresets {
        &self.config.shift_types
    }

    /// Returns the request limits.
    pub fn limits(&self) -> &Limits {
        &self.config.limits
    }

    /// Gets the preset for a shift type, if one is configured.
    pub fn get_preset(&self, shift_type: ShiftType) -> Option<&ShiftPreset> {
        self.config.shift_types.get(&shift_type)
    }
}
