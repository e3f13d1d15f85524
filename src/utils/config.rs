use crate::core::{Coordinate, GeoResult, GeofenceTarget, DEFAULT_GEOFENCE_RADIUS_M};
use crate::location::PositionOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Geofence and eligibility parameters.
///
/// Passed explicitly to whoever builds targets or controllers; nothing in the
/// crate reads configuration from process-wide state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeofenceConfig {
    /// Tolerance around a session location (meters), applied to targets
    /// built through `target_at`
    pub radius_m: f64,
    /// Flicker suppression for the eligibility gate
    pub debounce: DebounceConfig,
    /// Consecutive transient positioning failures tolerated before giving up
    pub max_consecutive_failures: u32,
    /// Options used when subscribing to position updates
    pub position: PositionOptions,
}

/// When a new in/out verdict becomes externally visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Consecutive samples that must agree before the gate flips
    pub min_consecutive_samples: u32,
    /// How long a differing verdict must persist, measured from its first
    /// sample, before it flips the gate on its own (milliseconds)
    pub min_interval_ms: u64,
}

impl Default for GeofenceConfig {
    fn default() -> Self {
        Self {
            radius_m: DEFAULT_GEOFENCE_RADIUS_M,
            debounce: DebounceConfig::default(),
            max_consecutive_failures: 3,
            position: PositionOptions::watch(),
        }
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            min_consecutive_samples: 2,
            min_interval_ms: 2_000,
        }
    }
}

impl DebounceConfig {
    /// Every sample flips the gate immediately
    pub fn disabled() -> Self {
        Self {
            min_consecutive_samples: 1,
            min_interval_ms: 0,
        }
    }
}

impl GeofenceConfig {
    pub fn with_radius(radius_m: f64) -> Self {
        Self {
            radius_m,
            ..Default::default()
        }
    }

    /// Load and validate a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;

        let config: GeofenceConfig = serde_json::from_str(&content).map_err(|e| ConfigError::Serialization {
            message: e.to_string(),
        })?;
        config.validate()?;

        tracing::info!(path = %path.display(), radius_m = config.radius_m, "loaded geofence configuration");
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        self.validate()?;
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialization {
            message: e.to_string(),
        })?;

        fs::write(path, content).map_err(|e| ConfigError::Io {
            message: format!("failed to write {}: {}", path.display(), e),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.radius_m.is_finite() || self.radius_m <= 0.0 {
            return Err(ConfigError::invalid("radius_m", self.radius_m, "must be finite and greater than zero"));
        }
        if self.debounce.min_consecutive_samples == 0 {
            return Err(ConfigError::invalid(
                "debounce.min_consecutive_samples",
                self.debounce.min_consecutive_samples,
                "must be at least 1",
            ));
        }
        if self.max_consecutive_failures == 0 {
            return Err(ConfigError::invalid(
                "max_consecutive_failures",
                self.max_consecutive_failures,
                "must be at least 1",
            ));
        }
        self.position.validate()
    }

    /// Geofence for a session held at `coordinate`, using the configured radius
    pub fn target_at(&self, coordinate: Coordinate) -> GeoResult<GeofenceTarget> {
        GeofenceTarget::new(coordinate, self.radius_m)
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
    #[error("I/O error: {message}")]
    Io { message: String },
    #[error("serialization error: {message}")]
    Serialization { message: String },
}

impl ConfigError {
    fn invalid(parameter: &str, value: impl ToString, reason: &str) -> Self {
        ConfigError::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
