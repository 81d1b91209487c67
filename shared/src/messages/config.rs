//! Configuration types
//!
//! Every section has a `Default` so a partial JSON file only needs to name the
//! values it overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::errors::{SharedError, SharedResult};
use crate::types::Region;

/// Top-level configuration for the directory data layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub provider: ProviderSettings,
    pub fetch: FetchSettings,
    pub query: QuerySettings,
    pub projection: ProjectionSettings,
}

impl DirectoryConfig {
    /// Load configuration from a JSON file and validate it
    pub fn from_json_file(path: impl AsRef<Path>) -> SharedResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| SharedError::ConfigFile {
            message: format!("{}: {e}", path.display()),
        })?;
        let config: DirectoryConfig = serde_json::from_str(&raw).map_err(|e| SharedError::ConfigFile {
            message: format!("{}: {e}", path.display()),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SharedResult<()> {
        if !(0.0..=1.0).contains(&self.provider.failure_rate) {
            return Err(SharedError::invalid_config("provider.failure_rate", self.provider.failure_rate));
        }
        if self.fetch.timeout_ms == Some(0) {
            return Err(SharedError::invalid_config("fetch.timeout_ms", 0));
        }
        if !(0.0..=5.0).contains(&self.query.top_only_floor) {
            return Err(SharedError::invalid_config("query.top_only_floor", self.query.top_only_floor));
        }
        for region in Region::ALL {
            if !self.projection.profile(region).is_finite() {
                return Err(SharedError::invalid_config(format!("projection.{region}"), "non-finite constant"));
            }
        }
        Ok(())
    }
}

/// Behaviour of the simulated data provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Artificial delay applied to every provider call
    pub latency_ms: u64,
    /// Probability in `0.0..=1.0` that a call fails
    pub failure_rate: f64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            latency_ms: 300,
            failure_rate: 0.0,
        }
    }
}

impl ProviderSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Fetch lifecycle settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Upper bound on a single provider call; unbounded when absent
    pub timeout_ms: Option<u64>,
}

impl FetchSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySettings {
    /// Rating floor implied by "top only" mode
    pub top_only_floor: f64,
    /// Size of the best-of list
    pub best_of_limit: usize,
    /// Size of the recently-added list
    pub recent_limit: usize,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            top_only_floor: 4.0,
            best_of_limit: 5,
            recent_limit: 5,
        }
    }
}

/// Affine calibration for one region's map panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionProfile {
    pub base_top: f64,
    pub base_left: f64,
    pub origin_lat: f64,
    pub origin_lng: f64,
    pub scale_lat: f64,
    pub scale_lng: f64,
}

impl ProjectionProfile {
    pub fn is_finite(&self) -> bool {
        [
            self.base_top,
            self.base_left,
            self.origin_lat,
            self.origin_lng,
            self.scale_lat,
            self.scale_lng,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSettings {
    pub gaza: ProjectionProfile,
    pub west_bank: ProjectionProfile,
}

impl ProjectionSettings {
    pub fn profile(&self, region: Region) -> &ProjectionProfile {
        match region {
            Region::Gaza => &self.gaza,
            Region::WestBank => &self.west_bank,
        }
    }
}

impl Default for ProjectionSettings {
    // Calibrated against the observed coordinate span of each region; latitude
    // scales are negative so north ends up at the top of the panel.
    fn default() -> Self {
        Self {
            gaza: ProjectionProfile {
                base_top: 50.0,
                base_left: 50.0,
                origin_lat: 31.40,
                origin_lng: 34.39,
                scale_lat: -230.0,
                scale_lng: 230.0,
            },
            west_bank: ProjectionProfile {
                base_top: 50.0,
                base_left: 50.0,
                origin_lat: 31.95,
                origin_lng: 35.22,
                scale_lat: -70.0,
                scale_lng: 110.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        assert!(DirectoryConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"provider": {{"failure_rate": 0.25}}, "fetch": {{"timeout_ms": 1500}}}}"#).unwrap();

        let config = DirectoryConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.provider.failure_rate, 0.25);
        assert_eq!(config.provider.latency_ms, 300);
        assert_eq!(config.fetch.timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(config.projection, ProjectionSettings::default());
    }

    #[test]
    fn test_invalid_failure_rate_rejected() {
        let mut config = DirectoryConfig::default();
        config.provider.failure_rate = 1.5;
        assert!(matches!(config.validate(), Err(SharedError::InvalidConfig { .. })));
    }

    #[test]
    fn test_non_finite_projection_rejected() {
        let mut config = DirectoryConfig::default();
        config.projection.gaza.scale_lat = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = DirectoryConfig::from_json_file("/nonexistent/directory.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/directory.json"));
    }
}
