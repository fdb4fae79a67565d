// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Telemetry configuration.
//!
//! Settings can come from defaults, a JSON document, or `STROBE_*`
//! environment variables.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use strobe_core::telemetry::{TimingError, TimingResult};

/// Environment variable selecting the timing source (`auto`, `live`, `null`).
pub const ENV_TIMING_SOURCE: &str = "STROBE_TIMING_SOURCE";
/// Environment variable overriding the minimum framerate target.
pub const ENV_MIN_FRAMERATE: &str = "STROBE_MIN_FRAMERATE";
/// Environment variable overriding the log filter.
pub const ENV_LOG: &str = "STROBE_LOG";

/// Which timing source implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimingSourceKind {
    /// Probe the target once at startup.
    #[default]
    Auto,
    /// Always use the monotonic clock.
    Live,
    /// Always degrade to sentinels and wall-clock time.
    Null,
}

impl FromStr for TimingSourceKind {
    type Err = TimingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(TimingSourceKind::Auto),
            "live" => Ok(TimingSourceKind::Live),
            "null" | "none" | "off" => Ok(TimingSourceKind::Null),
            other => Err(TimingError::InvalidConfig(format!(
                "unknown timing source '{other}'"
            ))),
        }
    }
}

/// Settings for the telemetry service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Timing source selection.
    pub timing_source: TimingSourceKind,
    /// Framerate below which a frame counts as (partially) dropped.
    pub min_framerate_target: f64,
    /// Default `env_logger` filter used by binaries.
    pub log_filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            timing_source: TimingSourceKind::Auto,
            min_framerate_target: 30.0,
            log_filter: "info".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Parse and validate a JSON document. Missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> TimingResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| TimingError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read telemetry config {}", path.display()))?;
        let config = Self::from_json_str(&json)
            .with_context(|| format!("Failed to parse telemetry config {}", path.display()))?;
        Ok(config)
    }

    /// Build a configuration from `STROBE_*` environment variables.
    pub fn from_env() -> TimingResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> TimingResult<Self> {
        let mut config = Self::default();

        if let Some(kind) = lookup(ENV_TIMING_SOURCE) {
            config.timing_source = kind.parse()?;
        }
        if let Some(fps) = lookup(ENV_MIN_FRAMERATE) {
            config.min_framerate_target = fps.trim().parse().map_err(|_| {
                TimingError::InvalidConfig(format!("{ENV_MIN_FRAMERATE} is not a number: '{fps}'"))
            })?;
        }
        if let Some(filter) = lookup(ENV_LOG) {
            config.log_filter = filter;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the values are usable.
    pub fn validate(&self) -> TimingResult<()> {
        if !self.min_framerate_target.is_finite() || self.min_framerate_target <= 0.0 {
            return Err(TimingError::InvalidConfig(format!(
                "min_framerate_target must be a positive number, got {}",
                self.min_framerate_target
            )));
        }
        Ok(())
    }

    /// Frame budget in milliseconds derived from the framerate target.
    pub fn frame_time_target(&self) -> f64 {
        1000.0 / self.min_framerate_target
    }
}
