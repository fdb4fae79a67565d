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

//! Lifecycle markers, the performance metrics snapshot and the error type.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The fixed vocabulary of lifecycle markers tracked by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceMarker {
    /// The subject was created.
    #[serde(rename = "create")]
    Create,
    /// The subject finished its initial load.
    #[serde(rename = "load")]
    Load,
    /// The subject and everything it depends on finished loading.
    #[serde(rename = "fullLoad")]
    FullLoad,
}

impl PerformanceMarker {
    /// Every marker, in lifecycle order.
    pub const ALL: [PerformanceMarker; 3] = [
        PerformanceMarker::Create,
        PerformanceMarker::Load,
        PerformanceMarker::FullLoad,
    ];

    /// Returns the label the marker is recorded under.
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceMarker::Create => "create",
            PerformanceMarker::Load => "load",
            PerformanceMarker::FullLoad => "fullLoad",
        }
    }
}

impl Display for PerformanceMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable snapshot of load and frame-rate metrics.
///
/// Produced only by querying the aggregator, and always fully populated:
/// values that cannot be computed are reported as `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    /// Milliseconds between the `create` and `load` markers.
    pub load_time: f64,
    /// Milliseconds between the `create` and `fullLoad` markers.
    pub full_load_time: f64,
    /// Frames per second derived from the mean frame time.
    pub fps: f64,
    /// Estimated share of frames lost to slow frames, in percent.
    pub percent_dropped_frames: f64,
}

/// A specialized `Result` type for timing operations that can fail.
pub type TimingResult<T> = Result<T, TimingError>;

/// An error that can occur within the timing toolkit.
///
/// Hot-path operations (marking, measuring, sampling) never return this type;
/// they degrade to sentinel values instead.
#[derive(Debug, Clone, PartialEq)]
pub enum TimingError {
    /// An error originating from a timing source's internal tables.
    StorageError(String),
    /// A configuration value was missing or malformed.
    InvalidConfig(String),
    /// An invalid operation was attempted.
    InvalidOperation(String),
}

impl Display for TimingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingError::StorageError(msg) => write!(f, "Storage error: {msg}"),
            TimingError::InvalidConfig(msg) => write!(f, "Invalid configuration: {msg}"),
            TimingError::InvalidOperation(msg) => write!(f, "Invalid operation: {msg}"),
        }
    }
}

impl std::error::Error for TimingError {}
