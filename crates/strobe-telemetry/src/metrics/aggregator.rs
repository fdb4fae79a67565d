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

//! Aggregation of lifecycle markers and frame timings.

use crate::source::TimingSource;
use std::sync::Arc;
use strobe_core::telemetry::{PerformanceMarker, PerformanceMetrics};

/// Name of the measure from `create` to `load`.
pub const LOAD_TIME_MEASURE: &str = "loadTime";
/// Name of the measure from `create` to `fullLoad`.
pub const FULL_LOAD_TIME_MEASURE: &str = "fullLoadTime";
/// Framerate used when no target is configured.
pub const DEFAULT_MIN_FRAMERATE_TARGET: f64 = 30.0;

/// Tracks lifecycle markers and frame timestamps for one subject, and derives
/// load times, frame rate and a dropped-frame estimate from them.
///
/// Lifecycle: `new` (empty) → `mark`/`frame` → `get_performance_metrics`
/// → `clear_metrics`, repeatable.
#[derive(Debug)]
pub struct PerformanceAggregator {
    source: Arc<dyn TimingSource>,
    last_frame_time: Option<f64>,
    frame_times: Vec<f64>,
    frame_time_target: f64,
}

impl PerformanceAggregator {
    /// Create an aggregator with the default 30fps target.
    pub fn new(source: Arc<dyn TimingSource>) -> Self {
        Self::with_framerate_target(source, DEFAULT_MIN_FRAMERATE_TARGET)
    }

    /// Create an aggregator that counts frames slower than
    /// `min_framerate_target` as dropped.
    ///
    /// A target that is not a positive finite number falls back to
    /// [`DEFAULT_MIN_FRAMERATE_TARGET`].
    pub fn with_framerate_target(source: Arc<dyn TimingSource>, min_framerate_target: f64) -> Self {
        let min_framerate_target =
            if min_framerate_target.is_finite() && min_framerate_target > 0.0 {
                min_framerate_target
            } else {
                log::warn!(
                    "Invalid framerate target {min_framerate_target}, using {DEFAULT_MIN_FRAMERATE_TARGET}"
                );
                DEFAULT_MIN_FRAMERATE_TARGET
            };
        Self {
            source,
            last_frame_time: None,
            frame_times: Vec::new(),
            frame_time_target: 1000.0 / min_framerate_target,
        }
    }

    /// Record a lifecycle marker at the source's current time.
    ///
    /// Returns whether the source recorded it.
    pub fn mark(&self, marker: PerformanceMarker) -> bool {
        self.source.mark(marker.as_str()).is_some()
    }

    /// Register a rendered frame. The first frame only seeds the baseline.
    pub fn frame(&mut self, timestamp: f64) {
        if let Some(last) = self.last_frame_time {
            self.frame_times.push(timestamp - last);
        }
        self.last_frame_time = Some(timestamp);
    }

    /// Reset frame tracking and remove the lifecycle markers and load measures.
    pub fn clear_metrics(&mut self) {
        self.last_frame_time = None;
        self.frame_times.clear();
        self.source.clear_measures(Some(LOAD_TIME_MEASURE));
        self.source.clear_measures(Some(FULL_LOAD_TIME_MEASURE));

        for marker in PerformanceMarker::ALL {
            self.source.clear_marks(Some(marker.as_str()));
        }
        log::debug!("Performance metrics cleared");
    }

    /// Compute the current metrics snapshot.
    ///
    /// Values that are undefined (missing markers, fewer than two frames)
    /// are reported as `0.0`.
    pub fn get_performance_metrics(&self) -> PerformanceMetrics {
        let load_time = self.measure_between(LOAD_TIME_MEASURE, PerformanceMarker::Load);
        let full_load_time =
            self.measure_between(FULL_LOAD_TIME_MEASURE, PerformanceMarker::FullLoad);

        let total_frames = self.frame_times.len() as f64;
        if self.frame_times.is_empty() {
            log::warn!("No frame intervals recorded, reporting 0 fps");
            return PerformanceMetrics {
                load_time,
                full_load_time,
                fps: 0.0,
                percent_dropped_frames: 0.0,
            };
        }

        let avg_frame_time = self.frame_times.iter().sum::<f64>() / total_frames / 1000.0;
        let fps = if avg_frame_time > 0.0 {
            1.0 / avg_frame_time
        } else {
            0.0
        };

        // count frames that missed the framerate target
        let target = self.frame_time_target;
        let dropped_frames: f64 = self
            .frame_times
            .iter()
            .filter(|&&frame_time| frame_time > target)
            .map(|frame_time| (frame_time - target) / target)
            .sum();
        let percent_dropped_frames = dropped_frames / (total_frames + dropped_frames) * 100.0;

        PerformanceMetrics {
            load_time,
            full_load_time,
            fps,
            percent_dropped_frames,
        }
    }

    /// Frame intervals recorded so far, oldest first.
    pub fn frame_times(&self) -> &[f64] {
        &self.frame_times
    }

    /// Number of frame intervals recorded so far.
    pub fn frame_count(&self) -> usize {
        self.frame_times.len()
    }

    /// Timestamp of the most recent frame, if any.
    pub fn last_frame_time(&self) -> Option<f64> {
        self.last_frame_time
    }

    /// Frame budget in milliseconds.
    pub fn frame_time_target(&self) -> f64 {
        self.frame_time_target
    }

    /// The timing source markers are recorded on.
    pub fn source(&self) -> &Arc<dyn TimingSource> {
        &self.source
    }

    fn measure_between(&self, name: &str, end: PerformanceMarker) -> f64 {
        // keep one measure per name across repeated queries
        self.source.clear_measures(Some(name));
        self.source
            .measure_duration(name, PerformanceMarker::Create.as_str(), end.as_str())
            .unwrap_or_else(|| {
                log::debug!("Measure '{name}' unavailable, reporting 0");
                0.0
            })
    }
}
