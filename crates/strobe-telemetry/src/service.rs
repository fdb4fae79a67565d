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

//! Service owning the process timing source and the metrics aggregator.

use crate::config::TelemetryConfig;
use crate::metrics::PerformanceAggregator;
use crate::request::{RequestParameters, RequestPerformance};
use crate::source::{select_timing_source, TimingSource};
use crate::timeline::Timeline;
use std::sync::Arc;
use strobe_core::telemetry::{PerformanceMarker, PerformanceMetrics};

/// The explicit context object for process-wide timing state.
///
/// Selects the timing source once at construction and hands it to every
/// timeline and request recorder it creates.
#[derive(Debug)]
pub struct TelemetryService {
    config: TelemetryConfig,
    source: Arc<dyn TimingSource>,
    aggregator: PerformanceAggregator,
}

impl TelemetryService {
    /// Creates a new telemetry service, probing for a timing source.
    pub fn new(config: TelemetryConfig) -> Self {
        let source = select_timing_source(&config);
        Self::with_source(config, source)
    }

    /// Creates a service on an existing timing source.
    pub fn with_source(config: TelemetryConfig, source: Arc<dyn TimingSource>) -> Self {
        let aggregator =
            PerformanceAggregator::with_framerate_target(source.clone(), config.min_framerate_target);
        Self {
            config,
            source,
            aggregator,
        }
    }

    /// Returns the configuration the service was built with.
    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }

    /// Returns the shared timing source.
    pub fn source(&self) -> &Arc<dyn TimingSource> {
        &self.source
    }

    /// Returns a reference to the metrics aggregator.
    pub fn aggregator(&self) -> &PerformanceAggregator {
        &self.aggregator
    }

    /// Returns a mutable reference to the metrics aggregator.
    pub fn aggregator_mut(&mut self) -> &mut PerformanceAggregator {
        &mut self.aggregator
    }

    /// Records a lifecycle marker.
    pub fn mark(&self, marker: PerformanceMarker) -> bool {
        self.aggregator.mark(marker)
    }

    /// Should be called once per rendered frame.
    pub fn frame(&mut self, timestamp: f64) {
        self.aggregator.frame(timestamp);
    }

    /// Computes the current metrics snapshot.
    pub fn performance_metrics(&self) -> PerformanceMetrics {
        self.aggregator.get_performance_metrics()
    }

    /// Resets frame tracking and lifecycle markers.
    pub fn clear_metrics(&mut self) {
        self.aggregator.clear_metrics();
    }

    /// Starts a timeline for a new task.
    pub fn timeline(&self) -> Timeline {
        Timeline::new(self.source.clone())
    }

    /// Starts timing `request` if it opted in to resource timing.
    pub fn request(&self, request: &RequestParameters) -> Option<RequestPerformance> {
        RequestPerformance::for_request(request, self.source.clone())
    }
}

impl Default for TelemetryService {
    fn default() -> Self {
        Self::new(TelemetryConfig::default())
    }
}
