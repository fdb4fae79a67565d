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

//! # Strobe Telemetry
//!
//! Timing services built on the contracts in `strobe-core`:
//!
//! - [`source`]: the [`TimingSource`] capability facade, with a live
//!   monotonic implementation and a null one that degrades to sentinels.
//! - [`metrics`]: load times, frame rate and dropped-frame estimates.
//! - [`request`]: resource timing for outbound requests.
//! - [`timeline`]: per-task timelines attached to task results.
//! - [`service`]: the context object tying them to one timing source.

pub mod config;
pub mod metrics;
pub mod request;
pub mod service;
pub mod source;
pub mod timeline;
pub mod utils;

pub use config::{TelemetryConfig, TimingSourceKind};
pub use metrics::PerformanceAggregator;
pub use request::{RequestParameters, RequestPerformance};
pub use service::TelemetryService;
pub use source::{LiveTimingSource, NullTimingSource, TimingSource};
pub use timeline::{AttachPerfTiming, Timeline, PERF_TIMING_FIELD};
pub use utils::timer::ScopedMeasure;
