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

//! Provides the foundational data structures for timing telemetry.
//!
//! This module defines the "common language" of the toolkit: the entries a
//! timing source records, the fixed lifecycle markers, and the snapshots handed
//! back to callers. `strobe-telemetry` provides the services that produce them.

pub mod entry;
pub mod metrics;
pub mod timeline;

pub use self::entry::{EntryType, PerformanceEntry};
pub use self::metrics::{PerformanceMarker, PerformanceMetrics, TimingError, TimingResult};
pub use self::timeline::{TimelineSnapshot, DEFAULT_CHANNEL};
