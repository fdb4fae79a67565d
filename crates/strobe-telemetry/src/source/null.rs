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

use crate::source::backend::TimingSource;
use strobe_core::telemetry::PerformanceEntry;
use strobe_core::utils::timer::epoch_millis;

/// Timing source used when no high-resolution facility is available.
///
/// Every recording operation is a no-op returning its sentinel; `now()`
/// falls back to wall-clock epoch time.
#[derive(Debug, Clone, Copy)]
pub struct NullTimingSource {
    time_origin: f64,
}

impl NullTimingSource {
    /// Create a null source; its origin is the wall-clock time of creation.
    pub fn new() -> Self {
        Self {
            time_origin: epoch_millis(),
        }
    }
}

impl Default for NullTimingSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingSource for NullTimingSource {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn is_supported(&self) -> bool {
        false
    }

    fn now(&self) -> f64 {
        epoch_millis()
    }

    fn time_origin(&self) -> f64 {
        self.time_origin
    }

    fn mark(&self, _name: &str) -> Option<PerformanceEntry> {
        None
    }

    fn measure(
        &self,
        _name: &str,
        _start_label: &str,
        _end_label: &str,
    ) -> Option<PerformanceEntry> {
        None
    }

    fn clear_marks(&self, _name: Option<&str>) -> bool {
        false
    }

    fn clear_measures(&self, _name: Option<&str>) -> bool {
        false
    }

    fn get_entries_by_name(&self, _name: &str) -> Vec<PerformanceEntry> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_operation_is_a_sentinel() {
        let source = NullTimingSource::new();

        assert!(!source.is_supported());
        assert!(source.mark("create").is_none());
        assert!(source.measure("loadTime", "create", "load").is_none());
        assert!(source.measure_duration("loadTime", "create", "load").is_none());
        assert!(!source.clear_marks(None));
        assert!(!source.clear_measures(Some("loadTime")));
        assert!(source.get_entries_by_name("create").is_empty());
    }

    #[test]
    fn test_now_falls_back_to_wall_clock() {
        let source = NullTimingSource::new();
        assert!(source.now() >= source.time_origin());
        // 2020-01-01T00:00:00Z
        assert!(source.now() > 1_577_836_800_000.0);
    }

    #[test]
    fn test_now_reads_wall_clock() {
        let before = epoch_millis();
        let source = NullTimingSource::default();
        let now = source.now();
        let after = epoch_millis();

        assert!(before <= source.time_origin());
        assert!(source.time_origin() <= now && now <= after);
    }
}
