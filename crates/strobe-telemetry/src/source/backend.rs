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

use std::fmt::Debug;
use strobe_core::telemetry::PerformanceEntry;

/// Capability facade over a host timing facility.
///
/// Every operation degrades to a sentinel (`None`, `false`, an empty `Vec`)
/// when the facility is unavailable. Callers treat the sentinel as "the
/// operation was a no-op" and never need to special-case it.
pub trait TimingSource: Send + Sync + Debug + 'static {
    /// Get a reference to this object as Any for downcasting
    fn as_any(&self) -> &dyn std::any::Any;

    /// Whether the high-resolution facility was detected at initialization.
    fn is_supported(&self) -> bool;

    /// Current time in milliseconds. Monotonic when supported, wall-clock
    /// epoch time otherwise.
    fn now(&self) -> f64;

    /// Wall-clock epoch milliseconds corresponding to `now() == 0`.
    fn time_origin(&self) -> f64;

    /// Record a mark at the current time.
    fn mark(&self, name: &str) -> Option<PerformanceEntry>;

    /// Record a measure spanning the latest marks named `start_label` and
    /// `end_label`. `None` if either mark is missing.
    fn measure(&self, name: &str, start_label: &str, end_label: &str)
        -> Option<PerformanceEntry>;

    /// Remove marks named `name`, or every mark when `name` is `None`.
    fn clear_marks(&self, name: Option<&str>) -> bool;

    /// Remove measures named `name`, or every measure when `name` is `None`.
    fn clear_measures(&self, name: Option<&str>) -> bool;

    /// All entries recorded under `name`, in chronological order.
    fn get_entries_by_name(&self, name: &str) -> Vec<PerformanceEntry>;

    // Convenience methods for common operations

    /// Duration of the measure `name` between two marks, recorded on the fly.
    fn measure_duration(&self, name: &str, start_label: &str, end_label: &str) -> Option<f64> {
        self.measure(name, start_label, end_label)
            .map(|entry| entry.duration)
    }

    /// Convert a monotonic sample from this source into wall-clock epoch ms.
    fn to_epoch_millis(&self, sample: f64) -> f64 {
        self.time_origin() + sample
    }
}

/// Statistics about the entries a source currently holds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceStats {
    /// Number of stored marks
    pub mark_count: usize,
    /// Number of stored measures
    pub measure_count: usize,
    /// Number of stored resource entries
    pub resource_count: usize,
    /// Number of distinct entry names
    pub distinct_names: usize,
}

impl SourceStats {
    /// Total number of entries of any type
    pub fn total_entries(&self) -> usize {
        self.mark_count + self.measure_count + self.resource_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock source for testing the provided methods
    #[derive(Debug)]
    struct FixedSource;

    impl TimingSource for FixedSource {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn is_supported(&self) -> bool {
            true
        }

        fn now(&self) -> f64 {
            10.0
        }

        fn time_origin(&self) -> f64 {
            5000.0
        }

        fn mark(&self, name: &str) -> Option<PerformanceEntry> {
            Some(PerformanceEntry::mark(name, self.now()))
        }

        fn measure(
            &self,
            name: &str,
            _start_label: &str,
            _end_label: &str,
        ) -> Option<PerformanceEntry> {
            Some(PerformanceEntry::measure(name, 2.0, 7.5))
        }

        fn clear_marks(&self, _name: Option<&str>) -> bool {
            true
        }

        fn clear_measures(&self, _name: Option<&str>) -> bool {
            true
        }

        fn get_entries_by_name(&self, _name: &str) -> Vec<PerformanceEntry> {
            Vec::new()
        }
    }

    #[test]
    fn test_provided_methods() {
        let source = FixedSource;
        assert_eq!(source.measure_duration("m", "a", "b"), Some(5.5));
        assert_eq!(source.to_epoch_millis(source.now()), 5010.0);
    }

    #[test]
    fn test_stats_total() {
        let stats = SourceStats {
            mark_count: 2,
            measure_count: 1,
            resource_count: 3,
            distinct_names: 4,
        };
        assert_eq!(stats.total_entries(), 6);
    }
}
