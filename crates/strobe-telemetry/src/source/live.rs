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

use crate::source::backend::{SourceStats, TimingSource};
use std::collections::HashMap;
use std::sync::RwLock;
use strobe_core::telemetry::{EntryType, PerformanceEntry, TimingError, TimingResult};
use strobe_core::utils::timer::epoch_millis;
use strobe_core::Stopwatch;

/// Timing source backed by the process monotonic clock.
///
/// Entries live in a single name-indexed table behind an `RwLock`, so one
/// source can be shared between tasks through an `Arc`. Within a name,
/// entries are kept in insertion order.
#[derive(Debug)]
pub struct LiveTimingSource {
    clock: Stopwatch,
    time_origin: f64,
    entries: RwLock<HashMap<String, Vec<PerformanceEntry>>>,
}

impl LiveTimingSource {
    /// Create a live source whose origin is derived from the wall clock.
    pub fn new() -> Self {
        let clock = Stopwatch::new();
        let time_origin = epoch_millis() - clock.elapsed_ms();
        Self {
            clock,
            time_origin,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Create a live source anchored at a host-reported origin.
    pub fn with_time_origin(time_origin: f64) -> Self {
        Self {
            clock: Stopwatch::new(),
            time_origin,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Store a resource entry the way a host would after a fetch completes.
    pub fn record_resource_timing(
        &self,
        name: impl Into<String>,
        start_time: f64,
        duration: f64,
    ) -> TimingResult<()> {
        let entry = PerformanceEntry::resource(name, start_time, duration);
        self.insert(entry)
    }

    /// Remove every resource entry, returning how many were dropped.
    pub fn clear_resource_timings(&self) -> TimingResult<usize> {
        self.remove_where(None, EntryType::Resource)
    }

    /// Get statistics about this source
    pub fn stats(&self) -> SourceStats {
        let Ok(entries) = self.entries.read() else {
            log::warn!("[LiveTimingSource] Entry table poisoned, reporting empty stats");
            return SourceStats::default();
        };

        let mut stats = SourceStats {
            distinct_names: entries.len(),
            ..SourceStats::default()
        };
        for entry in entries.values().flatten() {
            match entry.entry_type {
                EntryType::Mark => stats.mark_count += 1,
                EntryType::Measure => stats.measure_count += 1,
                EntryType::Resource => stats.resource_count += 1,
            }
        }
        stats
    }

    fn insert(&self, entry: PerformanceEntry) -> TimingResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| TimingError::StorageError("Failed to acquire write lock".to_string()))?;

        entries.entry(entry.name.clone()).or_default().push(entry);
        Ok(())
    }

    fn latest_mark(&self, label: &str) -> Option<f64> {
        let entries = self.entries.read().ok()?;
        let latest = entries
            .get(label)?
            .iter()
            .rev()
            .find(|entry| entry.entry_type == EntryType::Mark)
            .map(|entry| entry.start_time);
        latest
    }

    fn remove_where(&self, name: Option<&str>, entry_type: EntryType) -> TimingResult<usize> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| TimingError::StorageError("Failed to acquire write lock".to_string()))?;

        let mut removed = 0;
        let mut prune = |list: &mut Vec<PerformanceEntry>| {
            let before = list.len();
            list.retain(|entry| entry.entry_type != entry_type);
            removed += before - list.len();
        };

        match name {
            Some(name) => {
                if let Some(list) = entries.get_mut(name) {
                    prune(list);
                }
            }
            None => entries.values_mut().for_each(&mut prune),
        }
        entries.retain(|_, list| !list.is_empty());

        Ok(removed)
    }

    fn record(&self, entry: PerformanceEntry) -> Option<PerformanceEntry> {
        match self.insert(entry.clone()) {
            Ok(()) => Some(entry),
            Err(e) => {
                log::warn!("[LiveTimingSource] Failed to record '{}': {}", entry.name, e);
                None
            }
        }
    }

    fn clear(&self, name: Option<&str>, entry_type: EntryType) -> bool {
        match self.remove_where(name, entry_type) {
            Ok(removed) => {
                log::trace!("Cleared {removed} {entry_type} entries ({name:?})");
                true
            }
            Err(e) => {
                log::warn!("[LiveTimingSource] Failed to clear {entry_type} entries: {e}");
                false
            }
        }
    }
}

impl Default for LiveTimingSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingSource for LiveTimingSource {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn is_supported(&self) -> bool {
        true
    }

    fn now(&self) -> f64 {
        self.clock.elapsed_ms()
    }

    fn time_origin(&self) -> f64 {
        self.time_origin
    }

    fn mark(&self, name: &str) -> Option<PerformanceEntry> {
        log::trace!("mark '{name}'");
        self.record(PerformanceEntry::mark(name, self.now()))
    }

    fn measure(
        &self,
        name: &str,
        start_label: &str,
        end_label: &str,
    ) -> Option<PerformanceEntry> {
        let Some(start) = self.latest_mark(start_label) else {
            log::debug!("Cannot measure '{name}': no mark named '{start_label}'");
            return None;
        };
        let Some(end) = self.latest_mark(end_label) else {
            log::debug!("Cannot measure '{name}': no mark named '{end_label}'");
            return None;
        };
        self.record(PerformanceEntry::measure(name, start, end))
    }

    fn clear_marks(&self, name: Option<&str>) -> bool {
        self.clear(name, EntryType::Mark)
    }

    fn clear_measures(&self, name: Option<&str>) -> bool {
        self.clear(name, EntryType::Measure)
    }

    fn get_entries_by_name(&self, name: &str) -> Vec<PerformanceEntry> {
        let Ok(entries) = self.entries.read() else {
            return Vec::new();
        };
        let mut found = entries.get(name).cloned().unwrap_or_default();
        found.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_and_lookup() {
        let source = LiveTimingSource::new();

        let entry = source.mark("create").unwrap();
        assert_eq!(entry.entry_type, EntryType::Mark);

        let entries = source.get_entries_by_name("create");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], entry);
    }

    #[test]
    fn test_measure_uses_latest_marks() {
        let source = LiveTimingSource::new();
        source.mark("a").unwrap();
        let second_a = source.mark("a").unwrap();
        let b = source.mark("b").unwrap();

        let measure = source.measure("a-b", "a", "b").unwrap();
        assert_eq!(measure.start_time, second_a.start_time);
        assert_eq!(measure.duration, b.start_time - second_a.start_time);
        assert!(measure.duration >= 0.0);
    }

    #[test]
    fn test_measure_missing_mark_is_sentinel() {
        let source = LiveTimingSource::new();
        source.mark("a").unwrap();

        assert!(source.measure("a-b", "a", "b").is_none());
        assert!(source.get_entries_by_name("a-b").is_empty());
    }

    #[test]
    fn test_clear_by_name_keeps_other_types() {
        let source = LiveTimingSource::new();
        source.mark("x").unwrap();
        source.mark("y").unwrap();
        source.measure("x", "x", "y").unwrap();

        assert!(source.clear_marks(Some("x")));
        let remaining = source.get_entries_by_name("x");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].entry_type, EntryType::Measure);
        assert_eq!(source.get_entries_by_name("y").len(), 1);
    }

    #[test]
    fn test_clear_all_marks() {
        let source = LiveTimingSource::new();
        source.mark("x").unwrap();
        source.mark("y").unwrap();

        assert!(source.clear_marks(None));
        assert_eq!(source.stats().total_entries(), 0);
        assert_eq!(source.stats().distinct_names, 0);
    }

    #[test]
    fn test_resource_entries_and_stats() {
        let source = LiveTimingSource::new();
        source
            .record_resource_timing("https://example.com/a.json", 1.0, 12.0)
            .unwrap();
        source.mark("https://example.com/a.json#start").unwrap();

        let stats = source.stats();
        assert_eq!(stats.resource_count, 1);
        assert_eq!(stats.mark_count, 1);
        assert_eq!(stats.distinct_names, 2);

        assert_eq!(source.clear_resource_timings().unwrap(), 1);
        assert!(source.get_entries_by_name("https://example.com/a.json").is_empty());
    }

    #[test]
    fn test_time_origin_anchors_wall_clock() {
        let source = LiveTimingSource::new();
        let wall = epoch_millis();
        let derived = source.to_epoch_millis(source.now());
        // Both readings were taken within a few milliseconds of each other.
        assert!((derived - wall).abs() < 1000.0);

        let hosted = LiveTimingSource::with_time_origin(1234.0);
        assert_eq!(hosted.time_origin(), 1234.0);
    }

    #[test]
    fn test_entries_sorted_chronologically() {
        let source = LiveTimingSource::new();
        source.record_resource_timing("r", 50.0, 1.0).unwrap();
        source.record_resource_timing("r", 10.0, 1.0).unwrap();

        let starts: Vec<_> = source
            .get_entries_by_name("r")
            .iter()
            .map(|e| e.start_time)
            .collect();
        assert_eq!(starts, vec![10.0, 50.0]);
    }
}
