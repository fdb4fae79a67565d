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

#![allow(dead_code)]

use std::sync::Mutex;
use strobe_core::telemetry::{EntryType, PerformanceEntry};
use strobe_telemetry::TimingSource;

/// Fixed origin reported by [`ManualTimingSource`].
pub const TEST_TIME_ORIGIN: f64 = 1_700_000_000_000.0;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Timing source whose clock only moves when the test advances it.
#[derive(Debug, Default)]
pub struct ManualTimingSource {
    now: Mutex<f64>,
    entries: Mutex<Vec<PerformanceEntry>>,
}

impl ManualTimingSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: f64) {
        *self.now.lock().unwrap() += ms;
    }

    pub fn report_resource(&self, name: &str, start_time: f64, duration: f64) {
        self.entries
            .lock()
            .unwrap()
            .push(PerformanceEntry::resource(name, start_time, duration));
    }

    pub fn entry_count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    fn latest_mark(&self, label: &str) -> Option<f64> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|e| e.entry_type == EntryType::Mark && e.name == label)
            .map(|e| e.start_time)
    }

    fn clear(&self, name: Option<&str>, entry_type: EntryType) -> bool {
        self.entries
            .lock()
            .unwrap()
            .retain(|e| e.entry_type != entry_type || name.is_some_and(|n| n != e.name));
        true
    }
}

impl TimingSource for ManualTimingSource {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn is_supported(&self) -> bool {
        true
    }

    fn now(&self) -> f64 {
        *self.now.lock().unwrap()
    }

    fn time_origin(&self) -> f64 {
        TEST_TIME_ORIGIN
    }

    fn mark(&self, name: &str) -> Option<PerformanceEntry> {
        let entry = PerformanceEntry::mark(name, self.now());
        self.entries.lock().unwrap().push(entry.clone());
        Some(entry)
    }

    fn measure(
        &self,
        name: &str,
        start_label: &str,
        end_label: &str,
    ) -> Option<PerformanceEntry> {
        let start = self.latest_mark(start_label)?;
        let end = self.latest_mark(end_label)?;
        let entry = PerformanceEntry::measure(name, start, end);
        self.entries.lock().unwrap().push(entry.clone());
        Some(entry)
    }

    fn clear_marks(&self, name: Option<&str>) -> bool {
        self.clear(name, EntryType::Mark)
    }

    fn clear_measures(&self, name: Option<&str>) -> bool {
        self.clear(name, EntryType::Measure)
    }

    fn get_entries_by_name(&self, name: &str) -> Vec<PerformanceEntry> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.name == name)
            .cloned()
            .collect()
    }
}
