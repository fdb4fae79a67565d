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

//! Per-task timelines whose snapshot rides along with the task's result.

use crate::source::TimingSource;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use strobe_core::telemetry::{TimelineSnapshot, DEFAULT_CHANNEL};

/// Field a timeline snapshot is stored under in an annotated result.
pub const PERF_TIMING_FIELD: &str = "perfTiming";

/// A result payload that can carry a timeline snapshot.
///
/// Only keyed payloads can hold the snapshot. JSON scalars and arrays are
/// handed back unannotated rather than being rewrapped, so a callback always
/// sees the shape its task produced.
pub trait AttachPerfTiming {
    /// Store `snapshot` in the payload under [`PERF_TIMING_FIELD`].
    fn attach_perf_timing(&mut self, snapshot: &TimelineSnapshot);
}

impl AttachPerfTiming for Map<String, Value> {
    fn attach_perf_timing(&mut self, snapshot: &TimelineSnapshot) {
        match serde_json::to_value(snapshot) {
            Ok(value) => {
                self.insert(PERF_TIMING_FIELD.to_string(), value);
            }
            Err(e) => log::warn!("Failed to serialize timeline snapshot: {e}"),
        }
    }
}

/// Only JSON objects are annotated; other values pass through unchanged.
impl AttachPerfTiming for Value {
    fn attach_perf_timing(&mut self, snapshot: &TimelineSnapshot) {
        if let Value::Object(map) = self {
            map.attach_perf_timing(snapshot);
        }
    }
}

/// An absent result stays absent.
impl<T: AttachPerfTiming> AttachPerfTiming for Option<T> {
    fn attach_perf_timing(&mut self, snapshot: &TimelineSnapshot) {
        if let Some(inner) = self {
            inner.attach_perf_timing(snapshot);
        }
    }
}

/// Accumulates named timestamp samples for one task.
///
/// Construction records one sample on the default channel; `finish` records
/// another and snapshots every channel together with the source's origin.
#[derive(Debug)]
pub struct Timeline {
    marks: BTreeMap<String, Vec<f64>>,
    source: Arc<dyn TimingSource>,
}

impl Timeline {
    /// Start a timeline on `source`.
    pub fn new(source: Arc<dyn TimingSource>) -> Self {
        let mut timeline = Self {
            marks: BTreeMap::new(),
            source,
        };
        timeline.mark(None);
        timeline
    }

    /// Append the current time to channel `id` (the default channel if `None`).
    pub fn mark(&mut self, id: Option<&str>) {
        if !self.source.is_supported() {
            return;
        }
        let id = id.unwrap_or(DEFAULT_CHANNEL);
        let now = self.source.now();
        self.marks.entry(id.to_string()).or_default().push(now);
    }

    /// Record a final default-channel sample and snapshot the timeline.
    ///
    /// Can be called more than once; every call appends another sample.
    pub fn finish(&mut self) -> TimelineSnapshot {
        self.mark(None);
        TimelineSnapshot {
            marks: self.marks.clone(),
            time_origin: self.source.time_origin(),
        }
    }

    /// Wrap a completion handler so the timeline is finished when the task
    /// completes and its snapshot is attached to a successful result.
    ///
    /// The returned handler finishes the timeline first, annotates `Ok`
    /// results under [`PERF_TIMING_FIELD`], passes errors through untouched,
    /// and then calls `callback`.
    pub fn wrap_callback<R, E, T, F>(mut self, callback: F) -> impl FnOnce(Result<R, E>) -> T
    where
        R: AttachPerfTiming,
        F: FnOnce(Result<R, E>) -> T,
    {
        move |result: Result<R, E>| {
            let perf_timing = self.finish();
            let result = result.map(|mut value| {
                value.attach_perf_timing(&perf_timing);
                value
            });
            callback(result)
        }
    }
}
