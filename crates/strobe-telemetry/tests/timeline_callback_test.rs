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

mod common;

use common::{init_logger, ManualTimingSource, TEST_TIME_ORIGIN};
use crossbeam_channel::unbounded;
use serde_json::{json, Value};
use std::sync::Arc;
use std::thread;
use strobe_core::telemetry::TimelineSnapshot;
use strobe_telemetry::{Timeline, PERF_TIMING_FIELD};

#[test]
fn test_snapshot_shape() {
    // --- 1. ARRANGE ---
    init_logger();
    let source = Arc::new(ManualTimingSource::new());
    let mut timeline = Timeline::new(source.clone());

    // --- 2. ACT ---
    source.advance(3.0);
    timeline.mark(Some("x"));
    source.advance(4.0);
    timeline.mark(Some("x"));
    source.advance(5.0);
    let snapshot = timeline.finish();

    // --- 3. ASSERT ---
    assert_eq!(snapshot.channel("x"), Some(&[3.0, 7.0][..]));
    assert_eq!(snapshot.default_channel(), &[0.0, 12.0]);
    assert_eq!(snapshot.time_origin, TEST_TIME_ORIGIN);
}

#[test]
fn test_finish_runs_between_completion_and_callback() {
    // --- 1. ARRANGE ---
    init_logger();
    let source = Arc::new(ManualTimingSource::new());
    let timeline = Timeline::new(source.clone());
    let (tx, rx) = unbounded::<Result<Value, String>>();
    let callback = timeline.wrap_callback(move |result: Result<Value, String>| {
        tx.send(result).unwrap();
    });

    // --- 2. ACT ---
    // The worker only knows about its completion handler, not about timing.
    let worker_source = source.clone();
    let worker = thread::spawn(move || {
        worker_source.advance(42.0);
        callback(Ok(json!({ "a": 1 })));
    });
    worker.join().unwrap();
    let result = rx.recv().unwrap().unwrap();

    // --- 3. ASSERT ---
    assert_eq!(result["a"], 1);
    let snapshot: TimelineSnapshot =
        serde_json::from_value(result[PERF_TIMING_FIELD].clone()).unwrap();
    assert_eq!(snapshot.default_channel(), &[0.0, 42.0]);
    assert_eq!(snapshot.time_origin, TEST_TIME_ORIGIN);
}

#[test]
fn test_error_passes_through_without_timing() {
    init_logger();
    let source = Arc::new(ManualTimingSource::new());
    let timeline = Timeline::new(source);

    let callback = timeline.wrap_callback(|result: Result<Option<Value>, String>| result);
    let result = callback(Err("aborted".to_string()));

    assert_eq!(result, Err("aborted".to_string()));
}

#[test]
fn test_dropped_wrapper_never_finishes() {
    init_logger();
    let source = Arc::new(ManualTimingSource::new());
    let timeline = Timeline::new(source.clone());

    let callback = timeline.wrap_callback(|result: Result<Value, ()>| result);
    drop(callback);

    // Timelines never write to the source's entry tables.
    assert_eq!(source.entry_count(), 0);
}
