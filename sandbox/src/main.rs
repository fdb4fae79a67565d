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

// Strobe Sandbox
// Drives a simulated map session through the telemetry service.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use strobe_core::telemetry::PerformanceMarker;
use strobe_telemetry::{
    RequestParameters, ScopedMeasure, TelemetryConfig, TelemetryService, TimingSource,
};
use tokio::sync::oneshot;

const FRAME_COUNT: usize = 90;
const SLOW_FRAME_EVERY: usize = 30;

/// Renders simulated frames, with an occasional stall.
fn run_frame_loop(service: &mut TelemetryService) {
    for i in 0..FRAME_COUNT {
        let frame_ms = if i > 0 && i % SLOW_FRAME_EVERY == 0 { 45 } else { 8 };
        thread::sleep(Duration::from_millis(frame_ms));
        let timestamp = service.source().now();
        service.frame(timestamp);
    }
}

/// Fetches a simulated resource on a blocking worker.
async fn fetch_style(service: &TelemetryService) -> Result<()> {
    let params = RequestParameters::new("https://api.example.com/styles/v1/streets")
        .with_header("Accept", "application/json")
        .with_resource_timing();
    let recorder = service
        .request(&params)
        .context("request did not opt in to resource timing")?;

    tokio::task::spawn_blocking(|| thread::sleep(Duration::from_millis(25)))
        .await
        .context("style fetch worker panicked")?;

    for entry in recorder.finish() {
        log::info!(
            "{} [{}] took {:.2}ms",
            entry.name,
            entry.entry_type,
            entry.duration
        );
    }
    Ok(())
}

/// Parses a simulated tile on a blocking worker; the timeline snapshot rides
/// along with the worker's result.
async fn parse_tile(service: &TelemetryService) -> Result<Value> {
    let mut timeline = service.timeline();
    timeline.mark(Some("queued"));

    let (tx, rx) = oneshot::channel();
    let done = timeline.wrap_callback(move |result: Result<Value, String>| {
        let _ = tx.send(result);
    });

    let source = service.source().clone();
    tokio::task::spawn_blocking(move || {
        {
            let _parse = ScopedMeasure::new(source.as_ref(), "parse");
            thread::sleep(Duration::from_millis(12));
        }
        done(Ok(json!({ "tile": "3/4/2", "features": 118 })));
    });

    let result = rx
        .await
        .context("tile worker dropped its completion handler")?;
    if let Some(parse) = service.source().get_entries_by_name("parse").last() {
        log::info!("Tile parse took {:.2}ms", parse.duration);
    }
    result.map_err(anyhow::Error::msg)
}

#[tokio::main]
async fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    let config = TelemetryConfig::from_env().context("invalid STROBE_* environment")?;
    Builder::from_env(Env::default().default_filter_or(config.log_filter.as_str())).init();

    let mut service = TelemetryService::new(config);
    service.mark(PerformanceMarker::Create);

    fetch_style(&service).await?;
    service.mark(PerformanceMarker::Load);

    let tile = parse_tile(&service).await?;
    log::info!("Tile result: {tile}");

    run_frame_loop(&mut service);
    service.mark(PerformanceMarker::FullLoad);

    let metrics = service.performance_metrics();
    println!("{}", serde_json::to_string_pretty(&metrics)?);

    service.clear_metrics();
    Ok(())
}
