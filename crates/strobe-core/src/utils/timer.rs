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

//! Monotonic and wall-clock time sources.

use std::time::Instant;

/// Returns the current wall-clock time in milliseconds since the Unix epoch.
///
/// A system clock set before 1970 reports `0.0`.
#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
pub fn epoch_millis() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(since_epoch) => since_epoch.as_secs_f64() * 1000.0,
        Err(e) => {
            log::warn!("System clock is before the Unix epoch: {e}");
            0.0
        }
    }
}

/// Returns the current wall-clock time in milliseconds since the Unix epoch.
///
/// `SystemTime::now()` panics on bare `wasm32-unknown-unknown`, so the host's
/// `Date.now()` is read instead.
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub fn epoch_millis() -> f64 {
    js_sys::Date::now()
}

/// A monotonic stopwatch anchored at the instant it was created.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    /// Creates a stopwatch that starts counting immediately.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds elapsed since the stopwatch was created.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Seconds elapsed since the stopwatch was created.
    pub fn elapsed_secs_f64(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch_is_monotonic() {
        let stopwatch = Stopwatch::new();
        let first = stopwatch.elapsed_ms();
        let second = stopwatch.elapsed_ms();
        assert!(first >= 0.0);
        assert!(second >= first);
    }

    #[test]
    fn test_epoch_millis_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(epoch_millis() > 1_577_836_800_000.0);
    }
}
