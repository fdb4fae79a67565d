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

//! Timing sources: the capability trait, its live and null implementations,
//! and the startup probe that picks one.

pub mod backend;
pub mod live;
pub mod null;

pub use self::backend::{SourceStats, TimingSource};
pub use self::live::LiveTimingSource;
pub use self::null::NullTimingSource;

use crate::config::{TelemetryConfig, TimingSourceKind};
use std::sync::Arc;

/// Whether the target provides a usable monotonic clock.
///
/// `std::time::Instant` panics on bare `wasm32-unknown-unknown`.
pub fn monotonic_clock_available() -> bool {
    !cfg!(all(target_arch = "wasm32", target_os = "unknown"))
}

/// Pick the timing source for this process. Probes once; the returned source
/// never re-probes.
pub fn select_timing_source(config: &TelemetryConfig) -> Arc<dyn TimingSource> {
    let live = match config.timing_source {
        TimingSourceKind::Auto => monotonic_clock_available(),
        TimingSourceKind::Live => true,
        TimingSourceKind::Null => false,
    };

    if live {
        log::info!("Using live timing source ({:?})", config.timing_source);
        Arc::new(LiveTimingSource::new())
    } else {
        log::info!(
            "High-resolution timing unavailable ({:?}), falling back to wall clock",
            config.timing_source
        );
        Arc::new(NullTimingSource::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forced_selection() {
        let mut config = TelemetryConfig::default();

        config.timing_source = TimingSourceKind::Null;
        let source = select_timing_source(&config);
        assert!(!source.is_supported());
        assert!(source.as_any().downcast_ref::<NullTimingSource>().is_some());

        config.timing_source = TimingSourceKind::Live;
        let source = select_timing_source(&config);
        assert!(source.is_supported());
        assert!(source.as_any().downcast_ref::<LiveTimingSource>().is_some());
    }

    #[test]
    fn test_auto_selection_follows_probe() {
        let source = select_timing_source(&TelemetryConfig::default());
        assert_eq!(source.is_supported(), monotonic_clock_available());
    }
}
