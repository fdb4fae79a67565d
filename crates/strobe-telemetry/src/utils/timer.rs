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

//! Provides RAII-based guards for automatically recording measures. (RAII = Resource Acquisition Is Initialization)

use crate::source::TimingSource;

/// A utility for timing the duration of a scope and recording it as a measure
/// on a [`TimingSource`] when it is dropped.
///
/// Marks `<name>#start` on creation; on drop marks `<name>#end` and records a
/// measure named `<name>` between the two.
///
/// The marks and the measure stay on the source after the guard is gone.
/// A guard used in a loop adds three entries per iteration; call
/// [`TimingSource::clear_marks`] and [`TimingSource::clear_measures`] with the
/// guard's labels once the readings have been consumed.
pub struct ScopedMeasure<'a> {
    source: &'a dyn TimingSource,
    name: String,
    start: String,
    end: String,
}

impl<'a> ScopedMeasure<'a> {
    /// Creates a new guard for `name` and marks its start immediately.
    pub fn new(source: &'a dyn TimingSource, name: impl Into<String>) -> Self {
        let name = name.into();
        let start = format!("{name}#start");
        let end = format!("{name}#end");
        source.mark(&start);
        Self {
            source,
            name,
            start,
            end,
        }
    }

    /// The measure name this guard records under.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// When the guard goes out of scope, it records the end mark and the measure.
impl<'a> Drop for ScopedMeasure<'a> {
    fn drop(&mut self) {
        if !self.source.is_supported() {
            return;
        }
        self.source.mark(&self.end);
        if self
            .source
            .measure(&self.name, &self.start, &self.end)
            .is_none()
        {
            log::warn!("[ScopedMeasure] Failed to record measure '{}'", self.name);
        }
    }
}
