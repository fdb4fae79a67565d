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

//! Entries recorded by a timing source.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The kind of a recorded [`PerformanceEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// A named point in time.
    Mark,
    /// A named interval computed from two marks.
    Measure,
    /// A resource fetch reported by the host environment.
    Resource,
}

impl EntryType {
    /// Returns the lowercase name used when the entry is serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Mark => "mark",
            EntryType::Measure => "measure",
            EntryType::Resource => "resource",
        }
    }
}

impl Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single timing record.
///
/// All times are milliseconds on the monotonic timeline of the source that
/// produced the entry. Marks always have a zero `duration`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceEntry {
    /// The label the entry was recorded under.
    pub name: String,
    /// What kind of entry this is.
    pub entry_type: EntryType,
    /// Monotonic time at which the entry starts, in milliseconds.
    pub start_time: f64,
    /// Length of the interval in milliseconds.
    pub duration: f64,
}

impl PerformanceEntry {
    /// Creates a mark entry at `start_time`.
    pub fn mark(name: impl Into<String>, start_time: f64) -> Self {
        Self {
            name: name.into(),
            entry_type: EntryType::Mark,
            start_time,
            duration: 0.0,
        }
    }

    /// Creates a measure entry spanning `start_time..end_time`.
    pub fn measure(name: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self {
            name: name.into(),
            entry_type: EntryType::Measure,
            start_time,
            duration: end_time - start_time,
        }
    }

    /// Creates a resource entry as reported by a host environment.
    pub fn resource(name: impl Into<String>, start_time: f64, duration: f64) -> Self {
        Self {
            name: name.into(),
            entry_type: EntryType::Resource,
            start_time,
            duration,
        }
    }

    /// Returns the monotonic time at which the entry ends.
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }
}
