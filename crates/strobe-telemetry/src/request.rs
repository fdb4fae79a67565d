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

//! Resource timing for outbound requests.
//!
//! Hosts with automatic resource-timing capture report entries under the
//! request URL on their own. Restricted contexts (worker threads, headless
//! hosts) report nothing, so the recorder synthesizes the entry from its own
//! start and end marks.

use crate::source::TimingSource;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strobe_core::telemetry::PerformanceEntry;

/// Describes an outbound request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParameters {
    /// Target URL. The only field used to derive timing labels.
    pub url: String,
    /// HTTP method.
    #[serde(default = "default_method")]
    pub method: String,
    /// Request headers.
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    /// Whether the caller wants resource timing for this request.
    #[serde(default)]
    pub collect_resource_timing: bool,
}

fn default_method() -> String {
    "GET".to_string()
}

impl RequestParameters {
    /// A `GET` request for `url` without resource timing.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: default_method(),
            headers: Vec::new(),
            collect_resource_timing: false,
        }
    }

    /// Opt in to resource timing collection.
    pub fn with_resource_timing(mut self) -> Self {
        self.collect_resource_timing = true;
        self
    }

    /// Add a header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }
}

/// Labels a request recorder marks and measures under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMarks {
    /// `<url>#start`
    pub start: String,
    /// `<url>#end`
    pub end: String,
    /// `<url>`
    pub measure: String,
}

impl RequestMarks {
    fn for_url(url: &str) -> Self {
        Self {
            start: format!("{url}#start"),
            end: format!("{url}#end"),
            measure: url.to_string(),
        }
    }
}

/// Brackets one request with start/end marks and resolves its resource
/// timing entries.
///
/// Finishing consumes the recorder, so a request can only be finished once.
#[derive(Debug)]
pub struct RequestPerformance {
    marks: RequestMarks,
    source: Arc<dyn TimingSource>,
}

impl RequestPerformance {
    /// Start timing `request`; the start mark is recorded immediately.
    pub fn new(request: &RequestParameters, source: Arc<dyn TimingSource>) -> Self {
        let marks = RequestMarks::for_url(&request.url);
        source.mark(&marks.start);
        Self { marks, source }
    }

    /// Start timing `request` only if it opted in to resource timing.
    pub fn for_request(request: &RequestParameters, source: Arc<dyn TimingSource>) -> Option<Self> {
        request
            .collect_resource_timing
            .then(|| Self::new(request, source))
    }

    /// The labels this recorder uses.
    pub fn marks(&self) -> &RequestMarks {
        &self.marks
    }

    /// Record the end mark and resolve the request's timing entries.
    ///
    /// Host-reported entries are returned as-is. Otherwise one measure is
    /// synthesized from the start and end marks, and the marks and measure
    /// are removed from the source afterwards. The result is empty when the
    /// source is unavailable.
    pub fn finish(self) -> Vec<PerformanceEntry> {
        self.source.mark(&self.marks.end);
        let entries = self.source.get_entries_by_name(&self.marks.measure);
        if !entries.is_empty() {
            return entries;
        }

        log::debug!(
            "No resource timing reported for '{}', synthesizing from marks",
            self.marks.measure
        );
        self.source
            .measure(&self.marks.measure, &self.marks.start, &self.marks.end);
        let entries = self.source.get_entries_by_name(&self.marks.measure);

        // cleanup
        self.source.clear_marks(Some(&self.marks.start));
        self.source.clear_marks(Some(&self.marks.end));
        self.source.clear_measures(Some(&self.marks.measure));

        entries
    }
}
