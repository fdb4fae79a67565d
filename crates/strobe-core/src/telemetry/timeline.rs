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

//! Snapshot type produced by a finished task timeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The channel samples land in when no identifier is given.
pub const DEFAULT_CHANNEL: &str = "";

/// An immutable copy of a timeline's samples.
///
/// Serializes flat: every channel becomes a key holding its timestamps, and
/// `timeOrigin` sits next to them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    /// Ordered monotonic timestamps (ms), keyed by channel.
    #[serde(flatten)]
    pub marks: BTreeMap<String, Vec<f64>>,
    /// Wall-clock epoch milliseconds corresponding to monotonic time zero.
    #[serde(rename = "timeOrigin")]
    pub time_origin: f64,
}

impl TimelineSnapshot {
    /// Returns the samples recorded on `channel`, if any.
    pub fn channel(&self, channel: &str) -> Option<&[f64]> {
        self.marks.get(channel).map(Vec::as_slice)
    }

    /// Returns the samples recorded on the default channel.
    pub fn default_channel(&self) -> &[f64] {
        self.channel(DEFAULT_CHANNEL).unwrap_or(&[])
    }

    /// Converts a monotonic sample from this snapshot into wall-clock epoch ms.
    pub fn to_epoch_millis(&self, sample: f64) -> f64 {
        self.time_origin + sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_serializes_flat() {
        let mut marks = BTreeMap::new();
        marks.insert(DEFAULT_CHANNEL.to_string(), vec![1.0, 9.0]);
        marks.insert("parse".to_string(), vec![3.0]);
        let snapshot = TimelineSnapshot {
            marks,
            time_origin: 1_700_000_000_000.0,
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json[""], serde_json::json!([1.0, 9.0]));
        assert_eq!(json["parse"], serde_json::json!([3.0]));
        assert_eq!(json["timeOrigin"], 1_700_000_000_000.0);
    }

    #[test]
    fn test_epoch_conversion() {
        let snapshot = TimelineSnapshot {
            marks: BTreeMap::new(),
            time_origin: 1000.0,
        };
        assert_eq!(snapshot.to_epoch_millis(250.0), 1250.0);
        assert!(snapshot.default_channel().is_empty());
    }
}
