//! Copyright © 2025 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Jumhur.
//! The Jumhur project belongs to the Dunimd project team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

use chrono::{DateTime, Local};

use super::core::JmLogRecord;

pub struct JmJsonFormatter;

impl JmJsonFormatter {
    pub fn format(record: &JmLogRecord) -> String {
        record.to_json().to_string()
    }
}

/// Compact human-readable rendering for development consoles.
pub struct JmTextFormatter;

impl JmTextFormatter {
    pub fn format(record: &JmLogRecord) -> String {
        let timestamp: DateTime<Local> = record.timestamp.into();
        let rendered = record.to_json();
        let fields = rendered
            .get("fields")
            .and_then(|f| f.as_object())
            .filter(|f| !f.is_empty())
            .map(|f| {
                f.iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();

        let mut line = format!(
            "{} [{}] {}: {}",
            timestamp.format("%Y-%m-%dT%H:%M:%S%.3f"),
            record.level.as_str(),
            record.event,
            record.message
        );
        if !fields.is_empty() {
            line.push(' ');
            line.push_str(&fields);
        }
        line
    }
}
