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

use serde::{Deserialize, Serialize};

use super::core::{JmLogLevel, JmLogRecord};
use crate::settings::JmSettings;

/// Configuration for the structured logger: console/file enablement,
/// default level, JSON formatting, rotation, and async emission.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JmLogConfig {
    pub default_level: String,
    pub console_enabled: bool,
    pub json_format_console: bool,
    /// Whether file logging is enabled.
    pub file_enabled: bool,
    /// Optional log file path when file logging is enabled.
    pub file_path: Option<String>,
    /// Rotation strategy; only "size" is acted upon.
    pub rotate_when: Option<String>,
    /// Maximum file size in bytes when size-based rotation is used.
    pub max_bytes: Option<u64>,
    /// Number of backup files to keep when rotating.
    pub backup_count: Option<u32>,
    /// Whether logging should be performed asynchronously.
    pub async_logging: bool,
}

impl Default for JmLogConfig {
    fn default() -> Self {
        JmLogConfig {
            default_level: "INFO".to_string(),
            console_enabled: true,
            json_format_console: true,
            file_enabled: false,
            file_path: None,
            rotate_when: Some("size".to_string()),
            max_bytes: Some(10 * 1024 * 1024),
            backup_count: Some(7),
            async_logging: false,
        }
    }
}

impl JmLogConfig {
    /// Derives a log configuration from application settings: debug mode
    /// switches the console to human-readable output, production stays on
    /// JSON lines.
    pub fn from_settings(settings: &JmSettings) -> Self {
        JmLogConfig {
            default_level: settings.log_level.clone(),
            json_format_console: !settings.debug,
            ..Self::default()
        }
    }

    pub fn should_log(&self, record: &JmLogRecord) -> bool {
        record.level.value() >= self.parse_level(&self.default_level).value()
    }

    pub(crate) fn parse_level(&self, s: &str) -> JmLogLevel {
        match s.to_ascii_uppercase().as_str() {
            "DEBUG" => JmLogLevel::Debug,
            "WARNING" => JmLogLevel::Warning,
            "ERROR" => JmLogLevel::Error,
            "SUCCESS" => JmLogLevel::Success,
            _ => JmLogLevel::Info,
        }
    }
}
