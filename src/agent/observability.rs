//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Jumhur.
//! The Jumhur project belongs to the Dunimd Team.
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

//! # Jumhur Observability Module
//!
//! Run tracing and stage logging for the agent. The component is
//! constructed once at process start and handed to the agent by reference;
//! there is no process-wide instance. Disabled observability turns every
//! call into a no-op, which tests rely on.

use serde_json::json;

use crate::agent::JmAgentOutput;
use crate::logging::{JmLogLevel, JmLogger};
use crate::settings::JmSettings;

const PROMPT_LOG_CHARS: usize = 200;

/// Stage-level tracing for agent runs.
#[derive(Clone, Debug)]
pub struct JmObservability {
    enabled: bool,
    project: String,
}

impl JmObservability {
    pub fn new(settings: &JmSettings) -> Self {
        if settings.tracing_enabled {
            log::info!("tracing enabled for project '{}'", settings.tracing_project);
        } else {
            log::info!("tracing disabled");
        }
        JmObservability {
            enabled: settings.tracing_enabled,
            project: settings.tracing_project.clone(),
        }
    }

    /// An observability handle that records nothing.
    pub fn disabled() -> Self {
        JmObservability {
            enabled: false,
            project: String::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Wraps one run, logging its start and completion.
    pub fn trace_run<T>(&self, run_name: &str, run: impl FnOnce() -> T) -> T {
        if self.enabled {
            JmLogger::event(
                JmLogLevel::Info,
                "trace_run_started".to_string(),
                format!("starting traced run '{}'", run_name),
                [("project".to_string(), json!(self.project))],
            );
        }
        let outcome = run();
        if self.enabled {
            JmLogger::event(
                JmLogLevel::Info,
                "trace_run_completed".to_string(),
                format!("traced run '{}' completed", run_name),
                [("project".to_string(), json!(self.project))],
            );
        }
        outcome
    }

    /// Logs the incoming prompt, truncated to a safe length.
    pub fn log_prompt(&self, prompt: &str, language: &str) {
        if !self.enabled {
            return;
        }
        let preview: String = prompt.chars().take(PROMPT_LOG_CHARS).collect();
        JmLogger::event(
            JmLogLevel::Info,
            "prompt_received".to_string(),
            "prompt received".to_string(),
            [
                ("prompt".to_string(), json!(preview)),
                ("language".to_string(), json!(language)),
            ],
        );
    }

    pub fn log_extraction_result(&self, candidate_count: usize, success: bool) {
        if !self.enabled {
            return;
        }
        JmLogger::event(
            JmLogLevel::Info,
            "extraction_result".to_string(),
            "extraction completed".to_string(),
            [
                ("filter_count".to_string(), json!(candidate_count)),
                ("success".to_string(), json!(success)),
            ],
        );
    }

    pub fn log_validation_result(&self, validated_count: usize, error_count: usize) {
        if !self.enabled {
            return;
        }
        JmLogger::event(
            JmLogLevel::Info,
            "validation_result".to_string(),
            "validation completed".to_string(),
            [
                ("validated_count".to_string(), json!(validated_count)),
                ("error_count".to_string(), json!(error_count)),
            ],
        );
    }

    pub fn log_final_output(&self, output: &JmAgentOutput) {
        if !self.enabled {
            return;
        }
        JmLogger::event(
            JmLogLevel::Info,
            "final_output".to_string(),
            "final output assembled".to_string(),
            [
                ("filter_count".to_string(), json!(output.filters.len())),
                ("has_errors".to_string(), json!(!output.errors.is_empty())),
            ],
        );
    }
}
