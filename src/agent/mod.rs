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

//! # Jumhur Agent Module
//!
//! End-to-end orchestration of one parse request, in four stages:
//!
//! 1. **Input**: trim the prompt and detect its language
//! 2. **Extraction**: ask the collaborator for raw filter candidates
//! 3. **Validation**: run the candidate pipeline
//! 4. **Output**: assemble validated filters and accumulated errors
//!
//! Extraction failure does not abort the run; it contributes a
//! "Parsing error" entry and an empty candidate list, and the caller
//! decides how to present a run with errors. The only hard failure is an
//! empty prompt.

pub mod extractor;
pub mod observability;

use serde::Serialize;

use crate::errors::{JmError, Result};
use crate::filter::JmFilter;
use crate::pipeline::JmPipeline;
use extractor::JmFilterExtractor;
use observability::JmObservability;

/// Detects the prompt language with a simple script heuristic: any
/// character in the Arabic Unicode block marks the prompt as Arabic.
pub fn detect_language(prompt: &str) -> &'static str {
    if prompt.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c)) {
        "ar"
    } else {
        "en"
    }
}

/// Final result of one agent run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct JmAgentOutput {
    pub filters: Vec<JmFilter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl JmAgentOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// A run that produced neither filters nor errors extracted nothing.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.errors.is_empty()
    }
}

/// The audience-filter agent: extraction collaborator plus candidate
/// pipeline, wired to an injected observability handle.
#[derive(Debug)]
pub struct JmAgent {
    extractor: Box<dyn JmFilterExtractor + Send + Sync>,
    pipeline: JmPipeline,
    observability: JmObservability,
}

impl JmAgent {
    pub fn new(
        extractor: Box<dyn JmFilterExtractor + Send + Sync>,
        pipeline: JmPipeline,
        observability: JmObservability,
    ) -> Self {
        JmAgent {
            extractor,
            pipeline,
            observability,
        }
    }

    pub fn pipeline(&self) -> &JmPipeline {
        &self.pipeline
    }

    /// Runs one prompt through extraction, normalization, and validation.
    pub fn run(&self, prompt: &str) -> Result<JmAgentOutput> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(JmError::validation("prompt cannot be empty"));
        }
        let language = detect_language(prompt);

        self.observability.trace_run("parse_prompt", || {
            self.observability.log_prompt(prompt, language);

            let mut errors = Vec::new();
            let candidates = match self.extractor.extract(prompt, language) {
                Ok(candidates) => candidates,
                Err(err) => {
                    log::error!("extraction failed: {}", err);
                    errors.push(format!("Parsing error: {}", err));
                    Vec::new()
                }
            };
            self.observability
                .log_extraction_result(candidates.len(), errors.is_empty());

            let report = self.pipeline.process(&candidates);
            self.observability
                .log_validation_result(report.filters.len(), report.errors.len());

            errors.extend(report.error_messages());
            let output = JmAgentOutput {
                filters: report.filters,
                errors,
            };
            self.observability.log_final_output(&output);
            Ok(output)
        })
    }
}
