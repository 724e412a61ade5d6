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

//! # Jumhur Filter Extractor Module
//!
//! The extraction collaborator boundary. The language model that turns a
//! natural-language prompt into raw filter candidates is a black box behind
//! the [`JmFilterExtractor`] trait; the pipeline only ever sees the
//! candidate sequence. [`JmLLMExtractor`] is the production implementation
//! against an OpenAI-compatible chat-completions endpoint; tests substitute
//! stub implementations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{JmError, Result};
use crate::filter::JmRawFilter;

#[cfg(feature = "llm")]
use serde_json::{json, Value};

#[cfg(feature = "llm")]
use crate::catalog::JmFieldCatalog;
#[cfg(feature = "llm")]
use crate::settings::JmSettings;

/// Produces raw filter candidates from a natural-language prompt.
pub trait JmFilterExtractor: fmt::Debug {
    /// Extracts candidates from `prompt`. `language` is the detected
    /// prompt language tag ("en" or "ar"). No ordering guarantee applies
    /// to the returned candidates.
    fn extract(&self, prompt: &str, language: &str) -> Result<Vec<JmRawFilter>>;
}

/// JSON payload shape the extraction model is instructed to return.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct JmExtractionPayload {
    #[serde(default)]
    pub filters: Vec<JmRawFilter>,
}

/// Builds the extraction instruction for the language model.
pub fn build_extraction_prompt(prompt: &str, language: &str, supported_fields: &[&str]) -> String {
    format!(
        r#"You are an expert at parsing natural language prompts into structured audience filters.

Your task is to extract filters from the user's prompt and convert them into a structured JSON format.

Supported Fields:
{fields}

Supported Operators:
- = (equals)
- != (not equals)
- < (less than)
- > (greater than)
- <= (less than or equal)
- >= (greater than or equal)
- between (for ranges, value should be a list of two elements)

Guidelines:
1. Extract ALL filters mentioned in the prompt
2. Use exact field names from the supported fields list
3. Convert dates to YYYY-MM-DD format when possible
4. For "between" operator, use a list with two values: [min, max]
5. Preserve numeric values as numbers (not strings)
6. For gender, use "Male" or "Female"
7. If the prompt is in Arabic, translate field values to English where appropriate

User Prompt ({language}):
{prompt}

You MUST respond with valid JSON in this exact format:
{{
  "filters": [
    {{
      "field": "field_name",
      "operator": "operator",
      "value": "value or [min, max] for between"
    }}
  ]
}}

If no filters can be extracted, return: {{"filters": []}}

Do not include any explanation, only return the JSON object."#,
        fields = supported_fields.join(", "),
        language = language,
        prompt = prompt,
    )
}

/// Parses the model's reply into raw candidates, tolerating a Markdown
/// code fence around the JSON object.
pub fn parse_extraction_payload(content: &str) -> Result<Vec<JmRawFilter>> {
    let body = strip_code_fences(content);
    let payload: JmExtractionPayload = serde_json::from_str(body)
        .map_err(|err| JmError::extractor(format!("malformed extraction payload: {}", err)))?;
    Ok(payload.filters)
}

fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let body = match trimmed.strip_prefix("```") {
        Some(rest) => rest,
        None => return trimmed,
    };
    let body = body.strip_prefix("json").unwrap_or(body);
    let body = body.trim_start_matches(['\r', '\n']);
    match body.strip_suffix("```") {
        Some(rest) => rest.trim_end(),
        None => body,
    }
}

/// Extractor backed by an OpenAI-compatible chat-completions endpoint.
#[cfg(feature = "llm")]
#[derive(Debug)]
pub struct JmLLMExtractor {
    settings: JmSettings,
    supported_fields: Vec<String>,
}

#[cfg(feature = "llm")]
impl JmLLMExtractor {
    pub fn new(settings: JmSettings, catalog: &JmFieldCatalog) -> Self {
        let supported_fields = catalog
            .all_field_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        JmLLMExtractor {
            settings,
            supported_fields,
        }
    }

    fn call_llm_api(&self, instruction: &str) -> Result<String> {
        let client = reqwest::blocking::Client::new();

        let body = json!({
            "model": self.settings.llm_model,
            "temperature": self.settings.llm_temperature,
            "max_tokens": self.settings.llm_max_tokens,
            "messages": [{"role": "user", "content": instruction}],
        });

        let mut request = client
            .post(&self.settings.llm_endpoint)
            .json(&body)
            .timeout(std::time::Duration::from_secs(self.settings.llm_timeout_secs));

        if let Some(api_key) = &self.settings.llm_api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .map_err(|err| JmError::extractor(format!("LLM API request failed: {}", err)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(JmError::extractor(format!(
                "LLM API returned error {}: {}",
                status, body
            )));
        }

        let reply: Value = response
            .json()
            .map_err(|err| JmError::extractor(format!("failed to parse LLM API response: {}", err)))?;

        Self::response_content(&reply)
    }

    /// Pulls the generated text out of the response, tolerating the common
    /// completion shapes (chat message content, plain text choices, bare
    /// text field).
    fn response_content(reply: &Value) -> Result<String> {
        if let Some(choice) = reply
            .get("choices")
            .and_then(Value::as_array)
            .and_then(|choices| choices.first())
        {
            if let Some(content) = choice
                .get("message")
                .and_then(|message| message.get("content"))
                .and_then(Value::as_str)
            {
                return Ok(content.to_string());
            }
            if let Some(text) = choice.get("text").and_then(Value::as_str) {
                return Ok(text.to_string());
            }
        }
        if let Some(text) = reply.get("text").and_then(Value::as_str) {
            return Ok(text.to_string());
        }
        Err(JmError::extractor("LLM response carried no content"))
    }
}

#[cfg(feature = "llm")]
impl JmFilterExtractor for JmLLMExtractor {
    fn extract(&self, prompt: &str, language: &str) -> Result<Vec<JmRawFilter>> {
        let fields: Vec<&str> = self.supported_fields.iter().map(String::as_str).collect();
        let instruction = build_extraction_prompt(prompt, language, &fields);
        let content = self.call_llm_api(&instruction)?;
        parse_extraction_payload(&content)
    }
}
