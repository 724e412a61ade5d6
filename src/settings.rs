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

//! # Jumhur Settings Module
//!
//! Process configuration for the agent: application identity, logging
//! level, tracing, and the LLM collaborator parameters. Settings are a
//! plain value struct with defaults, chained builder methods for embedding
//! hosts, and an environment loader for deployments.

use std::env;

/// Application settings.
#[derive(Clone, Debug)]
pub struct JmSettings {
    pub app_name: String,
    pub app_version: String,
    pub debug: bool,
    pub log_level: String,

    /// Model identifier sent to the chat-completions endpoint.
    pub llm_model: String,
    pub llm_temperature: f64,
    pub llm_max_tokens: u32,
    pub llm_endpoint: String,
    pub llm_api_key: Option<String>,
    /// Request timeout for the extraction call, in seconds.
    pub llm_timeout_secs: u64,

    pub tracing_enabled: bool,
    pub tracing_project: String,
}

impl Default for JmSettings {
    fn default() -> Self {
        Self {
            app_name: "Jumhur".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            debug: false,
            log_level: "INFO".to_string(),
            llm_model: "gpt-4-turbo-preview".to_string(),
            llm_temperature: 0.0,
            llm_max_tokens: 2000,
            llm_endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            llm_api_key: None,
            llm_timeout_secs: 60,
            tracing_enabled: true,
            tracing_project: "jumhur-audience-agent".to_string(),
        }
    }
}

impl JmSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from the environment, falling back to defaults for
    /// anything unset. `OPENAI_API_KEY` is honored alongside the
    /// `JUMHUR_*` variables.
    pub fn from_env() -> Self {
        let base = Self::default();
        Self {
            app_name: base.app_name,
            app_version: base.app_version,
            debug: env_bool("JUMHUR_DEBUG").unwrap_or(base.debug),
            log_level: env::var("JUMHUR_LOG_LEVEL").unwrap_or(base.log_level),
            llm_model: env::var("JUMHUR_LLM_MODEL").unwrap_or(base.llm_model),
            llm_temperature: env_parse("JUMHUR_LLM_TEMPERATURE").unwrap_or(base.llm_temperature),
            llm_max_tokens: env_parse("JUMHUR_LLM_MAX_TOKENS").unwrap_or(base.llm_max_tokens),
            llm_endpoint: env::var("JUMHUR_LLM_ENDPOINT").unwrap_or(base.llm_endpoint),
            llm_api_key: env::var("OPENAI_API_KEY").ok().filter(|key| !key.is_empty()),
            llm_timeout_secs: env_parse("JUMHUR_LLM_TIMEOUT_SECS").unwrap_or(base.llm_timeout_secs),
            tracing_enabled: env_bool("JUMHUR_TRACING").unwrap_or(base.tracing_enabled),
            tracing_project: env::var("JUMHUR_TRACING_PROJECT").unwrap_or(base.tracing_project),
        }
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn log_level(mut self, level: &str) -> Self {
        self.log_level = level.to_string();
        self
    }

    pub fn llm_model(mut self, model: &str) -> Self {
        self.llm_model = model.to_string();
        self
    }

    pub fn llm_temperature(mut self, temperature: f64) -> Self {
        self.llm_temperature = temperature;
        self
    }

    pub fn llm_max_tokens(mut self, max_tokens: u32) -> Self {
        self.llm_max_tokens = max_tokens;
        self
    }

    pub fn llm_endpoint(mut self, endpoint: &str) -> Self {
        self.llm_endpoint = endpoint.to_string();
        self
    }

    pub fn llm_api_key(mut self, api_key: Option<String>) -> Self {
        self.llm_api_key = api_key;
        self
    }

    pub fn tracing_enabled(mut self, enabled: bool) -> Self {
        self.tracing_enabled = enabled;
        self
    }

    pub fn tracing_project(mut self, project: &str) -> Self {
        self.tracing_project = project.to_string();
        self
    }
}

fn env_bool(name: &str) -> Option<bool> {
    let raw = env::var(name).ok()?;
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let settings = JmSettings::default();
        assert_eq!(settings.app_name, "Jumhur");
        assert_eq!(settings.llm_temperature, 0.0);
        assert_eq!(settings.llm_max_tokens, 2000);
        assert!(settings.llm_api_key.is_none());
        assert!(settings.tracing_enabled);
    }

    #[test]
    fn builder_methods_chain() {
        let settings = JmSettings::new()
            .debug(true)
            .log_level("DEBUG")
            .llm_model("gpt-4o-mini")
            .llm_temperature(0.2)
            .tracing_enabled(false);
        assert!(settings.debug);
        assert_eq!(settings.log_level, "DEBUG");
        assert_eq!(settings.llm_model, "gpt-4o-mini");
        assert_eq!(settings.llm_temperature, 0.2);
        assert!(!settings.tracing_enabled);
    }
}
