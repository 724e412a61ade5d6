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

//! # Jumhur Error Module
//!
//! This module defines the error types and utilities used throughout the
//! Jumhur framework for consistent error handling and reporting.
//!
//! ## Error Handling Philosophy
//!
//! Jumhur uses a structured error approach with the following principles:
//!
//! - **Explicit Error Types**: Each error variant represents a specific
//!   category of failure, making it easier to handle errors appropriately
//! - **Context-Rich**: Errors include relevant context (extraction stage,
//!   pipeline stage, detailed messages) to aid debugging
//! - **Recoverable**: Per-candidate failures are recovered inside the
//!   pipeline; errors that escape are configuration or collaborator faults
//! - **Serde Support**: Errors can be serialized/deserialized for logging
//!   and persistence
//!
//! ## Error Categories
//!
//! - **Io**: Filesystem errors while loading catalog or mapping data
//! - **Schema**: Malformed catalog, mapping, or candidate shapes
//! - **Validation**: Input validation failures
//! - **Extractor**: Failures of the LLM extraction collaborator
//! - **Pipeline**: Pipeline orchestration failures
//! - **Serde**: Serialization/deserialization errors
//! - **Internal**: Unexpected internal failures

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convience result type used throughout Jumhur.
pub type Result<T> = std::result::Result<T, JmError>;

/// Canonical error enumeration for Jumhur.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum JmError {
    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Errors caused by malformed catalog, mapping, or candidate data.
    #[error("schema error: {message}")]
    Schema { message: String },

    /// Validation errors triggered by invalid parameters or inputs.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Any failure raised by the filter extraction collaborator.
    #[error("extractor failed: {message}")]
    Extractor { message: String },

    /// Failures that occur while orchestrating the candidate pipeline.
    #[error("pipeline error at stage '{stage}': {message}")]
    Pipeline { stage: String, message: String },

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for JmError {
    fn from(err: io::Error) -> Self {
        JmError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for JmError {
    fn from(err: serde_json::Error) -> Self {
        JmError::Serde(err.to_string())
    }
}

impl JmError {
    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        JmError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct schema errors.
    pub fn schema<T: Into<String>>(message: T) -> Self {
        JmError::Schema {
            message: message.into(),
        }
    }

    /// Helper to construct extractor errors.
    pub fn extractor<T: Into<String>>(message: T) -> Self {
        JmError::Extractor {
            message: message.into(),
        }
    }

    /// Helper to construct pipeline errors.
    pub fn pipeline(stage: impl Into<String>, message: impl Into<String>) -> Self {
        JmError::Pipeline {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        JmError::Internal(message.into())
    }
}
