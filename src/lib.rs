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

//! # Jumhur Core Library
//!
//! Jumhur turns a natural-language request (English or Arabic) describing a
//! customer audience into a structured list of field/operator/value filters
//! for a downstream query engine. The heart of the crate is the
//! deterministic normalization and validation pipeline; the language model
//! that proposes raw filter candidates is a replaceable collaborator behind
//! a small trait.
//!
//! ## Module Overview
//!
//! - **filter**: Raw and canonical filter shapes and the typed value union
//! - **catalog**: Static field catalog (fields, types, legal operators)
//! - **mappings**: Bilingual alias tables for values (gender, geo, boolean, months)
//! - **canonical**: Field-name and operator canonicalization
//! - **normalize**: Type-aware value normalization and date resolution
//! - **validate**: Catalog validation with human-readable errors
//! - **pipeline**: Per-candidate orchestration and result partitioning
//! - **agent**: Prompt-to-filters orchestration, extractor boundary, observability
//! - **metrics**: Offline accuracy evaluation against labeled datasets
//! - **settings**: Process configuration with environment loading
//! - **logging**: Structured JSON logging backend behind the `log` facade
//!
//! ## Quick Start
//!
//! ```rust
//! use jumhurx::{JmPipeline, JmRawFilter};
//! use serde_json::json;
//!
//! let pipeline = JmPipeline::bundled().unwrap();
//! let report = pipeline.process(&[JmRawFilter {
//!     field: "sex".into(),
//!     operator: "is".into(),
//!     value: Some(json!("female")),
//! }]);
//!
//! assert_eq!(report.filters[0].field, "gender");
//! ```
//!
//! ## Error Handling
//!
//! Library operations return `Result<T, JmError>`. Per-candidate problems
//! never escape the pipeline; they are partitioned into error records so a
//! batch always produces a complete report.

pub mod errors;
pub mod filter;
pub mod catalog;
pub mod mappings;
pub mod canonical;
pub mod normalize;
pub mod validate;
pub mod pipeline;
pub mod agent;
pub mod metrics;
pub mod settings;
pub mod logging;

pub use errors::{JmError, Result};
pub use filter::{JmFieldType, JmFilter, JmFilterValue, JmRawFilter, JmRawFilterBatch, JmScalar};
pub use catalog::JmFieldCatalog;
pub use mappings::JmValueMappings;
pub use canonical::{canonicalize_field, canonicalize_operator};
pub use normalize::{normalize_value, resolve_date};
pub use validate::validate_filter;
pub use pipeline::{JmFilterIssue, JmParseReport, JmPipeline};
pub use settings::JmSettings;
pub use metrics::{
    compare_filters, JmAccuracyMetrics, JmCaseResult, JmFilterComparison, JmLanguageAccuracy,
};
pub use agent::extractor::{
    build_extraction_prompt, parse_extraction_payload, JmExtractionPayload, JmFilterExtractor,
};
#[cfg(feature = "llm")]
pub use agent::extractor::JmLLMExtractor;
pub use agent::observability::JmObservability;
pub use agent::{detect_language, JmAgent, JmAgentOutput};
pub use logging::{JmLogConfig, JmLogContext, JmLogLevel, JmLogger};
