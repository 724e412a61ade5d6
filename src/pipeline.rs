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

//! # Jumhur Pipeline Module
//!
//! The candidate pipeline sequences canonicalization, type-aware value
//! normalization, and validation over each raw candidate filter, and
//! partitions the batch into validated filters and per-candidate error
//! records. Candidates are processed independently: one candidate's
//! failure never aborts the others, and a candidate whose raw shape cannot
//! even be interpreted is converted into a single error record rather than
//! an escaping error. `process` itself cannot fail.
//!
//! The pipeline is synchronous and holds only the read-only catalog and
//! mapping tables, so one instance can serve concurrent requests.

use std::fmt;

use serde::Serialize;

use crate::canonical::{canonicalize_field, canonicalize_operator};
use crate::catalog::JmFieldCatalog;
use crate::errors::Result;
use crate::filter::{JmFieldType, JmFilter, JmFilterValue, JmRawFilter};
use crate::mappings::JmValueMappings;
use crate::normalize::normalize_value;
use crate::validate::validate_filter;

/// One rejection reason, tied to the candidate's position in the batch.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct JmFilterIssue {
    /// Zero-based position among the submitted candidates.
    pub index: usize,
    /// Human-readable reason.
    pub message: String,
}

impl fmt::Display for JmFilterIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Positions are rendered one-based for people.
        write!(f, "Filter {}: {}", self.index + 1, self.message)
    }
}

/// Outcome of one pipeline run: the validated filters in input order, plus
/// every rejection reason in discovery order.
#[derive(Clone, Debug, Default, Serialize)]
pub struct JmParseReport {
    pub filters: Vec<JmFilter>,
    pub errors: Vec<JmFilterIssue>,
}

impl JmParseReport {
    /// Rendered error messages, one per issue.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(JmFilterIssue::to_string).collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Candidate pipeline: canonicalize, normalize, validate.
#[derive(Clone, Debug)]
pub struct JmPipeline {
    catalog: JmFieldCatalog,
    mappings: JmValueMappings,
}

impl JmPipeline {
    /// Constructs a pipeline over pre-validated catalog and mapping tables.
    pub fn new(catalog: JmFieldCatalog, mappings: JmValueMappings) -> Result<Self> {
        catalog.check()?;
        mappings.check()?;
        Ok(JmPipeline { catalog, mappings })
    }

    /// Constructs a pipeline from the data files bundled with the crate.
    pub fn bundled() -> Result<Self> {
        Self::new(JmFieldCatalog::bundled()?, JmValueMappings::bundled()?)
    }

    pub fn catalog(&self) -> &JmFieldCatalog {
        &self.catalog
    }

    pub fn mappings(&self) -> &JmValueMappings {
        &self.mappings
    }

    /// Runs every candidate through the pipeline independently.
    pub fn process(&self, candidates: &[JmRawFilter]) -> JmParseReport {
        let mut report = JmParseReport::default();

        for (index, raw) in candidates.iter().enumerate() {
            match self.process_candidate(raw) {
                Ok(filter) => {
                    log::debug!(
                        "filter {} validated: {} {} ",
                        index + 1,
                        filter.field,
                        filter.operator
                    );
                    report.filters.push(filter);
                }
                Err(reasons) => {
                    log::warn!(
                        "filter {} rejected ({} reason(s)): field '{}'",
                        index + 1,
                        reasons.len(),
                        raw.field
                    );
                    report
                        .errors
                        .extend(reasons.into_iter().map(|message| JmFilterIssue { index, message }));
                }
            }
        }

        report
    }

    /// Processes one candidate to completion.
    ///
    /// The unknown-field case deliberately defaults the declared type to
    /// `string` so that normalization stays harmless; the validator is the
    /// authority that rejects the field.
    fn process_candidate(&self, raw: &JmRawFilter) -> std::result::Result<JmFilter, Vec<String>> {
        let field = canonicalize_field(&raw.field);
        let operator = canonicalize_operator(&raw.operator);
        let field_type = self.catalog.field_type(&field).unwrap_or(JmFieldType::String);

        let value = match &raw.value {
            Some(json) => match JmFilterValue::from_json(json) {
                Ok(value) => value,
                Err(err) => return Err(vec![format!("Validation exception - {}", err)]),
            },
            None => None,
        };

        let value = value.map(|value| self.normalize(&field, value, field_type));

        let errors = validate_filter(&field, &operator, value.as_ref(), &self.catalog);
        if !errors.is_empty() {
            return Err(errors);
        }

        match value {
            Some(value) => Ok(JmFilter {
                field,
                operator,
                value,
            }),
            // validate_filter reports absent values, so this arm is never
            // reached for an error-free candidate.
            None => Err(vec![format!("Missing value for field: {}", field)]),
        }
    }

    fn normalize(&self, field: &str, value: JmFilterValue, field_type: JmFieldType) -> JmFilterValue {
        match value {
            JmFilterValue::Scalar(scalar) => JmFilterValue::Scalar(normalize_value(
                field,
                scalar,
                field_type,
                &self.mappings,
            )),
            JmFilterValue::List(items) => JmFilterValue::List(
                items
                    .into_iter()
                    .map(|scalar| normalize_value(field, scalar, field_type, &self.mappings))
                    .collect(),
            ),
        }
    }
}
