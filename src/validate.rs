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

//! # Jumhur Validator Module
//!
//! Checks a normalized filter against the field catalog and produces
//! human-readable error messages. An unknown field short-circuits every
//! other rule; all remaining rules accumulate, so one filter can yield
//! several messages. An empty result means the filter is valid.

use crate::catalog::JmFieldCatalog;
use crate::filter::{JmFilterValue, JmScalar};

/// Validates a canonicalized, normalized filter candidate.
///
/// `value` is `None` when the candidate carried no value at all. Returns
/// the accumulated error messages, empty for a valid filter.
pub fn validate_filter(
    field: &str,
    operator: &str,
    value: Option<&JmFilterValue>,
    catalog: &JmFieldCatalog,
) -> Vec<String> {
    let mut errors = Vec::new();

    if !catalog.is_supported_field(field) {
        errors.push(format!("Unsupported field: {}", field));
        return errors;
    }

    if !catalog.is_supported_operator(operator) {
        errors.push(format!("Unsupported operator: {}", operator));
    }

    if let Some(field_type) = catalog.field_type(field) {
        let legal = catalog.operators_for(field_type);
        if !legal.iter().any(|op| op == operator) {
            errors.push(format!(
                "Operator '{}' is not valid for field '{}' of type '{}'",
                operator,
                field,
                field_type.as_str()
            ));
        }
    }

    if is_missing(value) {
        errors.push(format!("Missing value for field: {}", field));
    }

    if operator == "between" {
        let well_formed = matches!(value, Some(JmFilterValue::List(items)) if items.len() == 2);
        if !well_formed {
            errors.push(format!(
                "Operator 'between' requires a list of two values for field: {}",
                field
            ));
        }
    }

    errors
}

/// A value is missing when it is absent or textual and blank.
fn is_missing(value: Option<&JmFilterValue>) -> bool {
    match value {
        None => true,
        Some(JmFilterValue::Scalar(JmScalar::String(s)))
        | Some(JmFilterValue::Scalar(JmScalar::Date(s))) => s.trim().is_empty(),
        Some(_) => false,
    }
}
