//! Copyright © 2025 Dunimd Team. All Rights Reserved.
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

//! # Jumhur Accuracy Metrics Module
//!
//! Offline evaluation of extraction quality against a labeled dataset:
//! per-case comparison of expected versus produced filters, and aggregate
//! accuracy metrics with a per-language breakdown. Comparison is
//! order-insensitive and case-insensitive on textual values, since
//! extraction output ordering carries no meaning.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::Value;

use crate::filter::{JmFilter, JmFilterValue, JmScalar};

/// A case counts as successful when at least this share of expected
/// filters was produced.
pub const SUCCESS_THRESHOLD: f64 = 0.8;

/// Comparison of one case's expected and actual filter sets.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct JmFilterComparison {
    pub expected_count: usize,
    pub actual_count: usize,
    pub correct_count: usize,
    pub missing_count: usize,
    pub extra_count: usize,
    /// Share of expected filters that were produced, in [0, 1].
    pub accuracy: f64,
}

/// Compares expected and actual filters as normalized sets.
pub fn compare_filters(expected: &[JmFilter], actual: &[JmFilter]) -> JmFilterComparison {
    let expected_keys: HashSet<String> = expected.iter().map(comparison_key).collect();
    let actual_keys: HashSet<String> = actual.iter().map(comparison_key).collect();

    let correct = expected_keys.intersection(&actual_keys).count();
    let missing = expected_keys.difference(&actual_keys).count();
    let extra = actual_keys.difference(&expected_keys).count();

    JmFilterComparison {
        expected_count: expected.len(),
        actual_count: actual.len(),
        correct_count: correct,
        missing_count: missing,
        extra_count: extra,
        accuracy: if expected.is_empty() {
            0.0
        } else {
            correct as f64 / expected.len() as f64
        },
    }
}

/// Canonical comparison key for one filter: lowercased field, operator,
/// and a value rendering that lowercases strings and sorts lists.
fn comparison_key(filter: &JmFilter) -> String {
    format!(
        "{}|{}|{}",
        filter.field.to_lowercase(),
        filter.operator,
        value_key(&filter.value)
    )
}

fn value_key(value: &JmFilterValue) -> String {
    match value {
        JmFilterValue::Scalar(scalar) => scalar_key(scalar),
        JmFilterValue::List(items) => {
            let mut keys: Vec<String> = items.iter().map(scalar_key).collect();
            keys.sort();
            keys.join(",")
        }
    }
}

fn scalar_key(scalar: &JmScalar) -> String {
    match scalar {
        JmScalar::String(s) | JmScalar::Date(s) => s.to_lowercase(),
        JmScalar::Integer(i) => i.to_string(),
        JmScalar::Float(f) => f.to_string(),
        JmScalar::Boolean(b) => b.to_string(),
    }
}

/// Outcome of evaluating one labeled case.
#[derive(Clone, Debug, Serialize)]
pub struct JmCaseResult {
    pub test_id: u32,
    pub language: String,
    pub comparison: JmFilterComparison,
    pub errors: Vec<String>,
    pub success: bool,
}

impl JmCaseResult {
    /// Builds a result, deciding success from the comparison accuracy.
    pub fn new(
        test_id: u32,
        language: impl Into<String>,
        comparison: JmFilterComparison,
        errors: Vec<String>,
    ) -> Self {
        let success = comparison.accuracy >= SUCCESS_THRESHOLD;
        JmCaseResult {
            test_id,
            language: language.into(),
            comparison,
            errors,
            success,
        }
    }
}

/// Per-language accuracy slice.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct JmLanguageAccuracy {
    pub total: usize,
    pub successful: usize,
    /// Percentage in [0, 100].
    pub accuracy: f64,
}

/// Aggregate accuracy metrics over an evaluation run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct JmAccuracyMetrics {
    pub total_tests: usize,
    pub successful_tests: usize,
    pub failed_tests: usize,
    /// Share of successful cases, as a percentage.
    pub overall_accuracy: f64,
    /// Share of expected filters produced across all cases, as a percentage.
    pub field_extraction_accuracy: f64,
    pub by_language: HashMap<String, JmLanguageAccuracy>,
}

impl JmAccuracyMetrics {
    pub fn compute(results: &[JmCaseResult]) -> Self {
        let total = results.len();
        let successful = results.iter().filter(|r| r.success).count();

        let expected_total: usize = results.iter().map(|r| r.comparison.expected_count).sum();
        let correct_total: usize = results.iter().map(|r| r.comparison.correct_count).sum();

        let mut by_language: HashMap<String, JmLanguageAccuracy> = HashMap::new();
        for result in results {
            let slice = by_language.entry(result.language.clone()).or_default();
            slice.total += 1;
            if result.success {
                slice.successful += 1;
            }
        }
        for slice in by_language.values_mut() {
            slice.accuracy = if slice.total > 0 {
                slice.successful as f64 / slice.total as f64 * 100.0
            } else {
                0.0
            };
        }

        JmAccuracyMetrics {
            total_tests: total,
            successful_tests: successful,
            failed_tests: total - successful,
            overall_accuracy: if total > 0 {
                successful as f64 / total as f64 * 100.0
            } else {
                0.0
            },
            field_extraction_accuracy: if expected_total > 0 {
                correct_total as f64 / expected_total as f64 * 100.0
            } else {
                0.0
            },
            by_language,
        }
    }

    pub fn as_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(field: &str, operator: &str, value: JmFilterValue) -> JmFilter {
        JmFilter {
            field: field.into(),
            operator: operator.into(),
            value,
        }
    }

    fn gender(value: &str) -> JmFilter {
        filter(
            "gender",
            "=",
            JmFilterValue::Scalar(JmScalar::String(value.into())),
        )
    }

    #[test]
    fn comparison_ignores_case_and_list_order() {
        let expected = vec![
            gender("Female"),
            filter(
                "store_rating",
                "between",
                JmFilterValue::List(vec![JmScalar::Float(3.0), JmScalar::Float(5.0)]),
            ),
        ];
        let actual = vec![
            filter(
                "store_rating",
                "between",
                JmFilterValue::List(vec![JmScalar::Float(5.0), JmScalar::Float(3.0)]),
            ),
            gender("female"),
        ];

        let comparison = compare_filters(&expected, &actual);
        assert_eq!(comparison.correct_count, 2);
        assert_eq!(comparison.missing_count, 0);
        assert_eq!(comparison.extra_count, 0);
        assert_eq!(comparison.accuracy, 1.0);
    }

    #[test]
    fn comparison_counts_missing_and_extra() {
        let expected = vec![gender("Female"), gender("Male")];
        let actual = vec![
            gender("Female"),
            filter(
                "total_orders",
                ">",
                JmFilterValue::Scalar(JmScalar::Integer(5)),
            ),
        ];

        let comparison = compare_filters(&expected, &actual);
        assert_eq!(comparison.correct_count, 1);
        assert_eq!(comparison.missing_count, 1);
        assert_eq!(comparison.extra_count, 1);
        assert_eq!(comparison.accuracy, 0.5);
    }

    #[test]
    fn aggregate_metrics_break_down_by_language() {
        let results = vec![
            JmCaseResult::new(1, "en", compare_filters(&[gender("Female")], &[gender("Female")]), vec![]),
            JmCaseResult::new(1, "ar", compare_filters(&[gender("Female")], &[]), vec![]),
        ];

        let metrics = JmAccuracyMetrics::compute(&results);
        assert_eq!(metrics.total_tests, 2);
        assert_eq!(metrics.successful_tests, 1);
        assert_eq!(metrics.failed_tests, 1);
        assert_eq!(metrics.overall_accuracy, 50.0);
        assert_eq!(metrics.field_extraction_accuracy, 50.0);
        assert_eq!(metrics.by_language["en"].accuracy, 100.0);
        assert_eq!(metrics.by_language["ar"].accuracy, 0.0);
        assert!(metrics.as_json().is_object());
    }
}
