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

//! # Jumhur Agent Tests - Parse
//!
//! Drives the full agent path with a stub extractor returning canned
//! candidates, for English and Arabic prompts, and covers the end-to-end
//! pipeline behaviors: alias resolution, bilingual value mapping, range
//! normalization, and per-candidate error isolation.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test parse
//! ```

use jumhurx::{
    compare_filters, JmAgent, JmAgentOutput, JmFilter, JmFilterExtractor, JmFilterValue,
    JmObservability, JmPipeline, JmRawFilter, JmScalar, Result,
};
use serde_json::json;

/// Stands in for the language model: returns a canned candidate list.
#[derive(Debug)]
struct CannedExtractor {
    candidates: Vec<JmRawFilter>,
}

impl CannedExtractor {
    fn new(candidates: Vec<JmRawFilter>) -> Self {
        CannedExtractor { candidates }
    }
}

impl JmFilterExtractor for CannedExtractor {
    fn extract(&self, _prompt: &str, _language: &str) -> Result<Vec<JmRawFilter>> {
        Ok(self.candidates.clone())
    }
}

fn raw(field: &str, operator: &str, value: serde_json::Value) -> JmRawFilter {
    JmRawFilter {
        field: field.into(),
        operator: operator.into(),
        value: Some(value),
    }
}

fn run_with(candidates: Vec<JmRawFilter>, prompt: &str) -> JmAgentOutput {
    let agent = JmAgent::new(
        Box::new(CannedExtractor::new(candidates)),
        JmPipeline::bundled().unwrap(),
        JmObservability::disabled(),
    );
    agent.run(prompt).unwrap()
}

fn find<'a>(output: &'a JmAgentOutput, field: &str) -> Option<&'a JmFilter> {
    output.filters.iter().find(|f| f.field == field)
}

#[test]
fn test_simple_gender_filter() {
    let output = run_with(
        vec![raw("gender", "=", json!("female"))],
        "Find female customers",
    );

    let gender = find(&output, "gender").expect("gender filter missing");
    assert_eq!(gender.operator, "=");
    assert_eq!(
        gender.value,
        JmFilterValue::Scalar(JmScalar::String("Female".into()))
    );
}

#[test]
fn test_greater_than_orders() {
    let output = run_with(
        vec![raw("total_orders", ">", json!(10))],
        "Customers with more than 10 orders",
    );

    let orders = find(&output, "total_orders").expect("orders filter missing");
    assert_eq!(orders.operator, ">");
    assert_eq!(orders.value, JmFilterValue::Scalar(JmScalar::Integer(10)));
}

#[test]
fn test_between_rating() {
    let output = run_with(
        vec![raw("rating", "in range", json!([3, 5]))],
        "Stores rated between 3 and 5 stars",
    );

    let rating = find(&output, "store_rating").expect("rating filter missing");
    assert_eq!(rating.operator, "between");
    assert_eq!(
        rating.value,
        JmFilterValue::List(vec![JmScalar::Float(3.0), JmScalar::Float(5.0)])
    );
    assert!(!output.has_errors());
}

#[test]
fn test_multiple_filters_from_one_prompt() {
    let output = run_with(
        vec![
            raw("join_date", ">", json!("2023-01-01")),
            raw("orders", "more than", json!(5)),
        ],
        "Find customers who joined after Jan 2023 with more than 5 orders",
    );

    assert!(find(&output, "joining_date").is_some());
    assert!(find(&output, "total_orders").is_some());
    assert_eq!(output.filters.len(), 2);
}

#[test]
fn test_city_filter_with_sales() {
    let output = run_with(
        vec![
            raw("city", "=", json!("Riyadh")),
            raw("sales", "more than", json!(500)),
        ],
        "Customers in Riyadh with more than 500 sales",
    );

    let city = find(&output, "city").expect("city filter missing");
    assert_eq!(city.operator, "=");
    assert_eq!(
        city.value,
        JmFilterValue::Scalar(JmScalar::String("Riyadh".into()))
    );
    let sales = find(&output, "total_sales").expect("sales filter missing");
    assert_eq!(sales.value, JmFilterValue::Scalar(JmScalar::Float(500.0)));
}

#[test]
fn test_simple_gender_filter_ar() {
    let output = run_with(
        vec![raw("gender", "=", json!("انثى"))],
        "اعثر على العملاء الإناث",
    );

    let gender = find(&output, "gender").expect("gender filter missing");
    assert_eq!(
        gender.value,
        JmFilterValue::Scalar(JmScalar::String("Female".into()))
    );
}

#[test]
fn test_city_filter_ar() {
    let output = run_with(
        vec![
            raw("city", "=", json!("الرياض")),
            raw("sales", "more than", json!(500)),
        ],
        "العملاء في الرياض الذين لديهم أكثر من 500 مبيعات",
    );

    let city = find(&output, "city").expect("city filter missing");
    assert_eq!(
        city.value,
        JmFilterValue::Scalar(JmScalar::String("Riyadh".into()))
    );
}

#[test]
fn test_male_customers_ar() {
    let output = run_with(vec![raw("sex", "is", json!("ذكر"))], "العملاء الذكور");

    let gender = find(&output, "gender").expect("gender filter missing");
    assert_eq!(
        gender.value,
        JmFilterValue::Scalar(JmScalar::String("Male".into()))
    );
}

#[test]
fn test_unsupported_field_reported_not_extracted() {
    let output = run_with(
        vec![raw("email_open_rate", "=", json!("10%"))],
        "Customers with an email open rate of 10%",
    );

    assert!(output.filters.is_empty());
    assert_eq!(output.errors.len(), 1);
    assert!(output.errors[0].contains("Unsupported field"));
}

#[test]
fn test_partial_success_keeps_valid_filters() {
    let output = run_with(
        vec![
            raw("gender", "=", json!("female")),
            raw("email_open_rate", "=", json!("10%")),
        ],
        "Female customers with a high email open rate",
    );

    assert_eq!(output.filters.len(), 1);
    assert!(find(&output, "gender").is_some());
    assert_eq!(output.errors.len(), 1);
    assert!(output.errors[0].starts_with("Filter 2: "));
}

#[test]
fn test_expected_output_comparison() {
    let output = run_with(
        vec![
            raw("sex", "is", json!("female")),
            raw("orders", "more than", json!("10")),
        ],
        "Female customers with more than 10 orders",
    );

    let expected = vec![
        JmFilter {
            field: "gender".into(),
            operator: "=".into(),
            value: JmFilterValue::Scalar(JmScalar::String("Female".into())),
        },
        JmFilter {
            field: "total_orders".into(),
            operator: ">".into(),
            value: JmFilterValue::Scalar(JmScalar::Integer(10)),
        },
    ];

    let comparison = compare_filters(&expected, &output.filters);
    assert_eq!(comparison.correct_count, 2);
    assert_eq!(comparison.missing_count, 0);
    assert_eq!(comparison.accuracy, 1.0);
}
