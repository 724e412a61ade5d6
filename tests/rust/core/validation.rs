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

//! # Jumhur Core Tests - Validation
//!
//! Tests field/operator canonicalization, value normalization, and filter
//! validation against the catalog bundled with the crate.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test validation
//! ```

use jumhurx::{
    canonicalize_field, canonicalize_operator, normalize_value, validate_filter, JmFieldCatalog,
    JmFieldType, JmFilterValue, JmScalar, JmValueMappings,
};

fn catalog() -> JmFieldCatalog {
    JmFieldCatalog::bundled().unwrap()
}

fn mappings() -> JmValueMappings {
    JmValueMappings::bundled().unwrap()
}

fn string_value(text: &str) -> JmFilterValue {
    JmFilterValue::Scalar(JmScalar::String(text.into()))
}

#[test]
fn test_field_alias_normalization() {
    assert_eq!(canonicalize_field("sex"), "gender");
    assert_eq!(canonicalize_field("Sex"), "gender");
    assert_eq!(canonicalize_field("SEX"), "gender");
    assert_eq!(canonicalize_field("orders"), "total_orders");
    assert_eq!(canonicalize_field("order_count"), "total_orders");
    assert_eq!(canonicalize_field("num_orders"), "total_orders");
    assert_eq!(canonicalize_field("sales"), "total_sales");
    assert_eq!(canonicalize_field("revenue"), "total_sales");
}

#[test]
fn test_canonical_fields_unchanged() {
    assert_eq!(canonicalize_field("gender"), "gender");
    assert_eq!(canonicalize_field("total_orders"), "total_orders");
}

#[test]
fn test_operator_alias_normalization() {
    assert_eq!(canonicalize_operator("equals"), "=");
    assert_eq!(canonicalize_operator("equal"), "=");
    assert_eq!(canonicalize_operator("is"), "=");
    assert_eq!(canonicalize_operator("="), "=");
    assert_eq!(canonicalize_operator("not equals"), "!=");
    assert_eq!(canonicalize_operator("not equal"), "!=");
    assert_eq!(canonicalize_operator("is not"), "!=");
    assert_eq!(canonicalize_operator("greater than"), ">");
    assert_eq!(canonicalize_operator("more than"), ">");
    assert_eq!(canonicalize_operator("gt"), ">");
    assert_eq!(canonicalize_operator("less than"), "<");
    assert_eq!(canonicalize_operator("lt"), "<");
    assert_eq!(canonicalize_operator("at least"), ">=");
    assert_eq!(canonicalize_operator("gte"), ">=");
    assert_eq!(canonicalize_operator("at most"), "<=");
    assert_eq!(canonicalize_operator("lte"), "<=");
    assert_eq!(canonicalize_operator("between"), "between");
    assert_eq!(canonicalize_operator("in range"), "between");
    assert_eq!(canonicalize_operator("range"), "between");
}

#[test]
fn test_gender_value_normalization() {
    let m = mappings();
    let cases = [
        ("male", "Male"),
        ("female", "Female"),
        ("m", "Male"),
        ("f", "Female"),
        ("ذكر", "Male"),
        ("انثى", "Female"),
    ];
    for (raw, expected) in cases {
        assert_eq!(
            normalize_value("gender", JmScalar::String(raw.into()), JmFieldType::String, &m),
            JmScalar::String(expected.into()),
            "gender value '{}' should normalize to '{}'",
            raw,
            expected
        );
    }
}

#[test]
fn test_city_value_normalization() {
    let m = mappings();
    let cases = [("الرياض", "Riyadh"), ("جدة", "Jeddah"), ("دبي", "Dubai")];
    for (raw, expected) in cases {
        assert_eq!(
            normalize_value("city", JmScalar::String(raw.into()), JmFieldType::String, &m),
            JmScalar::String(expected.into())
        );
    }
}

#[test]
fn test_numeric_value_normalization() {
    let m = mappings();
    assert_eq!(
        normalize_value("total_orders", JmScalar::String("10".into()), JmFieldType::Integer, &m),
        JmScalar::Integer(10)
    );
    assert_eq!(
        normalize_value("total_orders", JmScalar::Float(10.5), JmFieldType::Integer, &m),
        JmScalar::Integer(10)
    );
    assert_eq!(
        normalize_value("total_sales", JmScalar::String("100.5".into()), JmFieldType::Float, &m),
        JmScalar::Float(100.5)
    );
    assert_eq!(
        normalize_value("total_sales", JmScalar::Integer(100), JmFieldType::Float, &m),
        JmScalar::Float(100.0)
    );
}

#[test]
fn test_already_typed_values_unchanged() {
    let m = mappings();
    assert_eq!(
        normalize_value("total_orders", JmScalar::Integer(5), JmFieldType::Integer, &m),
        JmScalar::Integer(5)
    );
    assert_eq!(
        normalize_value("store_rating", JmScalar::Float(4.5), JmFieldType::Float, &m),
        JmScalar::Float(4.5)
    );
}

#[test]
fn test_valid_filter_passes() {
    let errors = validate_filter("gender", "=", Some(&string_value("Female")), &catalog());
    assert!(errors.is_empty());
}

#[test]
fn test_invalid_field_rejected() {
    let errors = validate_filter("invalid_field", "=", Some(&string_value("test")), &catalog());
    assert!(!errors.is_empty());
    assert!(errors.iter().any(|e| e.contains("Unsupported field")));
    // field failure short-circuits every other rule
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_invalid_operator_rejected() {
    let errors = validate_filter("gender", "invalid_op", Some(&string_value("Female")), &catalog());
    assert!(errors.iter().any(|e| e.contains("Unsupported operator")));
}

#[test]
fn test_missing_value_rejected() {
    let errors = validate_filter("gender", "=", Some(&string_value("")), &catalog());
    assert!(errors.iter().any(|e| e.contains("Missing value")));
}

#[test]
fn test_between_with_scalar_rejected() {
    let errors = validate_filter(
        "store_rating",
        "between",
        Some(&JmFilterValue::Scalar(JmScalar::Integer(5))),
        &catalog(),
    );
    assert!(errors.iter().any(|e| e.contains("list of two values")));
}

#[test]
fn test_between_with_pair_accepted() {
    let pair = JmFilterValue::List(vec![JmScalar::Integer(3), JmScalar::Integer(5)]);
    let errors = validate_filter("store_rating", "between", Some(&pair), &catalog());
    assert!(!errors.iter().any(|e| e.contains("list of two values")));
}

#[test]
fn test_operator_invalid_for_field_type() {
    let errors = validate_filter("gender", ">", Some(&string_value("Female")), &catalog());
    assert!(!errors.is_empty());
    assert!(errors.iter().any(|e| e.contains("not valid for field")));
}

#[test]
fn test_normalization_is_idempotent_per_type() {
    let m = mappings();
    let cases = [
        ("gender", JmScalar::String("male".into()), JmFieldType::String),
        ("city", JmScalar::String("الرياض".into()), JmFieldType::String),
        ("country", JmScalar::String("ksa".into()), JmFieldType::String),
        ("total_orders", JmScalar::String("10".into()), JmFieldType::Integer),
        ("total_sales", JmScalar::Integer(100), JmFieldType::Float),
        ("is_subscribed", JmScalar::String("yes".into()), JmFieldType::Boolean),
        ("joining_date", JmScalar::String("January 2023".into()), JmFieldType::Date),
        ("joining_date", JmScalar::String("not a date".into()), JmFieldType::Date),
    ];
    for (field, raw, field_type) in cases {
        let once = normalize_value(field, raw.clone(), field_type, &m);
        let twice = normalize_value(field, once.clone(), field_type, &m);
        assert_eq!(once, twice, "normalizing '{:?}' twice diverged", raw);
    }
}
