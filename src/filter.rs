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

//! # Jumhur Filter Module
//!
//! This module provides the core data structures for representing audience
//! filters in the Jumhur framework. A filter is a field/operator/value triple;
//! filters flow through the pipeline in two shapes:
//!
//! - [`JmRawFilter`] is the loosely-structured candidate produced by the
//!   language-understanding collaborator: free-form field and operator
//!   strings plus an untyped JSON value.
//! - [`JmFilter`] is the canonical form: a catalog-recognized field, a
//!   catalog-recognized operator, and a type-normalized [`JmFilterValue`].
//!
//! Values are carried as a tagged union ([`JmScalar`]) rather than dynamic
//! JSON so that normalization and validation operate on statically known
//! shapes. The only place runtime type inspection happens is the single
//! JSON-to-union conversion at the collaborator boundary
//! ([`JmFilterValue::from_json`]).

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::errors::{JmError, Result};

/// Value types a catalog field can declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JmFieldType {
    String,
    Integer,
    Float,
    Boolean,
    Date,
}

impl JmFieldType {
    /// Lowercase name as it appears in catalog data and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            JmFieldType::String => "string",
            JmFieldType::Integer => "integer",
            JmFieldType::Float => "float",
            JmFieldType::Boolean => "boolean",
            JmFieldType::Date => "date",
        }
    }
}

/// A single typed filter value.
///
/// `Date` carries a `YYYY-MM-DD` string; it is distinguished from `String`
/// so that an already-resolved date is never re-parsed. Both variants
/// serialize as plain JSON strings.
#[derive(Clone, Debug, PartialEq)]
pub enum JmScalar {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(String),
}

impl JmScalar {
    /// Converts an untyped JSON value into a typed scalar.
    ///
    /// Whole numbers become `Integer`, other numbers `Float`. Arrays and
    /// objects are rejected; nesting is not a scalar shape.
    pub fn from_json(value: &Value) -> Result<JmScalar> {
        match value {
            Value::String(s) => Ok(JmScalar::String(s.clone())),
            Value::Bool(b) => Ok(JmScalar::Boolean(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(JmScalar::Integer(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(JmScalar::Float(f))
                } else {
                    Err(JmError::schema(format!("unrepresentable number: {}", n)))
                }
            }
            other => Err(JmError::schema(format!(
                "filter value must be a string, number, or boolean, got: {}",
                other
            ))),
        }
    }

    /// Returns the textual content for `String` and `Date` scalars.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            JmScalar::String(s) | JmScalar::Date(s) => Some(s),
            _ => None,
        }
    }
}

impl Serialize for JmScalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            JmScalar::String(s) | JmScalar::Date(s) => serializer.serialize_str(s),
            JmScalar::Integer(i) => serializer.serialize_i64(*i),
            JmScalar::Float(f) => serializer.serialize_f64(*f),
            JmScalar::Boolean(b) => serializer.serialize_bool(*b),
        }
    }
}

/// A filter value: either one scalar or an ordered list of scalars.
///
/// Lists normally appear with the `between` operator, which requires exactly
/// two elements; list arity is enforced by the validator, not here.
#[derive(Clone, Debug, PartialEq)]
pub enum JmFilterValue {
    Scalar(JmScalar),
    List(Vec<JmScalar>),
}

impl JmFilterValue {
    /// Converts an untyped JSON value into a typed filter value.
    ///
    /// `null` maps to `None` (a missing value, reported by the validator).
    /// A JSON array maps to `List`; its elements must all be scalars.
    pub fn from_json(value: &Value) -> Result<Option<JmFilterValue>> {
        match value {
            Value::Null => Ok(None),
            Value::Array(items) => {
                let scalars = items
                    .iter()
                    .map(JmScalar::from_json)
                    .collect::<Result<Vec<_>>>()?;
                Ok(Some(JmFilterValue::List(scalars)))
            }
            other => Ok(Some(JmFilterValue::Scalar(JmScalar::from_json(other)?))),
        }
    }
}

impl Serialize for JmFilterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            JmFilterValue::Scalar(scalar) => scalar.serialize(serializer),
            JmFilterValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// Unvalidated filter candidate produced by the extraction collaborator.
///
/// Every part is free-form: the field may be aliased or miscased, the
/// operator may be a natural-language synonym, and the value is untyped
/// JSON. Candidates are ephemeral; they exist only within one parse request.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct JmRawFilter {
    /// Free-form field name (e.g. "sex", "Join Date").
    #[serde(default)]
    pub field: String,

    /// Free-form operator (e.g. "is", "more than", ">=").
    #[serde(default)]
    pub operator: String,

    /// Untyped value: string, number, boolean, or a list for ranges.
    ///
    /// Absent and `null` values are kept as `None` so the validator can
    /// report a missing value instead of the deserializer rejecting the
    /// whole payload.
    #[serde(default)]
    pub value: Option<Value>,
}

/// Convenience alias for a batch of extraction candidates.
pub type JmRawFilterBatch = Vec<JmRawFilter>;

/// A validated, canonical audience filter.
///
/// Field and operator are members of the field catalog, and the value is
/// normalized to the field's declared type. Only filters that passed every
/// validator rule take this shape; rejected candidates become error records
/// instead.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct JmFilter {
    pub field: String,
    pub operator: String,
    pub value: JmFilterValue,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_from_json_scalars() {
        assert_eq!(
            JmScalar::from_json(&json!("Riyadh")).unwrap(),
            JmScalar::String("Riyadh".into())
        );
        assert_eq!(JmScalar::from_json(&json!(10)).unwrap(), JmScalar::Integer(10));
        assert_eq!(JmScalar::from_json(&json!(4.5)).unwrap(), JmScalar::Float(4.5));
        assert_eq!(JmScalar::from_json(&json!(true)).unwrap(), JmScalar::Boolean(true));
    }

    #[test]
    fn scalar_from_json_rejects_nesting() {
        assert!(JmScalar::from_json(&json!({"min": 3})).is_err());
        assert!(JmScalar::from_json(&json!([1, 2])).is_err());
    }

    #[test]
    fn filter_value_from_json_shapes() {
        assert_eq!(JmFilterValue::from_json(&json!(null)).unwrap(), None);
        assert_eq!(
            JmFilterValue::from_json(&json!([3, 5])).unwrap(),
            Some(JmFilterValue::List(vec![
                JmScalar::Integer(3),
                JmScalar::Integer(5)
            ]))
        );
        assert!(JmFilterValue::from_json(&json!([[1], 2])).is_err());
        assert!(JmFilterValue::from_json(&json!({"value": 1})).is_err());
    }

    #[test]
    fn filter_serializes_flat() {
        let filter = JmFilter {
            field: "store_rating".into(),
            operator: "between".into(),
            value: JmFilterValue::List(vec![JmScalar::Float(3.0), JmScalar::Float(5.0)]),
        };
        let rendered = serde_json::to_value(&filter).unwrap();
        assert_eq!(
            rendered,
            json!({"field": "store_rating", "operator": "between", "value": [3.0, 5.0]})
        );
    }

    #[test]
    fn raw_filter_tolerates_missing_parts() {
        let raw: JmRawFilter = serde_json::from_str(r#"{"field": "gender"}"#).unwrap();
        assert_eq!(raw.field, "gender");
        assert_eq!(raw.operator, "");
        assert!(raw.value.is_none());
    }
}
