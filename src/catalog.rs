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

//! # Jumhur Field Catalog Module
//!
//! The field catalog is the static schema the validator checks filters
//! against: which fields exist (grouped by category), each field's value
//! type, the global operator vocabulary, and the operator subset legal for
//! each value type. It is loaded once from JSON at process start
//! (`data/supported_fields.json` is bundled into the binary) and read-only
//! thereafter, so it can be shared freely across concurrent requests.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::{JmError, Result};
use crate::filter::JmFieldType;
use crate::mappings::ordered_pairs;

const BUNDLED_CATALOG: &str = include_str!("../data/supported_fields.json");

/// Static registry of supported fields, value types, and operators.
#[derive(Clone, Debug, Deserialize)]
pub struct JmFieldCatalog {
    /// Category name -> ordered field list. Grouping is informational; it
    /// feeds the extraction prompt and error details.
    #[serde(rename = "fields", deserialize_with = "ordered_pairs")]
    pub categories: Vec<(String, Vec<String>)>,

    /// Globally recognized operator tokens.
    pub operators: Vec<String>,

    /// Field name -> declared value type.
    pub field_types: HashMap<String, JmFieldType>,

    /// Value type -> operators legal for fields of that type.
    pub valid_operators_per_type: HashMap<JmFieldType, Vec<String>>,
}

impl JmFieldCatalog {
    /// Parses a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<JmFieldCatalog> {
        let catalog: JmFieldCatalog = serde_json::from_str(json)?;
        catalog.check()?;
        Ok(catalog)
    }

    /// Loads a catalog from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<JmFieldCatalog> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Returns the catalog bundled with the crate.
    pub fn bundled() -> Result<JmFieldCatalog> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Verifies the catalog invariants:
    /// - every typed field appears in exactly one category
    /// - every categorized field has a declared type
    /// - every per-type operator is a member of the operator vocabulary
    pub fn check(&self) -> Result<()> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (_, fields) in &self.categories {
            for field in fields {
                *seen.entry(field.as_str()).or_insert(0) += 1;
            }
        }

        for (field, count) in &seen {
            if *count > 1 {
                return Err(JmError::schema(format!(
                    "field '{}' appears in {} categories",
                    field, count
                )));
            }
            if !self.field_types.contains_key(*field) {
                return Err(JmError::schema(format!(
                    "field '{}' has no declared type",
                    field
                )));
            }
        }

        for field in self.field_types.keys() {
            if !seen.contains_key(field.as_str()) {
                return Err(JmError::schema(format!(
                    "field '{}' is typed but not categorized",
                    field
                )));
            }
        }

        for (field_type, operators) in &self.valid_operators_per_type {
            for operator in operators {
                if !self.operators.contains(operator) {
                    return Err(JmError::schema(format!(
                        "operator '{}' for type '{}' is not in the operator vocabulary",
                        operator,
                        field_type.as_str()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Flat list of every supported field name, in category order.
    pub fn all_field_names(&self) -> Vec<&str> {
        self.categories
            .iter()
            .flat_map(|(_, fields)| fields.iter().map(String::as_str))
            .collect()
    }

    /// Whether the field belongs to the catalog.
    pub fn is_supported_field(&self, field: &str) -> bool {
        self.categories
            .iter()
            .any(|(_, fields)| fields.iter().any(|f| f == field))
    }

    /// Whether the operator belongs to the global vocabulary.
    pub fn is_supported_operator(&self, operator: &str) -> bool {
        self.operators.iter().any(|op| op == operator)
    }

    /// Declared type of a field, if the field is known.
    pub fn field_type(&self, field: &str) -> Option<JmFieldType> {
        self.field_types.get(field).copied()
    }

    /// Operators legal for fields of the given type.
    pub fn operators_for(&self, field_type: JmFieldType) -> &[String] {
        self.valid_operators_per_type
            .get(&field_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
