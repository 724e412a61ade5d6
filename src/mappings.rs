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

//! # Jumhur Value Mappings Module
//!
//! Static bilingual alias tables used by value normalization: gender,
//! country, city, boolean token, and month-name lookups. Tables are loaded
//! once from JSON (`data/value_mappings.json` is bundled into the binary)
//! and are immutable for the process lifetime.
//!
//! Country, city, and month tables keep the document order of the JSON
//! file: country/city lookup is a substring scan where the first matching
//! entry wins, and month substitution must try full month names before
//! their abbreviations. The tables are deserialized directly from the JSON
//! text so that file order survives.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::marker::PhantomData;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::errors::{JmError, Result};

const BUNDLED_MAPPINGS: &str = include_str!("../data/value_mappings.json");

/// Deserializes a JSON object into a vector of pairs, preserving document
/// order. Plain map containers would re-sort the keys.
pub(crate) fn ordered_pairs<'de, D, V>(
    deserializer: D,
) -> std::result::Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct PairVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for PairVisitor<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a JSON object")
        }

        fn visit_map<A: MapAccess<'de>>(
            self,
            mut access: A,
        ) -> std::result::Result<Self::Value, A::Error> {
            let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some(entry) = access.next_entry::<String, V>()? {
                pairs.push(entry);
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(PairVisitor(PhantomData))
}

/// Bilingual alias tables for value normalization.
#[derive(Clone, Debug, Deserialize)]
pub struct JmValueMappings {
    /// Lowercase gender alias -> canonical token ("Male"/"Female").
    pub gender_mappings: HashMap<String, String>,

    /// Ordered country alias table used by the substring scan.
    #[serde(deserialize_with = "ordered_pairs")]
    pub country_mappings: Vec<(String, String)>,

    /// Ordered city alias table used by the substring scan.
    #[serde(deserialize_with = "ordered_pairs")]
    pub city_mappings: Vec<(String, String)>,

    /// Lowercase boolean token -> boolean value.
    pub boolean_mappings: HashMap<String, bool>,

    /// Ordered localized month name -> zero-padded month number.
    #[serde(deserialize_with = "ordered_pairs")]
    pub month_names: Vec<(String, String)>,
}

impl JmValueMappings {
    /// Parses mapping tables from JSON text.
    pub fn from_json(json: &str) -> Result<JmValueMappings> {
        let mappings: JmValueMappings = serde_json::from_str(json)?;
        mappings.check()?;
        Ok(mappings)
    }

    /// Loads mapping tables from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<JmValueMappings> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Returns the mapping tables bundled with the crate.
    pub fn bundled() -> Result<JmValueMappings> {
        Self::from_json(BUNDLED_MAPPINGS)
    }

    /// Verifies the table invariants: every key is lowercase and keys are
    /// case-insensitively unique within each table.
    pub fn check(&self) -> Result<()> {
        check_keys("gender_mappings", self.gender_mappings.keys())?;
        check_keys("country_mappings", self.country_mappings.iter().map(|(k, _)| k))?;
        check_keys("city_mappings", self.city_mappings.iter().map(|(k, _)| k))?;
        check_keys("boolean_mappings", self.boolean_mappings.keys())?;
        check_keys("month_names", self.month_names.iter().map(|(k, _)| k))?;
        Ok(())
    }

    /// Exact lookup of a gender alias.
    pub fn gender(&self, value: &str) -> Option<&str> {
        self.gender_mappings
            .get(&value.to_lowercase())
            .map(String::as_str)
    }

    /// Substring scan over the country table; first match in table order
    /// wins. The alias may appear inside the value or vice versa.
    pub fn country(&self, value: &str) -> Option<&str> {
        substring_scan(&self.country_mappings, value)
    }

    /// Substring scan over the city table; same semantics as [`country`].
    ///
    /// [`country`]: JmValueMappings::country
    pub fn city(&self, value: &str) -> Option<&str> {
        substring_scan(&self.city_mappings, value)
    }

    /// Exact lookup of a boolean token.
    pub fn boolean(&self, value: &str) -> Option<bool> {
        self.boolean_mappings.get(&value.to_lowercase()).copied()
    }
}

/// Linear scan matching aliases as case-insensitive substrings in either
/// direction. The tables are small enough that a scan per value is cheaper
/// than maintaining a smarter index, and the matching is semantic
/// (substring) rather than exact, so a hash lookup would not apply anyway.
fn substring_scan<'a>(table: &'a [(String, String)], value: &str) -> Option<&'a str> {
    let folded = value.to_lowercase();
    table
        .iter()
        .find(|(alias, _)| folded.contains(alias.as_str()) || alias.contains(&folded))
        .map(|(_, mapped)| mapped.as_str())
}

fn check_keys<'a>(table: &str, keys: impl Iterator<Item = &'a String>) -> Result<()> {
    let mut seen = HashSet::new();
    for key in keys {
        let folded = key.to_lowercase();
        if folded != *key {
            return Err(JmError::schema(format!(
                "{} key '{}' must be lowercase",
                table, key
            )));
        }
        if !seen.insert(folded) {
            return Err(JmError::schema(format!(
                "{} key '{}' is duplicated",
                table, key
            )));
        }
    }
    Ok(())
}
