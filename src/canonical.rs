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

//! # Jumhur Canonicalizer Module
//!
//! Maps raw field names and raw operator strings onto their catalog
//! canonical forms via static alias tables. Both functions are pure and
//! never fail: an input with no alias passes through, and the validator
//! downstream decides whether the pass-through form is acceptable.

/// Field-name variations the extraction collaborator commonly produces.
const FIELD_ALIASES: &[(&str, &str)] = &[
    ("sex", "gender"),
    ("join_date", "joining_date"),
    ("signup_date", "joining_date"),
    ("registration_date", "joining_date"),
    ("orders", "total_orders"),
    ("order_count", "total_orders"),
    ("num_orders", "total_orders"),
    ("sales", "total_sales"),
    ("revenue", "total_sales"),
    ("rating", "store_rating"),
    ("last_order", "latest_purchase"),
    ("last_purchase", "latest_purchase"),
    ("subscribed", "is_subscribed"),
];

/// Natural-language operator synonyms.
const OPERATOR_ALIASES: &[(&str, &str)] = &[
    ("equals", "="),
    ("equal", "="),
    ("is", "="),
    ("not equals", "!="),
    ("not equal", "!="),
    ("is not", "!="),
    ("greater than", ">"),
    ("more than", ">"),
    ("gt", ">"),
    ("less than", "<"),
    ("lt", "<"),
    ("greater than or equal", ">="),
    ("at least", ">="),
    ("gte", ">="),
    ("less than or equal", "<="),
    ("at most", "<="),
    ("lte", "<="),
    ("in range", "between"),
    ("range", "between"),
];

/// Canonicalizes a raw field name.
///
/// Lowercases, trims, joins internal whitespace with underscores, then
/// applies the alias table. Names without an alias are returned in their
/// folded form unchanged.
pub fn canonicalize_field(raw: &str) -> String {
    let folded = raw
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");

    FIELD_ALIASES
        .iter()
        .find(|(alias, _)| *alias == folded)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or(folded)
}

/// Canonicalizes a raw operator.
///
/// Trims, then looks the lowercase form up in the synonym table. Operators
/// without a synonym are returned trimmed but otherwise unchanged, casing
/// included.
pub fn canonicalize_operator(raw: &str) -> String {
    let trimmed = raw.trim();
    let folded = trimmed.to_lowercase();

    OPERATOR_ALIASES
        .iter()
        .find(|(alias, _)| *alias == folded)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_aliases_fold_case() {
        assert_eq!(canonicalize_field("sex"), "gender");
        assert_eq!(canonicalize_field("Sex"), "gender");
        assert_eq!(canonicalize_field("SEX"), "gender");
    }

    #[test]
    fn order_and_sales_aliases() {
        assert_eq!(canonicalize_field("orders"), "total_orders");
        assert_eq!(canonicalize_field("order_count"), "total_orders");
        assert_eq!(canonicalize_field("num_orders"), "total_orders");
        assert_eq!(canonicalize_field("sales"), "total_sales");
        assert_eq!(canonicalize_field("revenue"), "total_sales");
    }

    #[test]
    fn date_aliases_and_spacing() {
        assert_eq!(canonicalize_field("Join Date"), "joining_date");
        assert_eq!(canonicalize_field("  signup date "), "joining_date");
        assert_eq!(canonicalize_field("last purchase"), "latest_purchase");
    }

    #[test]
    fn canonical_fields_are_fixed_points() {
        assert_eq!(canonicalize_field("gender"), "gender");
        assert_eq!(canonicalize_field("total_orders"), "total_orders");
        assert_eq!(canonicalize_field(&canonicalize_field("rating")), "store_rating");
    }

    #[test]
    fn unknown_fields_pass_through_folded() {
        assert_eq!(canonicalize_field("Email Open Rate"), "email_open_rate");
    }

    #[test]
    fn equality_operator_synonyms() {
        assert_eq!(canonicalize_operator("equals"), "=");
        assert_eq!(canonicalize_operator("equal"), "=");
        assert_eq!(canonicalize_operator("is"), "=");
        assert_eq!(canonicalize_operator("="), "=");
        assert_eq!(canonicalize_operator("not equals"), "!=");
        assert_eq!(canonicalize_operator("Is Not"), "!=");
    }

    #[test]
    fn comparison_operator_synonyms() {
        assert_eq!(canonicalize_operator("greater than"), ">");
        assert_eq!(canonicalize_operator("more than"), ">");
        assert_eq!(canonicalize_operator("gt"), ">");
        assert_eq!(canonicalize_operator("less than"), "<");
        assert_eq!(canonicalize_operator("at least"), ">=");
        assert_eq!(canonicalize_operator("at most"), "<=");
        assert_eq!(canonicalize_operator("in range"), "between");
        assert_eq!(canonicalize_operator("range"), "between");
    }

    #[test]
    fn unknown_operators_pass_through_trimmed() {
        assert_eq!(canonicalize_operator(" LIKE "), "LIKE");
        assert_eq!(canonicalize_operator("~"), "~");
    }
}
