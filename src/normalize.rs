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

//! # Jumhur Value Normalizer Module
//!
//! Reduces a raw filter value to its canonical, type-conformant form:
//! bilingual alias mapping for gender/country/city values, boolean token
//! mapping, date resolution (relative "last N days" phrasing, localized
//! month names, tolerant multi-format parsing), and numeric coercion.
//!
//! Normalization degrades gracefully: a value that cannot be mapped or
//! parsed is returned unchanged (with a warning logged) and the validator
//! decides its fate. Rules are applied in a fixed order and the first
//! matching rule wins.

use chrono::{Duration, Local, NaiveDate};
use regex::{Regex, RegexBuilder};

use crate::filter::{JmFieldType, JmScalar};
use crate::mappings::JmValueMappings;

/// Normalizes one scalar value for the given canonical field and declared
/// type. Range values are normalized element-wise by the caller.
pub fn normalize_value(
    field: &str,
    value: JmScalar,
    field_type: JmFieldType,
    mappings: &JmValueMappings,
) -> JmScalar {
    let value = match value {
        JmScalar::String(s) => JmScalar::String(s.trim().to_string()),
        other => other,
    };

    if field == "gender" {
        if let JmScalar::String(text) = &value {
            if let Some(mapped) = mappings.gender(text) {
                return JmScalar::String(mapped.to_string());
            }
        }
    }

    if field == "country" {
        if let JmScalar::String(text) = &value {
            if let Some(mapped) = mappings.country(text) {
                return JmScalar::String(mapped.to_string());
            }
        }
    }

    if field == "city" {
        if let JmScalar::String(text) = &value {
            if let Some(mapped) = mappings.city(text) {
                return JmScalar::String(mapped.to_string());
            }
        }
    }

    if field_type == JmFieldType::Boolean {
        if let JmScalar::String(text) = &value {
            if let Some(mapped) = mappings.boolean(text) {
                return JmScalar::Boolean(mapped);
            }
        }
        return value;
    }

    if field_type == JmFieldType::Date {
        return match value {
            JmScalar::String(text) => match try_resolve_date(&text, mappings) {
                Some(resolved) => JmScalar::Date(resolved),
                None => {
                    log::warn!("failed to parse date value '{}' for field '{}'", text, field);
                    JmScalar::String(text)
                }
            },
            other => other,
        };
    }

    if field_type == JmFieldType::Integer {
        // Truncating float-then-int coercion; booleans are never coerced.
        return match value {
            JmScalar::Float(f) => JmScalar::Integer(f as i64),
            JmScalar::String(text) => match text.parse::<f64>() {
                Ok(parsed) => JmScalar::Integer(parsed as i64),
                Err(_) => {
                    log::warn!("failed to coerce '{}' to integer for field '{}'", text, field);
                    JmScalar::String(text)
                }
            },
            other => other,
        };
    }

    if field_type == JmFieldType::Float {
        return match value {
            JmScalar::Integer(i) => JmScalar::Float(i as f64),
            JmScalar::String(text) => match text.parse::<f64>() {
                Ok(parsed) => JmScalar::Float(parsed),
                Err(_) => {
                    log::warn!("failed to coerce '{}' to float for field '{}'", text, field);
                    JmScalar::String(text)
                }
            },
            other => other,
        };
    }

    value
}

/// Resolves a date expression to a `YYYY-MM-DD` string.
///
/// Relative "last N days" phrasing takes precedence and is computed against
/// the local date. Otherwise localized month names are substituted with
/// their numeric equivalents before tolerant parsing. Unparsable text is
/// returned verbatim.
pub fn resolve_date(text: &str, mappings: &JmValueMappings) -> String {
    match try_resolve_date(text, mappings) {
        Some(resolved) => resolved,
        None => {
            log::warn!("failed to parse date value '{}'", text);
            text.trim().to_string()
        }
    }
}

fn try_resolve_date(text: &str, mappings: &JmValueMappings) -> Option<String> {
    let trimmed = text.trim();

    if let Some(days) = relative_days(trimmed) {
        let target = Local::now().date_naive() - Duration::days(days);
        return Some(target.format("%Y-%m-%d").to_string());
    }

    let substituted = substitute_months(trimmed, mappings);
    parse_tolerant_date(&substituted).map(|date| date.format("%Y-%m-%d").to_string())
}

/// Extracts the day count from "last N day(s)" phrasing.
fn relative_days(text: &str) -> Option<i64> {
    if !text.to_lowercase().contains("last") {
        return None;
    }
    let pattern = Regex::new(r"(?i)(\d+)\s*days?").ok()?;
    let captures = pattern.captures(text)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Replaces every recognized month name with its zero-padded number, in
/// table order; full names are listed before abbreviations so that
/// "january" is consumed before "jan" could match inside it.
fn substitute_months(text: &str, mappings: &JmValueMappings) -> String {
    let mut out = text.to_string();
    for (name, number) in &mappings.month_names {
        let pattern = match RegexBuilder::new(&regex::escape(name))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => pattern,
            Err(_) => continue,
        };
        out = pattern.replace_all(&out, number.as_str()).into_owned();
    }
    out
}

/// Locale-tolerant date parsing over month-substituted text.
///
/// Exact numeric formats are tried first ('/' and '.' separators folded to
/// '-'). Failing that, the digit groups in the text are interpreted
/// directly: a four-digit group is the year, and of the remaining groups
/// the first is the month unless it exceeds 12, in which case day and
/// month are swapped. Missing components default to 1.
fn parse_tolerant_date(text: &str) -> Option<NaiveDate> {
    let cleaned = text.trim().replace(['/', '.'], "-");

    for format in ["%Y-%m-%d", "%d-%m-%Y", "%m-%d-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(&cleaned, format) {
            return Some(date);
        }
    }

    let digits = Regex::new(r"\d+").ok()?;
    let mut year: Option<i32> = None;
    let mut parts: Vec<u32> = Vec::new();
    for group in digits.find_iter(&cleaned) {
        let token = group.as_str();
        if token.len() == 4 && year.is_none() {
            year = token.parse().ok();
        } else if parts.len() < 2 {
            if let Ok(value) = token.parse() {
                parts.push(value);
            }
        }
    }

    let year = year?;
    let (month, day) = match parts.as_slice() {
        [] => (1, 1),
        [only] => (*only, 1),
        [first, second, ..] => {
            if *first > 12 {
                (*second, *first)
            } else {
                (*first, *second)
            }
        }
    };

    NaiveDate::from_ymd_opt(year, month, day)
}
