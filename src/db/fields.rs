// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Defensive decoding of stored field values.
//!
//! Records store every field as text. Decoding never fails: absent or
//! malformed values fall back to a documented default (zero, empty
//! string, empty sequence) so reads stay total over whatever the store
//! currently holds.

use std::collections::HashMap;

use serde_json::Value;

/// Non-negative integer. Absent, malformed or negative values decode to 0.
pub(crate) fn u64_value(value: Option<&str>) -> u64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}

/// Non-negative finite real. Anything else decodes to 0.0.
pub(crate) fn f64_value(value: Option<&str>) -> f64 {
    value
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

/// Text. Absent values decode to the empty string.
pub(crate) fn text_value(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// JSON sequence stored as one text field. Absent or malformed values
/// decode to an empty sequence.
pub(crate) fn json_seq_value(value: Option<&str>) -> Vec<Value> {
    value
        .and_then(|v| serde_json::from_str(v).ok())
        .unwrap_or_default()
}

pub(crate) fn u64_field(fields: &HashMap<String, String>, name: &str) -> u64 {
    u64_value(fields.get(name).map(String::as_str))
}

pub(crate) fn f64_field(fields: &HashMap<String, String>, name: &str) -> f64 {
    f64_value(fields.get(name).map(String::as_str))
}

pub(crate) fn text_field(fields: &HashMap<String, String>, name: &str) -> String {
    text_value(fields.get(name).map(String::as_str))
}

pub(crate) fn json_seq_field(fields: &HashMap<String, String>, name: &str) -> Vec<Value> {
    json_seq_value(fields.get(name).map(String::as_str))
}
