//! Free-form detail entries attached to a result.

use crate::verdict::Tone;
use serde::Serialize;
use serde_json::{Map, Value};

/// Values that mark a finding as a red flag.
const FLAGGED_VALUES: &[&str] = &[
    "High",
    "Suspicious",
    "Mismatched",
    "Inconsistent",
    "Unverified",
    "Questionable",
    "error",
];

/// One displayable `label: value` finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailEntry {
    pub label: String,
    pub value: String,
    pub tone: Tone,
}

/// Turn a details object into display entries, in the order received.
pub fn detail_entries(details: &Map<String, Value>) -> Vec<DetailEntry> {
    details
        .iter()
        .map(|(key, value)| {
            let value = value_text(value);
            let tone = if FLAGGED_VALUES.contains(&value.as_str()) {
                Tone::Danger
            } else {
                Tone::Good
            };
            DetailEntry {
                label: humanize_key(key),
                value,
                tone,
            }
        })
        .collect()
}

/// `facialConsistency` → `Facial Consistency`.
pub fn humanize_key(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_uppercase() {
            spaced.push(' ');
        }
        spaced.push(c);
    }
    spaced
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => {
            let mut result = c.to_uppercase().to_string();
            result.push_str(chars.as_str());
            result
        }
        None => String::new(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "n/a".to_owned(),
        other => other.to_string(),
    }
}
