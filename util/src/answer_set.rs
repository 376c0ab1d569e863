//! Tolerant JSON codec for stored answer data.
//!
//! Quiz option lists, correct-answer index lists, and submission histories are
//! persisted as JSON text columns. Stored text may predate validation or have
//! been edited by hand, so decoding never fails: blank or malformed input
//! degrades to the empty value and the row stays readable.

use std::collections::HashMap;

const EMPTY_LIST: &str = "[]";
const EMPTY_MAP: &str = "{}";

/// Encodes a list of answer indices as JSON array text.
///
/// Falls back to `"[]"` if serialization fails, so a write never aborts
/// on encoding.
pub fn encode_indices(indices: &[i64]) -> String {
    serde_json::to_string(indices).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to encode answer indices, storing empty list");
        EMPTY_LIST.into()
    })
}

/// Decodes JSON array text into answer indices.
///
/// Blank or malformed input yields an empty list.
pub fn decode_indices(raw: &str) -> Vec<i64> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str(raw).unwrap_or_default()
}

/// Encodes quiz option texts as JSON array text.
pub fn encode_options(options: &[String]) -> String {
    serde_json::to_string(options).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to encode quiz options, storing empty list");
        EMPTY_LIST.into()
    })
}

/// Decodes JSON array text into quiz option texts.
///
/// Blank or malformed input yields an empty list.
pub fn decode_options(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str(raw).unwrap_or_default()
}

/// Encodes a submission history (quiz id to selected indices) as JSON object
/// text. Map keys are serialized as decimal strings.
pub fn encode_history(history: &HashMap<i64, Vec<i64>>) -> String {
    serde_json::to_string(history).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to encode submission history, storing empty map");
        EMPTY_MAP.into()
    })
}

/// Decodes JSON object text into a submission history.
///
/// Blank or malformed input yields an empty map.
pub fn decode_history(raw: &str) -> HashMap<i64, Vec<i64>> {
    if raw.trim().is_empty() {
        return HashMap::new();
    }
    serde_json::from_str(raw).unwrap_or_default()
}
