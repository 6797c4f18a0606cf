//! Per-shoe extraction from a parsed export document.
//!
//! Every field read goes through a default-on-missing accessor: absent,
//! `null`, or non-numeric values become `0` and absent sequences become
//! empty, so a sparse export never fails the run.

use serde_json::{Number, Value};
use stride_core::models::{ShoeData, ShoeKey, StrideRow};
use tracing::debug;

/// Extract one shoe's totals and flattened stride rows.
///
/// Returns `None` when `key` is not present at the top level of `document`
/// (including when the document is not a JSON object at all).
pub fn extract(document: &Value, key: ShoeKey) -> Option<ShoeData> {
    let shoe = document.get(key.as_str())?;

    let total_steps = number_or_zero(shoe, "total_steps");
    let distance_cm = f64_or_zero(shoe, "distance_in_cm");
    let duration_ms = f64_or_zero(shoe, "duration_in_milliseconds");

    let mut rows = Vec::new();
    for segment in array_or_empty(shoe, "segments") {
        for stride in array_or_empty(segment, "strides") {
            rows.push(StrideRow {
                shoe: key.as_str().to_string(),
                mid_step_time: f64_or_zero(stride, "mid_step_in_milliseconds"),
                stride_velocity: f64_or_zero(stride, "stride_velocity_in_cmps"),
                stride_length: f64_or_zero(stride, "stride_length_in_cm"),
            });
        }
    }

    debug!(shoe = %key, strides = rows.len(), "extracted shoe data");

    Some(ShoeData {
        key,
        total_steps,
        distance_cm,
        duration_ms,
        rows,
    })
}

/// Extract both shoes in presentation order; absent shoes are `None`.
pub fn extract_all(document: &Value) -> [Option<ShoeData>; 2] {
    ShoeKey::ALL.map(|key| extract(document, key))
}

// ── Default-on-missing accessors ──────────────────────────────────────────────

/// Numeric field kept as the JSON number it was written as.
fn number_or_zero(obj: &Value, field: &str) -> Number {
    match obj.get(field) {
        Some(Value::Number(n)) => n.clone(),
        Some(Value::Null) | None => Number::from(0),
        Some(other) => {
            debug!(field, value = %other, "non-numeric value treated as 0");
            Number::from(0)
        }
    }
}

fn f64_or_zero(obj: &Value, field: &str) -> f64 {
    match obj.get(field) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::Null) | None => 0.0,
        Some(other) => {
            debug!(field, value = %other, "non-numeric value treated as 0");
            0.0
        }
    }
}

fn array_or_empty<'a>(obj: &'a Value, field: &str) -> &'a [Value] {
    obj.get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

// ── Tests ─────────────────────────────────────────────────────────────────────
