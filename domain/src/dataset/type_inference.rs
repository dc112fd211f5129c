//! Column type inference from sample values
//!
//! Used when the gateway's schema document leaves a column's type blank.

use serde_json::Value;

/// Type name reported when nothing can be inferred
pub const UNKNOWN_TYPE: &str = "unknown";

/// Infer a type name from a single value
pub fn infer_type(value: &Value) -> &'static str {
    match value {
        Value::Null => UNKNOWN_TYPE,
        Value::Array(_) => "array",
        Value::Object(_) => "object",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::String(s) if looks_like_date(s) => "date",
        Value::String(_) => "string",
    }
}

/// Most common inferred type among `values`; the first seen wins ties
pub fn infer_column_type(values: &[Value]) -> &'static str {
    let mut counts: Vec<(&'static str, usize)> = Vec::new();
    for value in values {
        let ty = infer_type(value);
        match counts.iter_mut().find(|(seen, _)| *seen == ty) {
            Some((_, n)) => *n += 1,
            None => counts.push((ty, 1)),
        }
    }
    counts
        .into_iter()
        .fold(None, |best: Option<(&'static str, usize)>, (ty, n)| match best {
            Some((_, best_n)) if best_n >= n => best,
            _ => Some((ty, n)),
        })
        .map(|(ty, _)| ty)
        .unwrap_or(UNKNOWN_TYPE)
}

/// Up to `limit` distinct non-null values of `field` across `rows`,
/// in first-seen order
pub fn extract_sample_values(rows: &[Value], field: &str, limit: usize) -> Vec<Value> {
    let mut seen = Vec::new();
    let mut samples = Vec::new();
    for value in rows.iter().filter_map(|row| row.get(field)) {
        if samples.len() >= limit {
            break;
        }
        if value.is_null() {
            continue;
        }
        let key = value.to_string();
        if !seen.contains(&key) {
            seen.push(key);
            samples.push(value.clone());
        }
    }
    samples
}

/// True when the string contains a plausible `YYYY-MM-DD` date
fn looks_like_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.windows(10).any(|w| {
        let digits = |range: std::ops::Range<usize>| w[range].iter().all(u8::is_ascii_digit);
        if !(digits(0..4) && w[4] == b'-' && digits(5..7) && w[7] == b'-' && digits(8..10)) {
            return false;
        }
        let month = (w[5] - b'0') * 10 + (w[6] - b'0');
        let day = (w[8] - b'0') * 10 + (w[9] - b'0');
        (1..=12).contains(&month) && (1..=31).contains(&day)
    })
}
