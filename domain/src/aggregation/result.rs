//! Aggregation result rows

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of aggregation output
///
/// Sparse: only the fields for requested operations are populated, and
/// absent fields are omitted when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationResultRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Value>,
}

impl AggregationResultRow {
    pub fn count(count: u64) -> Self {
        Self {
            count: Some(count),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_count_row_is_sparse() {
        assert_eq!(
            serde_json::to_value(AggregationResultRow::count(42)).unwrap(),
            json!({"count": 42})
        );
    }
}
