//! Dataset entities as surfaced by the gateway

use super::type_inference::{UNKNOWN_TYPE, extract_sample_values, infer_column_type};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Number of sample values kept per column when inferring from sample rows
pub const SAMPLE_VALUES_PER_COLUMN: usize = 5;

/// Read-only description of a dataset from the dataset listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub name: String,
    pub collections: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<u64>,
}

impl DatasetInfo {
    /// Read one `dbList` entry. Entries without a non-empty string `name`
    /// are not datasets and yield `None`.
    pub fn from_listing_entry(entry: &Value) -> Option<Self> {
        let name = entry.get("name")?.as_str()?.trim();
        if name.is_empty() {
            return None;
        }
        let collections = entry
            .get("collections")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let row_count = ["row_count", "rowCount", "count"]
            .iter()
            .find_map(|key| entry.get(*key).and_then(Value::as_u64));
        Some(Self {
            name: name.to_string(),
            collections,
            row_count,
        })
    }
}

/// One column of a dataset schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub column_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub editable: bool,
    #[serde(deserialize_with = "null_as_visible")]
    pub visible: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub sample_values: Vec<Value>,
}

impl Default for ColumnInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            column_type: String::new(),
            editable: false,
            visible: true,
            sample_values: Vec::new(),
        }
    }
}

/// Schema document for one dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSchema {
    #[serde(deserialize_with = "null_as_default")]
    pub dataset_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub columns: Vec<ColumnInfo>,
    #[serde(deserialize_with = "null_as_default")]
    pub total_rows: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub sample_data: Vec<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub keys: Vec<String>,
}

impl DatasetSchema {
    /// Fill gaps the gateway left: a missing dataset name, missing sample
    /// values (taken from `sample_data`) and blank column types (inferred
    /// from the sample values).
    pub fn completed(mut self, requested_name: &str) -> Self {
        if self.dataset_name.trim().is_empty() {
            self.dataset_name = requested_name.to_string();
        }
        for column in &mut self.columns {
            if column.sample_values.is_empty() {
                column.sample_values =
                    extract_sample_values(&self.sample_data, &column.name, SAMPLE_VALUES_PER_COLUMN);
            }
            if column.column_type.trim().is_empty() {
                column.column_type = if column.sample_values.is_empty() {
                    UNKNOWN_TYPE.to_string()
                } else {
                    infer_column_type(&column.sample_values).to_string()
                };
            }
        }
        self
    }
}

/// The gateway writes `null` for unset schema attributes; read it like a
/// missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_visible<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

/// Rows returned by a sample request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleResult {
    pub dataset_name: String,
    /// Rows actually returned
    pub sample_size: u64,
    pub total_rows: u64,
    pub data: Vec<Value>,
}
