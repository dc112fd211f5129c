//! Query result entity

use super::page::{PageContinuation, PageWindow};
use crate::core::dataset_name::DatasetName;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// How a query's text rendering is produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Summary plus a markdown table (default)
    #[default]
    Markdown,
    /// Pretty-printed JSON of the structured result
    Json,
}

impl FromStr for ResponseFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" => Ok(ResponseFormat::Markdown),
            "json" => Ok(ResponseFormat::Json),
            other => Err(DomainError::UnknownResponseFormat(other.to_string())),
        }
    }
}

/// Result of one row query
///
/// Invariants: `has_more == offset + rows_returned < total_matching`;
/// `next_offset` is present iff `has_more` and equals `offset + rows_returned`.
/// `rows_returned` is always `data.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub dataset_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_summary: Option<String>,
    pub total_matching: u64,
    pub rows_returned: u64,
    pub offset: u64,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<u64>,
    pub data: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl QueryResult {
    /// Build a result from the rows the gateway returned for `window`.
    ///
    /// `total` is the gateway-reported match count, if it reported one.
    pub fn new(
        dataset: &DatasetName,
        window: &PageWindow,
        total: Option<u64>,
        data: Vec<Value>,
    ) -> Self {
        let rows_returned = data.len() as u64;
        let continuation =
            PageContinuation::from_gateway_result(window.offset(), total, rows_returned);
        let warning = Self::warning_for(window, &continuation, rows_returned);
        Self {
            dataset_name: dataset.to_string(),
            query_summary: None,
            total_matching: continuation.total_matching,
            rows_returned,
            offset: window.offset(),
            has_more: continuation.has_more,
            next_offset: continuation.next_offset,
            data,
            warning,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.query_summary = Some(summary.into());
        self
    }

    fn warning_for(
        window: &PageWindow,
        continuation: &PageContinuation,
        rows_returned: u64,
    ) -> Option<String> {
        let mut notes = Vec::new();
        if !window.is_page_aligned() {
            notes.push(format!(
                "offset {} is not a multiple of max_rows {}; rows start at {}",
                window.offset(),
                window.max_rows(),
                window.page_start()
            ));
        }
        if let Some(next) = continuation.next_offset {
            notes.push(format!(
                "Results truncated: showing {} of {} matching rows. Use offset={} for the next page",
                rows_returned, continuation.total_matching, next
            ));
        }
        (!notes.is_empty()).then(|| notes.join(". "))
    }
}
