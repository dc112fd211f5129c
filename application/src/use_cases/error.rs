//! Tool error taxonomy

use crate::ports::dataset_gateway::GatewayError;
use datagroom_domain::{DomainError, UnsupportedAggregation};
use thiserror::Error;

/// The five tool operations, used to name failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOperation {
    GetSchema,
    ListDatasets,
    QueryDataset,
    AggregateDataset,
    SampleDataset,
}

impl ToolOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolOperation::GetSchema => "get_schema",
            ToolOperation::ListDatasets => "list_datasets",
            ToolOperation::QueryDataset => "query_dataset",
            ToolOperation::AggregateDataset => "aggregate_dataset",
            ToolOperation::SampleDataset => "sample_dataset",
        }
    }

    /// "getting schema for dataset 'sales'", "listing datasets", ...
    pub fn describe(&self, dataset: Option<&str>) -> String {
        let verb = match self {
            ToolOperation::GetSchema => "getting schema for",
            ToolOperation::ListDatasets => "listing",
            ToolOperation::QueryDataset => "querying",
            ToolOperation::AggregateDataset => "aggregating",
            ToolOperation::SampleDataset => "sampling",
        };
        match dataset {
            Some(name) => format!("{} dataset '{}'", verb, name),
            None => format!("{} datasets", verb),
        }
    }
}

impl std::fmt::Display for ToolOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors a tool call can fail with.
///
/// `Validation`, `Unsupported` and `UnknownTool` are always produced before
/// any gateway request is issued.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),

    #[error("Error {}: {source}", .operation.describe(.dataset.as_deref()))]
    UpstreamUnavailable {
        operation: ToolOperation,
        dataset: Option<String>,
        #[source]
        source: GatewayError,
    },

    #[error("Unsupported operation: {0}")]
    Unsupported(#[from] UnsupportedAggregation),

    #[error("Configuration error while {}: {message}", .operation.describe(.dataset.as_deref()))]
    Configuration {
        operation: ToolOperation,
        dataset: Option<String>,
        message: String,
    },

    #[error("Tool '{0}' not found")]
    UnknownTool(String),
}

impl ToolError {
    /// Classify a gateway failure: a missing token is a configuration
    /// problem, everything else means the upstream is unavailable.
    pub fn from_gateway(
        operation: ToolOperation,
        dataset: Option<&str>,
        error: GatewayError,
    ) -> Self {
        let dataset = dataset.map(str::to_string);
        match error {
            GatewayError::MissingToken => ToolError::Configuration {
                operation,
                dataset,
                message: error.to_string(),
            },
            source => ToolError::UpstreamUnavailable {
                operation,
                dataset,
                source,
            },
        }
    }

    /// True for errors raised before any network I/O
    pub fn is_pre_flight(&self) -> bool {
        matches!(
            self,
            ToolError::Validation(_) | ToolError::Unsupported(_) | ToolError::UnknownTool(_)
        )
    }
}
