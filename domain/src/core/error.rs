//! Domain error types

use thiserror::Error;

/// Domain-level validation errors.
///
/// Every variant describes bad caller input. None of them is ever produced
/// after a gateway request has been issued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Dataset name is required")]
    EmptyDatasetName,

    #[error("{0} field name cannot be empty")]
    EmptyField(&'static str),

    #[error("Unknown filter type '{0}' (expected one of: eq, ne, gt, lt, gte, lte, in, nin, regex)")]
    UnknownFilterType(String),

    #[error("Unknown sort direction '{0}' (expected 'asc' or 'desc')")]
    UnknownSortDirection(String),

    #[error("max_rows must be between 1 and 1000 (got {0})")]
    MaxRowsOutOfRange(i64),

    #[error("offset must be >= 0 (got {0})")]
    NegativeOffset(i64),

    #[error("sample_size must be between 1 and 100 (got {0})")]
    SampleSizeOutOfRange(i64),

    #[error("At least one aggregation is required")]
    NoAggregations,

    #[error("Field is required for sum, avg, min, and max operations")]
    MissingAggregationField,

    #[error("Unknown aggregation operation '{0}' (expected one of: count, sum, avg, min, max)")]
    UnknownAggregation(String),

    #[error("Unknown response format '{0}' (expected 'markdown' or 'json')")]
    UnknownResponseFormat(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dataset_name_display() {
        assert_eq!(
            DomainError::EmptyDatasetName.to_string(),
            "Dataset name is required"
        );
    }

    #[test]
    fn test_range_errors_carry_value() {
        assert!(DomainError::MaxRowsOutOfRange(0).to_string().contains("got 0"));
        assert!(
            DomainError::SampleSizeOutOfRange(150)
                .to_string()
                .contains("between 1 and 100")
        );
    }
}
