//! Aggregation request and backend support matrix

use super::operation::{Aggregation, AggregationOp};
use crate::core::error::DomainError;
use thiserror::Error;

/// A validated aggregation request
///
/// Invariants: at least one aggregation; every non-count aggregation
/// names a field. A blank `group_by` is treated as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationRequest {
    aggregations: Vec<Aggregation>,
    group_by: Option<String>,
}

/// What the gateway can actually execute for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationPlan {
    /// Row count over the filtered dataset, read from the view total
    CountAll,
}

/// A valid request the gateway has no endpoint for
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnsupportedAggregation {
    #[error(
        "'{0}' aggregation is not yet available: the gateway has no aggregation endpoint; only count without group_by is supported"
    )]
    Operation(AggregationOp),

    #[error(
        "Grouped aggregation (group_by '{0}') is not yet available: only count without group_by is supported"
    )]
    GroupBy(String),

    #[error(
        "Multiple aggregations in one request are not yet available: only a single count without group_by is supported"
    )]
    Multiple,
}

impl AggregationRequest {
    pub fn new(
        aggregations: Vec<Aggregation>,
        group_by: Option<String>,
    ) -> Result<Self, DomainError> {
        if aggregations.is_empty() {
            return Err(DomainError::NoAggregations);
        }
        Ok(Self {
            aggregations,
            group_by: group_by.filter(|g| !g.trim().is_empty()),
        })
    }

    pub fn aggregations(&self) -> &[Aggregation] {
        &self.aggregations
    }

    pub fn group_by(&self) -> Option<&str> {
        self.group_by.as_deref()
    }

    /// Decide how (or whether) the request can run.
    ///
    /// Only a single `count` without grouping is executable; anything else
    /// fails here rather than being approximated.
    pub fn plan(&self) -> Result<AggregationPlan, UnsupportedAggregation> {
        if let Some(group_by) = &self.group_by {
            return Err(UnsupportedAggregation::GroupBy(group_by.clone()));
        }
        match self.aggregations.as_slice() {
            [only] => match only.operation() {
                AggregationOp::Count => Ok(AggregationPlan::CountAll),
                op @ (AggregationOp::Sum
                | AggregationOp::Avg
                | AggregationOp::Min
                | AggregationOp::Max) => Err(UnsupportedAggregation::Operation(op)),
            },
            many => match many.iter().find(|a| a.operation() != AggregationOp::Count) {
                Some(unsupported) => Err(UnsupportedAggregation::Operation(unsupported.operation())),
                None => Err(UnsupportedAggregation::Multiple),
            },
        }
    }
}
