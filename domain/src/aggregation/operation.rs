//! Aggregation operations

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Aggregation operation (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationOp {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregationOp {
    pub const ALL: [AggregationOp; 5] = [
        AggregationOp::Count,
        AggregationOp::Sum,
        AggregationOp::Avg,
        AggregationOp::Min,
        AggregationOp::Max,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationOp::Count => "count",
            AggregationOp::Sum => "sum",
            AggregationOp::Avg => "avg",
            AggregationOp::Min => "min",
            AggregationOp::Max => "max",
        }
    }

    /// Every operation except `count` works on a specific field
    pub fn requires_field(&self) -> bool {
        !matches!(self, AggregationOp::Count)
    }
}

impl FromStr for AggregationOp {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "count" => Ok(AggregationOp::Count),
            "sum" => Ok(AggregationOp::Sum),
            "avg" => Ok(AggregationOp::Avg),
            "min" => Ok(AggregationOp::Min),
            "max" => Ok(AggregationOp::Max),
            other => Err(DomainError::UnknownAggregation(other.to_string())),
        }
    }
}

impl std::fmt::Display for AggregationOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One requested aggregation: an operation and, unless counting, a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAggregation")]
pub struct Aggregation {
    operation: AggregationOp,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl Aggregation {
    pub fn new(operation: AggregationOp, field: Option<String>) -> Result<Self, DomainError> {
        let field = field.filter(|f| !f.trim().is_empty());
        if operation.requires_field() && field.is_none() {
            return Err(DomainError::MissingAggregationField);
        }
        Ok(Self { operation, field })
    }

    pub fn count() -> Self {
        Self {
            operation: AggregationOp::Count,
            field: None,
        }
    }

    pub fn operation(&self) -> AggregationOp {
        self.operation
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAggregation {
    operation: String,
    #[serde(default)]
    field: Option<String>,
}

impl TryFrom<RawAggregation> for Aggregation {
    type Error = DomainError;

    fn try_from(raw: RawAggregation) -> Result<Self, Self::Error> {
        Aggregation::new(raw.operation.parse()?, raw.field)
    }
}
