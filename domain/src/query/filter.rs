//! Filter Model: a single field/operator/value predicate

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Comparison operator of a [`Filter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    Eq,
    Ne,
    Gt,
    Lt,
    Gte,
    Lte,
    In,
    Nin,
    Regex,
}

impl FilterType {
    pub const ALL: [FilterType; 9] = [
        FilterType::Eq,
        FilterType::Ne,
        FilterType::Gt,
        FilterType::Lt,
        FilterType::Gte,
        FilterType::Lte,
        FilterType::In,
        FilterType::Nin,
        FilterType::Regex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterType::Eq => "eq",
            FilterType::Ne => "ne",
            FilterType::Gt => "gt",
            FilterType::Lt => "lt",
            FilterType::Gte => "gte",
            FilterType::Lte => "lte",
            FilterType::In => "in",
            FilterType::Nin => "nin",
            FilterType::Regex => "regex",
        }
    }

    /// Set-membership operators take a sequence value
    pub fn is_membership(&self) -> bool {
        matches!(self, FilterType::In | FilterType::Nin)
    }
}

impl FromStr for FilterType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::UnknownFilterType(s.to_string()))
    }
}

impl std::fmt::Display for FilterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single predicate restricting returned rows (Value Object)
///
/// Built per tool call from caller input and discarded afterwards.
/// For `in`/`nin` the value is always a JSON array: a scalar is wrapped
/// into a one-element array at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFilter")]
pub struct Filter {
    field: String,
    #[serde(rename = "type")]
    kind: FilterType,
    value: Value,
}

impl Filter {
    pub fn new(
        field: impl Into<String>,
        kind: FilterType,
        value: impl Into<Value>,
    ) -> Result<Self, DomainError> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(DomainError::EmptyField("Filter"));
        }
        let value = match value.into() {
            Value::Array(items) => Value::Array(items),
            scalar if kind.is_membership() => Value::Array(vec![scalar]),
            other => other,
        };
        Ok(Self { field, kind, value })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn kind(&self) -> FilterType {
        self.kind
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Wire shape accepted from tool callers: `{field, type, value}`
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFilter {
    field: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    value: Value,
}

impl TryFrom<RawFilter> for Filter {
    type Error = DomainError;

    fn try_from(raw: RawFilter) -> Result<Self, Self::Error> {
        let kind = raw.kind.parse()?;
        Filter::new(raw.field, kind, raw.value)
    }
}
