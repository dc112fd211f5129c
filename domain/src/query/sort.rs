//! Sort directive

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(DomainError::UnknownSortDirection(other.to_string())),
        }
    }
}

/// A single sort key. The pipeline supports at most one per query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSort")]
pub struct SortSpec {
    field: String,
    direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Result<Self, DomainError> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(DomainError::EmptyField("Sort"));
        }
        Ok(Self { field, direction })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSort {
    field: String,
    direction: String,
}

impl TryFrom<RawSort> for SortSpec {
    type Error = DomainError;

    fn try_from(raw: RawSort) -> Result<Self, Self::Error> {
        SortSpec::new(raw.field, raw.direction.parse()?)
    }
}
