//! Dataset gateway port
//!
//! Defines the interface for talking to the Datagroom gateway, plus the
//! request/response shapes of its view endpoint.

use async_trait::async_trait;
use datagroom_domain::{Filter, GatewayPage, SortSpec, query::to_gateway_filters};
use serde::{Deserialize, Deserializer, de};
use serde_json::{Value, json};
use thiserror::Error;

/// Errors that can occur during gateway requests
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Raised before any network I/O when no token is configured
    #[error("DATAGROOM_PAT_TOKEN not configured. Please set the environment variable.")]
    MissingToken,

    #[error("Gateway request timed out after {0}s")]
    Timeout(u64),

    #[error("Gateway connection error: {0}")]
    Connection(String),

    #[error("Gateway request failed ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Invalid gateway response: {0}")]
    InvalidResponse(String),
}

/// Gateway for dataset access
///
/// Implementations attach credentials and resolve `path` against the
/// configured base URL. One call is one HTTP request; no retries.
#[async_trait]
pub trait DatasetGateway: Send + Sync {
    /// `GET path`, decoding the JSON response body
    async fn get_json(&self, path: &str) -> Result<Value, GatewayError>;

    /// `POST path` with a JSON body, decoding the JSON response body
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, GatewayError>;
}

/// Body of a view request: `{filters, sorters, page, per_page}`
#[derive(Debug, Clone)]
pub struct ViewRequest<'a> {
    pub filters: &'a [Filter],
    pub sort: Option<&'a SortSpec>,
    pub page: GatewayPage,
}

impl<'a> ViewRequest<'a> {
    /// Unfiltered, unsorted request for `page`
    pub fn unfiltered(page: GatewayPage) -> Self {
        Self {
            filters: &[],
            sort: None,
            page,
        }
    }

    pub fn to_body(&self) -> Value {
        let sorters: Vec<Value> = self
            .sort
            .iter()
            .map(|s| json!({"field": s.field(), "direction": s.direction().as_str()}))
            .collect();
        json!({
            "filters": to_gateway_filters(self.filters),
            "sorters": sorters,
            "page": self.page.page,
            "per_page": self.page.per_page,
        })
    }
}

/// Response of a view request: `{total, data}`. Both may be missing or null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewResponse {
    #[serde(default, deserialize_with = "row_total")]
    pub total: Option<u64>,
    #[serde(default)]
    data: Option<Vec<Value>>,
}

/// Some gateway backends report the total as a float (`42.0`)
fn row_total<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    number
        .as_u64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|n| n.is_finite() && *n >= 0.0)
                .map(|n| n as u64)
        })
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("invalid row total {}", number)))
}

impl ViewResponse {
    pub fn from_value(value: Value) -> Result<Self, GatewayError> {
        serde_json::from_value(value).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }

    pub fn into_rows(self) -> Vec<Value> {
        self.data.unwrap_or_default()
    }

    /// Reported total, or the number of returned rows when none was reported
    pub fn total_or_len(&self) -> u64 {
        self.total
            .unwrap_or_else(|| self.data.as_ref().map_or(0, |d| d.len() as u64))
    }
}
