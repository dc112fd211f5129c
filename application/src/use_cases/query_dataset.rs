//! Query Dataset use case
//!
//! Translates filters, sort and an offset window into one view request and
//! derives continuation metadata from the gateway's total.

use super::error::{ToolError, ToolOperation};
use crate::config::GatewayEndpoints;
use crate::ports::dataset_gateway::{DatasetGateway, ViewRequest, ViewResponse};
use datagroom_domain::{
    DatasetName, DomainError, Filter, FilterType, PageWindow, QueryResult, ResponseFormat,
    SortSpec, ToolDefinition, ToolParameter,
    query::page::{DEFAULT_MAX_ROWS, MAX_ROWS_LIMIT},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, info};

pub const QUERY_DATASET: &str = "datagroom_query_dataset";

/// Parameter describing a filter list; shared with the aggregate tool
pub fn filters_parameter() -> ToolParameter {
    ToolParameter::new(
        "filters",
        "Filters combined with AND. Each is {field, type, value}; value is an array for \
         'in'/'nin' and a case-insensitive pattern for 'regex'.",
        false,
    )
    .with_items(
        ToolParameter::new("filter", "A single field predicate", true)
            .with_property(ToolParameter::new("field", "Field name to filter on", true))
            .with_property(
                ToolParameter::new("type", "Comparison operator", true)
                    .with_enum(FilterType::ALL.iter().map(|t| t.as_str())),
            )
            .with_property(
                ToolParameter::new("value", "Value to compare against", true).with_type("any"),
            ),
    )
}

pub fn query_dataset_definition() -> ToolDefinition {
    ToolDefinition::new(
        QUERY_DATASET,
        "Query a Datagroom dataset with structured filters and return matching rows. \
         Supports one sort key and offset/max_rows pagination. The gateway pages in units \
         of max_rows, so an offset that is not a multiple of max_rows returns the page \
         containing that offset (a warning says where it starts). When has_more is true, \
         call again with offset=next_offset.",
    )
    .with_parameter(ToolParameter::new("dataset_name", "Name of the dataset to query", true))
    .with_parameter(filters_parameter())
    .with_parameter(
        ToolParameter::new("sort", "Sort configuration", false)
            .with_property(ToolParameter::new("field", "Field name to sort by", true))
            .with_property(
                ToolParameter::new("direction", "Sort direction", true).with_enum(["asc", "desc"]),
            ),
    )
    .with_parameter(
        ToolParameter::new(
            "max_rows",
            format!("Maximum rows to return (default {})", DEFAULT_MAX_ROWS),
            false,
        )
        .with_type("integer")
        .with_range(Some(1.0), Some(f64::from(MAX_ROWS_LIMIT))),
    )
    .with_parameter(
        ToolParameter::new("offset", "Number of rows to skip (default 0)", false)
            .with_type("integer")
            .with_range(Some(0.0), None),
    )
    .with_parameter(
        ToolParameter::new("response_format", "Text rendering (default markdown)", false)
            .with_enum(["markdown", "json"]),
    )
}

/// Raw tool arguments
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryDatasetArgs {
    pub dataset_name: String,
    #[serde(default)]
    pub filters: Option<Vec<Filter>>,
    #[serde(default)]
    pub sort: Option<SortSpec>,
    #[serde(default)]
    pub max_rows: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub response_format: Option<ResponseFormat>,
}

/// Validated input for the QueryDataset use case
#[derive(Debug, Clone)]
pub struct QueryDatasetInput {
    pub dataset: DatasetName,
    pub filters: Vec<Filter>,
    pub sort: Option<SortSpec>,
    pub window: PageWindow,
    pub response_format: ResponseFormat,
}

impl TryFrom<QueryDatasetArgs> for QueryDatasetInput {
    type Error = DomainError;

    fn try_from(args: QueryDatasetArgs) -> Result<Self, Self::Error> {
        let dataset = DatasetName::parse(args.dataset_name)?;
        let window = PageWindow::new(
            args.offset.unwrap_or(0),
            args.max_rows.unwrap_or(i64::from(DEFAULT_MAX_ROWS)),
        )?;
        Ok(Self {
            dataset,
            filters: args.filters.unwrap_or_default(),
            sort: args.sort,
            window,
            response_format: args.response_format.unwrap_or_default(),
        })
    }
}

/// Output of the QueryDataset use case
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDatasetOutput {
    pub result: QueryResult,
    /// Filters as applied, for the summary
    pub filters: Vec<Filter>,
    pub response_format: ResponseFormat,
}

/// Use case for querying dataset rows
pub struct QueryDatasetUseCase<G: DatasetGateway + 'static> {
    gateway: Arc<G>,
    endpoints: GatewayEndpoints,
}

impl<G: DatasetGateway + 'static> QueryDatasetUseCase<G> {
    pub fn new(gateway: Arc<G>, endpoints: GatewayEndpoints) -> Self {
        Self { gateway, endpoints }
    }

    pub async fn execute(&self, input: QueryDatasetInput) -> Result<QueryDatasetOutput, ToolError> {
        let dataset = input.dataset.as_str();
        let path = self.endpoints.view(&input.dataset);
        let request = ViewRequest {
            filters: &input.filters,
            sort: input.sort.as_ref(),
            page: input.window.to_gateway_page(),
        };
        info!(
            "Querying dataset: POST {} (page {}, per_page {})",
            path, request.page.page, request.page.per_page
        );
        debug!("{} filter(s), sort: {:?}", input.filters.len(), input.sort);

        let response = self
            .gateway
            .post_json(&path, &request.to_body())
            .await
            .and_then(ViewResponse::from_value)
            .map_err(|e| {
                error!("query_dataset failed for '{}': {}", dataset, e);
                ToolError::from_gateway(ToolOperation::QueryDataset, Some(dataset), e)
            })?;

        let total = response.total;
        let result = QueryResult::new(&input.dataset, &input.window, total, response.into_rows());
        debug!(
            "Query returned {} of {} rows (has_more: {})",
            result.rows_returned, result.total_matching, result.has_more
        );

        Ok(QueryDatasetOutput {
            result,
            filters: input.filters,
            response_format: input.response_format,
        })
    }
}
