//! Aggregate Dataset use case
//!
//! The gateway has no aggregation endpoint. A request is planned before any
//! I/O and only an ungrouped count runs, by reading the view total of a
//! one-row page.

use super::error::{ToolError, ToolOperation};
use super::query_dataset::filters_parameter;
use crate::config::GatewayEndpoints;
use crate::ports::dataset_gateway::{DatasetGateway, ViewRequest, ViewResponse};
use datagroom_domain::{
    Aggregation, AggregationOp, AggregationPlan, AggregationRequest, AggregationResultRow,
    DatasetName, DomainError, Filter, GatewayPage, ToolDefinition, ToolParameter,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

pub const AGGREGATE_DATASET: &str = "datagroom_aggregate_dataset";

pub fn aggregate_dataset_definition() -> ToolDefinition {
    ToolDefinition::new(
        AGGREGATE_DATASET,
        "Compute aggregations over a Datagroom dataset without fetching its rows. \
         Currently only a single count without group_by is available; sum, avg, min, max \
         and grouped aggregations fail with an explicit 'not yet available' error.",
    )
    .with_parameter(ToolParameter::new("dataset_name", "Name of the dataset", true))
    .with_parameter(filters_parameter())
    .with_parameter(
        ToolParameter::new("aggregations", "Aggregations to compute", true)
            .with_items(
                ToolParameter::new("aggregation", "A single aggregation", true)
                    .with_property(
                        ToolParameter::new("operation", "Aggregation operation", true)
                            .with_enum(AggregationOp::ALL.iter().map(|op| op.as_str())),
                    )
                    .with_property(ToolParameter::new(
                        "field",
                        "Field to aggregate (required for sum, avg, min, max)",
                        false,
                    )),
            )
            .with_min_items(1),
    )
    .with_parameter(ToolParameter::new(
        "group_by",
        "Field name to group results by",
        false,
    ))
}

/// Raw tool arguments
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AggregateDatasetArgs {
    pub dataset_name: String,
    #[serde(default)]
    pub filters: Option<Vec<Filter>>,
    pub aggregations: Vec<Aggregation>,
    #[serde(default)]
    pub group_by: Option<String>,
}

/// Validated input for the AggregateDataset use case
#[derive(Debug, Clone)]
pub struct AggregateDatasetInput {
    pub dataset: DatasetName,
    pub filters: Vec<Filter>,
    pub request: AggregationRequest,
}

impl TryFrom<AggregateDatasetArgs> for AggregateDatasetInput {
    type Error = DomainError;

    fn try_from(args: AggregateDatasetArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            dataset: DatasetName::parse(args.dataset_name)?,
            filters: args.filters.unwrap_or_default(),
            request: AggregationRequest::new(args.aggregations, args.group_by)?,
        })
    }
}

/// Output of the AggregateDataset use case
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateDatasetOutput {
    pub dataset_name: String,
    pub group_by: Option<String>,
    pub rows: Vec<AggregationResultRow>,
}

/// Use case for aggregating a dataset
pub struct AggregateDatasetUseCase<G: DatasetGateway + 'static> {
    gateway: Arc<G>,
    endpoints: GatewayEndpoints,
}

impl<G: DatasetGateway + 'static> AggregateDatasetUseCase<G> {
    pub fn new(gateway: Arc<G>, endpoints: GatewayEndpoints) -> Self {
        Self { gateway, endpoints }
    }

    pub async fn execute(
        &self,
        input: AggregateDatasetInput,
    ) -> Result<AggregateDatasetOutput, ToolError> {
        let plan = input.request.plan().inspect_err(|e| {
            warn!("Rejected aggregation on '{}': {}", input.dataset, e);
        })?;

        let rows = match plan {
            AggregationPlan::CountAll => vec![self.count(&input.dataset, &input.filters).await?],
        };

        Ok(AggregateDatasetOutput {
            dataset_name: input.dataset.to_string(),
            group_by: input.request.group_by().map(str::to_string),
            rows,
        })
    }

    async fn count(
        &self,
        dataset: &DatasetName,
        filters: &[Filter],
    ) -> Result<AggregationResultRow, ToolError> {
        let path = self.endpoints.view(dataset);
        let request = ViewRequest {
            filters,
            sort: None,
            page: GatewayPage::first(1),
        };
        info!("Counting rows: POST {} (per_page 1)", path);

        let response = self
            .gateway
            .post_json(&path, &request.to_body())
            .await
            .and_then(ViewResponse::from_value)
            .map_err(|e| {
                error!("aggregate_dataset failed for '{}': {}", dataset, e);
                ToolError::from_gateway(ToolOperation::AggregateDataset, Some(dataset.as_str()), e)
            })?;

        Ok(AggregationResultRow::count(response.total_or_len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::FakeGateway;
    use serde_json::{Value, json};

    fn use_case(gateway: &Arc<FakeGateway>) -> AggregateDatasetUseCase<FakeGateway> {
        AggregateDatasetUseCase::new(Arc::clone(gateway), GatewayEndpoints::default())
    }

    fn parse(args: Value) -> Result<AggregateDatasetInput, DomainError> {
        let args: AggregateDatasetArgs = serde_json::from_value(args)
            .map_err(|e| DomainError::InvalidArguments(e.to_string()))?;
        AggregateDatasetInput::try_from(args)
    }

    #[tokio::test]
    async fn test_count_reads_reported_total() {
        let gateway = Arc::new(FakeGateway::responding(json!({"total": 42, "data": [{"id": 1}]})));
        let input = parse(json!({
            "dataset_name": "orders",
            "filters": [],
            "aggregations": [{"operation": "count"}],
            "group_by": null
        }))
        .unwrap();

        let output = use_case(&gateway).execute(input).await.unwrap();

        assert_eq!(output.rows, vec![AggregationResultRow::count(42)]);
        assert_eq!(serde_json::to_value(&output.rows[0]).unwrap(), json!({"count": 42}));
        assert_eq!(
            gateway.last_body(),
            Some(json!({"filters": [], "sorters": [], "page": 1, "per_page": 1}))
        );
    }

    #[tokio::test]
    async fn test_count_accepts_float_total() {
        let gateway = Arc::new(FakeGateway::responding(json!({"total": 42.0, "data": []})));
        let input = parse(json!({"dataset_name": "orders", "aggregations": [{"operation": "count"}]}))
            .unwrap();
        let output = use_case(&gateway).execute(input).await.unwrap();
        assert_eq!(output.rows, vec![AggregationResultRow::count(42)]);
    }

    #[tokio::test]
    async fn test_count_falls_back_to_row_length() {
        let gateway = Arc::new(FakeGateway::responding(json!({"data": [{"id": 1}]})));
        let input = parse(json!({"dataset_name": "orders", "aggregations": [{"operation": "count"}]}))
            .unwrap();
        let output = use_case(&gateway).execute(input).await.unwrap();
        assert_eq!(output.rows[0].count, Some(1));
    }

    #[tokio::test]
    async fn test_count_forwards_filters() {
        let gateway = Arc::new(FakeGateway::responding(json!({"total": 7, "data": []})));
        let input = parse(json!({
            "dataset_name": "orders",
            "filters": [{"field": "status", "type": "eq", "value": "open"}],
            "aggregations": [{"operation": "count"}]
        }))
        .unwrap();
        use_case(&gateway).execute(input).await.unwrap();
        assert_eq!(
            gateway.last_body().unwrap()["filters"],
            json!([{"field": "status", "type": "eq", "value": "open"}])
        );
    }

    #[tokio::test]
    async fn test_unsupported_operations_never_reach_gateway() {
        let gateway = Arc::new(FakeGateway::responding(json!({"total": 42})));
        for op in ["sum", "avg", "min", "max"] {
            let input = parse(json!({
                "dataset_name": "orders",
                "aggregations": [{"operation": op, "field": "amount"}]
            }))
            .unwrap();
            let err = use_case(&gateway).execute(input).await.unwrap_err();
            assert!(matches!(err, ToolError::Unsupported(_)), "{op}");
            assert!(err.to_string().contains("not yet available"));
        }
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_grouped_count_is_unsupported() {
        let gateway = Arc::new(FakeGateway::responding(json!({"total": 42})));
        let input = parse(json!({
            "dataset_name": "orders",
            "aggregations": [{"operation": "count"}],
            "group_by": "status"
        }))
        .unwrap();
        let err = use_case(&gateway).execute(input).await.unwrap_err();
        assert!(err.to_string().contains("group_by 'status'"));
        assert_eq!(gateway.call_count(), 0);
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            parse(json!({"dataset_name": "orders", "aggregations": []})).unwrap_err(),
            DomainError::NoAggregations
        );
        assert!(
            parse(json!({"dataset_name": "orders", "aggregations": [{"operation": "sum"}]}))
                .is_err()
        );
        assert!(
            parse(json!({"dataset_name": "orders", "aggregations": [{"operation": "median", "field": "x"}]}))
                .is_err()
        );
        assert_eq!(
            parse(json!({"dataset_name": " ", "aggregations": [{"operation": "count"}]})).unwrap_err(),
            DomainError::EmptyDatasetName
        );
    }
}
