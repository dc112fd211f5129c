//! Tool dispatcher
//!
//! Routes a named tool call with JSON arguments to its use case. Names are
//! resolved through the [`ToolSpec`], so unprefixed aliases such as
//! `query_dataset` reach the canonical `datagroom_query_dataset`.

use super::aggregate_dataset::{
    AGGREGATE_DATASET, AggregateDatasetArgs, AggregateDatasetInput, AggregateDatasetOutput,
    AggregateDatasetUseCase,
};
use super::error::ToolError;
use super::get_schema::{GET_SCHEMA, GetSchemaArgs, GetSchemaInput, GetSchemaUseCase};
use super::list_datasets::{
    LIST_DATASETS, ListDatasetsArgs, ListDatasetsOutput, ListDatasetsUseCase,
};
use super::query_dataset::{
    QUERY_DATASET, QueryDatasetArgs, QueryDatasetInput, QueryDatasetOutput, QueryDatasetUseCase,
};
use super::sample_dataset::{
    SAMPLE_DATASET, SampleDatasetArgs, SampleDatasetInput, SampleDatasetOutput,
    SampleDatasetUseCase,
};
use super::default_tool_spec;
use crate::config::GatewayEndpoints;
use crate::ports::dataset_gateway::DatasetGateway;
use datagroom_domain::{
    DatasetSchema, DefaultToolValidator, DomainError, ToolCall, ToolSpec, ToolValidator,
};
use std::sync::Arc;
use tracing::debug;

/// Successful outcome of a tool call, before rendering
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Schema(DatasetSchema),
    Query(QueryDatasetOutput),
    Aggregate(AggregateDatasetOutput),
    List(ListDatasetsOutput),
    Sample(SampleDatasetOutput),
}

/// Routes tool calls to the five use cases
pub struct ToolDispatcher<G: DatasetGateway + 'static> {
    spec: ToolSpec,
    get_schema: GetSchemaUseCase<G>,
    list_datasets: ListDatasetsUseCase<G>,
    query_dataset: QueryDatasetUseCase<G>,
    aggregate_dataset: AggregateDatasetUseCase<G>,
    sample_dataset: SampleDatasetUseCase<G>,
}

impl<G: DatasetGateway + 'static> ToolDispatcher<G> {
    pub fn new(gateway: Arc<G>, endpoints: GatewayEndpoints) -> Self {
        Self {
            spec: default_tool_spec(),
            get_schema: GetSchemaUseCase::new(Arc::clone(&gateway), endpoints.clone()),
            list_datasets: ListDatasetsUseCase::new(Arc::clone(&gateway), endpoints.clone()),
            query_dataset: QueryDatasetUseCase::new(Arc::clone(&gateway), endpoints.clone()),
            aggregate_dataset: AggregateDatasetUseCase::new(
                Arc::clone(&gateway),
                endpoints.clone(),
            ),
            sample_dataset: SampleDatasetUseCase::new(gateway, endpoints),
        }
    }

    /// Registered tools, for `tools/list`
    pub fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    /// Validate and run one tool call.
    ///
    /// Argument problems fail with [`ToolError::Validation`] before the use
    /// case runs; the use case then issues at most one gateway request.
    pub async fn dispatch(&self, call: &ToolCall) -> Result<ToolOutput, ToolError> {
        let definition = self
            .spec
            .get_resolved(&call.tool_name)
            .ok_or_else(|| ToolError::UnknownTool(call.tool_name.clone()))?;
        if definition.name != call.tool_name {
            debug!("Resolved tool alias '{}' -> '{}'", call.tool_name, definition.name);
        }

        DefaultToolValidator
            .validate(call, definition)
            .map_err(DomainError::InvalidArguments)?;

        match definition.name.as_str() {
            GET_SCHEMA => {
                let input = GetSchemaInput::try_from(call.parse_arguments::<GetSchemaArgs>()?)?;
                self.get_schema.execute(input).await.map(ToolOutput::Schema)
            }
            LIST_DATASETS => {
                call.parse_arguments::<ListDatasetsArgs>()?;
                self.list_datasets.execute().await.map(ToolOutput::List)
            }
            QUERY_DATASET => {
                let input =
                    QueryDatasetInput::try_from(call.parse_arguments::<QueryDatasetArgs>()?)?;
                self.query_dataset.execute(input).await.map(ToolOutput::Query)
            }
            AGGREGATE_DATASET => {
                let input = AggregateDatasetInput::try_from(
                    call.parse_arguments::<AggregateDatasetArgs>()?,
                )?;
                self.aggregate_dataset
                    .execute(input)
                    .await
                    .map(ToolOutput::Aggregate)
            }
            SAMPLE_DATASET => {
                let input =
                    SampleDatasetInput::try_from(call.parse_arguments::<SampleDatasetArgs>()?)?;
                self.sample_dataset.execute(input).await.map(ToolOutput::Sample)
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}
