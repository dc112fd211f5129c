//! Sample Dataset use case
//!
//! Returns the first page of rows up to the requested size. There is no
//! random or stratified selection; `stratify_by` is accepted and reported
//! back as not applied.

use super::error::{ToolError, ToolOperation};
use crate::config::GatewayEndpoints;
use crate::ports::dataset_gateway::{DatasetGateway, ViewRequest, ViewResponse};
use datagroom_domain::{
    DatasetName, DomainError, SampleResult, SampleSize, ToolDefinition, ToolParameter,
    query::page::{DEFAULT_SAMPLE_SIZE, MAX_SAMPLE_SIZE},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

pub const SAMPLE_DATASET: &str = "datagroom_sample_dataset";

pub fn sample_dataset_definition() -> ToolDefinition {
    ToolDefinition::new(
        SAMPLE_DATASET,
        "Get a sample of rows from a dataset for quick exploration. The sample is the \
         first page of rows in the dataset's default order, not a random or stratified \
         selection; stratify_by is accepted but not applied.",
    )
    .with_parameter(ToolParameter::new("dataset_name", "Name of the dataset", true))
    .with_parameter(
        ToolParameter::new(
            "sample_size",
            format!("Number of rows to sample (default {})", DEFAULT_SAMPLE_SIZE),
            false,
        )
        .with_type("integer")
        .with_range(Some(1.0), Some(f64::from(MAX_SAMPLE_SIZE))),
    )
    .with_parameter(ToolParameter::new(
        "stratify_by",
        "Field to stratify by (accepted, not applied)",
        false,
    ))
}

/// Raw tool arguments
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SampleDatasetArgs {
    pub dataset_name: String,
    #[serde(default)]
    pub sample_size: Option<i64>,
    #[serde(default)]
    pub stratify_by: Option<String>,
}

/// Validated input for the SampleDataset use case
#[derive(Debug, Clone)]
pub struct SampleDatasetInput {
    pub dataset: DatasetName,
    pub size: SampleSize,
    pub stratify_by: Option<String>,
}

impl TryFrom<SampleDatasetArgs> for SampleDatasetInput {
    type Error = DomainError;

    fn try_from(args: SampleDatasetArgs) -> Result<Self, Self::Error> {
        let dataset = DatasetName::parse(args.dataset_name)?;
        let size = match args.sample_size {
            Some(n) => SampleSize::new(n)?,
            None => SampleSize::default(),
        };
        Ok(Self {
            dataset,
            size,
            stratify_by: args.stratify_by.filter(|s| !s.trim().is_empty()),
        })
    }
}

/// Output of the SampleDataset use case
#[derive(Debug, Clone, PartialEq)]
pub struct SampleDatasetOutput {
    pub result: SampleResult,
    /// Requested stratification field, echoed back as not applied
    pub stratify_by: Option<String>,
}

/// Use case for sampling dataset rows
pub struct SampleDatasetUseCase<G: DatasetGateway + 'static> {
    gateway: Arc<G>,
    endpoints: GatewayEndpoints,
}

impl<G: DatasetGateway + 'static> SampleDatasetUseCase<G> {
    pub fn new(gateway: Arc<G>, endpoints: GatewayEndpoints) -> Self {
        Self { gateway, endpoints }
    }

    pub async fn execute(&self, input: SampleDatasetInput) -> Result<SampleDatasetOutput, ToolError> {
        let dataset = input.dataset.as_str();
        let path = self.endpoints.view(&input.dataset);
        let request = ViewRequest::unfiltered(input.size.to_gateway_page());
        info!("Sampling dataset: POST {} (per_page {})", path, input.size.get());

        let response = self
            .gateway
            .post_json(&path, &request.to_body())
            .await
            .and_then(ViewResponse::from_value)
            .map_err(|e| {
                error!("sample_dataset failed for '{}': {}", dataset, e);
                ToolError::from_gateway(ToolOperation::SampleDataset, Some(dataset), e)
            })?;

        let total_rows = response.total_or_len();
        let data = response.into_rows();
        Ok(SampleDatasetOutput {
            result: SampleResult {
                dataset_name: dataset.to_string(),
                sample_size: data.len() as u64,
                total_rows,
                data,
            },
            stratify_by: input.stratify_by,
        })
    }
}
