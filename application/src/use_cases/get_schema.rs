//! Get Schema use case
//!
//! Fetches the column document of one dataset.

use super::error::{ToolError, ToolOperation};
use crate::config::GatewayEndpoints;
use crate::ports::dataset_gateway::{DatasetGateway, GatewayError};
use datagroom_domain::{DatasetName, DatasetSchema, DomainError, ToolDefinition, ToolParameter};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

pub const GET_SCHEMA: &str = "datagroom_get_schema";

pub fn get_schema_definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_SCHEMA,
        "Get schema information for a Datagroom dataset: column names, types, \
         editability, visibility, sample values, total row count, sample rows and key fields. \
         Use this first when working with an unfamiliar dataset.",
    )
    .with_parameter(ToolParameter::new(
        "dataset_name",
        "Name of the dataset to get schema for",
        true,
    ))
}

/// Raw tool arguments
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetSchemaArgs {
    pub dataset_name: String,
}

/// Validated input for the GetSchema use case
#[derive(Debug, Clone)]
pub struct GetSchemaInput {
    pub dataset: DatasetName,
}

impl TryFrom<GetSchemaArgs> for GetSchemaInput {
    type Error = DomainError;

    fn try_from(args: GetSchemaArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            dataset: DatasetName::parse(args.dataset_name)?,
        })
    }
}

/// Use case for fetching a dataset schema
pub struct GetSchemaUseCase<G: DatasetGateway + 'static> {
    gateway: Arc<G>,
    endpoints: GatewayEndpoints,
}

impl<G: DatasetGateway + 'static> GetSchemaUseCase<G> {
    pub fn new(gateway: Arc<G>, endpoints: GatewayEndpoints) -> Self {
        Self { gateway, endpoints }
    }

    pub async fn execute(&self, input: GetSchemaInput) -> Result<DatasetSchema, ToolError> {
        let dataset = input.dataset.as_str();
        let path = self.endpoints.columns(&input.dataset);
        info!("Fetching schema: GET {}", path);

        let schema = self
            .gateway
            .get_json(&path)
            .await
            .and_then(|response| {
                serde_json::from_value::<DatasetSchema>(response)
                    .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
            })
            .map_err(|e| {
                error!("get_schema failed for '{}': {}", dataset, e);
                ToolError::from_gateway(ToolOperation::GetSchema, Some(dataset), e)
            })?;

        Ok(schema.completed(dataset))
    }
}
