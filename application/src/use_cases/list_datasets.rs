//! List Datasets use case

use super::error::{ToolError, ToolOperation};
use crate::config::GatewayEndpoints;
use crate::ports::dataset_gateway::{DatasetGateway, GatewayError};
use datagroom_domain::{DatasetInfo, ToolDefinition};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

pub const LIST_DATASETS: &str = "datagroom_list_datasets";

pub fn list_datasets_definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_DATASETS,
        "List all datasets visible to the configured token, with their collections and \
         approximate row counts when the gateway reports them. Use this to discover what \
         can be queried.",
    )
}

/// The tool takes no arguments; unknown keys are still rejected
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListDatasetsArgs {}

/// Output of the ListDatasets use case
#[derive(Debug, Clone, PartialEq)]
pub struct ListDatasetsOutput {
    pub datasets: Vec<DatasetInfo>,
    /// The gateway's `dbList` exactly as received
    pub db_list: Value,
}

/// Use case for listing datasets
pub struct ListDatasetsUseCase<G: DatasetGateway + 'static> {
    gateway: Arc<G>,
    endpoints: GatewayEndpoints,
}

impl<G: DatasetGateway + 'static> ListDatasetsUseCase<G> {
    pub fn new(gateway: Arc<G>, endpoints: GatewayEndpoints) -> Self {
        Self { gateway, endpoints }
    }

    pub async fn execute(&self) -> Result<ListDatasetsOutput, ToolError> {
        let path = self.endpoints.dataset_list();
        info!("Listing datasets: GET {}", path);

        let response = self.gateway.get_json(&path).await.and_then(Self::db_list);
        let db_list = response.map_err(|e| {
            error!("list_datasets failed: {}", e);
            ToolError::from_gateway(ToolOperation::ListDatasets, None, e)
        })?;

        let datasets: Vec<DatasetInfo> = db_list
            .as_array()
            .map(|entries| entries.iter().filter_map(DatasetInfo::from_listing_entry).collect())
            .unwrap_or_default();
        debug!("Gateway listed {} datasets", datasets.len());

        Ok(ListDatasetsOutput { datasets, db_list })
    }

    /// `dbList` from the response; absent or null means no datasets
    fn db_list(response: Value) -> Result<Value, GatewayError> {
        match response {
            Value::Object(mut map) => match map.remove("dbList") {
                None | Some(Value::Null) => Ok(Value::Array(Vec::new())),
                Some(list @ Value::Array(_)) => Ok(list),
                Some(_) => Err(GatewayError::InvalidResponse(
                    "dbList is not an array".to_string(),
                )),
            },
            _ => Err(GatewayError::InvalidResponse(
                "expected a JSON object".to_string(),
            )),
        }
    }
}
