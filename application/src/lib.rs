//! Application layer for datagroom-mcp
//!
//! This crate contains the tool use cases, the tool dispatcher and the port
//! definitions they depend on. It depends only on the domain layer.
//!
//! Every tool follows the same two-phase contract: arguments are validated
//! without any I/O, then exactly one gateway request is issued.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::GatewayEndpoints;
pub use ports::{
    dataset_gateway::{DatasetGateway, GatewayError},
    tool_schema::ToolSchemaPort,
};
pub use use_cases::{
    ToolDispatcher, ToolError, ToolOperation, ToolOutput,
    aggregate_dataset::{AggregateDatasetInput, AggregateDatasetOutput, AggregateDatasetUseCase},
    default_tool_spec,
    get_schema::{GetSchemaInput, GetSchemaUseCase},
    list_datasets::{ListDatasetsOutput, ListDatasetsUseCase},
    query_dataset::{QueryDatasetInput, QueryDatasetOutput, QueryDatasetUseCase},
    sample_dataset::{SampleDatasetInput, SampleDatasetOutput, SampleDatasetUseCase},
};
