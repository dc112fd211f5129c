//! Domain layer for datagroom-mcp
//!
//! This crate contains the query, aggregation and dataset models behind the
//! Datagroom MCP tools. It has no dependencies on infrastructure or
//! presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Query translation
//!
//! Tool arguments become a gateway request body (`filters`, `sorters`,
//! `page`, `per_page`). Row offsets are mapped onto the gateway's
//! page-number pagination, and the gateway's `total` feeds back into a
//! continuation (`has_more`, `next_offset`).
//!
//! ## Aggregation support
//!
//! Requests are planned before any I/O. Only an ungrouped row count can be
//! answered by the gateway; every other shape is reported as unsupported.

pub mod aggregation;
pub mod core;
pub mod dataset;
pub mod query;
pub mod tool;

// Re-export commonly used types
pub use aggregation::{
    Aggregation, AggregationOp, AggregationPlan, AggregationRequest, AggregationResultRow,
    UnsupportedAggregation,
};
pub use core::{dataset_name::DatasetName, error::DomainError};
pub use dataset::{ColumnInfo, DatasetInfo, DatasetSchema, SampleResult};
pub use query::{
    Filter, FilterType, GatewayPage, PageContinuation, PageWindow, QueryResult, ResponseFormat,
    SampleSize, SortDirection, SortSpec,
};
pub use tool::{
    DefaultToolValidator, ToolCall, ToolDefinition, ToolParameter, ToolResult, ToolSpec,
    ToolValidator,
};
