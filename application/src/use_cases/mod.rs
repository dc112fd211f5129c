//! Use cases (application services)
//!
//! One use case per tool, plus the [`ToolDispatcher`] that routes MCP
//! `tools/call` requests to them.

pub mod aggregate_dataset;
pub mod dispatch;
pub mod error;
pub mod get_schema;
pub mod list_datasets;
pub mod query_dataset;
pub mod sample_dataset;

#[cfg(test)]
pub(crate) mod test_support;

pub use dispatch::{ToolDispatcher, ToolOutput};
pub use error::{ToolError, ToolOperation};

use datagroom_domain::ToolSpec;

/// Create the tool specification with all five tools and their unprefixed aliases
pub fn default_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(get_schema::get_schema_definition())
        .register(query_dataset::query_dataset_definition())
        .register(aggregate_dataset::aggregate_dataset_definition())
        .register(list_datasets::list_datasets_definition())
        .register(sample_dataset::sample_dataset_definition())
        .register_aliases([
            ("get_schema", get_schema::GET_SCHEMA),
            ("query_dataset", query_dataset::QUERY_DATASET),
            ("aggregate_dataset", aggregate_dataset::AGGREGATE_DATASET),
            ("list_datasets", list_datasets::LIST_DATASETS),
            ("sample_dataset", sample_dataset::SAMPLE_DATASET),
        ])
}
