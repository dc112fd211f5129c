//! Tool domain module
//!
//! Defines how the MCP tools are described and invoked, independent of
//! the wire protocol.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (registry)   │    │ (invocation) │    │ (output)     │
//! └──────┬───────┘    └──────────────┘    └──────────────┘
//!        │
//!        ├─ aliases: "query_dataset" → "datagroom_query_dataset"
//!        └─ tools:   "datagroom_query_dataset" → ToolDefinition
//! ```
//!
//! Clients sometimes drop the `datagroom_` prefix. [`ToolSpec::resolve`]
//! maps such names back to the canonical tool.
//!
//! # Key Types
//!
//! - [`ToolSpec`]: registry of tools plus alias mappings, in registration order
//! - [`ToolDefinition`]: name, description and parameter tree of one tool
//! - [`ToolCall`]: tool name and raw JSON arguments
//! - [`ToolResult`]: display text and optional structured payload
//! - [`ToolValidator`]: required/unknown argument checks

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::ToolResult;
