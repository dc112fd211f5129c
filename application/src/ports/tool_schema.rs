//! Tool schema conversion port.
//!
//! Separates "which tools exist" (domain) from "how they are advertised on
//! the wire" (infrastructure). The MCP `tools/list` response is built from
//! this port.

use datagroom_domain::tool::{ToolDefinition, ToolSpec};

/// Port for converting tool definitions to MCP tool descriptors
/// (`{name, description, inputSchema}`).
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert every tool in registration order.
    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value>;
}
