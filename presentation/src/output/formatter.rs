//! Output formatter trait

use datagroom_application::ToolOutput;
use datagroom_domain::ToolResult;

/// Turns a successful tool outcome into the `(text, structured)` pair
/// returned to MCP clients
pub trait OutputFormatter: Send + Sync {
    fn format(&self, output: ToolOutput) -> ToolResult;
}
