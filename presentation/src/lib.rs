//! Presentation layer for datagroom-mcp
//!
//! This crate contains the CLI definition, result formatting and the MCP
//! surface (JSON-RPC handling plus HTTP and stdio transports).

pub mod cli;
pub mod mcp;
pub mod output;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use mcp::{McpServer, RpcRequest, RpcResponse};
pub use output::{MarkdownFormatter, OutputFormatter, ToolResultFormatter};
