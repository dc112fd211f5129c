//! MCP surface: JSON-RPC protocol handling and its transports

pub mod http;
pub mod jsonrpc;
pub mod server;
pub mod stdio;

pub use jsonrpc::{RpcError, RpcRequest, RpcResponse};
pub use server::{McpServer, PROTOCOL_VERSION, SERVER_NAME};
