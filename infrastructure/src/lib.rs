//! Infrastructure layer for datagroom-mcp
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration loading.

pub mod config;
pub mod gateway;
pub mod tools;

// Re-export commonly used types
pub use config::{
    AppConfig, ConfigLoader, ConfigValidationError, FileConfig, FileGatewayConfig,
    FileLoggingConfig, FileServerConfig, GatewayConfig, LoggingConfig, ServerConfig,
};
pub use gateway::HttpDatasetGateway;
pub use tools::JsonSchemaToolConverter;
