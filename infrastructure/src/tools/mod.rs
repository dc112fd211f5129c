//! Tool advertisement for MCP clients

pub mod schema;

pub use schema::JsonSchemaToolConverter;
