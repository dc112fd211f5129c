//! Configuration loading for datagroom-mcp
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `DATAGROOM_GATEWAY_URL`, `DATAGROOM_PAT_TOKEN`, `MCP_SERVER_PORT`,
//!    and `DATAGROOM_`-prefixed nested keys (`DATAGROOM_GATEWAY__TIMEOUT_SECONDS`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./datagroom.toml` or `./.datagroom.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/datagroom-mcp/config.toml`
//! 5. Default values
//!
//! When no token is found anywhere, the Cursor client's `mcp.json` is consulted.

mod app_config;
mod cursor;
mod file_config;
mod loader;

pub use app_config::{AppConfig, GatewayConfig, LoggingConfig, ServerConfig};
pub use cursor::CursorMcpEnv;
pub use file_config::{
    ConfigValidationError, FileConfig, FileGatewayConfig, FileLoggingConfig, FileServerConfig,
};
pub use loader::ConfigLoader;
