//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for datagroom-mcp
#[derive(Parser, Debug)]
#[command(name = "datagroom-mcp")]
#[command(author, version, about = "MCP server exposing Datagroom datasets as tools")]
#[command(long_about = r#"
datagroom-mcp serves five tools over the Model Context Protocol:
datagroom_get_schema, datagroom_query_dataset, datagroom_aggregate_dataset,
datagroom_list_datasets and datagroom_sample_dataset. Each call is translated
into one request against the Datagroom gateway.

Configuration is loaded from (in priority order):
1. Environment       DATAGROOM_GATEWAY_URL, DATAGROOM_PAT_TOKEN, MCP_SERVER_PORT
2. --config <path>   Explicit config file
3. ./datagroom.toml  Project-level config
4. ~/.config/datagroom-mcp/config.toml   Global config
If no token is configured, ~/.cursor/mcp.json is consulted.

Example:
  datagroom-mcp                 # HTTP on 0.0.0.0:3000, endpoint /mcp/v1
  datagroom-mcp --port 8080 -v
  datagroom-mcp --stdio         # for clients that spawn the server
"#)]
pub struct Cli {
    /// Serve JSON-RPC over stdin/stdout instead of HTTP
    #[arg(long)]
    pub stdio: bool,

    /// Port for the HTTP transport (overrides configuration)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Bind address for the HTTP transport (overrides configuration)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory for a daily-rolling log file (overrides configuration)
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Default log filter for the verbosity level
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
