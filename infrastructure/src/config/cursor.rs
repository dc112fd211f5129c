//! Fallback credentials from the Cursor client's `mcp.json`
//!
//! Shape: `{"mcpServers": {"datagroom": {"env": {"DATAGROOM_PAT_TOKEN": ..,
//! "DATAGROOM_GATEWAY_URL": ..}}}}`. Unreadable or malformed files yield
//! nothing.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the `mcp.json` location
pub const CURSOR_MCP_JSON_PATH_ENV: &str = "CURSOR_MCP_JSON_PATH";

/// Values found under `mcpServers.datagroom.env`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorMcpEnv {
    pub token: Option<String>,
    pub gateway_url: Option<String>,
}

#[derive(Deserialize)]
struct McpJson {
    #[serde(rename = "mcpServers", default)]
    mcp_servers: HashMap<String, McpServerEntry>,
}

#[derive(Deserialize)]
struct McpServerEntry {
    #[serde(default)]
    env: HashMap<String, serde_json::Value>,
}

impl CursorMcpEnv {
    /// `$CURSOR_MCP_JSON_PATH`, else `~/.cursor/mcp.json`
    pub fn default_path() -> Option<PathBuf> {
        match std::env::var_os(CURSOR_MCP_JSON_PATH_ENV) {
            Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
            _ => dirs::home_dir().map(|home| home.join(".cursor").join("mcp.json")),
        }
    }

    /// Read the `datagroom` server entry from `path`
    pub fn read(path: &Path) -> Option<Self> {
        let raw = std::fs::read_to_string(path)
            .inspect_err(|e| debug!("No Cursor mcp.json at {}: {}", path.display(), e))
            .ok()?;
        let parsed: McpJson = serde_json::from_str(&raw)
            .inspect_err(|e| debug!("Ignoring malformed {}: {}", path.display(), e))
            .ok()?;
        let env = parsed.mcp_servers.get("datagroom")?.env.clone();

        let non_empty = |key: &str| {
            env.get(key)
                .and_then(|v| v.as_str())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let found = Self {
            token: non_empty("DATAGROOM_PAT_TOKEN"),
            gateway_url: non_empty("DATAGROOM_GATEWAY_URL"),
        };
        (found != Self::default()).then_some(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_json(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_datagroom_env() {
        let file = write_json(
            r#"{"mcpServers": {
                "other": {"env": {"DATAGROOM_PAT_TOKEN": "wrong"}},
                "datagroom": {"command": "datagroom-mcp", "env": {
                    "DATAGROOM_PAT_TOKEN": "pat_from_cursor",
                    "DATAGROOM_GATEWAY_URL": "https://gw.example.com"
                }}
            }}"#,
        );

        let env = CursorMcpEnv::read(file.path()).unwrap();
        assert_eq!(env.token.as_deref(), Some("pat_from_cursor"));
        assert_eq!(env.gateway_url.as_deref(), Some("https://gw.example.com"));
    }

    #[test]
    fn test_missing_entry_or_file() {
        let file = write_json(r#"{"mcpServers": {"other": {"env": {}}}}"#);
        assert!(CursorMcpEnv::read(file.path()).is_none());

        let empty = write_json(r#"{"mcpServers": {"datagroom": {"env": {"DATAGROOM_PAT_TOKEN": ""}}}}"#);
        assert!(CursorMcpEnv::read(empty.path()).is_none());

        assert!(CursorMcpEnv::read(Path::new("/nonexistent/mcp.json")).is_none());
    }

    #[test]
    fn test_malformed_json_ignored() {
        let file = write_json("{ not json");
        assert!(CursorMcpEnv::read(file.path()).is_none());
    }
}
