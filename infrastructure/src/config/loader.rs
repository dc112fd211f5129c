//! Configuration loader with multi-source merging

use super::cursor::CursorMcpEnv;
use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use tracing::info;

/// Directory name under the XDG config dir
pub const APP_NAME: &str = "datagroom-mcp";

const REDACTED: &str = "********";

const PAT_TOKEN_VAR: &str = "DATAGROOM_PAT_TOKEN";

const PROJECT_CONFIG_FILES: [&str; 2] = ["datagroom.toml", ".datagroom.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./datagroom.toml` or `./.datagroom.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/datagroom-mcp/config.toml`
    /// 5. Default values
    ///
    /// A token still missing afterwards is taken from Cursor's `mcp.json`.
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::load_from(
            Self::global_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
            CursorMcpEnv::default_path().as_deref(),
        )
    }

    /// [`load`](Self::load) with every file location given explicitly
    pub fn load_from(
        global_path: Option<&Path>,
        config_path: Option<&Path>,
        cursor_path: Option<&Path>,
    ) -> Result<FileConfig, Box<figment::Error>> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(Box::new(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                ))));
            }
        }

        let mut config: FileConfig = Self::figment(global_path, config_path)
            .extract()
            .map_err(Box::new)?;

        // figment parses env values, which rewrites tokens such as `00123` or `1e5`
        if let Ok(raw) = std::env::var(PAT_TOKEN_VAR) {
            if !raw.trim().is_empty() {
                config.gateway.token = Some(raw);
            }
        }

        if !config.gateway.has_token() {
            if let Some(path) = cursor_path {
                if let Some(cursor) = CursorMcpEnv::read(path) {
                    info!("Using Datagroom settings from {}", path.display());
                    Self::apply_cursor(&mut config, cursor);
                }
            }
        }

        Ok(config)
    }

    /// Build the layered figment (files, then environment)
    pub fn figment(global_path: Option<&Path>, config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global_path {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed("DATAGROOM_").split("__"))
            .merge(
                Env::raw()
                    .only(&["DATAGROOM_GATEWAY_URL"])
                    .map(|_| "gateway.base_url".into()),
            )
            .merge(
                Env::raw()
                    .only(&[PAT_TOKEN_VAR])
                    .map(|_| "gateway.token".into()),
            )
            .merge(
                Env::raw()
                    .only(&["MCP_SERVER_PORT"])
                    .map(|_| "server.port".into()),
            )
    }

    fn apply_cursor(config: &mut FileConfig, cursor: CursorMcpEnv) {
        if let Some(token) = cursor.token {
            config.gateway.token = Some(token);
        }
        if let Some(url) = cursor.gateway_url {
            config.gateway.base_url = url;
        }
    }

    /// Effective configuration as TOML, with the token redacted
    pub fn render_effective(config: &FileConfig) -> Result<String, toml::ser::Error> {
        let mut redacted = config.clone();
        if redacted.gateway.has_token() {
            redacted.gateway.token = Some(REDACTED.to_string());
        }
        toml::to_string_pretty(&redacted)
    }

    /// Load only default configuration
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/datagroom-mcp/config.toml if set,
    /// otherwise falls back to ~/.config/datagroom-mcp/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_NAME).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");
        println!("  [ENV  ] DATAGROOM_GATEWAY_URL, DATAGROOM_PAT_TOKEN, MCP_SERVER_PORT, DATAGROOM_*");

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        match Self::project_config_path() {
            Some(path) => println!("  [FOUND] Project: {}", path.display()),
            None => println!("  [     ] Project: ./datagroom.toml or ./.datagroom.toml"),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Global:  {}", mark, path.display());
        }

        println!("  [     ] Default: built-in defaults");

        if let Some(path) = CursorMcpEnv::default_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Token fallback: {}", mark, path.display());
        }
    }
}
