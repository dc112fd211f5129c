//! Resolved, immutable runtime configuration
//!
//! Built once at startup from a validated [`FileConfig`] and shared
//! read-only afterwards.

use super::file_config::{ConfigValidationError, FileConfig};
use datagroom_application::GatewayEndpoints;
use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

/// Gateway connection settings
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL without a trailing slash
    pub base_url: String,
    /// Bearer token; `None` fails every request before any I/O
    pub token: Option<SecretString>,
    pub timeout: Duration,
    pub endpoints: GatewayEndpoints,
}

/// MCP server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub mcp_path: String,
}

impl ServerConfig {
    /// `host:port` for binding the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    pub directory: Option<PathBuf>,
}

/// Complete runtime configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gateway: GatewayConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

impl TryFrom<FileConfig> for AppConfig {
    type Error = ConfigValidationError;

    fn try_from(file: FileConfig) -> Result<Self, Self::Error> {
        file.validate()?;

        let token = file
            .gateway
            .token
            .filter(|t| !t.trim().is_empty())
            .map(|t| SecretString::new(t.trim().into()));

        Ok(Self {
            gateway: GatewayConfig {
                base_url: file.gateway.base_url.trim().trim_end_matches('/').to_string(),
                token,
                timeout: Duration::from_secs(file.gateway.timeout_seconds),
                endpoints: GatewayEndpoints::new(
                    file.gateway.caller_tag,
                    file.gateway.view_variant,
                ),
            },
            server: ServerConfig {
                host: file.server.host,
                port: file.server.port,
                mcp_path: file.server.mcp_path,
            },
            logging: LoggingConfig {
                directory: file.logging.directory,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_from_file_config() {
        let mut file = FileConfig::default();
        file.gateway.base_url = "https://gw.example.com/".to_string();
        file.gateway.token = Some(" pat_abc ".to_string());
        file.gateway.timeout_seconds = 5;

        let config = AppConfig::try_from(file).unwrap();

        assert_eq!(config.gateway.base_url, "https://gw.example.com");
        assert_eq!(config.gateway.token.as_ref().unwrap().expose_secret(), "pat_abc");
        assert_eq!(config.gateway.timeout, Duration::from_secs(5));
        assert_eq!(config.gateway.endpoints, GatewayEndpoints::default());
        assert_eq!(config.server.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_blank_token_is_none() {
        let mut file = FileConfig::default();
        file.gateway.token = Some(String::new());
        let config = AppConfig::try_from(file).unwrap();
        assert!(config.gateway.token.is_none());
    }

    #[test]
    fn test_token_is_redacted_in_debug() {
        let mut file = FileConfig::default();
        file.gateway.token = Some("super-secret".to_string());
        let config = AppConfig::try_from(file).unwrap();
        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut file = FileConfig::default();
        file.gateway.timeout_seconds = 0;
        assert_eq!(
            AppConfig::try_from(file).unwrap_err(),
            ConfigValidationError::InvalidTimeout
        );
    }
}
