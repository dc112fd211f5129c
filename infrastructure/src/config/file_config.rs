//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Unknown keys are ignored.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("gateway base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("gateway base_url must start with http:// or https:// (got '{0}')")]
    InvalidBaseUrl(String),

    #[error("mcp_path must start with '/' (got '{0}')")]
    InvalidMcpPath(String),
}

/// Raw gateway configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    /// Gateway base URL
    pub base_url: String,
    /// Personal access token sent as a bearer credential
    #[serde(deserialize_with = "scalar_as_string")]
    pub token: Option<String>,
    /// Timeout in seconds for each gateway request
    pub timeout_seconds: u64,
    /// Last path segment identifying this client to the gateway
    pub caller_tag: String,
    /// View variant segment of view/columns routes
    pub view_variant: String,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8887".to_string(),
            token: None,
            timeout_seconds: 60,
            caller_tag: "mcp".to_string(),
            view_variant: "default".to_string(),
        }
    }
}

impl FileGatewayConfig {
    /// True when a non-blank token is configured
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

/// Environment values are parsed by figment, so a token made of digits
/// arrives as a number. Any scalar is read back as text.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Flag(bool),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Text(s) => s,
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Signed(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Flag(b) => b.to_string(),
    }))
}

/// Raw MCP server configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    pub host: String,
    pub port: u16,
    /// Route serving JSON-RPC over HTTP
    pub mcp_path: String,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            mcp_path: "/mcp/v1".to_string(),
        }
    }
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for a daily-rolling log file; stderr only when unset
    pub directory: Option<PathBuf>,
}

/// Complete raw configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub gateway: FileGatewayConfig,
    pub server: FileServerConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.gateway.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        let base_url = self.gateway.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigValidationError::InvalidBaseUrl(base_url.to_string()));
        }
        if !self.server.mcp_path.starts_with('/') {
            return Err(ConfigValidationError::InvalidMcpPath(
                self.server.mcp_path.clone(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.gateway.base_url, "http://localhost:8887");
        assert_eq!(config.gateway.timeout_seconds, 60);
        assert_eq!(config.gateway.caller_tag, "mcp");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.mcp_path, "/mcp/v1");
        assert!(config.logging.directory.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_str = r#"
[gateway]
base_url = "https://gateway.example.com"
timeout_seconds = 30

[server]
port = 8080
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gateway.base_url, "https://gateway.example.com");
        assert_eq!(config.gateway.timeout_seconds, 30);
        assert_eq!(config.gateway.view_variant, "default");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_numeric_token_read_as_text() {
        let config: FileConfig = toml::from_str("[gateway]\ntoken = 1234567890\n").unwrap();
        assert_eq!(config.gateway.token.as_deref(), Some("1234567890"));

        let config: FileConfig = toml::from_str("[gateway]\ntoken = true\n").unwrap();
        assert_eq!(config.gateway.token.as_deref(), Some("true"));

        let config: FileConfig = toml::from_str("[gateway]\ntoken = \"pat_abc\"\n").unwrap();
        assert_eq!(config.gateway.token.as_deref(), Some("pat_abc"));
    }

    #[test]
    fn test_validate() {
        let mut config = FileConfig::default();
        config.gateway.timeout_seconds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));

        let mut config = FileConfig::default();
        config.gateway.base_url = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyBaseUrl));

        let mut config = FileConfig::default();
        config.gateway.base_url = "gateway:8887".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidBaseUrl(_))
        ));

        let mut config = FileConfig::default();
        config.server.mcp_path = "mcp".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidMcpPath(_))
        ));
    }

    #[test]
    fn test_has_token() {
        let mut gateway = FileGatewayConfig::default();
        assert!(!gateway.has_token());
        gateway.token = Some("  ".to_string());
        assert!(!gateway.has_token());
        gateway.token = Some("pat_123".to_string());
        assert!(gateway.has_token());
    }
}
