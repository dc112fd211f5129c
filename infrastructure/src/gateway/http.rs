//! HTTP implementation of the dataset gateway port

use crate::config::GatewayConfig;
use async_trait::async_trait;
use datagroom_application::{DatasetGateway, GatewayError};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Gateway client backed by a shared `reqwest::Client`
///
/// Every request carries `Authorization: Bearer <token>` and a JSON
/// content type. A missing token fails before any network I/O.
pub struct HttpDatasetGateway {
    client: Client,
    base_url: String,
    token: Option<SecretString>,
    timeout: Duration,
}

impl HttpDatasetGateway {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<SecretString>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            timeout,
        })
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        Self::new(&config.base_url, config.token.clone(), config.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, GatewayError> {
        let token = self.token.as_ref().ok_or(GatewayError::MissingToken)?;
        let url = format!("{}{}", self.base_url, path);

        info!("Gateway {} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .bearer_auth(token.expose_secret())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| self.map_transport(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_transport(e))?;

        if !status.is_success() {
            debug!("Gateway returned {} for {}", status.as_u16(), url);
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }

    fn map_transport(&self, error: reqwest::Error) -> GatewayError {
        if error.is_timeout() {
            GatewayError::Timeout(self.timeout.as_secs())
        } else {
            GatewayError::Connection(error.to_string())
        }
    }
}

#[async_trait]
impl DatasetGateway for HttpDatasetGateway {
    async fn get_json(&self, path: &str) -> Result<Value, GatewayError> {
        self.send(Method::GET, path, None).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, GatewayError> {
        self.send(Method::POST, path, Some(body)).await
    }
}
