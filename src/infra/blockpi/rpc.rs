//! JSON-RPC client for the BlockPI balance API.
//!
//! Each call is a single best-effort POST: no retries, and no timeout beyond
//! the one optionally configured on the transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, instrument};

use crate::domain::{
    BalanceClient, BalanceQuery, BalanceResponse, Credential, FetchError, StartupError,
};

/// Public BlockPI RPC endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.blockpi.io/openapi/v1/rpc";

/// Configuration for the RPC client
#[derive(Debug, Clone)]
pub struct RpcClientConfig {
    pub endpoint: String,
    /// Request timeout; `None` keeps the transport default
    pub timeout: Option<Duration>,
}

impl Default for RpcClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }
}

/// BlockPI balance client
pub struct RpcBalanceClient {
    http_client: Client,
    config: RpcClientConfig,
}

impl RpcBalanceClient {
    /// Create a new RPC client with custom configuration
    pub fn new(config: RpcClientConfig) -> Result<Self, StartupError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| StartupError::Client(e.to_string()))?;
        info!(endpoint = %config.endpoint, timeout = ?config.timeout, "Created BlockPI client");
        Ok(Self {
            http_client,
            config,
        })
    }

    /// Create a new RPC client pointed at the public endpoint
    pub fn with_defaults() -> Result<Self, StartupError> {
        Self::new(RpcClientConfig::default())
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

#[async_trait]
impl BalanceClient for RpcBalanceClient {
    #[instrument(skip_all, fields(endpoint = %self.config.endpoint))]
    async fn fetch_balance(&self, credential: &Credential) -> Result<f64, FetchError> {
        let body = BalanceQuery::new(credential).to_body()?;

        let response = self
            .http_client
            .post(&self.config.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(status = %status, bytes = bytes.len(), "Received upstream response");

        BalanceResponse::from_slice(&bytes)?.into_balance()
    }
}
