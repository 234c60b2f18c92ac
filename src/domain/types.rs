use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::error::{ConfigError, FetchError};

/// JSON-RPC protocol version tag sent with every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// Upstream method returning the remaining request-unit balance.
pub const BALANCE_METHOD: &str = "blockpi_ruBalance";

/// Constant request id; calls are never pipelined so no correlation is needed.
pub const REQUEST_ID: u64 = 1;

/// Opaque API key identifying the BlockPI account.
///
/// Always non-empty. The secret is only exposed when the request envelope is
/// built, never through `Debug`.
#[derive(Clone)]
pub struct Credential(SecretString);

impl Credential {
    /// Wraps a raw API key, rejecting only empty input. Anything else is
    /// left for the upstream to accept or reject.
    pub fn new(raw: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "credential".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(Self(SecretString::from(raw)))
    }

    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

#[derive(Debug, Serialize)]
pub struct BalanceParams<'a> {
    #[serde(rename = "apiKey")]
    pub api_key: &'a str,
}

/// Request envelope for one balance lookup.
#[derive(Debug, Serialize)]
pub struct BalanceQuery<'a> {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: [BalanceParams<'a>; 1],
    pub id: u64,
}

impl<'a> BalanceQuery<'a> {
    #[must_use]
    pub fn new(credential: &'a Credential) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method: BALANCE_METHOD,
            params: [BalanceParams {
                api_key: credential.expose(),
            }],
            id: REQUEST_ID,
        }
    }

    /// Serializes the envelope into the exact wire bytes.
    pub fn to_body(&self) -> Result<Vec<u8>, FetchError> {
        serde_json::to_vec(self).map_err(|e| FetchError::Serialization(e.to_string()))
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BalancePayload {
    pub balance: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RpcErrorDetail {
    pub code: i64,
    pub message: String,
}

/// Response envelope. Exactly one of `result`/`error` is expected.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceResponse {
    pub jsonrpc: Option<String>,
    pub id: Option<u64>,
    pub result: Option<BalancePayload>,
    pub error: Option<RpcErrorDetail>,
}

impl BalanceResponse {
    /// Decodes a raw response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, FetchError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Resolves the envelope into a balance. An error descriptor takes
    /// precedence over any result that came with it.
    pub fn into_balance(self) -> Result<f64, FetchError> {
        if let Some(error) = self.error {
            return Err(FetchError::Upstream {
                code: error.code,
                message: error.message,
            });
        }
        self.result
            .map(|r| r.balance)
            .ok_or(FetchError::MissingResult)
    }
}

/// Name and help text of a metric exposed by a collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub name: &'static str,
    pub help: &'static str,
}

/// A single value produced during a scrape.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub name: &'static str,
    pub value: f64,
}

impl MetricSample {
    #[must_use]
    pub fn new(name: &'static str, value: f64) -> Self {
        Self { name, value }
    }
}
