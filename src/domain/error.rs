//! Application error types with proper error chaining.

use thiserror::Error;

/// Failure of a single upstream balance fetch.
///
/// The scrape collector treats every variant the same way (`up = 0`); the
/// variants exist so that diagnostics can say *why* a scrape degraded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Failed to serialize request: {0}")]
    Serialization(String),
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("Timeout waiting for upstream: {0}")]
    Timeout(String),
    #[error("Failed to decode response: {0}")]
    Decode(String),
    #[error("Upstream error {code}: {message}")]
    Upstream { code: i64, message: String },
    #[error("Response carried neither result nor error")]
    MissingResult,
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err.to_string())
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// The connectivity probe performed before the server starts failed.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Initial upstream probe failed: {0}")]
pub struct ProbeError(#[from] pub FetchError);

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Metric '{0}' is already registered")]
    Duplicate(String),
    #[error("Invalid metric descriptor '{name}': {message}")]
    InvalidDescriptor { name: String, message: String },
    #[error("Failed to encode metrics: {0}")]
    Encode(String),
}

impl From<prometheus::Error> for RegistryError {
    fn from(err: prometheus::Error) -> Self {
        match err {
            prometheus::Error::AlreadyReg => RegistryError::Duplicate(err.to_string()),
            prometheus::Error::Msg(message) => RegistryError::InvalidDescriptor {
                name: String::new(),
                message,
            },
            other => RegistryError::Encode(other.to_string()),
        }
    }
}

/// Anything that prevents the exporter from serving.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Probe(#[from] ProbeError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
    #[error("Failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}
