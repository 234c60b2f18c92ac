//! Mock implementations for testing.
//!
//! These mocks provide in-memory implementations of domain traits
//! that can be configured to simulate various scenarios including
//! success, failure, and slow upstreams.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::{BalanceClient, Credential, DiagnosticsSink, FetchError};

/// Configuration for mock behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// If set, every call fails with this error.
    pub failure: Option<FetchError>,
    /// Simulated latency in milliseconds.
    pub latency_ms: Option<u64>,
}

impl MockConfig {
    /// Creates a config that always succeeds.
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    /// Creates a config that always fails with the given error.
    #[must_use]
    pub fn failure(error: FetchError) -> Self {
        Self {
            failure: Some(error),
            latency_ms: None,
        }
    }

    /// Adds simulated latency.
    #[must_use]
    pub fn with_latency(mut self, ms: u64) -> Self {
        self.latency_ms = Some(ms);
        self
    }
}

/// Mock upstream client for testing.
///
/// Returns a default balance, or a per-credential balance when one has been
/// configured, without any network calls.
///
/// # Example
///
/// ```
/// use blockpi_exporter::domain::FetchError;
/// use blockpi_exporter::test_utils::MockBalanceClient;
///
/// // Create a mock that reports a balance of 42
/// let mock = MockBalanceClient::new(42.0);
///
/// // Create a mock that fails
/// let failing_mock = MockBalanceClient::failing(FetchError::MissingResult);
/// ```
pub struct MockBalanceClient {
    balance: f64,
    balances: Mutex<HashMap<String, f64>>,
    config: MockConfig,
    call_count: AtomicU64,
}

impl MockBalanceClient {
    /// Creates a new mock that reports `balance` for every credential.
    #[must_use]
    pub fn new(balance: f64) -> Self {
        Self::with_config(balance, MockConfig::success())
    }

    /// Creates a new mock with the given configuration.
    #[must_use]
    pub fn with_config(balance: f64, config: MockConfig) -> Self {
        Self {
            balance,
            balances: Mutex::new(HashMap::new()),
            config,
            call_count: AtomicU64::new(0),
        }
    }

    /// Creates a mock that always fails.
    #[must_use]
    pub fn failing(error: FetchError) -> Self {
        Self::with_config(0.0, MockConfig::failure(error))
    }

    /// Reports `balance` for the given API key instead of the default.
    #[must_use]
    pub fn with_balance_for(self, api_key: &str, balance: f64) -> Self {
        self.balances
            .lock()
            .unwrap()
            .insert(api_key.to_string(), balance);
        self
    }

    /// Gets the number of times `fetch_balance` was called.
    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl Default for MockBalanceClient {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[async_trait]
impl BalanceClient for MockBalanceClient {
    async fn fetch_balance(&self, credential: &Credential) -> Result<f64, FetchError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        if let Some(ms) = self.config.latency_ms {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }

        if let Some(error) = &self.config.failure {
            return Err(error.clone());
        }

        let balances = self.balances.lock().unwrap();
        Ok(balances
            .get(credential.expose())
            .copied()
            .unwrap_or(self.balance))
    }
}

/// Diagnostics sink that records every reported failure.
#[derive(Debug, Default, Clone)]
pub struct RecordingDiagnostics {
    errors: Arc<Mutex<Vec<FetchError>>>,
}

impl RecordingDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets all recorded errors.
    pub fn errors(&self) -> Vec<FetchError> {
        self.errors.lock().unwrap().clone()
    }
}

impl DiagnosticsSink for RecordingDiagnostics {
    fn fetch_failed(&self, error: &FetchError) {
        self.errors.lock().unwrap().push(error.clone());
    }
}
