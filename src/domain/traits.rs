//! Domain traits defining contracts for external systems.

use async_trait::async_trait;

use super::error::FetchError;
use super::types::{Credential, MetricDescriptor, MetricSample};

/// Upstream client trait for balance lookups
#[async_trait]
pub trait BalanceClient: Send + Sync {
    /// Fetch the current balance for the given credential.
    ///
    /// One best-effort round trip; implementations must not retry and must
    /// not keep per-call state between invocations.
    async fn fetch_balance(&self, credential: &Credential) -> Result<f64, FetchError>;
}

/// Collector invoked once per scrape.
///
/// `collect` is infallible: failures are expressed through the samples it
/// returns, never by failing the scrape.
#[async_trait]
pub trait MetricsCollector: Send + Sync {
    /// Static descriptors for every metric this collector may emit
    fn describe(&self) -> Vec<MetricDescriptor>;

    /// Produce the samples for one scrape
    async fn collect(&self) -> Vec<MetricSample>;
}

/// Receives scrape failures that would otherwise be invisible to operators.
pub trait DiagnosticsSink: Send + Sync {
    fn fetch_failed(&self, error: &FetchError);
}
