//! Scrape-time balance collector.
//!
//! Each scrape performs one fresh upstream call and maps the outcome to the
//! `up` and `account_balance` gauges. Upstream failures degrade the scrape to
//! `up = 0`; they are handed to the diagnostics sink and never returned.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::domain::{
    BalanceClient, Credential, DiagnosticsSink, MetricDescriptor, MetricSample, MetricsCollector,
};

pub const UP_METRIC: &str = "up";
pub const BALANCE_METRIC: &str = "account_balance";

const UP: MetricDescriptor = MetricDescriptor {
    name: UP_METRIC,
    help: "BlockPi is up",
};

const BALANCE: MetricDescriptor = MetricDescriptor {
    name: BALANCE_METRIC,
    help: "Balance of BlockPi",
};

/// Collector reporting the BlockPI account balance.
///
/// Holds only immutable state, so concurrent scrapes can share one instance
/// without locking.
pub struct BalanceCollector {
    credential: Credential,
    client: Arc<dyn BalanceClient>,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl BalanceCollector {
    /// Creates a new `BalanceCollector`.
    ///
    /// # Arguments
    ///
    /// * `credential` - API key of the account to report on.
    /// * `client` - Upstream client used for every scrape.
    /// * `diagnostics` - Receives the error of every failed scrape.
    #[must_use]
    pub fn new(
        credential: Credential,
        client: Arc<dyn BalanceClient>,
        diagnostics: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        Self {
            credential,
            client,
            diagnostics,
        }
    }
}

#[async_trait]
impl MetricsCollector for BalanceCollector {
    fn describe(&self) -> Vec<MetricDescriptor> {
        vec![BALANCE, UP]
    }

    #[instrument(skip(self))]
    async fn collect(&self) -> Vec<MetricSample> {
        match self.client.fetch_balance(&self.credential).await {
            Ok(balance) => {
                debug!(balance, "Collected balance");
                vec![
                    MetricSample::new(UP_METRIC, 1.0),
                    MetricSample::new(BALANCE_METRIC, balance),
                ]
            }
            Err(error) => {
                self.diagnostics.fetch_failed(&error);
                vec![MetricSample::new(UP_METRIC, 0.0)]
            }
        }
    }
}
