//! Prometheus exposition for scrape-time collectors.
//!
//! Nothing is stored between scrapes: every `render` runs the registered
//! collectors and turns their samples into unlabelled gauge families, so a
//! metric that a collector omits is absent from the output rather than stale.
//!
//! This is not a `prometheus::Registry`: its `Collector::collect` is
//! synchronous while balance collection awaits the upstream, so collectors and
//! descriptor checks live here and the crate only builds and encodes families.

use std::collections::HashMap;
use std::sync::Arc;

use prometheus::core::Collector;
use prometheus::proto::MetricFamily;
use prometheus::{Gauge, Opts, TextEncoder};
use tracing::warn;

use crate::domain::{MetricDescriptor, MetricsCollector, RegistryError};

/// Content type of the text exposition format.
pub const CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

/// Explicitly constructed registry of scrape-time collectors.
#[derive(Default)]
pub struct MetricsRegistry {
    collectors: Vec<Arc<dyn MetricsCollector>>,
    descriptors: HashMap<&'static str, MetricDescriptor>,
}

impl MetricsRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a collector after validating its descriptors.
    ///
    /// # Errors
    /// Returns [`RegistryError::Duplicate`] if a metric name is already taken
    /// and [`RegistryError::InvalidDescriptor`] for names or help texts
    /// Prometheus would reject. On error nothing is registered.
    pub fn register(
        &mut self,
        collector: Arc<dyn MetricsCollector>,
    ) -> Result<(), RegistryError> {
        let described = collector.describe();
        let mut seen = HashMap::new();

        for desc in &described {
            if self.descriptors.contains_key(desc.name) || seen.contains_key(desc.name) {
                return Err(RegistryError::Duplicate(desc.name.to_string()));
            }
            Gauge::with_opts(Opts::new(desc.name, desc.help)).map_err(|e| {
                RegistryError::InvalidDescriptor {
                    name: desc.name.to_string(),
                    message: e.to_string(),
                }
            })?;
            seen.insert(desc.name, desc.clone());
        }

        self.descriptors.extend(seen);
        self.collectors.push(collector);
        Ok(())
    }

    /// All registered descriptors, sorted by name
    #[must_use]
    pub fn descriptors(&self) -> Vec<MetricDescriptor> {
        let mut descriptors: Vec<_> = self.descriptors.values().cloned().collect();
        descriptors.sort_by_key(|d| d.name);
        descriptors
    }

    /// Runs every collector once and converts the samples to metric families.
    pub async fn gather(&self) -> Vec<MetricFamily> {
        let mut families = Vec::new();
        let mut emitted: Vec<&'static str> = Vec::new();

        for collector in &self.collectors {
            for sample in collector.collect().await {
                let Some(desc) = self.descriptors.get(sample.name) else {
                    warn!(metric = sample.name, "Skipping sample without descriptor");
                    continue;
                };
                if emitted.contains(&sample.name) {
                    warn!(metric = sample.name, "Skipping repeated sample");
                    continue;
                }
                // Descriptors were validated on registration.
                let Ok(gauge) = Gauge::with_opts(Opts::new(desc.name, desc.help)) else {
                    continue;
                };
                gauge.set(sample.value);
                families.extend(gauge.collect());
                emitted.push(sample.name);
            }
        }

        families
    }

    /// Collects and encodes all metrics in the text exposition format.
    ///
    /// # Errors
    /// Returns [`RegistryError::Encode`] if encoding fails.
    pub async fn render(&self) -> Result<String, RegistryError> {
        let families = self.gather().await;
        TextEncoder::new()
            .encode_to_string(&families)
            .map_err(|e| RegistryError::Encode(e.to_string()))
    }
}
