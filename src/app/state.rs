//! Application state management.
//!
//! This module provides the shared application state that is
//! accessible to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::infra::MetricsRegistry;

/// Shared application state for the Axum web server.
///
/// The registry is built and populated explicitly during startup and then
/// handed to the router; there is no process-wide registry.
///
/// # Example
///
/// ```ignore
/// let mut registry = MetricsRegistry::new();
/// registry.register(Arc::new(collector))?;
/// let state = AppState::new(Arc::new(registry));
///
/// let router = create_router(Arc::new(state));
/// ```
#[derive(Clone)]
pub struct AppState {
    /// Registry rendered on every scrape.
    pub registry: Arc<MetricsRegistry>,
}

impl AppState {
    /// Creates a new `AppState` around the given registry.
    #[must_use]
    pub fn new(registry: Arc<MetricsRegistry>) -> Self {
        Self { registry }
    }
}
