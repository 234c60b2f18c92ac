//! BlockPI balance exporter
//!
//! Exposes the BlockPI account balance as a Prometheus scrape endpoint. Every
//! scrape performs one fresh upstream call; nothing is cached between scrapes.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                   API Layer                  │
//! │        /metrics, /health, / redirect         │
//! ├─────────────────────────────────────────────┤
//! │               Application Layer              │
//! │   Scrape collector, configuration, startup   │
//! ├─────────────────────────────────────────────┤
//! │                 Domain Layer                 │
//! │   Traits, wire types, metric types, errors   │
//! ├─────────────────────────────────────────────┤
//! │             Infrastructure Layer             │
//! │  RPC client, exposition registry, logging    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Scrape contract
//!
//! - Upstream healthy: `up 1` and `account_balance <value>`.
//! - Any upstream failure: only `up 0`; the error goes to the injected
//!   [`domain::DiagnosticsSink`] and the scrape still answers 200.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use blockpi_exporter::app::{Config, bootstrap};
//! use blockpi_exporter::infra::{RpcBalanceClient, TracingDiagnostics};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = Arc::new(RpcBalanceClient::new(config.client_config())?);
//!
//!     // Probe the upstream and register the collector explicitly
//!     let state = bootstrap(&config, client, Arc::new(TracingDiagnostics)).await?;
//!
//!     let router = blockpi_exporter::api::create_router(Arc::new(state));
//!     axum::serve(listener, router).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infra;

// Test utilities are available in tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
