//! Startup sequence: probe the upstream, wire the registry, serve.
//!
//! Every step returns a [`StartupError`] instead of panicking so the entry
//! point decides the exit code. Nothing binds a port before the credential
//! has been validated and the probe has succeeded.

use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{debug, info, instrument};

use crate::api::create_router;
use crate::domain::{BalanceClient, Credential, DiagnosticsSink, ProbeError, StartupError};
use crate::infra::{MetricsRegistry, RpcBalanceClient, TracingDiagnostics};

use super::collector::BalanceCollector;
use super::config::Config;
use super::state::AppState;

/// Performs one upstream call to verify the credential and connectivity.
#[instrument(skip_all)]
pub async fn probe(
    client: &dyn BalanceClient,
    credential: &Credential,
) -> Result<f64, ProbeError> {
    let balance = client.fetch_balance(credential).await?;
    debug!(balance, "Upstream probe succeeded");
    Ok(balance)
}

/// Probes the upstream and builds the application state around a freshly
/// constructed registry holding the balance collector.
pub async fn bootstrap(
    config: &Config,
    client: Arc<dyn BalanceClient>,
    diagnostics: Arc<dyn DiagnosticsSink>,
) -> Result<AppState, StartupError> {
    probe(client.as_ref(), &config.credential).await?;

    let collector = BalanceCollector::new(config.credential.clone(), client, diagnostics);
    let mut registry = MetricsRegistry::new();
    registry.register(Arc::new(collector))?;

    Ok(AppState::new(Arc::new(registry)))
}

/// Serves the router on `listener` until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: F,
) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let router = create_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(StartupError::Serve)
}

/// Runs the exporter with the real upstream client until Ctrl-C or SIGTERM.
pub async fn run(config: Config) -> Result<(), StartupError> {
    let client = Arc::new(RpcBalanceClient::new(config.client_config())?);
    let state = bootstrap(&config, client, Arc::new(TracingDiagnostics)).await?;

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    let listener = TcpListener::bind(addr).await.map_err(StartupError::Bind)?;

    info!(%addr, "Starting BlockPi exporter");
    serve(listener, Arc::new(state), shutdown_signal()).await?;
    info!("Shutting down BlockPi exporter");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FetchError;
    use crate::test_utils::{MockBalanceClient, RecordingDiagnostics};

    fn config() -> Config {
        Config::from_lookup(|key| (key == "BLOCKPI_API_KEY").then(|| "abc".to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_probe_success() {
        let client = MockBalanceClient::new(3.0);
        let balance = probe(&client, &config().credential).await;
        assert_eq!(balance, Ok(3.0));
    }

    #[tokio::test]
    async fn test_probe_failure() {
        let client = MockBalanceClient::failing(FetchError::Transport("refused".to_string()));
        let err = probe(&client, &config().credential).await.unwrap_err();
        assert_eq!(err, ProbeError(FetchError::Transport("refused".to_string())));
    }

    #[tokio::test]
    async fn test_bootstrap_registers_collector() {
        let client = Arc::new(MockBalanceClient::new(5.0));
        let state = bootstrap(&config(), client.clone(), Arc::new(RecordingDiagnostics::new()))
            .await
            .unwrap();

        let names: Vec<_> = state.registry.descriptors().iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["account_balance", "up"]);
        // Only the probe has hit the upstream so far
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_bootstrap_fails_when_probe_fails() {
        let client = Arc::new(MockBalanceClient::failing(FetchError::Upstream {
            code: 401,
            message: "bad key".to_string(),
        }));
        let result = bootstrap(&config(), client, Arc::new(RecordingDiagnostics::new())).await;
        assert!(matches!(result, Err(StartupError::Probe(_))));
    }
}
