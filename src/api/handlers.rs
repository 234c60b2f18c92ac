//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::app::AppState;
use crate::infra::exposition;

/// Scrape endpoint.
///
/// Always answers 200 with whatever samples the collectors produced; upstream
/// failures show up as `up 0`, not as an HTTP error. Only an encoder failure
/// yields a 500.
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.registry.render().await {
        Ok(body) => ([(header::CONTENT_TYPE, exposition::CONTENT_TYPE)], body).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Liveness of the exporter itself, independent of the upstream
pub async fn health_handler() -> &'static str {
    "ok"
}

pub async fn root_handler() -> impl IntoResponse {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, "/metrics")],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::BalanceCollector;
    use crate::domain::{Credential, FetchError};
    use crate::infra::MetricsRegistry;
    use crate::test_utils::{MockBalanceClient, RecordingDiagnostics};
    use http_body_util::BodyExt;

    fn state_with(client: MockBalanceClient) -> Arc<AppState> {
        let collector = BalanceCollector::new(
            Credential::new("abc").unwrap(),
            Arc::new(client),
            Arc::new(RecordingDiagnostics::new()),
        );
        let mut registry = MetricsRegistry::new();
        registry.register(Arc::new(collector)).unwrap();
        Arc::new(AppState::new(Arc::new(registry)))
    }

    async fn body_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_metrics_handler_success() {
        let response = metrics_handler(State(state_with(MockBalanceClient::new(99.0)))).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            exposition::CONTENT_TYPE
        );
        let body = body_string(response).await;
        assert!(body.contains("\nup 1\n"));
        assert!(body.contains("\naccount_balance 99\n"));
    }

    #[tokio::test]
    async fn test_metrics_handler_upstream_failure_is_still_ok() {
        let client = MockBalanceClient::failing(FetchError::Transport("refused".to_string()));
        let response = metrics_handler(State(state_with(client))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("\nup 0\n"));
        assert!(!body.contains("account_balance"));
    }

    #[tokio::test]
    async fn test_health_handler() {
        assert_eq!(health_handler().await, "ok");
    }

    #[tokio::test]
    async fn test_root_handler_redirects() {
        let response = root_handler().await.into_response();
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[header::LOCATION], "/metrics");
    }
}
