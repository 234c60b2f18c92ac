//! HTTP routing configuration.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::app::AppState;

use super::handlers::{health_handler, metrics_handler, root_handler};

/// Create the exporter router.
///
/// No request timeout layer is installed: a slow upstream must degrade the
/// scrape to `up 0`, never turn it into an HTTP error.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let middleware = ServiceBuilder::new().layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Router::new()
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .layer(middleware)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::infra::MetricsRegistry;

    fn empty_state() -> Arc<AppState> {
        Arc::new(AppState::new(Arc::new(MetricsRegistry::new())))
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let router = create_router(empty_state());

        let response = router
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_post_to_metrics_is_rejected() {
        let router = create_router(empty_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_empty_registry_renders_empty_body() {
        let router = create_router(empty_state());

        let response = router
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }
}
