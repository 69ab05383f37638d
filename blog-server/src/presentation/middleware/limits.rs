use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::{Json, Router};
use serde_json::{Value, json};
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::warn;

pub(crate) fn apply_limits(router: Router, body_limit_bytes: usize, timeout: Duration) -> Router {
    router
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(timeout)),
        )
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, Json<Value>) {
    if err.is::<Elapsed>() {
        warn!("request timed out");
        return (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "request timed out" })),
        );
    }

    warn!(error = %err, "unhandled middleware error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal error" })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn elapsed_maps_to_request_timeout() {
        let (status, _) = handle_middleware_error(Box::new(Elapsed::new())).await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn other_errors_map_to_internal_error() {
        let (status, Json(body)) = handle_middleware_error("boom".into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal error");
    }
}
