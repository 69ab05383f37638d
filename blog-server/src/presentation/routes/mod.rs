use axum::Router;
use axum::routing::{get, post};

use super::AppState;
use super::handlers::careers::submit_application;
use super::handlers::health::health_handler;

pub(crate) mod pages;
pub(crate) mod posts;

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .merge(pages::router())
        .nest("/api/posts", posts::router())
        .route("/api/careers", post(submit_application))
        .with_state(state)
}
