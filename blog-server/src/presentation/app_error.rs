use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use blog_core::{FetchError, LifecycleError};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::presentation::documents::DocumentError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("not found")]
    NotFound,

    #[error("internal error")]
    Lifecycle(#[from] LifecycleError),

    #[error("internal error")]
    Document(#[from] DocumentError),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::Fetch(err) => (StatusCode::BAD_GATEWAY, err.message),
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            AppError::Lifecycle(_) | AppError::Document(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            ),
        };

        (status, Json(ErrorBody { error: msg })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use blog_core::RenderError;

    use super::*;

    #[test]
    fn fetch_error_is_bad_gateway() {
        let response = AppError::from(FetchError::new("offline")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn lifecycle_error_hides_details() {
        let response = AppError::from(LifecycleError::NotLoading).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn render_error_is_internal() {
        let error = DocumentError::from(RenderError("bad template".to_string()));
        let response = AppError::from(error).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
