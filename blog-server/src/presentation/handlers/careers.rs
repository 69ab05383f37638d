use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::career::CareerApplication;
use crate::presentation::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CareerApplicationDto {
    #[validate(length(min = 1, max = 200))]
    pub(crate) name: String,
    #[validate(email, length(max = 254))]
    pub(crate) email: String,
    #[validate(length(min = 1, max = 50))]
    pub(crate) phone: String,
    #[validate(length(min = 1, max = 200))]
    pub(crate) position: String,
    #[validate(url)]
    pub(crate) linkedin: Option<String>,
    #[validate(url)]
    pub(crate) portfolio: Option<String>,
    #[validate(length(min = 1, max = 2048))]
    pub(crate) resume: String,
    #[validate(length(min = 1, max = 5000))]
    pub(crate) message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CareersResponseDto {
    pub(crate) success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
}

impl CareerApplicationDto {
    /// Trims every field; empty optional links count as not given.
    fn normalized(self) -> Self {
        let link = |value: Option<String>| {
            value
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            position: self.position.trim().to_string(),
            linkedin: link(self.linkedin),
            portfolio: link(self.portfolio),
            resume: self.resume.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

impl From<CareerApplicationDto> for CareerApplication {
    fn from(dto: CareerApplicationDto) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            phone: dto.phone,
            position: dto.position,
            linkedin: dto.linkedin,
            portfolio: dto.portfolio,
            resume: dto.resume,
            message: dto.message,
        }
    }
}

fn failure(status: StatusCode, error: String) -> (StatusCode, Json<CareersResponseDto>) {
    (
        status,
        Json(CareersResponseDto {
            success: false,
            error: Some(error),
        }),
    )
}

#[utoipa::path(
    post,
    path = "/api/careers",
    tag = "careers",
    request_body = CareerApplicationDto,
    responses(
        (status = 200, description = "Application recorded", body = CareersResponseDto),
        (status = 400, description = "Invalid application", body = CareersResponseDto),
        (status = 500, description = "Sheet unavailable", body = CareersResponseDto)
    )
)]
pub(crate) async fn submit_application(
    State(state): State<AppState>,
    payload: Result<Json<CareerApplicationDto>, JsonRejection>,
) -> (StatusCode, Json<CareersResponseDto>) {
    let dto = match payload {
        Ok(Json(dto)) => dto.normalized(),
        Err(rejection) => return failure(StatusCode::BAD_REQUEST, rejection.body_text()),
    };
    if let Err(err) = dto.validate() {
        return failure(StatusCode::BAD_REQUEST, err.to_string());
    }

    match state.careers.submit(dto.into(), Utc::now()).await {
        Ok(()) => (
            StatusCode::OK,
            Json(CareersResponseDto {
                success: true,
                error: None,
            }),
        ),
        Err(err) => {
            warn!(error = %err, "career application rejected by sheet");
            failure(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}
