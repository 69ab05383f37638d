use blog_core::StoreError;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки REST-клиента Firestore.
pub enum FirestoreError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Нет доступа: неверный API-ключ или правила безопасности.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Запрошенный документ или база не найдены.
    #[error("not found")]
    NotFound,

    /// Прочие неуспешные ответы API.
    #[error("firestore returned {status}: {message}")]
    Status {
        /// HTTP-код ответа.
        status: u16,
        /// Сообщение из `error.message` или код статуса.
        message: String,
    },

    /// Ответ не удалось разобрать.
    #[error("malformed response: {0}")]
    Decode(String),

    /// Некорректная конфигурация клиента.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Результат операций `blog-firestore`.
pub type FirestoreResult<T> = Result<T, FirestoreError>;

impl FirestoreError {
    pub(crate) fn from_http_status(status: StatusCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::PermissionDenied(message),
            StatusCode::NOT_FOUND => Self::NotFound,
            _ => Self::Status {
                status: status.as_u16(),
                message,
            },
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        Self::Http(err)
    }
}

impl From<FirestoreError> for StoreError {
    fn from(err: FirestoreError) -> Self {
        match err {
            FirestoreError::Http(err) => StoreError::Transport(err.to_string()),
            FirestoreError::Decode(message) => StoreError::Decode(message),
            FirestoreError::PermissionDenied(message) => StoreError::Query(message),
            FirestoreError::Status { message, .. } => StoreError::Query(message),
            other @ (FirestoreError::NotFound | FirestoreError::InvalidConfig(_)) => {
                StoreError::Query(other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_maps_to_error_kind() {
        assert!(matches!(
            FirestoreError::from_http_status(StatusCode::FORBIDDEN, Some("Missing or insufficient permissions.".into())),
            FirestoreError::PermissionDenied(message) if message == "Missing or insufficient permissions."
        ));
        assert!(matches!(
            FirestoreError::from_http_status(StatusCode::NOT_FOUND, None),
            FirestoreError::NotFound
        ));
        assert!(matches!(
            FirestoreError::from_http_status(StatusCode::SERVICE_UNAVAILABLE, None),
            FirestoreError::Status { status: 503, ref message } if message.contains("503")
        ));
    }

    #[test]
    fn store_error_keeps_api_message() {
        let err = StoreError::from(FirestoreError::Status {
            status: 400,
            message: "The query requires an index.".to_string(),
        });
        assert_eq!(err, StoreError::Query("The query requires an index.".to_string()));
    }
}
