use std::time::Duration;

use blog_core::data::firestore::{DEFAULT_BASE_URL, DEFAULT_DATABASE};

use crate::error::{FirestoreError, FirestoreResult};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Параметры подключения к Firestore REST API.
pub struct FirestoreConfig {
    /// Идентификатор проекта Google Cloud.
    pub project_id: String,
    /// Публичный API-ключ веб-приложения; передаётся как `?key=`.
    pub api_key: Option<String>,
    /// Базовый URL API. Для эмулятора, например, `http://127.0.0.1:8080`.
    pub base_url: String,
    /// Имя базы, обычно `(default)`.
    pub database: String,
    /// Таймаут установки соединения.
    pub connect_timeout: Duration,
    /// Таймаут всего запроса.
    pub request_timeout: Duration,
}

impl FirestoreConfig {
    /// Конфигурация для проекта с настройками по умолчанию.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
        }
    }

    /// Задаёт API-ключ.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Задаёт базовый URL API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Задаёт имя базы.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub(crate) fn validate(&self) -> FirestoreResult<()> {
        if self.project_id.trim().is_empty() {
            return Err(FirestoreError::InvalidConfig(
                "project_id must not be empty".to_string(),
            ));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(FirestoreError::InvalidConfig(format!(
                "base_url must be an http(s) url, got '{}'",
                self.base_url
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_public_endpoint_and_default_database() {
        let config = FirestoreConfig::new("growtez");
        assert_eq!(config.base_url, "https://firestore.googleapis.com");
        assert_eq!(config.database, "(default)");
        assert!(config.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_project_and_bad_url() {
        assert!(matches!(
            FirestoreConfig::new("  ").validate(),
            Err(FirestoreError::InvalidConfig(_))
        ));
        assert!(matches!(
            FirestoreConfig::new("p").with_base_url("localhost:8080").validate(),
            Err(FirestoreError::InvalidConfig(_))
        ));
    }
}
