use blog_core::DEFAULT_COLLECTION;
use blog_core::data::firestore::{DEFAULT_BASE_URL, DEFAULT_DATABASE};

/// Настройки Firestore, зашитые в сборку.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    pub project_id: String,
    pub api_key: Option<String>,
    pub collection: String,
    pub base_url: String,
    pub database: String,
}

impl BrowserConfig {
    /// Значения берутся из переменных окружения во время сборки:
    /// `FIRESTORE_PROJECT_ID`, `FIRESTORE_API_KEY`, `BLOG_COLLECTION`, `FIRESTORE_BASE_URL`.
    pub fn from_build_env() -> Option<Self> {
        Self::from_values(
            option_env!("FIRESTORE_PROJECT_ID"),
            option_env!("FIRESTORE_API_KEY"),
            option_env!("BLOG_COLLECTION"),
            option_env!("FIRESTORE_BASE_URL"),
        )
    }

    /// Без идентификатора проекта ходить некуда: `None`.
    pub fn from_values(
        project_id: Option<&str>,
        api_key: Option<&str>,
        collection: Option<&str>,
        base_url: Option<&str>,
    ) -> Option<Self> {
        Some(Self {
            project_id: non_blank(project_id)?,
            api_key: non_blank(api_key),
            collection: non_blank(collection).unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            base_url: non_blank(base_url).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            database: DEFAULT_DATABASE.to_string(),
        })
    }

    /// Добавляет `?key=` к адресу запроса, если ключ задан.
    pub fn with_key(&self, url: String) -> String {
        match &self.api_key {
            Some(key) => format!("{url}?key={}", urlencoding::encode(key)),
            None => url,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
