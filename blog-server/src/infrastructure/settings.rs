use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use blog_core::DEFAULT_COLLECTION;
use blog_core::data::firestore::{DEFAULT_BASE_URL, DEFAULT_DATABASE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSettings {
    /// JSON fixture loaded into memory at startup.
    Fixture(PathBuf),
    Firestore {
        project_id: String,
        api_key: Option<String>,
        base_url: String,
        database: String,
    },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub http_addr: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub http_request_body_limit_bytes: usize,
    pub http_request_timeout_secs: u64,
    pub store: StoreSettings,
    pub collection: String,
    pub careers_sheet_path: PathBuf,
    pub site_name: Option<String>,
    pub public_base_url: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let store = match optional(&lookup, "STORE_FIXTURE") {
            Some(path) => StoreSettings::Fixture(PathBuf::from(path)),
            None => StoreSettings::Firestore {
                project_id: optional(&lookup, "FIRESTORE_PROJECT_ID")
                    .ok_or_else(|| anyhow!("FIRESTORE_PROJECT_ID must not be empty"))
                    .context("either STORE_FIXTURE or FIRESTORE_PROJECT_ID is required")?,
                api_key: optional(&lookup, "FIRESTORE_API_KEY"),
                base_url: optional(&lookup, "FIRESTORE_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                database: optional(&lookup, "FIRESTORE_DATABASE")
                    .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            },
        };

        let http_addr = optional(&lookup, "HTTP_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let cors_origins = parse_cors_origins(
            optional(&lookup, "CORS_ORIGINS")
                .unwrap_or_else(|| "http://localhost:8000,http://127.0.0.1:8000".to_string()),
        );
        let log_level = optional(&lookup, "LOG_LEVEL")
            .or_else(|| optional(&lookup, "RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());
        let http_request_body_limit_bytes =
            parse_positive(&lookup, "HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;
        let http_request_timeout_secs = parse_positive(&lookup, "HTTP_REQUEST_TIMEOUT_SECS", 10)?;
        let collection =
            optional(&lookup, "BLOG_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string());
        let careers_sheet_path = PathBuf::from(
            optional(&lookup, "CAREERS_SHEET_PATH").unwrap_or_else(|| "applications.csv".to_string()),
        );
        let site_name = optional(&lookup, "SITE_NAME");
        let public_base_url = optional(&lookup, "PUBLIC_BASE_URL")
            .unwrap_or_else(|| format!("http://{http_addr}"))
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            http_addr,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
            http_request_timeout_secs,
            store,
            collection,
            careers_sheet_path,
            site_name,
            public_base_url,
        })
    }
}

/// Unset and blank values are treated the same.
fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_cors_origins(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_positive<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr + PartialEq + Default + ToString,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = optional(lookup, key)
        .unwrap_or_else(|| default.to_string())
        .parse::<T>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == T::default() {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
