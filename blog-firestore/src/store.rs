use async_trait::async_trait;
use blog_core::data::firestore::{
    decode_document, decode_error_message, decode_run_query_response, document_url,
    run_query_body, run_query_url,
};
use blog_core::{CollectionQuery, DocumentStore, StoreError, StoredDocument};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use tracing::debug;

use crate::config::FirestoreConfig;
use crate::error::{FirestoreError, FirestoreResult};

#[derive(Debug, Clone)]
/// Хранилище постов поверх Firestore REST API (`reqwest`).
pub struct FirestoreStore {
    config: FirestoreConfig,
    client: Client,
}

impl FirestoreStore {
    /// Проверяет конфигурацию и создаёт HTTP-клиент.
    pub fn new(config: FirestoreConfig) -> FirestoreResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(FirestoreError::Http)?;

        Ok(Self { config, client })
    }

    /// Текущая конфигурация.
    pub fn config(&self) -> &FirestoreConfig {
        &self.config
    }

    fn with_key(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.query(&[("key", key.as_str())]),
            None => request,
        }
    }

    async fn decode_error(response: Response) -> FirestoreError {
        let status = response.status();
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| decode_error_message(&body));
        FirestoreError::from_http_status(status, message)
    }

    /// Выполняет `:runQuery` и возвращает документы в порядке ответа.
    pub async fn query(&self, query: &CollectionQuery) -> FirestoreResult<Vec<StoredDocument>> {
        let url = run_query_url(
            &self.config.base_url,
            &self.config.project_id,
            &self.config.database,
        );
        let body = run_query_body(query);
        debug!(collection = %query.collection, limit = ?query.limit, "firestore runQuery");

        let response = self
            .with_key(self.client.post(url).json(&body))
            .send()
            .await
            .map_err(FirestoreError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(FirestoreError::from_reqwest)?;
        decode_run_query_response(&body).map_err(|err| match err {
            StoreError::Query(message) => FirestoreError::Status {
                status: 200,
                message,
            },
            other => FirestoreError::Decode(other.to_string()),
        })
    }

    /// Читает документ по id. `Ok(None)`, если документа нет.
    pub async fn document(
        &self,
        collection: &str,
        id: &str,
    ) -> FirestoreResult<Option<StoredDocument>> {
        let url = document_url(
            &self.config.base_url,
            &self.config.project_id,
            &self.config.database,
            collection,
            id,
        );
        debug!(collection, id, "firestore get document");

        let response = self
            .with_key(self.client.get(url))
            .send()
            .await
            .map_err(FirestoreError::from_reqwest)?;
        if !response.status().is_success() {
            return match Self::decode_error(response).await {
                FirestoreError::NotFound => Ok(None),
                err => Err(err),
            };
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(FirestoreError::from_reqwest)?;
        decode_document(&body)
            .map(Some)
            .map_err(|err| FirestoreError::Decode(err.to_string()))
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn run_query(&self, query: &CollectionQuery) -> Result<Vec<StoredDocument>, StoreError> {
        self.query(query).await.map_err(StoreError::from)
    }

    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>, StoreError> {
        self.document(collection, id).await.map_err(StoreError::from)
    }
}
