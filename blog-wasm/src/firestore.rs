use async_trait::async_trait;
use blog_core::data::firestore::{
    decode_document, decode_error_message, decode_run_query_response, document_url,
    run_query_body, run_query_url,
};
use blog_core::{CollectionQuery, DocumentStore, StoreError, StoredDocument};
use gloo_net::http::{Request, Response};
use serde_json::Value;

use crate::config::BrowserConfig;

/// Firestore REST через `fetch` браузера.
pub(crate) struct BrowserFirestore {
    config: BrowserConfig,
}

impl BrowserFirestore {
    pub(crate) fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    async fn error_from(response: Response) -> StoreError {
        let status = response.status();
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| decode_error_message(&body))
            .unwrap_or_else(|| format!("http status {status}"));
        StoreError::Query(message)
    }
}

fn transport(err: gloo_net::Error) -> StoreError {
    StoreError::Transport(err.to_string())
}

#[async_trait(?Send)]
impl DocumentStore for BrowserFirestore {
    async fn run_query(&self, query: &CollectionQuery) -> Result<Vec<StoredDocument>, StoreError> {
        let url = self.config.with_key(run_query_url(
            &self.config.base_url,
            &self.config.project_id,
            &self.config.database,
        ));
        let body = run_query_body(query);

        let response = Request::post(&url)
            .json(&body)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        if !response.ok() {
            return Err(Self::error_from(response).await);
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|err| StoreError::Decode(err.to_string()))?;
        decode_run_query_response(&body)
    }

    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let url = self.config.with_key(document_url(
            &self.config.base_url,
            &self.config.project_id,
            &self.config.database,
            collection,
            id,
        ));

        let response = Request::get(&url).send().await.map_err(transport)?;
        if response.status() == 404 {
            return Ok(None);
        }
        if !response.ok() {
            return Err(Self::error_from(response).await);
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|err| StoreError::Decode(err.to_string()))?;
        decode_document(&body).map(Some)
    }
}
