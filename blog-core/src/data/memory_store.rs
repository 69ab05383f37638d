//! `DocumentStore` в памяти: фикстуры для CLI и сервера, дублёр в тестах.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::data::document_store::{CollectionQuery, Direction, DocumentStore, StoreError};
use crate::domain::error::DomainError;
use crate::domain::record::{FieldValue, StoredDocument};

/// Снимок коллекций только для чтения. Документы без поля сортировки
/// считаются самыми ранними.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: BTreeMap<String, Vec<StoredDocument>>,
    failure: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(
        collection: impl Into<String>,
        documents: impl IntoIterator<Item = StoredDocument>,
    ) -> Self {
        let mut store = Self::new();
        store
            .collections
            .insert(collection.into(), documents.into_iter().collect());
        store
    }

    /// Каждый вызов падает с транспортной ошибкой `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            collections: BTreeMap::new(),
            failure: Some(message.into()),
        }
    }

    pub fn len(&self, collection: &str) -> usize {
        self.collections.get(collection).map_or(0, Vec::len)
    }

    /// Загружает JSON-массив плоских документов, у каждого строковый `id`.
    pub fn from_json(collection: &str, raw: &str) -> Result<Self, DomainError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|err| DomainError::MalformedRecord(format!("invalid fixture json: {err}")))?;
        let Value::Array(items) = value else {
            return Err(DomainError::MalformedRecord(
                "fixture must be a JSON array".to_string(),
            ));
        };

        let documents = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| document_from_json(index, item))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::with_documents(collection, documents))
    }

    fn check_available(&self) -> Result<(), StoreError> {
        match &self.failure {
            Some(message) => Err(StoreError::Transport(message.clone())),
            None => Ok(()),
        }
    }
}

fn document_from_json(index: usize, item: Value) -> Result<StoredDocument, DomainError> {
    let Value::Object(mut fields) = item else {
        return Err(DomainError::MalformedRecord(format!(
            "fixture item #{index} must be an object"
        )));
    };
    let id = match fields.remove("id") {
        Some(Value::String(id)) if !id.trim().is_empty() => id,
        _ => {
            return Err(DomainError::MalformedRecord(format!(
                "fixture item #{index} must have a non-empty string id"
            )));
        }
    };

    let fields = fields
        .into_iter()
        .map(|(key, value)| (key, FieldValue::from(value)))
        .collect();
    Ok(StoredDocument::new(id, fields))
}

fn compare_missing_first(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.compare(b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl DocumentStore for MemoryStore {
    async fn run_query(&self, query: &CollectionQuery) -> Result<Vec<StoredDocument>, StoreError> {
        self.check_available()?;

        let Some(documents) = self.collections.get(&query.collection) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<StoredDocument> = documents
            .iter()
            .filter(|doc| match &query.filter {
                Some(filter) => doc.field(&filter.field) == Some(&filter.value),
                None => true,
            })
            .cloned()
            .collect();

        if let Some(order) = &query.order_by {
            matched.sort_by(|a, b| {
                let ordering = compare_missing_first(a.field(&order.field), b.field(&order.field));
                match order.direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = query.limit {
            matched.truncate(limit as usize);
        }
        Ok(matched)
    }

    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>, StoreError> {
        self.check_available()?;

        Ok(self
            .collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"[
        {"id": "a", "title": "A", "isPublished": true, "publishedAt": "2025-01-01T00:00:00Z"},
        {"id": "b", "title": "B", "isPublished": false, "publishedAt": "2025-01-09T00:00:00Z"},
        {"id": "c", "title": "C", "isPublished": true, "publishedAt": "2025-01-05T00:00:00Z"},
        {"id": "d", "title": "D", "isPublished": true}
    ]"#;

    fn ids(docs: &[StoredDocument]) -> Vec<&str> {
        docs.iter().map(|doc| doc.id.as_str()).collect()
    }

    #[tokio::test]
    async fn run_query_filters_orders_and_limits() {
        let store = MemoryStore::from_json("blog_posts", FIXTURE).expect("fixture must load");

        let query = CollectionQuery::new("blog_posts")
            .where_eq("isPublished", true)
            .order_by("publishedAt", Direction::Descending);
        let docs = store.run_query(&query).await.expect("query must succeed");
        assert_eq!(ids(&docs), vec!["c", "a", "d"]);

        let limited = store
            .run_query(&query.clone().limit(2))
            .await
            .expect("query must succeed");
        assert_eq!(ids(&limited), vec!["c", "a"]);
    }

    #[tokio::test]
    async fn run_query_on_unknown_collection_is_empty() {
        let store = MemoryStore::new();
        let docs = store
            .run_query(&CollectionQuery::new("missing"))
            .await
            .expect("query must succeed");
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn get_document_distinguishes_missing() {
        let store = MemoryStore::from_json("blog_posts", FIXTURE).expect("fixture must load");

        let found = store
            .get_document("blog_posts", "b")
            .await
            .expect("lookup must succeed");
        assert_eq!(found.map(|doc| doc.id), Some("b".to_string()));

        let missing = store
            .get_document("blog_posts", "zzz")
            .await
            .expect("lookup must succeed");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn failing_store_reports_transport_error() {
        let store = MemoryStore::failing("connection reset");
        let err = store
            .get_document("blog_posts", "a")
            .await
            .expect_err("store must fail");
        assert_eq!(err, StoreError::Transport("connection reset".to_string()));
    }

    #[test]
    fn from_json_rejects_items_without_id() {
        let err = MemoryStore::from_json("blog_posts", r#"[{"title": "no id"}]"#)
            .expect_err("id is required");
        assert!(matches!(err, DomainError::MalformedRecord(_)));
    }
}
