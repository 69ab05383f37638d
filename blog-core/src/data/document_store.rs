use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::record::{FieldValue, StoredDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Фильтр по равенству значения поля.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub value: FieldValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Запрос к одной коллекции: фильтр, сортировка и ограничение выборки.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionQuery {
    pub collection: String,
    pub filter: Option<FieldFilter>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<u32>,
}

impl CollectionQuery {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filter: None,
            order_by: None,
            limit: None,
        }
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.filter = Some(FieldFilter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("malformed store response: {0}")]
    Decode(String),
}

/// Порт внешнего документного хранилища. Только чтение.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait DocumentStore: Send + Sync {
    async fn run_query(&self, query: &CollectionQuery) -> Result<Vec<StoredDocument>, StoreError>;

    /// `Ok(None)` означает, что документа нет; это не ошибка.
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>, StoreError>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    async fn run_query(&self, query: &CollectionQuery) -> Result<Vec<StoredDocument>, StoreError> {
        (**self).run_query(query).await
    }

    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>, StoreError> {
        (**self).get_document(collection, id).await
    }
}
