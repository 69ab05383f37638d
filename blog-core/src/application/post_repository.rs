use std::num::NonZeroU32;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::data::document_store::{CollectionQuery, Direction, DocumentStore, StoreError};
use crate::domain::post::Post;
use crate::domain::record::StoredDocument;

pub const DEFAULT_COLLECTION: &str = "blog_posts";

pub const DEFAULT_LATEST_COUNT: NonZeroU32 = match NonZeroU32::new(3) {
    Some(count) => count,
    None => unreachable!(),
};

/// Ошибка на границе репозитория. Сообщение показывается читателю как есть.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<StoreError> for FetchError {
    fn from(err: StoreError) -> Self {
        Self::new(err.to_string())
    }
}

/// Реакция `fetch_latest_posts` на неудачный запрос.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatestPostsMode {
    /// Вернуть ошибку вызывающему.
    Strict,
    /// Записать ошибку в лог и вернуть пустой список. Так работает виджет на главной.
    DegradeToEmpty,
}

pub struct PostRepository<S: DocumentStore> {
    store: S,
    collection: String,
}

impl<S: DocumentStore> PostRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_collection(store, DEFAULT_COLLECTION)
    }

    pub fn with_collection(store: S, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    fn published_query(&self) -> CollectionQuery {
        CollectionQuery::new(self.collection.clone())
            .where_eq("isPublished", true)
            .order_by("publishedAt", Direction::Descending)
    }

    /// Все опубликованные посты, новые первыми. Пустой список это успешный результат.
    pub async fn fetch_published_posts(&self) -> Result<Vec<Post>, FetchError> {
        debug!(collection = %self.collection, "fetching published posts");

        let documents = self
            .store
            .run_query(&self.published_query())
            .await
            .inspect_err(|err| {
                warn!(collection = %self.collection, error = %err, "published posts query failed")
            })?;

        let posts = normalize_listing(documents);
        info!(collection = %self.collection, count = posts.len(), "published posts fetched");
        Ok(posts)
    }

    /// Чтение поста по id. `Ok(None)` значит, что поста нет.
    ///
    /// Флаг публикации здесь не проверяется: прямая ссылка работает и для
    /// постов, скрытых из ленты. Id передаётся в хранилище без изменений.
    pub async fn fetch_post_by_id(&self, id: &str) -> Result<Option<Post>, FetchError> {
        if id.trim().is_empty() {
            return Err(FetchError::new("post id must not be empty"));
        }
        debug!(collection = %self.collection, id, "fetching post");

        let document = self
            .store
            .get_document(&self.collection, id)
            .await
            .inspect_err(|err| {
                warn!(collection = %self.collection, id, error = %err, "post lookup failed")
            })?;

        let Some(document) = document else {
            info!(collection = %self.collection, id, "post not found");
            return Ok(None);
        };

        Post::from_document(document).map(Some).map_err(|err| {
            warn!(collection = %self.collection, id, error = %err, "stored post is malformed");
            FetchError::new(format!("post '{id}' is malformed: {err}"))
        })
    }

    /// `count` самых новых опубликованных постов; ошибки возвращаются.
    pub async fn try_fetch_latest_posts(&self, count: NonZeroU32) -> Result<Vec<Post>, FetchError> {
        debug!(collection = %self.collection, count = count.get(), "fetching latest posts");

        let documents = self
            .store
            .run_query(&self.published_query().limit(count.get()))
            .await?;

        let mut posts = normalize_listing(documents);
        posts.truncate(count.get() as usize);
        Ok(posts)
    }

    /// `count` самых новых постов в режиме [`LatestPostsMode::DegradeToEmpty`]:
    /// при неудачном запросе возвращается пустой список вместо ошибки.
    pub async fn fetch_latest_posts(&self, count: NonZeroU32) -> Vec<Post> {
        self.fetch_latest_posts_with(count, LatestPostsMode::DegradeToEmpty)
            .await
            .unwrap_or_default()
    }

    pub async fn fetch_latest_posts_with(
        &self,
        count: NonZeroU32,
        mode: LatestPostsMode,
    ) -> Result<Vec<Post>, FetchError> {
        match (self.try_fetch_latest_posts(count).await, mode) {
            (Ok(posts), _) => Ok(posts),
            (Err(err), LatestPostsMode::Strict) => Err(err),
            (Err(err), LatestPostsMode::DegradeToEmpty) => {
                warn!(
                    collection = %self.collection,
                    error = %err,
                    "latest posts unavailable, degrading to empty list"
                );
                Ok(Vec::new())
            }
        }
    }
}

/// Превращает документы в посты и заново применяет правила ленты:
/// только опубликованные, новые первыми, посты без даты в конце.
fn normalize_listing(documents: Vec<StoredDocument>) -> Vec<Post> {
    let mut posts: Vec<Post> = documents
        .into_iter()
        .filter_map(|document| {
            let id = document.id.clone();
            Post::from_document(document)
                .inspect_err(|err| warn!(id = %id, error = %err, "skipping malformed post"))
                .ok()
        })
        .filter(|post| post.is_published)
        .collect();

    posts.sort_by(Post::newest_first);
    posts
}
