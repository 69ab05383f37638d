use std::num::NonZeroU32;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use blog_core::{Author, DEFAULT_LATEST_COUNT, Post};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AuthorDto {
    pub(crate) name: Option<String>,
    pub(crate) avatar: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostDto {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) slug: Option<String>,
    pub(crate) excerpt: String,
    pub(crate) content: String,
    pub(crate) cover_image: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) author: Option<AuthorDto>,
    pub(crate) tags: Vec<String>,
    pub(crate) reading_time: Option<String>,
    pub(crate) published_at: Option<DateTime<Utc>>,
    pub(crate) is_published: bool,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct LatestPostsQuery {
    /// Number of posts, 1..=50. Defaults to 3.
    #[validate(range(min = 1, max = 50))]
    pub(crate) count: Option<u32>,
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            name: author.name,
            avatar: author.avatar,
        }
    }
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            excerpt: post.excerpt,
            content: post.content,
            cover_image: post.cover_image,
            category: post.category,
            author: post.author.map(AuthorDto::from),
            tags: post.tags,
            reading_time: post.reading_time,
            published_at: post.published_at,
            is_published: post.is_published,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    responses(
        (status = 200, description = "Published posts, newest first", body = [PostDto]),
        (status = 502, description = "Document store unavailable")
    )
)]
pub(crate) async fn list_posts(State(state): State<AppState>) -> AppResult<Json<Vec<PostDto>>> {
    let posts = state.posts.fetch_published_posts().await?;
    Ok(Json(posts.into_iter().map(PostDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/posts/latest",
    tag = "posts",
    params(LatestPostsQuery),
    responses(
        (status = 200, description = "Latest posts; empty when the store is unavailable", body = [PostDto]),
        (status = 400, description = "Validation error")
    )
)]
pub(crate) async fn latest_posts(
    State(state): State<AppState>,
    Query(query): Query<LatestPostsQuery>,
) -> AppResult<Json<Vec<PostDto>>> {
    query.validate()?;
    let count = query
        .count
        .and_then(NonZeroU32::new)
        .unwrap_or(DEFAULT_LATEST_COUNT);

    let posts = state.posts.fetch_latest_posts(count).await;
    Ok(Json(posts.into_iter().map(PostDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = String, Path, description = "Document id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 404, description = "Post not found"),
        (status = 502, description = "Document store unavailable")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<PostDto>> {
    let post = state
        .posts
        .fetch_post_by_id(&id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(PostDto::from(post)))
}
