use axum::Router;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::handlers::pages::{blog_page, home_page, post_page};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home_page))
        .route("/blog", get(blog_page))
        .route("/blog/post", get(post_page))
        .route("/blog-post.html", get(post_page))
}
