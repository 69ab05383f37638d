use std::sync::Arc;

use blog_core::{DocumentStore, PostRepository, SiteProfile};

use crate::application::careers_service::CareersService;
use crate::data::sheet::SheetSink;

pub(crate) mod app_error;
pub(crate) mod documents;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

pub(crate) type SharedPostRepository = PostRepository<Arc<dyn DocumentStore>>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) posts: Arc<SharedPostRepository>,
    pub(crate) careers: Arc<CareersService<dyn SheetSink>>,
    pub(crate) profile: Arc<SiteProfile>,
    /// Scheme and host the pages are served from, without a trailing slash.
    pub(crate) public_base_url: Arc<str>,
}

impl AppState {
    pub(crate) fn new(
        posts: Arc<SharedPostRepository>,
        careers: Arc<CareersService<dyn SheetSink>>,
        profile: SiteProfile,
        public_base_url: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            posts,
            careers,
            profile: Arc::new(profile),
            public_base_url: public_base_url.into(),
        }
    }
}
