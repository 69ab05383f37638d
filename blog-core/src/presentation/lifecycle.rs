//! Автоматы состояний страниц.
//!
//! `Loading` единственное начальное состояние, и каждый вид завершается
//! ровно один раз. Регионы-индикаторы вида взаимно исключают друг друга.

use thiserror::Error;
use tracing::{debug, info};

use super::address::PageAddress;
use super::profile::SiteProfile;
use super::render::{RenderError, render_listing, render_post_detail};
use super::surface::{Anchor, PageSurface, show_exclusive};
use crate::application::post_repository::{FetchError, PostRepository};
use crate::data::document_store::DocumentStore;
use crate::domain::post::Post;

pub const LISTING_ERROR_PREFIX: &str = "Error: ";
pub const NOT_FOUND_HEADING: &str = "Post Not Found";
pub const NOT_FOUND_MESSAGE: &str = "The blog post you're looking for doesn't exist.";
pub const FETCH_ERROR_HEADING: &str = "Unable to Load Post";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("view already started")]
    AlreadyStarted,

    #[error("view is not loading")]
    NotLoading,

    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingState {
    Loading,
    Empty,
    Error(String),
    Ready(Vec<Post>),
}

impl ListingState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Empty => "empty",
            Self::Error(_) => "error",
            Self::Ready(_) => "ready",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailFailure {
    NotFound,
    Fetch(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Error(DetailFailure),
    Ready(Box<Post>),
}

impl DetailState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Error(DetailFailure::NotFound) => "not_found",
            Self::Error(DetailFailure::Fetch(_)) => "error",
            Self::Ready(_) => "ready",
        }
    }
}

#[derive(Debug, Default)]
pub struct ListingView {
    state: Option<ListingState>,
}

impl ListingView {
    /// Сетка тоже регион: она скрыта, пока виден любой индикатор.
    pub const REGIONS: [Anchor; 4] = [
        Anchor::BlogLoading,
        Anchor::BlogEmpty,
        Anchor::BlogError,
        Anchor::BlogGrid,
    ];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<&ListingState> {
        self.state.as_ref()
    }

    pub fn begin<S: PageSurface + ?Sized>(&mut self, surface: &mut S) -> Result<(), LifecycleError> {
        if self.state.is_some() {
            return Err(LifecycleError::AlreadyStarted);
        }
        surface.set_html(Anchor::BlogGrid, "");
        show_exclusive(surface, &Self::REGIONS, Anchor::BlogLoading);
        self.state = Some(ListingState::Loading);
        Ok(())
    }

    pub fn settle<S: PageSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        outcome: Result<Vec<Post>, FetchError>,
        profile: &SiteProfile,
    ) -> Result<&ListingState, LifecycleError> {
        if self.state != Some(ListingState::Loading) {
            return Err(LifecycleError::NotLoading);
        }

        let next = match outcome {
            Ok(posts) if posts.is_empty() => {
                show_exclusive(surface, &Self::REGIONS, Anchor::BlogEmpty);
                ListingState::Empty
            }
            Ok(posts) => {
                render_listing(surface, &posts, profile)?;
                show_exclusive(surface, &Self::REGIONS, Anchor::BlogGrid);
                ListingState::Ready(posts)
            }
            Err(err) => {
                surface.set_text(
                    Anchor::BlogErrorMessage,
                    &format!("{LISTING_ERROR_PREFIX}{}", err.message),
                );
                show_exclusive(surface, &Self::REGIONS, Anchor::BlogError);
                ListingState::Error(err.message)
            }
        };

        debug!(state = next.name(), "listing view settled");
        Ok(&*self.state.insert(next))
    }
}

#[derive(Debug, Default)]
pub struct DetailView {
    state: Option<DetailState>,
}

impl DetailView {
    pub const REGIONS: [Anchor; 3] = [Anchor::PostLoading, Anchor::PostError, Anchor::PostContent];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<&DetailState> {
        self.state.as_ref()
    }

    pub fn begin<S: PageSurface + ?Sized>(&mut self, surface: &mut S) -> Result<(), LifecycleError> {
        if self.state.is_some() {
            return Err(LifecycleError::AlreadyStarted);
        }
        show_exclusive(surface, &Self::REGIONS, Anchor::PostLoading);
        self.state = Some(DetailState::Loading);
        Ok(())
    }

    pub fn settle<S: PageSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        outcome: Result<Option<Post>, FetchError>,
        address: &PageAddress,
        profile: &SiteProfile,
    ) -> Result<&DetailState, LifecycleError> {
        if self.state != Some(DetailState::Loading) {
            return Err(LifecycleError::NotLoading);
        }

        let next = match outcome {
            Ok(Some(post)) => {
                render_post_detail(surface, &post, address, profile)?;
                show_exclusive(surface, &Self::REGIONS, Anchor::PostContent);
                DetailState::Ready(Box::new(post))
            }
            Ok(None) => {
                surface.set_text(Anchor::PostErrorHeading, NOT_FOUND_HEADING);
                surface.set_text(Anchor::PostErrorMessage, NOT_FOUND_MESSAGE);
                show_exclusive(surface, &Self::REGIONS, Anchor::PostError);
                DetailState::Error(DetailFailure::NotFound)
            }
            Err(err) => {
                surface.set_text(Anchor::PostErrorHeading, FETCH_ERROR_HEADING);
                surface.set_text(Anchor::PostErrorMessage, &err.message);
                show_exclusive(surface, &Self::REGIONS, Anchor::PostError);
                DetailState::Error(DetailFailure::Fetch(err.message))
            }
        };

        debug!(state = next.name(), "detail view settled");
        Ok(&*self.state.insert(next))
    }
}

/// Лента за одну загрузку страницы: загрузка, один запрос, одно конечное состояние.
pub async fn load_listing<D, S>(
    repo: &PostRepository<D>,
    surface: &mut S,
    profile: &SiteProfile,
) -> Result<ListingState, LifecycleError>
where
    D: DocumentStore,
    S: PageSurface + ?Sized,
{
    let mut view = ListingView::new();
    view.begin(surface)?;

    let outcome = repo.fetch_published_posts().await;
    let state = view.settle(surface, outcome, profile)?.clone();

    info!(state = state.name(), "listing page rendered");
    Ok(state)
}

/// Страница поста за одну загрузку.
///
/// Без id поста в адресе страница остаётся нетронутой: запроса нет,
/// поверхность не меняется, результат `Ok(None)`.
pub async fn load_detail<D, S>(
    repo: &PostRepository<D>,
    surface: &mut S,
    address: &PageAddress,
    profile: &SiteProfile,
) -> Result<Option<DetailState>, LifecycleError>
where
    D: DocumentStore,
    S: PageSurface + ?Sized,
{
    let Some(id) = address.post_id() else {
        debug!(href = address.href(), "no post id in address, detail view stays inert");
        return Ok(None);
    };

    let mut view = DetailView::new();
    view.begin(surface)?;

    let outcome = repo.fetch_post_by_id(&id).await;
    let state = view.settle(surface, outcome, address, profile)?.clone();

    info!(id = %id, state = state.name(), "detail page rendered");
    Ok(Some(state))
}
