use tracing::debug;

use super::address::PageAddress;
use super::lifecycle::{DetailState, LifecycleError, ListingState, load_detail, load_listing};
use super::profile::SiteProfile;
use super::surface::{Anchor, PageSurface};
use crate::application::post_repository::PostRepository;
use crate::data::document_store::DocumentStore;

/// Чем закончилась загрузка страницы.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Listing(ListingState),
    Detail(DetailState),
    /// Ни один вид не подошёл: якорей блога нет или у страницы поста нет id.
    Inert,
}

/// Точка входа загрузки страницы. Если есть оба набора якорей, выбирается лента.
pub async fn activate_page<D, S>(
    repo: &PostRepository<D>,
    surface: &mut S,
    address: &PageAddress,
    profile: &SiteProfile,
) -> Result<PageOutcome, LifecycleError>
where
    D: DocumentStore,
    S: PageSurface + ?Sized,
{
    if surface.has_anchor(Anchor::BlogGrid) {
        return load_listing(repo, surface, profile)
            .await
            .map(PageOutcome::Listing);
    }

    if surface.has_anchor(Anchor::PostContent) {
        let state = load_detail(repo, surface, address, profile).await?;
        return Ok(state.map_or(PageOutcome::Inert, PageOutcome::Detail));
    }

    debug!(href = address.href(), "page has no blog anchors");
    Ok(PageOutcome::Inert)
}
