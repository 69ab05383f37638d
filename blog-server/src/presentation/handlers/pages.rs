use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    response::Html,
};
use blog_core::{
    DEFAULT_LATEST_COUNT, DetailFailure, DetailState, ListingState, PageAddress, StaticPage,
    load_detail, load_listing,
};

use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::documents::{detail_document, home_document, listing_document};

pub(crate) async fn home_page(State(state): State<AppState>) -> AppResult<Html<String>> {
    let latest = state.posts.fetch_latest_posts(DEFAULT_LATEST_COUNT).await;
    Ok(Html(home_document(&latest, &state.profile)?))
}

pub(crate) async fn blog_page(State(state): State<AppState>) -> AppResult<(StatusCode, Html<String>)> {
    let mut page = StaticPage::listing();
    let status = match load_listing(state.posts.as_ref(), &mut page, &state.profile).await? {
        ListingState::Error(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };

    Ok((status, Html(listing_document(&page, &state.profile)?)))
}

pub(crate) async fn post_page(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> AppResult<(StatusCode, Html<String>)> {
    let address = PageAddress::new(format!("{}{}", state.public_base_url, uri));
    let mut page = StaticPage::detail();

    let status = match load_detail(state.posts.as_ref(), &mut page, &address, &state.profile).await? {
        Some(DetailState::Error(DetailFailure::NotFound)) => StatusCode::NOT_FOUND,
        Some(DetailState::Error(DetailFailure::Fetch(_))) => StatusCode::BAD_GATEWAY,
        Some(DetailState::Ready(_) | DetailState::Loading) | None => StatusCode::OK,
    };

    Ok((status, Html(detail_document(&page, &state.profile)?)))
}
