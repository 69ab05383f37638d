use std::sync::Arc;

use anyhow::Result;
use blog_core::{PostRepository, SiteProfile};
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::careers_service::CareersService;
use data::sheet::{CsvSheet, SheetSink};
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use infrastructure::store::build_store;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let store = build_store(&settings).await?;
    let posts = Arc::new(PostRepository::with_collection(store, settings.collection.clone()));

    let sheet: Box<dyn SheetSink> = Box::new(CsvSheet::new(settings.careers_sheet_path.clone()));
    let careers = Arc::new(CareersService::new(sheet));
    info!(path = %settings.careers_sheet_path.display(), "careers applications go to csv sheet");

    let mut profile = SiteProfile::default();
    if let Some(site_name) = &settings.site_name {
        profile.site_name = site_name.clone();
    }

    let state = AppState::new(posts, careers, profile, settings.public_base_url.clone());
    server::run_http(&settings, state).await
}
