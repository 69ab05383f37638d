//! Ядро блога: модель поста, доступ к хранилищу документов и отрисовка страниц.
//!
//! Слои:
//! - `domain`: пост и типизированные поля документа;
//! - `data`: порт `DocumentStore`, кодек Firestore REST и хранилище в памяти;
//! - `application`: `PostRepository`, единственная точка чтения постов;
//! - `presentation`: производные поля, разметка и жизненный цикл страниц.

pub mod application;
pub mod data;
pub mod domain;
pub mod presentation;

pub use application::post_repository::{
    DEFAULT_COLLECTION, DEFAULT_LATEST_COUNT, FetchError, LatestPostsMode, PostRepository,
};
pub use data::document_store::{CollectionQuery, Direction, DocumentStore, StoreError};
pub use data::memory_store::MemoryStore;
pub use domain::error::DomainError;
pub use domain::post::{Author, Post};
pub use domain::record::{FieldValue, Record, StoredDocument};
pub use presentation::address::PageAddress;
pub use presentation::lifecycle::{
    DetailFailure, DetailState, DetailView, LifecycleError, ListingState, ListingView,
    load_detail, load_listing,
};
pub use presentation::page::{PageOutcome, activate_page};
pub use presentation::profile::SiteProfile;
pub use presentation::render::RenderError;
pub use presentation::surface::{Anchor, PageSurface, StaticPage};
