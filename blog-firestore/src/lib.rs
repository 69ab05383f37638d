//! Нативный адаптер `DocumentStore` для Firestore REST API.
//!
//! Кодирование запросов и разбор документов живут в `blog_core::data::firestore`;
//! здесь только транспорт (`reqwest`) и классификация HTTP-ошибок.
//! Крейт предназначен для нативных сборок: сервера и CLI.
#![warn(missing_docs)]

mod config;
mod error;
mod store;

pub use config::FirestoreConfig;
pub use error::{FirestoreError, FirestoreResult};
pub use store::FirestoreStore;
