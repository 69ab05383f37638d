use std::sync::Arc;

use anyhow::{Context, Result};
use blog_core::{DocumentStore, MemoryStore};
use blog_firestore::{FirestoreConfig, FirestoreStore};
use tracing::info;

use crate::infrastructure::settings::{Settings, StoreSettings};

/// Builds the document store the repository reads from.
pub async fn build_store(settings: &Settings) -> Result<Arc<dyn DocumentStore>> {
    match &settings.store {
        StoreSettings::Fixture(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read fixture {}", path.display()))?;
            let store = MemoryStore::from_json(&settings.collection, &raw)
                .with_context(|| format!("invalid fixture {}", path.display()))?;
            info!(
                path = %path.display(),
                documents = store.len(&settings.collection),
                "using fixture store"
            );
            Ok(Arc::new(store))
        }
        StoreSettings::Firestore {
            project_id,
            api_key,
            base_url,
            database,
        } => {
            let mut config = FirestoreConfig::new(project_id.clone())
                .with_base_url(base_url.clone())
                .with_database(database.clone());
            if let Some(key) = api_key {
                config = config.with_api_key(key.clone());
            }
            let store = FirestoreStore::new(config).context("failed to build firestore client")?;
            info!(project_id = %project_id, base_url = %base_url, "using firestore store");
            Ok(Arc::new(store))
        }
    }
}
