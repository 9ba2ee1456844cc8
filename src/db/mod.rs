pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repositories;
pub mod store;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::config::{StoreBackend, StoreConfig};

pub use error::StoreError;
pub use memory::InMemoryDocumentStore;
pub use models::*;
pub use postgres::PgDocumentStore;
pub use store::{Collection, DocumentStore, Filter};

/// Initialize the configured document store
pub async fn init_store(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory document store; data is lost on restart");
            Ok(Arc::new(InMemoryDocumentStore::new()))
        }
        StoreBackend::Postgres => {
            let store = PgDocumentStore::connect(config)
                .await
                .context("Failed to initialize Postgres document store")?;
            Ok(Arc::new(store))
        }
    }
}
