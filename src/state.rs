use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{CatalogService, SeaOrmCatalogService};

/// Process-wide handles, built once at startup and shared by every request.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub catalog: Arc<dyn CatalogService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::from_config(&config.database).await?;
        Ok(Self::with_store(config, store))
    }

    /// Wires the services around an already-connected store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let catalog: Arc<dyn CatalogService> = Arc::new(SeaOrmCatalogService::new(
            store.clone(),
            config.security.clone(),
        ));

        Self {
            config: Arc::new(config),
            store,
            catalog,
        }
    }
}
