use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use slotcraft_core::InventoryResult;
use slotcraft_infra::{
    CommandDispatcher, Committed, InMemoryInventoryStore, InventoryStore, PostgresInventoryStore,
    load_catalog, migrate, seed,
};
use slotcraft_inventory::{Catalog, InMemoryCatalog, InventoryCommand, InventorySlot};

use crate::config::ApiConfig;

/// Everything the handlers need: one dispatcher over the configured store.
pub struct AppServices {
    dispatcher: CommandDispatcher<Arc<dyn InventoryStore>>,
    backend: &'static str,
}

impl AppServices {
    pub fn new(store: Arc<dyn InventoryStore>, catalog: InMemoryCatalog, backend: &'static str) -> Self {
        Self {
            dispatcher: CommandDispatcher::new(store, Arc::new(catalog)),
            backend,
        }
    }

    /// In-memory store seeded with the starter catalog and inventory.
    pub fn in_memory() -> anyhow::Result<Self> {
        let catalog = seed::starter_catalog().context("starter catalog is invalid")?;
        let store = InMemoryInventoryStore::with_slots(seed::starter_slots())
            .context("starter inventory is invalid")?;
        Ok(Self::new(Arc::new(store), catalog, "in_memory"))
    }

    pub async fn postgres(config: &ApiConfig, database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(database_url)
            .await
            .context("failed to connect to postgres")?;

        if config.migrate {
            migrate(&pool).await.context("schema migration failed")?;
        }
        if config.seed && seed::seed_database(&pool).await.context("seeding failed")? {
            info!("database seeded with starter data");
        }

        let catalog = load_catalog(&pool).await.context("failed to load catalog")?;
        Ok(Self::new(
            Arc::new(PostgresInventoryStore::new(pool)),
            catalog,
            "postgres",
        ))
    }

    pub async fn from_config(config: &ApiConfig) -> anyhow::Result<Self> {
        let services = match config.database_url.as_deref() {
            Some(url) => Self::postgres(config, url).await?,
            None => Self::in_memory()?,
        };
        info!(backend = services.backend, "services ready");
        Ok(services)
    }

    pub fn backend(&self) -> &'static str {
        self.backend
    }

    pub fn catalog(&self) -> &dyn Catalog {
        self.dispatcher.catalog()
    }

    pub async fn dispatch(&self, command: InventoryCommand) -> InventoryResult<Committed> {
        self.dispatcher.dispatch(command).await
    }

    pub async fn inventory(&self) -> InventoryResult<Vec<InventorySlot>> {
        self.dispatcher.inventory().await
    }
}
