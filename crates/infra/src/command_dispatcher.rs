//! Command execution pipeline.
//!
//! ```text
//! InventoryCommand
//!   ↓
//! 1. Open a unit of work on the store (exclusive over the inventory)
//!   ↓
//! 2. Run the operation against the working set (catalog lookups, invariant checks)
//!   ↓
//! 3. Commit the mutation journal, or discard everything on error
//!   ↓
//! Committed { outcome, mutations }
//! ```
//!
//! The dispatcher owns no state of its own; it pairs a store with the immutable
//! catalog and logs each command's outcome.

use std::sync::Arc;

use tracing::{error, info, warn};

use slotcraft_core::{FailureKind, InventoryResult};
use slotcraft_inventory::{Catalog, InventoryCommand, InventorySlot};

use crate::store::{Committed, InventoryStore};

pub struct CommandDispatcher<S> {
    store: S,
    catalog: Arc<dyn Catalog>,
}

impl<S> CommandDispatcher<S> {
    pub fn new(store: S, catalog: Arc<dyn Catalog>) -> Self {
        Self { store, catalog }
    }

    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }
}

impl<S> CommandDispatcher<S>
where
    S: InventoryStore,
{
    /// Execute one command as an atomic unit of work.
    pub async fn dispatch(&self, command: InventoryCommand) -> InventoryResult<Committed> {
        let name = command.name();
        match self.store.execute(self.catalog.as_ref(), &command).await {
            Ok(committed) => {
                info!(
                    command = name,
                    mutations = committed.mutations.len(),
                    "command committed"
                );
                Ok(committed)
            }
            Err(err) if err.kind() == FailureKind::StorageFault => {
                error!(command = name, error = %err, "command failed in storage");
                Err(err)
            }
            Err(err) => {
                warn!(command = name, kind = err.kind().as_str(), error = %err, "command rejected");
                Err(err)
            }
        }
    }

    pub async fn inventory(&self) -> InventoryResult<Vec<InventorySlot>> {
        self.store.list_slots().await
    }
}
