use std::sync::Mutex;

use slotcraft_core::{InventoryError, InventoryResult};
use slotcraft_inventory::{Catalog, InventoryCommand, InventorySlot, WorkingSet};

use super::run_unit_of_work;
use super::r#trait::{Committed, InventoryStore};

/// In-memory inventory.
///
/// The mutex is held for the whole unit of work, which serializes commands. The
/// command runs against a copy; committed state is replaced only on success.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    slots: Mutex<Vec<InventorySlot>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing slots. Fails on duplicate or out-of-range indices.
    pub fn with_slots(slots: Vec<InventorySlot>) -> InventoryResult<Self> {
        let (slots, _) = WorkingSet::from_slots(slots)?.into_parts();
        Ok(Self {
            slots: Mutex::new(slots),
        })
    }

    fn lock(&self) -> InventoryResult<std::sync::MutexGuard<'_, Vec<InventorySlot>>> {
        self.slots
            .lock()
            .map_err(|_| InventoryError::storage("inventory lock poisoned"))
    }
}

#[async_trait::async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn list_slots(&self) -> InventoryResult<Vec<InventorySlot>> {
        Ok(self.lock()?.clone())
    }

    async fn execute(
        &self,
        catalog: &(dyn Catalog + 'static),
        command: &InventoryCommand,
    ) -> InventoryResult<Committed> {
        let mut committed = self.lock()?;
        let (slots, result) = run_unit_of_work(catalog, committed.iter().cloned(), command)?;
        *committed = slots;
        Ok(result)
    }
}
