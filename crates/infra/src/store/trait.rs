use std::sync::Arc;

use slotcraft_core::InventoryResult;
use slotcraft_inventory::{Catalog, InventoryCommand, InventorySlot, Outcome, SlotMutation};

/// A committed unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    pub outcome: Outcome,
    /// Slot writes in the order they were applied.
    pub mutations: Vec<SlotMutation>,
}

/// Durable inventory state with all-or-nothing command execution.
///
/// Implementations must:
/// - serialize commands (no two units of work interleave their reads and writes)
/// - persist nothing when the command fails
/// - surface backend failures as `StorageFault`, never retry them
#[async_trait::async_trait]
pub trait InventoryStore: Send + Sync {
    /// All slots, ascending by slot index.
    async fn list_slots(&self) -> InventoryResult<Vec<InventorySlot>>;

    /// Execute one command as a single unit of work.
    async fn execute(
        &self,
        catalog: &(dyn Catalog + 'static),
        command: &InventoryCommand,
    ) -> InventoryResult<Committed>;
}

#[async_trait::async_trait]
impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    async fn list_slots(&self) -> InventoryResult<Vec<InventorySlot>> {
        (**self).list_slots().await
    }

    async fn execute(
        &self,
        catalog: &(dyn Catalog + 'static),
        command: &InventoryCommand,
    ) -> InventoryResult<Committed> {
        (**self).execute(catalog, command).await
    }
}
