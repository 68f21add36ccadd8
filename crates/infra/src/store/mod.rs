//! Inventory persistence boundary.
//!
//! A store owns the unit of work: it opens it, hands the operation a
//! [`WorkingSet`](slotcraft_inventory::WorkingSet) loaded from committed state, and
//! makes the journal durable only if the operation succeeds.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryInventoryStore;
pub use postgres::PostgresInventoryStore;
pub use r#trait::{Committed, InventoryStore};

use slotcraft_core::{InventoryError, InventoryResult};
use slotcraft_inventory::{Catalog, InventoryCommand, InventorySlot, SlotMutation, WorkingSet, execute};

/// Run `command` inside a unit of work seeded from `committed`.
///
/// Returns the resulting slots and the journal. Rejects a result that leaves a slot
/// parked at the swap placeholder.
pub(crate) fn run_unit_of_work<C>(
    catalog: &C,
    committed: impl IntoIterator<Item = InventorySlot>,
    command: &InventoryCommand,
) -> InventoryResult<(Vec<InventorySlot>, Committed)>
where
    C: Catalog + ?Sized,
{
    let mut uow = WorkingSet::from_slots(committed)?;
    let outcome = execute(catalog, &mut uow, command)?;
    let (slots, mutations): (Vec<InventorySlot>, Vec<SlotMutation>) = uow.into_parts();

    if let Some(parked) = slots.iter().find(|s| s.slot_index < 0) {
        return Err(InventoryError::storage(format!(
            "{} left slot record {} at index {}",
            command.name(),
            parked.id,
            parked.slot_index
        )));
    }

    Ok((slots, Committed { outcome, mutations }))
}
