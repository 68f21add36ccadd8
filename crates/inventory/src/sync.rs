//! Whole-inventory replacement.

use std::collections::BTreeSet;

use slotcraft_core::{InventoryError, InventoryResult, ItemId};

use crate::catalog::Catalog;
use crate::command::SyncInventory;
use crate::slot::{checked_amount, checked_index};
use crate::store::SlotStore;

/// Validate every entry, then replace the inventory with them.
///
/// Validation runs to completion before the first write, so a rejected sync never
/// touches the store.
pub fn sync_inventory<C, S>(catalog: &C, store: &mut S, cmd: &SyncInventory) -> InventoryResult<usize>
where
    C: Catalog + ?Sized,
    S: SlotStore + ?Sized,
{
    let mut seen = BTreeSet::new();
    let mut entries: Vec<(i32, ItemId, u32)> = Vec::with_capacity(cmd.slots.len());

    for entry in &cmd.slots {
        let index = checked_index(entry.slot_index, "slotIndex")?;
        if !seen.insert(index) {
            return Err(InventoryError::invalid_request(format!(
                "slot {index} appears more than once"
            )));
        }
        let quantity = checked_amount(entry.quantity, "quantity")?;
        let item = catalog
            .get_item(entry.item_id)
            .ok_or_else(|| InventoryError::not_found(format!("item {} not found", entry.item_id)))?;
        if quantity > item.max_stack_size {
            return Err(InventoryError::invalid_request(format!(
                "slot {index}: {} stacks to at most {}, got {quantity}",
                item.name, item.max_stack_size
            )));
        }
        entries.push((index, item.id, quantity));
    }

    for slot in store.list_slots()? {
        store.delete_slot(slot.id)?;
    }
    for &(index, item_id, quantity) in &entries {
        store.insert_slot(index, item_id, quantity)?;
    }
    Ok(entries.len())
}
