//! Slot storage seen from inside one unit of work.
//!
//! Operations never talk to a database directly. They run against a [`SlotStore`],
//! and the store backend decides how the resulting writes become durable. The
//! in-transaction implementation, [`WorkingSet`], applies every write to a private
//! copy of the inventory and records it in a journal; the backend either commits the
//! copy (in-memory) or replays the journal inside an SQL transaction (Postgres).
//! Dropping a `WorkingSet` discards everything, which is how aborts work.

use std::collections::BTreeMap;

use slotcraft_core::{InventoryError, InventoryResult, ItemId, SlotId};

use crate::slot::{INVENTORY_SIZE, InventorySlot, SWAP_PLACEHOLDER_INDEX, SlotMutation};

/// Reads and writes available to an operation inside its unit of work.
pub trait SlotStore {
    /// All slots, ascending by slot index.
    fn list_slots(&self) -> InventoryResult<Vec<InventorySlot>>;

    fn get_slot(&self, slot_index: i32) -> InventoryResult<Option<InventorySlot>>;

    fn insert_slot(
        &mut self,
        slot_index: i32,
        item_id: ItemId,
        quantity: u32,
    ) -> InventoryResult<InventorySlot>;

    fn update_quantity(&mut self, id: SlotId, quantity: u32) -> InventoryResult<()>;

    fn update_slot_index(&mut self, id: SlotId, slot_index: i32) -> InventoryResult<()>;

    fn delete_slot(&mut self, id: SlotId) -> InventoryResult<()>;
}

/// Private, journaled copy of the inventory for one operation.
///
/// Enforces the same constraints as the relational schema (unique slot index,
/// index range including the swap placeholder, positive quantity) so that a journal
/// accepted here is also accepted by the database.
#[derive(Debug, Clone, Default)]
pub struct WorkingSet {
    slots: BTreeMap<SlotId, InventorySlot>,
    by_index: BTreeMap<i32, SlotId>,
    journal: Vec<SlotMutation>,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a unit of work from committed state.
    pub fn from_slots(slots: impl IntoIterator<Item = InventorySlot>) -> InventoryResult<Self> {
        let mut set = Self::new();
        for slot in slots {
            check_index(slot.slot_index)?;
            check_quantity(slot.quantity)?;
            if set.by_index.contains_key(&slot.slot_index) {
                return Err(InventoryError::storage(format!(
                    "duplicate slot index {} in committed state",
                    slot.slot_index
                )));
            }
            set.by_index.insert(slot.slot_index, slot.id);
            set.slots.insert(slot.id, slot);
        }
        Ok(set)
    }

    /// Current slots, ascending by slot index.
    pub fn slots(&self) -> Vec<InventorySlot> {
        self.by_index
            .values()
            .filter_map(|id| self.slots.get(id).cloned())
            .collect()
    }

    pub fn journal(&self) -> &[SlotMutation] {
        &self.journal
    }

    pub fn is_dirty(&self) -> bool {
        !self.journal.is_empty()
    }

    /// Finish the unit of work, yielding the resulting slots and the writes that
    /// produced them.
    pub fn into_parts(self) -> (Vec<InventorySlot>, Vec<SlotMutation>) {
        let slots = self.slots();
        (slots, self.journal)
    }

    fn slot_mut(&mut self, id: SlotId) -> InventoryResult<&mut InventorySlot> {
        self.slots
            .get_mut(&id)
            .ok_or_else(|| InventoryError::storage(format!("slot record {id} does not exist")))
    }

    fn ensure_index_free(&self, slot_index: i32) -> InventoryResult<()> {
        if self.by_index.contains_key(&slot_index) {
            return Err(InventoryError::storage(format!(
                "unique constraint violated: slot index {slot_index} is already occupied"
            )));
        }
        Ok(())
    }
}

fn check_index(slot_index: i32) -> InventoryResult<()> {
    if slot_index == SWAP_PLACEHOLDER_INDEX || (0..INVENTORY_SIZE).contains(&slot_index) {
        Ok(())
    } else {
        Err(InventoryError::storage(format!(
            "check constraint violated: slot index {slot_index} out of range"
        )))
    }
}

fn check_quantity(quantity: u32) -> InventoryResult<()> {
    if quantity == 0 {
        return Err(InventoryError::storage(
            "check constraint violated: quantity must be positive",
        ));
    }
    Ok(())
}

impl SlotStore for WorkingSet {
    fn list_slots(&self) -> InventoryResult<Vec<InventorySlot>> {
        Ok(self.slots())
    }

    fn get_slot(&self, slot_index: i32) -> InventoryResult<Option<InventorySlot>> {
        Ok(self
            .by_index
            .get(&slot_index)
            .and_then(|id| self.slots.get(id))
            .cloned())
    }

    fn insert_slot(
        &mut self,
        slot_index: i32,
        item_id: ItemId,
        quantity: u32,
    ) -> InventoryResult<InventorySlot> {
        check_index(slot_index)?;
        check_quantity(quantity)?;
        self.ensure_index_free(slot_index)?;

        let slot = InventorySlot::new(slot_index, item_id, quantity);
        self.by_index.insert(slot_index, slot.id);
        self.slots.insert(slot.id, slot.clone());
        self.journal.push(SlotMutation::Insert { slot: slot.clone() });
        Ok(slot)
    }

    fn update_quantity(&mut self, id: SlotId, quantity: u32) -> InventoryResult<()> {
        check_quantity(quantity)?;
        self.slot_mut(id)?.quantity = quantity;
        self.journal.push(SlotMutation::UpdateQuantity { id, quantity });
        Ok(())
    }

    fn update_slot_index(&mut self, id: SlotId, slot_index: i32) -> InventoryResult<()> {
        check_index(slot_index)?;
        let old_index = self.slot_mut(id)?.slot_index;
        if old_index == slot_index {
            return Ok(());
        }
        self.ensure_index_free(slot_index)?;

        self.by_index.remove(&old_index);
        self.by_index.insert(slot_index, id);
        self.slot_mut(id)?.slot_index = slot_index;
        self.journal.push(SlotMutation::UpdateSlotIndex { id, slot_index });
        Ok(())
    }

    fn delete_slot(&mut self, id: SlotId) -> InventoryResult<()> {
        let slot = self
            .slots
            .remove(&id)
            .ok_or_else(|| InventoryError::storage(format!("slot record {id} does not exist")))?;
        self.by_index.remove(&slot.slot_index);
        self.journal.push(SlotMutation::Delete { id });
        Ok(())
    }
}
