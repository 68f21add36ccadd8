//! Move, split and drop.
//!
//! Each operation performs its writes through a [`SlotStore`]; an `Err` return means
//! the caller must discard the unit of work, never commit the partial writes.

use slotcraft_core::{InventoryError, InventoryResult, ItemId};

use crate::catalog::Catalog;
use crate::command::{DropStack, MoveStack, SplitStack};
use crate::slot::{SWAP_PLACEHOLDER_INDEX, checked_amount, checked_index};
use crate::stack_ops::merge_or_overflow;
use crate::store::SlotStore;

/// Slot-to-slot transfers.
#[derive(Debug, Clone, Copy)]
pub struct TransferEngine<'a, C: ?Sized> {
    catalog: &'a C,
}

impl<'a, C> TransferEngine<'a, C>
where
    C: Catalog + ?Sized,
{
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    fn max_stack(&self, item_id: ItemId) -> InventoryResult<u32> {
        self.catalog
            .get_item(item_id)
            .map(|item| item.max_stack_size)
            .ok_or_else(|| InventoryError::not_found(format!("item {item_id} is not in the catalog")))
    }

    /// Relocate, swap or merge the stack at `from_slot` onto `to_slot`.
    ///
    /// - empty target: the source record moves (same identity, new index);
    /// - different item: the two stacks swap via [`SWAP_PLACEHOLDER_INDEX`];
    /// - same item: stacks merge up to the max stack, overflow stays at the source.
    pub fn move_stack<S>(&self, store: &mut S, cmd: &MoveStack) -> InventoryResult<()>
    where
        S: SlotStore + ?Sized,
    {
        if cmd.from_slot == cmd.to_slot {
            return Err(InventoryError::invalid_request("cannot move to the same slot"));
        }
        let from = checked_index(cmd.from_slot, "fromSlot")?;
        let to = checked_index(cmd.to_slot, "toSlot")?;

        let source = store
            .get_slot(from)?
            .ok_or_else(|| InventoryError::not_found(format!("no item in slot {from}")))?;

        let Some(target) = store.get_slot(to)? else {
            return store.update_slot_index(source.id, to);
        };

        if target.item_id != source.item_id {
            store.update_slot_index(source.id, SWAP_PLACEHOLDER_INDEX)?;
            store.update_slot_index(target.id, from)?;
            return store.update_slot_index(source.id, to);
        }

        let max_stack = self.max_stack(target.item_id)?;
        let (merged, overflow) = merge_or_overflow(target.quantity, source.quantity, max_stack);
        store.update_quantity(target.id, merged)?;
        if overflow == 0 {
            store.delete_slot(source.id)
        } else {
            store.update_quantity(source.id, overflow)
        }
    }

    /// Move `amount` units from `from_slot` into `to_slot`, which must be empty or
    /// hold the same item with room for all of them.
    pub fn split_stack<S>(&self, store: &mut S, cmd: &SplitStack) -> InventoryResult<()>
    where
        S: SlotStore + ?Sized,
    {
        let amount = checked_amount(cmd.amount, "amount")?;
        if cmd.from_slot == cmd.to_slot {
            return Err(InventoryError::invalid_request("slots must be different"));
        }
        let from = checked_index(cmd.from_slot, "fromSlot")?;
        let to = checked_index(cmd.to_slot, "toSlot")?;

        let source = store
            .get_slot(from)?
            .ok_or_else(|| InventoryError::not_found(format!("no item in slot {from}")))?;
        if source.quantity < amount {
            return Err(InventoryError::insufficient_quantity(format!(
                "slot {from} holds {}, cannot split off {amount}",
                source.quantity
            )));
        }

        match store.get_slot(to)? {
            None => {
                store.insert_slot(to, source.item_id, amount)?;
            }
            Some(target) => {
                if target.item_id != source.item_id {
                    return Err(InventoryError::item_mismatch(format!(
                        "slot {to} holds item {}, cannot split item {} into it",
                        target.item_id, source.item_id
                    )));
                }
                let max_stack = self.max_stack(target.item_id)?;
                let total = u64::from(target.quantity) + u64::from(amount);
                if total > u64::from(max_stack) {
                    return Err(InventoryError::stack_overflow(format!(
                        "slot {to} would hold {total}, max stack is {max_stack}"
                    )));
                }
                store.update_quantity(target.id, target.quantity + amount)?;
            }
        }

        let remaining = source.quantity - amount;
        if remaining == 0 {
            store.delete_slot(source.id)
        } else {
            store.update_quantity(source.id, remaining)
        }
    }

    /// Discard units from a slot. Without an amount the whole stack goes; an amount
    /// at or above the stack size also discards the whole stack.
    pub fn drop_stack<S>(&self, store: &mut S, cmd: &DropStack) -> InventoryResult<()>
    where
        S: SlotStore + ?Sized,
    {
        let index = checked_index(cmd.slot_index, "slotIndex")?;
        let slot = store
            .get_slot(index)?
            .ok_or_else(|| InventoryError::not_found(format!("no item in slot {index}")))?;

        let Some(amount) = cmd.amount else {
            return store.delete_slot(slot.id);
        };
        if amount <= 0 {
            return Err(InventoryError::invalid_request(
                "amount must be a positive number",
            ));
        }

        if amount >= i64::from(slot.quantity) {
            store.delete_slot(slot.id)
        } else {
            // amount < quantity, so it fits in u32.
            store.update_quantity(slot.id, slot.quantity - amount as u32)
        }
    }
}
