//! Stack arithmetic and slot allocation.
//!
//! Everything here except [`place_items`] is pure: it looks at a snapshot and
//! returns a plan, so the same snapshot and amount always produce the same plan.

use std::collections::BTreeSet;

use slotcraft_core::{InventoryError, InventoryResult, ItemId, SlotId};

use crate::catalog::ItemDef;
use crate::slot::{INVENTORY_SIZE, InventorySlot};
use crate::store::SlotStore;

/// Combine `incoming` units into a stack already holding `existing`.
///
/// Returns `(new_existing, overflow)`: the stack is capped at `max_stack` and the
/// remainder is handed back.
pub fn merge_or_overflow(existing: u32, incoming: u32, max_stack: u32) -> (u32, u32) {
    let total = u64::from(existing) + u64::from(incoming);
    let cap = u64::from(max_stack);
    if total <= cap {
        (u32::try_from(total).unwrap_or(max_stack), 0)
    } else {
        (max_stack, u32::try_from(total - cap).unwrap_or(u32::MAX))
    }
}

/// One step of an allocation plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Top up an existing stack of the same item.
    Fill {
        slot_id: SlotId,
        slot_index: i32,
        added: u32,
        new_quantity: u32,
    },
    /// Start a new stack at a free slot index.
    Open { slot_index: i32, quantity: u32 },
}

impl Placement {
    /// Units this step places.
    pub fn units(&self) -> u32 {
        match self {
            Placement::Fill { added, .. } => *added,
            Placement::Open { quantity, .. } => *quantity,
        }
    }

    pub fn slot_index(&self) -> i32 {
        match self {
            Placement::Fill { slot_index, .. } | Placement::Open { slot_index, .. } => *slot_index,
        }
    }
}

/// Plan where `amount` units of `item_id` go.
///
/// Existing stacks of the item are topped up first, in the order `current_slots`
/// lists them; whatever is left opens new stacks at the lowest unused indices, each
/// holding at most `max_stack`. Fails with `InventoryFull` when units remain and no
/// index below `INVENTORY_SIZE` is free.
pub fn allocate(
    item_id: ItemId,
    amount: u32,
    max_stack: u32,
    current_slots: &[InventorySlot],
) -> InventoryResult<Vec<Placement>> {
    if max_stack == 0 {
        return Err(InventoryError::invalid_request(format!(
            "item {item_id} has a max stack size of 0"
        )));
    }

    let mut remaining = amount;
    let mut plan = Vec::new();

    for slot in current_slots.iter().filter(|s| s.item_id == item_id) {
        if remaining == 0 {
            break;
        }
        let space_left = max_stack.saturating_sub(slot.quantity);
        if space_left == 0 {
            continue;
        }
        let added = space_left.min(remaining);
        plan.push(Placement::Fill {
            slot_id: slot.id,
            slot_index: slot.slot_index,
            added,
            new_quantity: slot.quantity + added,
        });
        remaining -= added;
    }

    if remaining > 0 {
        let used: BTreeSet<i32> = current_slots.iter().map(|s| s.slot_index).collect();
        let mut free = (0..INVENTORY_SIZE).filter(|i| !used.contains(i));

        while remaining > 0 {
            let Some(slot_index) = free.next() else {
                return Err(InventoryError::inventory_full(format!(
                    "no free slot for {remaining} more of item {item_id}"
                )));
            };
            let quantity = max_stack.min(remaining);
            plan.push(Placement::Open {
                slot_index,
                quantity,
            });
            remaining -= quantity;
        }
    }

    Ok(plan)
}

/// Execute an allocation plan against the store.
pub fn apply_placements<S>(store: &mut S, item_id: ItemId, plan: &[Placement]) -> InventoryResult<()>
where
    S: SlotStore + ?Sized,
{
    for step in plan {
        match *step {
            Placement::Fill {
                slot_id,
                new_quantity,
                ..
            } => store.update_quantity(slot_id, new_quantity)?,
            Placement::Open {
                slot_index,
                quantity,
            } => {
                store.insert_slot(slot_index, item_id, quantity)?;
            }
        }
    }
    Ok(())
}

/// Allocate and place `amount` units of `item` against the store's current state.
pub fn place_items<S>(store: &mut S, item: &ItemDef, amount: u32) -> InventoryResult<Vec<Placement>>
where
    S: SlotStore + ?Sized,
{
    let current = store.list_slots()?;
    let plan = allocate(item.id, amount, item.max_stack_size, &current)?;
    apply_placements(store, item.id, &plan)?;
    Ok(plan)
}
