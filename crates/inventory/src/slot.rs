//! Inventory slots and the mutations applied to them.

use serde::{Deserialize, Serialize};

use slotcraft_core::{InventoryError, InventoryResult, ItemId, SlotId};

/// Number of addressable slots; valid indices are `0..INVENTORY_SIZE`.
pub const INVENTORY_SIZE: i32 = 36;

/// Transient index used while swapping two occupied slots.
///
/// Lies outside `0..INVENTORY_SIZE` so it can never collide with a real slot.
pub const SWAP_PLACEHOLDER_INDEX: i32 = -1;

/// One stack of a single item at a single slot index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySlot {
    pub id: SlotId,
    pub slot_index: i32,
    pub item_id: ItemId,
    pub quantity: u32,
}

impl InventorySlot {
    pub fn new(slot_index: i32, item_id: ItemId, quantity: u32) -> Self {
        Self {
            id: SlotId::new(),
            slot_index,
            item_id,
            quantity,
        }
    }
}

/// A single write against the slot store, in the order it was performed.
///
/// Replaying a journal of these against a relational store reproduces the
/// in-memory outcome, including the placeholder hop of a swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SlotMutation {
    Insert { slot: InventorySlot },
    UpdateQuantity { id: SlotId, quantity: u32 },
    UpdateSlotIndex { id: SlotId, slot_index: i32 },
    Delete { id: SlotId },
}

impl SlotMutation {
    pub fn slot_id(&self) -> SlotId {
        match self {
            SlotMutation::Insert { slot } => slot.id,
            SlotMutation::UpdateQuantity { id, .. }
            | SlotMutation::UpdateSlotIndex { id, .. }
            | SlotMutation::Delete { id } => *id,
        }
    }
}

/// Validate a caller-supplied slot index and narrow it to the stored width.
pub fn checked_index(raw: i64, field: &str) -> InventoryResult<i32> {
    if (0..i64::from(INVENTORY_SIZE)).contains(&raw) {
        // In range, so the narrowing cannot truncate.
        Ok(raw as i32)
    } else {
        Err(InventoryError::invalid_request(format!(
            "{field} must be between 0 and {}, got {raw}",
            INVENTORY_SIZE - 1
        )))
    }
}

/// Validate a caller-supplied positive amount.
pub fn checked_amount(raw: i64, field: &str) -> InventoryResult<u32> {
    if raw <= 0 {
        return Err(InventoryError::invalid_request(format!(
            "{field} must be greater than 0"
        )));
    }
    u32::try_from(raw)
        .map_err(|_| InventoryError::invalid_request(format!("{field} is too large: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_bounds() {
        assert_eq!(checked_index(0, "fromSlot").unwrap(), 0);
        assert_eq!(checked_index(35, "fromSlot").unwrap(), 35);
        assert!(checked_index(36, "fromSlot").is_err());
        assert!(checked_index(-1, "toSlot").is_err());
    }

    #[test]
    fn amount_must_be_positive() {
        assert_eq!(checked_amount(5, "amount").unwrap(), 5);
        assert!(matches!(
            checked_amount(0, "amount"),
            Err(InventoryError::InvalidRequest(_))
        ));
        assert!(checked_amount(-3, "amount").is_err());
        assert!(checked_amount(i64::MAX, "amount").is_err());
    }

    #[test]
    fn mutation_serializes_with_op_tag() {
        let id = SlotId::new();
        let json = serde_json::to_value(SlotMutation::Delete { id }).unwrap();
        assert_eq!(json["op"], "delete");
    }
}
