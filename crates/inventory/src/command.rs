//! Request records for the inventory operations.
//!
//! Numeric fields are deliberately wide and signed: range checks happen in the
//! operations so that a negative amount is an `InvalidRequest`, not a parse error.

use serde::{Deserialize, Serialize};

use slotcraft_core::{ItemId, RecipeId};

/// Command: move (or swap, or merge) the stack at `from_slot` onto `to_slot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveStack {
    pub from_slot: i64,
    pub to_slot: i64,
}

/// Command: move `amount` units from `from_slot` onto `to_slot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitStack {
    pub from_slot: i64,
    pub to_slot: i64,
    pub amount: i64,
}

/// Command: discard `amount` units (or the whole stack) at `slot_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropStack {
    pub slot_index: i64,
    #[serde(default)]
    pub amount: Option<i64>,
}

/// Command: add `amount` units of an item, auto-allocating slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItem {
    pub item_id: ItemId,
    pub amount: i64,
}

/// Command: craft one batch of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Craft {
    pub recipe_id: RecipeId,
}

/// One entry of a full-inventory sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotEntry {
    pub slot_index: i64,
    pub item_id: ItemId,
    pub quantity: i64,
}

/// Command: replace the whole inventory with `slots`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncInventory {
    #[serde(alias = "inventory")]
    pub slots: Vec<SlotEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryCommand {
    Move(MoveStack),
    Split(SplitStack),
    Drop(DropStack),
    Add(AddItem),
    Craft(Craft),
    Sync(SyncInventory),
}

impl InventoryCommand {
    /// Stable name used in logs and traces.
    pub fn name(&self) -> &'static str {
        match self {
            InventoryCommand::Move(_) => "inventory.move",
            InventoryCommand::Split(_) => "inventory.split",
            InventoryCommand::Drop(_) => "inventory.drop",
            InventoryCommand::Add(_) => "inventory.add",
            InventoryCommand::Craft(_) => "inventory.craft",
            InventoryCommand::Sync(_) => "inventory.sync",
        }
    }
}

macro_rules! impl_from_command {
    ($t:ty, $variant:ident) => {
        impl From<$t> for InventoryCommand {
            fn from(value: $t) -> Self {
                InventoryCommand::$variant(value)
            }
        }
    };
}

impl_from_command!(MoveStack, Move);
impl_from_command!(SplitStack, Split);
impl_from_command!(DropStack, Drop);
impl_from_command!(AddItem, Add);
impl_from_command!(Craft, Craft);
impl_from_command!(SyncInventory, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_use_camel_case() {
        let split: SplitStack =
            serde_json::from_str(r#"{"fromSlot":0,"toSlot":3,"amount":5}"#).unwrap();
        assert_eq!(
            split,
            SplitStack {
                from_slot: 0,
                to_slot: 3,
                amount: 5
            }
        );

        let drop: DropStack = serde_json::from_str(r#"{"slotIndex":2}"#).unwrap();
        assert_eq!(drop.amount, None);

        let craft: Craft = serde_json::from_str(r#"{"recipeId":4}"#).unwrap();
        assert_eq!(craft.recipe_id, RecipeId::new(4));
    }

    #[test]
    fn sync_accepts_inventory_alias() {
        let sync: SyncInventory = serde_json::from_str(
            r#"{"inventory":[{"slotIndex":0,"itemId":1,"quantity":3}]}"#,
        )
        .unwrap();
        assert_eq!(sync.slots.len(), 1);
        assert_eq!(sync.slots[0].item_id, ItemId::new(1));
    }

    #[test]
    fn command_names_are_stable() {
        let cmd: InventoryCommand = MoveStack {
            from_slot: 0,
            to_slot: 1,
        }
        .into();
        assert_eq!(cmd.name(), "inventory.move");
    }
}
