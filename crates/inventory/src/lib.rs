//! Inventory transaction engine.
//!
//! Slot-indexed inventory rules (move, split, drop, add, craft, sync), written as
//! deterministic domain logic over a [`SlotStore`]. No IO, no HTTP; the storage
//! backend that owns the unit of work lives in `slotcraft-infra`.

pub mod catalog;
pub mod command;
pub mod craft;
pub mod engine;
pub mod slot;
pub mod stack_ops;
pub mod store;
pub mod sync;
pub mod transfer;

#[cfg(test)]
mod fixtures;

pub use catalog::{Catalog, InMemoryCatalog, Ingredient, ItemDef, RecipeDef};
pub use command::{
    AddItem, Craft, DropStack, InventoryCommand, MoveStack, SlotEntry, SplitStack, SyncInventory,
};
pub use craft::{CraftReport, CraftResolver, aggregate_requirements};
pub use engine::{Outcome, execute};
pub use slot::{INVENTORY_SIZE, InventorySlot, SWAP_PLACEHOLDER_INDEX, SlotMutation};
pub use stack_ops::{Placement, allocate, merge_or_overflow, place_items};
pub use store::{SlotStore, WorkingSet};
pub use sync::sync_inventory;
pub use transfer::TransferEngine;
