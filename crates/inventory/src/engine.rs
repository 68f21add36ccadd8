//! Single entry point that routes a command to its operation.

use slotcraft_core::InventoryResult;

use crate::catalog::Catalog;
use crate::command::InventoryCommand;
use crate::craft::{CraftReport, CraftResolver};
use crate::stack_ops::Placement;
use crate::store::SlotStore;
use crate::sync::sync_inventory;
use crate::transfer::TransferEngine;

/// Successful result of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Moved,
    Split,
    Dropped,
    Added(Vec<Placement>),
    Crafted(CraftReport),
    Synced { slots: usize },
}

impl Outcome {
    /// Human-readable acknowledgement.
    pub fn message(&self) -> String {
        match self {
            Outcome::Moved => "Moved successfully".to_string(),
            Outcome::Split => "Split successfully".to_string(),
            Outcome::Dropped => "Dropped successfully".to_string(),
            Outcome::Added(_) => "Added successfully".to_string(),
            Outcome::Crafted(report) => {
                format!("Crafted {}x {}", report.produced, report.result_name)
            }
            Outcome::Synced { slots } => format!("Inventory synced ({slots} slots)"),
        }
    }
}

/// Run `cmd` against `store`.
///
/// On `Err` the store may hold partial writes; callers own the unit of work and must
/// discard it.
pub fn execute<C, S>(catalog: &C, store: &mut S, cmd: &InventoryCommand) -> InventoryResult<Outcome>
where
    C: Catalog + ?Sized,
    S: SlotStore + ?Sized,
{
    let transfers = TransferEngine::new(catalog);
    let crafting = CraftResolver::new(catalog);

    match cmd {
        InventoryCommand::Move(c) => transfers.move_stack(store, c).map(|()| Outcome::Moved),
        InventoryCommand::Split(c) => transfers.split_stack(store, c).map(|()| Outcome::Split),
        InventoryCommand::Drop(c) => transfers.drop_stack(store, c).map(|()| Outcome::Dropped),
        InventoryCommand::Add(c) => crafting.add_item(store, c).map(Outcome::Added),
        InventoryCommand::Craft(c) => crafting.craft(store, c).map(Outcome::Crafted),
        InventoryCommand::Sync(c) => {
            sync_inventory(catalog, store, c).map(|slots| Outcome::Synced { slots })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Craft, DropStack, MoveStack};
    use crate::fixtures::*;

    #[test]
    fn routes_commands() {
        let catalog = catalog();
        let mut set = working_set(&[(0, WOOD, 4)]);

        let moved = execute(
            &catalog,
            &mut set,
            &MoveStack {
                from_slot: 0,
                to_slot: 9,
            }
            .into(),
        )
        .unwrap();
        assert_eq!(moved, Outcome::Moved);

        let crafted = execute(
            &catalog,
            &mut set,
            &Craft {
                recipe_id: PLANKS_RECIPE,
            }
            .into(),
        )
        .unwrap();
        assert_eq!(crafted.message(), "Crafted 4x Wooden Planks");
        assert_eq!(contents(&set), vec![(0, PLANKS, 4), (9, WOOD, 3)]);

        let dropped = execute(
            &catalog,
            &mut set,
            &DropStack {
                slot_index: 9,
                amount: None,
            }
            .into(),
        )
        .unwrap();
        assert_eq!(dropped.message(), "Dropped successfully");
        assert_eq!(contents(&set), vec![(0, PLANKS, 4)]);
    }

    #[test]
    fn works_through_a_trait_object() {
        let catalog = catalog();
        let shared: &dyn Catalog = &catalog;
        let mut set = working_set(&[(0, WOOD, 4)]);
        let store: &mut dyn SlotStore = &mut set;

        execute(
            shared,
            store,
            &MoveStack {
                from_slot: 0,
                to_slot: 1,
            }
            .into(),
        )
        .unwrap();

        assert_eq!(contents(&set), vec![(1, WOOD, 4)]);
    }
}
