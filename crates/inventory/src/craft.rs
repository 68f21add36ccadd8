//! Crafting and bulk add.

use slotcraft_core::{InventoryError, InventoryResult, ItemId, RecipeId, Shortfall};

use crate::catalog::{Catalog, RecipeDef};
use crate::command::{AddItem, Craft};
use crate::slot::checked_amount;
use crate::stack_ops::{Placement, place_items};
use crate::store::SlotStore;

/// What a successful craft did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftReport {
    pub recipe_id: RecipeId,
    pub result_item_id: ItemId,
    pub result_name: String,
    pub produced: u32,
    /// `(item, units)` per distinct ingredient, in recipe order.
    pub consumed: Vec<(ItemId, u64)>,
    pub placements: Vec<Placement>,
}

/// Sum ingredient rows per item, keeping the order in which items first appear.
pub fn aggregate_requirements(recipe: &RecipeDef) -> Vec<(ItemId, u64)> {
    let mut required: Vec<(ItemId, u64)> = Vec::new();
    for ingredient in &recipe.ingredients {
        let quantity = u64::from(ingredient.quantity);
        match required.iter_mut().find(|(id, _)| *id == ingredient.item_id) {
            Some((_, total)) => *total += quantity,
            None => required.push((ingredient.item_id, quantity)),
        }
    }
    required
}

#[derive(Debug, Clone, Copy)]
pub struct CraftResolver<'a, C: ?Sized> {
    catalog: &'a C,
}

impl<'a, C> CraftResolver<'a, C>
where
    C: Catalog + ?Sized,
{
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Craft one batch of `cmd.recipe_id`.
    ///
    /// Sufficiency is checked for every ingredient before anything is deducted, and
    /// all shortfalls are reported together. Deduction walks each item's stacks in
    /// slot order, emptying whole stacks before taking part of the last one. The
    /// result is then placed against the post-deduction state.
    pub fn craft<S>(&self, store: &mut S, cmd: &Craft) -> InventoryResult<CraftReport>
    where
        S: SlotStore + ?Sized,
    {
        let recipe = self
            .catalog
            .get_recipe(cmd.recipe_id)
            .ok_or_else(|| InventoryError::not_found(format!("recipe {} not found", cmd.recipe_id)))?;
        if recipe.ingredients.is_empty() {
            return Err(InventoryError::invalid_request(format!(
                "recipe {} has no ingredients",
                recipe.id
            )));
        }

        let snapshot = store.list_slots()?;
        let required = aggregate_requirements(&recipe);

        let shortfalls: Vec<Shortfall> = required
            .iter()
            .filter_map(|&(item_id, needed)| {
                let available: u64 = snapshot
                    .iter()
                    .filter(|s| s.item_id == item_id)
                    .map(|s| u64::from(s.quantity))
                    .sum();
                (available < needed).then_some(Shortfall {
                    item_id,
                    required: needed,
                    available,
                })
            })
            .collect();
        if !shortfalls.is_empty() {
            return Err(InventoryError::InsufficientIngredients(shortfalls));
        }

        for &(item_id, needed) in &required {
            let mut remaining = needed;
            for slot in snapshot.iter().filter(|s| s.item_id == item_id) {
                if remaining == 0 {
                    break;
                }
                let held = u64::from(slot.quantity);
                if held <= remaining {
                    store.delete_slot(slot.id)?;
                    remaining -= held;
                } else {
                    // held > remaining, so the difference is below u32::MAX.
                    store.update_quantity(slot.id, (held - remaining) as u32)?;
                    remaining = 0;
                }
            }
            if remaining > 0 {
                return Err(InventoryError::storage(format!(
                    "item {item_id} ran short by {remaining} during deduction"
                )));
            }
        }

        let result_item = self.catalog.get_item(recipe.result_item_id).ok_or_else(|| {
            InventoryError::not_found(format!(
                "result item {} of recipe {} is not in the catalog",
                recipe.result_item_id, recipe.id
            ))
        })?;
        let placements = place_items(store, &result_item, recipe.result_quantity)?;

        Ok(CraftReport {
            recipe_id: recipe.id,
            result_item_id: result_item.id,
            result_name: result_item.name,
            produced: recipe.result_quantity,
            consumed: required,
            placements,
        })
    }

    /// Add units of an item, topping up existing stacks before opening new ones.
    pub fn add_item<S>(&self, store: &mut S, cmd: &AddItem) -> InventoryResult<Vec<Placement>>
    where
        S: SlotStore + ?Sized,
    {
        let amount = checked_amount(cmd.amount, "amount")?;
        let item = self
            .catalog
            .get_item(cmd.item_id)
            .ok_or_else(|| InventoryError::not_found(format!("item {} not found", cmd.item_id)))?;
        place_items(store, &item, amount)
    }
}
