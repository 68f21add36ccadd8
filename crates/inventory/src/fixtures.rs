//! Shared test fixtures.

use slotcraft_core::{ItemId, RecipeId};

use crate::catalog::{InMemoryCatalog, Ingredient, ItemDef, RecipeDef};
use crate::slot::InventorySlot;
use crate::store::WorkingSet;

pub const WOOD: ItemId = ItemId::new(1);
pub const STONE: ItemId = ItemId::new(2);
pub const PLANKS: ItemId = ItemId::new(4);
pub const STICK: ItemId = ItemId::new(6);
pub const PICKAXE: ItemId = ItemId::new(7);

pub const PLANKS_RECIPE: RecipeId = RecipeId::new(1);
pub const STICK_RECIPE: RecipeId = RecipeId::new(2);
pub const PICKAXE_RECIPE: RecipeId = RecipeId::new(4);
pub const WOOD_PAIR_RECIPE: RecipeId = RecipeId::new(10);
pub const EMPTY_RECIPE: RecipeId = RecipeId::new(11);
pub const DANGLING_RECIPE: RecipeId = RecipeId::new(12);
pub const DUPLICATE_ROW_RECIPE: RecipeId = RecipeId::new(13);

pub fn catalog() -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new();
    for item in [
        ItemDef::new(WOOD, "Wood", 64),
        ItemDef::new(STONE, "Stone", 64),
        ItemDef::new(PLANKS, "Wooden Planks", 64),
        ItemDef::new(STICK, "Stick", 64),
        ItemDef::new(PICKAXE, "Stone Pickaxe", 1),
    ] {
        catalog.insert_item(item).unwrap();
    }
    for recipe in [
        RecipeDef::new(PLANKS_RECIPE, PLANKS, 4).with_ingredient(Ingredient::new(WOOD, 1)),
        RecipeDef::new(STICK_RECIPE, STICK, 4).with_ingredient(Ingredient::new(PLANKS, 2)),
        RecipeDef::new(PICKAXE_RECIPE, PICKAXE, 1)
            .with_ingredient(Ingredient::new(STONE, 3).at(0))
            .with_ingredient(Ingredient::new(STICK, 2).at(1)),
        RecipeDef::new(WOOD_PAIR_RECIPE, PLANKS, 1).with_ingredient(Ingredient::new(WOOD, 2)),
        RecipeDef::new(EMPTY_RECIPE, PLANKS, 1),
        RecipeDef::new(DANGLING_RECIPE, ItemId::new(404), 1)
            .with_ingredient(Ingredient::new(WOOD, 1)),
        RecipeDef::new(DUPLICATE_ROW_RECIPE, PLANKS, 1)
            .with_ingredient(Ingredient::new(WOOD, 2).at(0))
            .with_ingredient(Ingredient::new(WOOD, 3).at(1)),
    ] {
        catalog.insert_recipe(recipe).unwrap();
    }
    catalog
}

pub fn working_set(slots: &[(i32, ItemId, u32)]) -> WorkingSet {
    WorkingSet::from_slots(
        slots
            .iter()
            .map(|&(index, item, qty)| InventorySlot::new(index, item, qty)),
    )
    .unwrap()
}

/// `(slot_index, item_id, quantity)` triples, ascending by index.
pub fn contents(set: &WorkingSet) -> Vec<(i32, ItemId, u32)> {
    set.slots()
        .into_iter()
        .map(|s| (s.slot_index, s.item_id, s.quantity))
        .collect()
}

pub fn total_of(set: &WorkingSet, item_id: ItemId) -> u64 {
    set.slots()
        .iter()
        .filter(|s| s.item_id == item_id)
        .map(|s| u64::from(s.quantity))
        .sum()
}
