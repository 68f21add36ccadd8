//! Read-only item and recipe definitions.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use slotcraft_core::{InventoryError, InventoryResult, ItemId, RecipeId};

/// Item definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ceiling on the quantity of this item in any single slot.
    pub max_stack_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ItemDef {
    pub fn new(id: ItemId, name: impl Into<String>, max_stack_size: u32) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            max_stack_size,
            image_url: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// One ingredient row of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub item_id: ItemId,
    pub quantity: u32,
    /// Position in a 3x3 crafting grid. Display metadata only; crafting
    /// aggregates by item regardless of placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_position: Option<u8>,
}

impl Ingredient {
    pub fn new(item_id: ItemId, quantity: u32) -> Self {
        Self {
            item_id,
            quantity,
            grid_position: None,
        }
    }

    pub fn at(mut self, grid_position: u8) -> Self {
        self.grid_position = Some(grid_position);
        self
    }
}

/// Recipe definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDef {
    pub id: RecipeId,
    pub result_item_id: ItemId,
    pub result_quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u32>,
    pub ingredients: Vec<Ingredient>,
}

impl RecipeDef {
    pub fn new(id: RecipeId, result_item_id: ItemId, result_quantity: u32) -> Self {
        Self {
            id,
            result_item_id,
            result_quantity,
            kind: None,
            duration_ms: None,
            ingredients: Vec::new(),
        }
    }

    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

/// Read-only catalog lookup.
///
/// Absence is reported as `None`; deciding whether a missing definition is a caller
/// error or a data-integrity fault is up to the operation doing the lookup.
pub trait Catalog: Send + Sync {
    fn get_item(&self, id: ItemId) -> Option<ItemDef>;
    fn get_recipe(&self, id: RecipeId) -> Option<RecipeDef>;
    /// All items, ordered by id.
    fn items(&self) -> Vec<ItemDef>;
    /// All recipes (with ingredients), ordered by id.
    fn recipes(&self) -> Vec<RecipeDef>;
}

impl<C> Catalog for Arc<C>
where
    C: Catalog + ?Sized,
{
    fn get_item(&self, id: ItemId) -> Option<ItemDef> {
        (**self).get_item(id)
    }

    fn get_recipe(&self, id: RecipeId) -> Option<RecipeDef> {
        (**self).get_recipe(id)
    }

    fn items(&self) -> Vec<ItemDef> {
        (**self).items()
    }

    fn recipes(&self) -> Vec<RecipeDef> {
        (**self).recipes()
    }
}

/// Catalog held entirely in memory.
///
/// Loaded once (from the database or from starter data) and shared immutably.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    items: BTreeMap<ItemId, ItemDef>,
    recipes: BTreeMap<RecipeId, RecipeDef>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_item(&mut self, item: ItemDef) -> InventoryResult<()> {
        if item.max_stack_size == 0 {
            return Err(InventoryError::invalid_request(format!(
                "item {} must have a positive max stack size",
                item.id
            )));
        }
        if item.name.trim().is_empty() {
            return Err(InventoryError::invalid_request(format!(
                "item {} name cannot be empty",
                item.id
            )));
        }
        self.items.insert(item.id, item);
        Ok(())
    }

    /// Register a recipe.
    ///
    /// Referenced items are not required to exist yet: a dangling result item is a
    /// data-integrity fault surfaced when the recipe is crafted.
    pub fn insert_recipe(&mut self, recipe: RecipeDef) -> InventoryResult<()> {
        if recipe.result_quantity == 0 {
            return Err(InventoryError::invalid_request(format!(
                "recipe {} must produce at least one item",
                recipe.id
            )));
        }
        if let Some(bad) = recipe.ingredients.iter().find(|i| i.quantity == 0) {
            return Err(InventoryError::invalid_request(format!(
                "recipe {} ingredient {} has zero quantity",
                recipe.id, bad.item_id
            )));
        }
        self.recipes.insert(recipe.id, recipe);
        Ok(())
    }

    pub fn with_item(mut self, item: ItemDef) -> InventoryResult<Self> {
        self.insert_item(item)?;
        Ok(self)
    }

    pub fn with_recipe(mut self, recipe: RecipeDef) -> InventoryResult<Self> {
        self.insert_recipe(recipe)?;
        Ok(self)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }
}

impl Catalog for InMemoryCatalog {
    fn get_item(&self, id: ItemId) -> Option<ItemDef> {
        self.items.get(&id).cloned()
    }

    fn get_recipe(&self, id: RecipeId) -> Option<RecipeDef> {
        self.recipes.get(&id).cloned()
    }

    fn items(&self) -> Vec<ItemDef> {
        self.items.values().cloned().collect()
    }

    fn recipes(&self) -> Vec<RecipeDef> {
        self.recipes.values().cloned().collect()
    }
}
