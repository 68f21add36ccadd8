use serde::Serialize;

use slotcraft_inventory::{Catalog, Ingredient, InventorySlot, ItemDef, RecipeDef};

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

impl ActionResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub max_stack_size: u32,
    pub image_url: Option<String>,
}

impl From<ItemDef> for ItemResponse {
    fn from(item: ItemDef) -> Self {
        Self {
            id: item.id.get(),
            name: item.name,
            description: item.description,
            max_stack_size: item.max_stack_size,
            image_url: item.image_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub items: Vec<ItemResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotResponse {
    pub id: String,
    pub slot_index: i32,
    pub item_id: i64,
    pub quantity: u32,
    /// `None` only if the catalog lost the item, which the schema forbids.
    pub item: Option<ItemResponse>,
}

pub fn slot_to_response(catalog: &dyn Catalog, slot: InventorySlot) -> SlotResponse {
    SlotResponse {
        id: slot.id.to_string(),
        slot_index: slot.slot_index,
        item_id: slot.item_id.get(),
        quantity: slot.quantity,
        item: catalog.get_item(slot.item_id).map(ItemResponse::from),
    }
}

/// Slots ascending by index, each joined with its item.
#[derive(Debug, Serialize)]
pub struct InventoryResponse {
    pub inventory: Vec<SlotResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientResponse {
    pub item_id: i64,
    pub quantity: u32,
    pub grid_position: Option<u8>,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            item_id: ingredient.item_id.get(),
            quantity: ingredient.quantity,
            grid_position: ingredient.grid_position,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub id: i64,
    pub result_item_id: i64,
    pub result_quantity: u32,
    pub kind: Option<String>,
    pub duration_ms: Option<u32>,
    pub ingredients: Vec<IngredientResponse>,
}

impl From<RecipeDef> for RecipeResponse {
    fn from(recipe: RecipeDef) -> Self {
        Self {
            id: recipe.id.get(),
            result_item_id: recipe.result_item_id.get(),
            result_quantity: recipe.result_quantity,
            kind: recipe.kind,
            duration_ms: recipe.duration_ms,
            ingredients: recipe.ingredients.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipesResponse {
    pub recipes: Vec<RecipeResponse>,
}
