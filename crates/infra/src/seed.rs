//! Starter catalog and inventory.
//!
//! Used to seed the in-memory backend, and optionally an empty Postgres database.

use sqlx::PgPool;
use tracing::info;

use slotcraft_core::{InventoryResult, ItemId, RecipeId};
use slotcraft_inventory::{Catalog, InMemoryCatalog, Ingredient, InventorySlot, ItemDef, RecipeDef};

use crate::postgres_util::{map_sqlx_error, to_db_int};

pub const WOOD: ItemId = ItemId::new(1);
pub const STONE: ItemId = ItemId::new(2);
pub const IRON_ORE: ItemId = ItemId::new(3);
pub const WOODEN_PLANKS: ItemId = ItemId::new(4);
pub const IRON_INGOT: ItemId = ItemId::new(5);
pub const STICK: ItemId = ItemId::new(6);
pub const STONE_PICKAXE: ItemId = ItemId::new(7);
pub const IRON_SWORD: ItemId = ItemId::new(8);

pub const PLANKS_RECIPE: RecipeId = RecipeId::new(1);
pub const STICK_RECIPE: RecipeId = RecipeId::new(2);
pub const IRON_INGOT_RECIPE: RecipeId = RecipeId::new(3);
pub const STONE_PICKAXE_RECIPE: RecipeId = RecipeId::new(4);
pub const IRON_SWORD_RECIPE: RecipeId = RecipeId::new(5);

fn item(id: ItemId, name: &str, description: &str, max_stack_size: u32, image: &str) -> ItemDef {
    ItemDef::new(id, name, max_stack_size)
        .with_description(description)
        .with_image_url(image)
}

pub fn starter_items() -> Vec<ItemDef> {
    vec![
        item(WOOD, "Wood", "Basic building material from trees", 64, "wood.png"),
        item(STONE, "Stone", "Solid rock mined from the earth", 64, "stone.png"),
        item(IRON_ORE, "Iron Ore", "Unrefined iron, needs smelting", 64, "iron_ore.png"),
        item(WOODEN_PLANKS, "Wooden Planks", "Processed wood for crafting", 64, "wooden_planks.png"),
        item(IRON_INGOT, "Iron Ingot", "Refined iron used for tools", 64, "iron_ingot.png"),
        item(STICK, "Stick", "A simple wooden stick", 64, "stick.png"),
        item(STONE_PICKAXE, "Stone Pickaxe", "A basic tool for mining", 1, "stone_pickaxe.png"),
        item(IRON_SWORD, "Iron Sword", "A strong weapon for combat", 1, "iron_sword.png"),
    ]
}

pub fn starter_recipes() -> Vec<RecipeDef> {
    vec![
        RecipeDef::new(PLANKS_RECIPE, WOODEN_PLANKS, 4)
            .with_duration_ms(1000)
            .with_ingredient(Ingredient::new(WOOD, 1).at(0)),
        RecipeDef::new(STICK_RECIPE, STICK, 4)
            .with_duration_ms(1000)
            .with_ingredient(Ingredient::new(WOODEN_PLANKS, 2).at(0)),
        RecipeDef::new(IRON_INGOT_RECIPE, IRON_INGOT, 1)
            .with_kind("smelting")
            .with_duration_ms(5000)
            .with_ingredient(Ingredient::new(IRON_ORE, 1).at(0)),
        RecipeDef::new(STONE_PICKAXE_RECIPE, STONE_PICKAXE, 1)
            .with_duration_ms(3000)
            .with_ingredient(Ingredient::new(STONE, 3).at(0))
            .with_ingredient(Ingredient::new(STICK, 2).at(1)),
        RecipeDef::new(IRON_SWORD_RECIPE, IRON_SWORD, 1)
            .with_duration_ms(4000)
            .with_ingredient(Ingredient::new(IRON_INGOT, 2).at(0))
            .with_ingredient(Ingredient::new(STICK, 1).at(1)),
    ]
}

pub fn starter_catalog() -> InventoryResult<InMemoryCatalog> {
    let mut catalog = InMemoryCatalog::new();
    for item in starter_items() {
        catalog.insert_item(item)?;
    }
    for recipe in starter_recipes() {
        catalog.insert_recipe(recipe)?;
    }
    Ok(catalog)
}

pub fn starter_slots() -> Vec<InventorySlot> {
    vec![
        InventorySlot::new(0, WOOD, 15),
        InventorySlot::new(1, STONE, 8),
        InventorySlot::new(2, IRON_ORE, 3),
    ]
}

/// Write the starter data into an empty database.
///
/// Does nothing (and returns `false`) when the `items` table already has rows.
pub async fn seed_database(pool: &PgPool) -> InventoryResult<bool> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| map_sqlx_error("seed_begin", e))?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("seed_count_items", e))?;
    if existing > 0 {
        return Ok(false);
    }

    let catalog = starter_catalog()?;
    for item in catalog.items() {
        sqlx::query(
            "INSERT INTO items (id, name, description, max_stack_size, image_url) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(item.id.get())
        .bind(&item.name)
        .bind(&item.description)
        .bind(to_db_int(item.max_stack_size, "max_stack_size")?)
        .bind(&item.image_url)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("seed_items", e))?;
    }

    for recipe in catalog.recipes() {
        let duration_ms = recipe
            .duration_ms
            .map(|d| to_db_int(d, "duration_ms"))
            .transpose()?;
        sqlx::query(
            "INSERT INTO recipes (id, result_item_id, result_quantity, kind, duration_ms) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(recipe.id.get())
        .bind(recipe.result_item_id.get())
        .bind(to_db_int(recipe.result_quantity, "result_quantity")?)
        .bind(&recipe.kind)
        .bind(duration_ms)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("seed_recipes", e))?;

        for ingredient in &recipe.ingredients {
            sqlx::query(
                "INSERT INTO ingredients (recipe_id, item_id, quantity, grid_position) VALUES ($1, $2, $3, $4)",
            )
            .bind(recipe.id.get())
            .bind(ingredient.item_id.get())
            .bind(to_db_int(ingredient.quantity, "quantity")?)
            .bind(ingredient.grid_position.map(i16::from))
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("seed_ingredients", e))?;
        }
    }

    for slot in starter_slots() {
        sqlx::query("INSERT INTO inventory (id, slot_index, item_id, quantity) VALUES ($1, $2, $3, $4)")
            .bind(slot.id.as_uuid())
            .bind(slot.slot_index)
            .bind(slot.item_id.get())
            .bind(to_db_int(slot.quantity, "quantity")?)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("seed_inventory", e))?;
    }

    // Explicit ids bypass the sequences; move them past the seeded rows.
    sqlx::raw_sql(
        "SELECT setval(pg_get_serial_sequence('items', 'id'), (SELECT MAX(id) FROM items));
         SELECT setval(pg_get_serial_sequence('recipes', 'id'), (SELECT MAX(id) FROM recipes));",
    )
    .execute(&mut *tx)
    .await
    .map_err(|e| map_sqlx_error("seed_sequences", e))?;

    tx.commit()
        .await
        .map_err(|e| map_sqlx_error("seed_commit", e))?;

    info!(
        items = catalog.item_count(),
        recipes = catalog.recipe_count(),
        "seeded starter data"
    );
    Ok(true)
}
