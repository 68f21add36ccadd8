//! Catalog loading from Postgres.
//!
//! The catalog is read once at startup and shared immutably afterwards.

use std::collections::BTreeMap;

use sqlx::{PgPool, Row};
use tracing::{info, instrument};

use slotcraft_core::{InventoryError, InventoryResult, ItemId, RecipeId};
use slotcraft_inventory::{InMemoryCatalog, Ingredient, ItemDef, RecipeDef};

use crate::postgres_util::{from_db_int, map_sqlx_error};

/// Load items, recipes and their ingredients into an [`InMemoryCatalog`].
///
/// A row the domain rejects (zero max stack, zero quantity) is a data fault and
/// fails the whole load.
#[instrument(skip(pool), err)]
pub async fn load_catalog(pool: &PgPool) -> InventoryResult<InMemoryCatalog> {
    let decode = |e: sqlx::Error| map_sqlx_error("decode_catalog", e);
    let reject = |e: InventoryError| InventoryError::storage(format!("invalid catalog row: {}", e.detail()));

    let item_rows = sqlx::query(
        "SELECT id, name, description, max_stack_size, image_url FROM items ORDER BY id",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| map_sqlx_error("load_items", e))?;

    let mut catalog = InMemoryCatalog::new();
    for row in &item_rows {
        let item = ItemDef {
            id: ItemId::new(row.try_get("id").map_err(decode)?),
            name: row.try_get("name").map_err(decode)?,
            description: row.try_get("description").map_err(decode)?,
            max_stack_size: from_db_int(row.try_get("max_stack_size").map_err(decode)?, "max_stack_size")?,
            image_url: row.try_get("image_url").map_err(decode)?,
        };
        catalog.insert_item(item).map_err(reject)?;
    }

    let ingredient_rows = sqlx::query(
        r#"
        SELECT recipe_id, item_id, quantity, grid_position
        FROM ingredients
        ORDER BY recipe_id, grid_position NULLS LAST, item_id
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|e| map_sqlx_error("load_ingredients", e))?;

    let mut ingredients: BTreeMap<i64, Vec<Ingredient>> = BTreeMap::new();
    for row in &ingredient_rows {
        let grid_position: Option<i16> = row.try_get("grid_position").map_err(decode)?;
        let ingredient = Ingredient {
            item_id: ItemId::new(row.try_get("item_id").map_err(decode)?),
            quantity: from_db_int(row.try_get("quantity").map_err(decode)?, "quantity")?,
            grid_position: grid_position.and_then(|p| u8::try_from(p).ok()),
        };
        ingredients
            .entry(row.try_get("recipe_id").map_err(decode)?)
            .or_default()
            .push(ingredient);
    }

    let recipe_rows = sqlx::query(
        "SELECT id, result_item_id, result_quantity, kind, duration_ms FROM recipes ORDER BY id",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| map_sqlx_error("load_recipes", e))?;

    for row in &recipe_rows {
        let id: i64 = row.try_get("id").map_err(decode)?;
        let duration_ms: Option<i32> = row.try_get("duration_ms").map_err(decode)?;
        let recipe = RecipeDef {
            id: RecipeId::new(id),
            result_item_id: ItemId::new(row.try_get("result_item_id").map_err(decode)?),
            result_quantity: from_db_int(row.try_get("result_quantity").map_err(decode)?, "result_quantity")?,
            kind: row.try_get("kind").map_err(decode)?,
            duration_ms: duration_ms.map(|d| from_db_int(d, "duration_ms")).transpose()?,
            ingredients: ingredients.remove(&id).unwrap_or_default(),
        };
        catalog.insert_recipe(recipe).map_err(reject)?;
    }

    info!(
        items = catalog.item_count(),
        recipes = catalog.recipe_count(),
        "catalog loaded"
    );
    Ok(catalog)
}
