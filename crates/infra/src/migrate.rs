//! Bundled schema.

use sqlx::PgPool;
use tracing::info;

use slotcraft_core::InventoryResult;

use crate::postgres_util::map_sqlx_error;

const INIT: &str = include_str!("../migrations/0001_init.sql");

/// Apply the bundled schema. Every statement is `IF NOT EXISTS`, so running it
/// against an initialized database is a no-op.
pub async fn migrate(pool: &PgPool) -> InventoryResult<()> {
    sqlx::raw_sql(INIT)
        .execute(pool)
        .await
        .map_err(|e| map_sqlx_error("migrate", e))?;
    info!("schema up to date");
    Ok(())
}
