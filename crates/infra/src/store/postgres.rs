//! Postgres-backed inventory store.
//!
//! Each command runs in one SQL transaction:
//! 1. `LOCK TABLE inventory IN EXCLUSIVE MODE` (readers proceed, writers queue)
//! 2. load all slots into a working set
//! 3. run the command against the working set
//! 4. replay the mutation journal statement by statement
//! 5. commit
//!
//! Any error before commit drops the transaction, which rolls it back.

use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Postgres, Row, Transaction};
use tracing::{Span, instrument};

use slotcraft_core::{InventoryError, InventoryResult, ItemId, SlotId};
use slotcraft_inventory::{Catalog, InventoryCommand, InventorySlot, SlotMutation};

use super::run_unit_of_work;
use super::r#trait::{Committed, InventoryStore};
use crate::postgres_util::{from_db_int, map_sqlx_error, to_db_int};

const SELECT_SLOTS: &str = r#"
    SELECT id, slot_index, item_id, quantity
    FROM inventory
    ORDER BY slot_index ASC
"#;

#[derive(Debug, Clone)]
pub struct PostgresInventoryStore {
    pool: PgPool,
}

impl PostgresInventoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> InventoryResult<Transaction<'static, Postgres>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin", e))?;
        sqlx::query("LOCK TABLE inventory IN EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("lock_inventory", e))?;
        Ok(tx)
    }
}

fn slot_from_row(row: &PgRow) -> InventoryResult<InventorySlot> {
    let get = |e: sqlx::Error| map_sqlx_error("decode_slot", e);
    Ok(InventorySlot {
        id: SlotId::from_uuid(row.try_get("id").map_err(get)?),
        slot_index: row.try_get("slot_index").map_err(get)?,
        item_id: ItemId::new(row.try_get("item_id").map_err(get)?),
        quantity: from_db_int(row.try_get("quantity").map_err(get)?, "quantity")?,
    })
}

async fn apply_mutation(conn: &mut PgConnection, mutation: &SlotMutation) -> InventoryResult<()> {
    let result = match mutation {
        SlotMutation::Insert { slot } => {
            sqlx::query(
                "INSERT INTO inventory (id, slot_index, item_id, quantity) VALUES ($1, $2, $3, $4)",
            )
            .bind(slot.id.as_uuid())
            .bind(slot.slot_index)
            .bind(slot.item_id.get())
            .bind(to_db_int(slot.quantity, "quantity")?)
            .execute(&mut *conn)
            .await
        }
        SlotMutation::UpdateQuantity { id, quantity } => {
            sqlx::query("UPDATE inventory SET quantity = $2 WHERE id = $1")
                .bind(id.as_uuid())
                .bind(to_db_int(*quantity, "quantity")?)
                .execute(&mut *conn)
                .await
        }
        SlotMutation::UpdateSlotIndex { id, slot_index } => {
            sqlx::query("UPDATE inventory SET slot_index = $2 WHERE id = $1")
                .bind(id.as_uuid())
                .bind(*slot_index)
                .execute(&mut *conn)
                .await
        }
        SlotMutation::Delete { id } => {
            sqlx::query("DELETE FROM inventory WHERE id = $1")
                .bind(id.as_uuid())
                .execute(&mut *conn)
                .await
        }
    }
    .map_err(|e| map_sqlx_error("apply_mutation", e))?;

    if result.rows_affected() != 1 {
        return Err(InventoryError::storage(format!(
            "mutation on slot record {} affected {} rows",
            mutation.slot_id(),
            result.rows_affected()
        )));
    }
    Ok(())
}

#[async_trait::async_trait]
impl InventoryStore for PostgresInventoryStore {
    #[instrument(skip(self), err)]
    async fn list_slots(&self) -> InventoryResult<Vec<InventorySlot>> {
        let rows = sqlx::query(SELECT_SLOTS)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_slots", e))?;
        rows.iter().map(slot_from_row).collect()
    }

    #[instrument(
        skip(self, catalog, command),
        fields(command = command.name(), slot_count, mutation_count),
        err
    )]
    async fn execute(
        &self,
        catalog: &(dyn Catalog + 'static),
        command: &InventoryCommand,
    ) -> InventoryResult<Committed> {
        let mut tx = self.begin().await?;

        let rows = sqlx::query(SELECT_SLOTS)
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("load_slots", e))?;
        let current = rows
            .iter()
            .map(slot_from_row)
            .collect::<InventoryResult<Vec<_>>>()?;

        let span = Span::current();
        span.record("slot_count", current.len());

        let (_, committed) = run_unit_of_work(catalog, current, command)?;
        span.record("mutation_count", committed.mutations.len());

        for mutation in &committed.mutations {
            apply_mutation(&mut *tx, mutation).await?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit", e))?;
        Ok(committed)
    }
}
