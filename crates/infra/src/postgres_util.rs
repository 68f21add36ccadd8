//! Shared Postgres helpers: error mapping and integer width conversion.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | Detail prefix |
//! |------------|----------------------|---------------|
//! | Database (unique violation) | `23505` | `unique constraint violated` |
//! | Database (foreign key violation) | `23503` | `foreign key violated` |
//! | Database (check constraint violation) | `23514` | `check constraint violated` |
//! | Database (other) | Any other | `database error` |
//! | PoolClosed / PoolTimedOut | N/A | `connection pool ...` |
//! | Other | N/A | `sqlx error` |
//!
//! Every case becomes `InventoryError::StorageFault`: the engine validates its writes
//! before they reach the database, so a constraint violation here is a fault, not a
//! user error.

use slotcraft_core::{InventoryError, InventoryResult};

pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> InventoryError {
    let detail = match err {
        sqlx::Error::Database(db_err) => {
            let kind = match db_err.code().as_deref() {
                Some("23505") => "unique constraint violated",
                Some("23503") => "foreign key violated",
                Some("23514") => "check constraint violated",
                _ => "database error",
            };
            format!("{kind} in {operation}: {}", db_err.message())
        }
        sqlx::Error::PoolClosed => format!("connection pool closed in {operation}"),
        sqlx::Error::PoolTimedOut => format!("connection pool timed out in {operation}"),
        other => format!("sqlx error in {operation}: {other}"),
    };
    tracing::error!(operation, %detail, "storage fault");
    InventoryError::storage(detail)
}

/// Narrow a domain quantity to the `INTEGER` column width.
pub(crate) fn to_db_int(value: u32, column: &str) -> InventoryResult<i32> {
    i32::try_from(value)
        .map_err(|_| InventoryError::storage(format!("{column} {value} exceeds INTEGER range")))
}

/// Widen an `INTEGER` column back to a domain quantity; negatives are data faults.
pub(crate) fn from_db_int(value: i32, column: &str) -> InventoryResult<u32> {
    u32::try_from(value)
        .map_err(|_| InventoryError::storage(format!("{column} holds negative value {value}")))
}
