//! Infrastructure layer: inventory stores, Postgres wiring and starter data.

pub mod catalog;
pub mod command_dispatcher;
pub mod migrate;
pub mod seed;
pub mod store;

mod postgres_util;

pub use catalog::load_catalog;
pub use command_dispatcher::CommandDispatcher;
pub use migrate::migrate;
pub use store::{Committed, InMemoryInventoryStore, InventoryStore, PostgresInventoryStore};
