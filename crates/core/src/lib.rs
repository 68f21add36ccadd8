//! `slotcraft-core` — shared building blocks for the inventory workspace.
//!
//! This crate contains **pure** primitives (identifiers and the error model) and no
//! infrastructure concerns.

pub mod error;
pub mod id;

pub use error::{FailureKind, InventoryError, InventoryResult, Shortfall};
pub use id::{ItemId, RecipeId, SlotId};
