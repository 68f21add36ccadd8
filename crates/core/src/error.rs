//! Inventory error model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::ItemId;

/// Result type used across the inventory layers.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Coarse failure category, stable across transports.
///
/// The transport layer maps these to caller-visible status codes; the core never
/// looks at anything but the kind when deciding how to react to a failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InvalidRequest,
    NotFound,
    InsufficientQuantity,
    InsufficientIngredients,
    ItemMismatch,
    StackOverflow,
    InventoryFull,
    StorageFault,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::InvalidRequest => "invalid_request",
            FailureKind::NotFound => "not_found",
            FailureKind::InsufficientQuantity => "insufficient_quantity",
            FailureKind::InsufficientIngredients => "insufficient_ingredients",
            FailureKind::ItemMismatch => "item_mismatch",
            FailureKind::StackOverflow => "stack_overflow",
            FailureKind::InventoryFull => "inventory_full",
            FailureKind::StorageFault => "storage_fault",
        }
    }
}

impl core::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One missing ingredient reported by a failed craft.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub item_id: ItemId,
    pub required: u64,
    pub available: u64,
}

impl Shortfall {
    pub fn missing(&self) -> u64 {
        self.required.saturating_sub(self.available)
    }
}

/// Inventory operation error.
///
/// Business failures (validation, shortfalls, capacity) are deterministic and safe to
/// surface to callers verbatim. `StorageFault` covers everything the persistence layer
/// can throw at us (connectivity, constraint violations, poisoned locks).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// Malformed or out-of-range input.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A referenced slot, item or recipe does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The source stack holds fewer units than requested.
    #[error("insufficient quantity: {0}")]
    InsufficientQuantity(String),

    /// At least one recipe ingredient is short; every shortfall is listed.
    #[error("insufficient ingredients: {}", describe_shortfalls(.0))]
    InsufficientIngredients(Vec<Shortfall>),

    /// Split target holds a different item.
    #[error("item mismatch: {0}")]
    ItemMismatch(String),

    /// Split target would exceed its max stack size.
    #[error("stack overflow: {0}")]
    StackOverflow(String),

    /// No free slot is left for allocation.
    #[error("inventory full: {0}")]
    InventoryFull(String),

    /// Unexpected persistence-layer failure.
    #[error("storage fault: {0}")]
    StorageFault(String),
}

impl InventoryError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn insufficient_quantity(msg: impl Into<String>) -> Self {
        Self::InsufficientQuantity(msg.into())
    }

    pub fn item_mismatch(msg: impl Into<String>) -> Self {
        Self::ItemMismatch(msg.into())
    }

    pub fn stack_overflow(msg: impl Into<String>) -> Self {
        Self::StackOverflow(msg.into())
    }

    pub fn inventory_full(msg: impl Into<String>) -> Self {
        Self::InventoryFull(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageFault(msg.into())
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            InventoryError::InvalidRequest(_) => FailureKind::InvalidRequest,
            InventoryError::NotFound(_) => FailureKind::NotFound,
            InventoryError::InsufficientQuantity(_) => FailureKind::InsufficientQuantity,
            InventoryError::InsufficientIngredients(_) => FailureKind::InsufficientIngredients,
            InventoryError::ItemMismatch(_) => FailureKind::ItemMismatch,
            InventoryError::StackOverflow(_) => FailureKind::StackOverflow,
            InventoryError::InventoryFull(_) => FailureKind::InventoryFull,
            InventoryError::StorageFault(_) => FailureKind::StorageFault,
        }
    }

    /// Human-readable detail without the kind prefix.
    pub fn detail(&self) -> String {
        match self {
            InventoryError::InsufficientIngredients(shortfalls) => describe_shortfalls(shortfalls),
            InventoryError::InvalidRequest(msg)
            | InventoryError::NotFound(msg)
            | InventoryError::InsufficientQuantity(msg)
            | InventoryError::ItemMismatch(msg)
            | InventoryError::StackOverflow(msg)
            | InventoryError::InventoryFull(msg)
            | InventoryError::StorageFault(msg) => msg.clone(),
        }
    }
}

fn describe_shortfalls(shortfalls: &[Shortfall]) -> String {
    shortfalls
        .iter()
        .map(|s| {
            format!(
                "item {} needs {}, have {}",
                s.item_id, s.required, s.available
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}
