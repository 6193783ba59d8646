//! Error types for inventory service operations.

use catalog_core::EntryId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Business-rule rejection raised by the inventory service.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DomainError {
    /// Identifier is not a valid (positive) identifier.
    #[error("Invalid entry id: {id}")]
    InvalidId { id: EntryId },

    /// Identifier is not present in the catalog.
    #[error("Entry {id} is not in the catalog")]
    NotInCatalog { id: EntryId },

    /// Entry with this identifier already exists.
    #[error("Entry {id} already exists in the catalog")]
    DuplicateEntry { id: EntryId },

    /// Quantity must be strictly positive.
    #[error("Invalid quantity {quantity} for entry {id}")]
    InvalidQuantity { id: EntryId, quantity: u32 },

    /// Entry fields violate catalog rules.
    #[error("Invalid entry {id}: {reason}")]
    InvalidEntry { id: EntryId, reason: String },

    /// Not enough copies in stock to satisfy a purchase.
    #[error("Insufficient stock for entry {id}: requested {requested}, available {available}")]
    InsufficientStock {
        id: EntryId,
        requested: u32,
        available: u32,
    },
}

/// Errors returned by [`InventoryService`](crate::InventoryService) operations.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Business-rule rejection.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Failure to reach or talk to a remote service.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Unexpected failure inside the service.
    #[error("Service fault: {0}")]
    Fault(String),
}

impl ServiceError {
    /// Whether this error is a business-rule rejection rather than a fault.
    pub fn is_domain(&self) -> bool {
        matches!(self, ServiceError::Domain(_))
    }
}

/// Result alias for inventory service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
