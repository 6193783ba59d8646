//! Catalog entry and copy request types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifier of a catalog entry. Valid identifiers are strictly positive.
pub type EntryId = u64;

/// A catalog entry as stored by the inventory service.
///
/// Values produced by the generator are never mutated by the harness;
/// only the service changes stock and counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique positive identifier
    pub id: EntryId,
    /// Title
    pub title: String,
    /// Author
    pub author: String,
    /// Unit price, non-negative
    pub price: f32,
    /// Copies currently in stock
    pub copies: u32,
    /// Number of purchase attempts that found no stock
    pub sale_misses: u64,
    /// Number of ratings received
    pub times_rated: u64,
    /// Sum of all ratings received
    pub total_rating: u64,
    /// Whether the entry is an editor pick
    pub editor_pick: bool,
}

/// A request to move `quantity` copies of entry `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CopyRequest {
    pub id: EntryId,
    pub quantity: u32,
}

impl CopyRequest {
    pub fn new(id: EntryId, quantity: u32) -> Self {
        Self { id, quantity }
    }
}

/// Copies bought by a customer.
pub type PurchaseRequest = CopyRequest;

/// Copies added to stock by the inventory manager.
pub type ReplenishRequest = CopyRequest;

/// Collect the identifiers of a slice of entries.
pub fn ids_of(entries: &[CatalogEntry]) -> BTreeSet<EntryId> {
    entries.iter().map(|e| e.id).collect()
}
