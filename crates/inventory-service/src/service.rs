//! The inventory service contract consumed by the workload harness.

use crate::error::ServiceResult;
use async_trait::async_trait;
use catalog_core::{CatalogEntry, EntryId, PurchaseRequest, ReplenishRequest};
use std::collections::BTreeSet;

/// Inventory-management and customer operations of a bookstore service.
///
/// Implementations are shared by every workload task for the whole run, so
/// they must serialize conflicting operations themselves. The harness never
/// retries a failed call.
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Remove every entry from the catalog.
    async fn reset_catalog(&self) -> ServiceResult<()>;

    /// Add new entries to the catalog.
    async fn add_entries(&self, entries: Vec<CatalogEntry>) -> ServiceResult<()>;

    /// Add copies to existing entries.
    async fn add_copies(&self, requests: Vec<ReplenishRequest>) -> ServiceResult<()>;

    /// Buy copies. Either every request is applied or none is.
    async fn purchase(&self, requests: Vec<PurchaseRequest>) -> ServiceResult<()>;

    /// Fetch every entry in the catalog.
    async fn fetch_all(&self) -> ServiceResult<Vec<CatalogEntry>>;

    /// Fetch the entries with the given identifiers.
    async fn fetch_by_ids(&self, ids: &BTreeSet<EntryId>) -> ServiceResult<Vec<CatalogEntry>>;

    /// Fetch up to `count` editor-pick entries.
    async fn fetch_editor_picks(&self, count: usize) -> ServiceResult<Vec<CatalogEntry>>;
}
