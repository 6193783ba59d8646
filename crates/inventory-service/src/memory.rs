//! In-process inventory service.
//!
//! A single `RwLock` guards the catalog. Every mutating operation validates
//! its whole input before touching the catalog, so a rejected request leaves
//! stock unchanged.

use crate::error::{DomainError, ServiceError, ServiceResult};
use crate::service::InventoryService;
use async_trait::async_trait;
use catalog_core::{CatalogEntry, EntryId, PurchaseRequest, ReplenishRequest};
use rand::seq::SliceRandom;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Inventory service backed by an in-memory catalog.
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    catalog: RwLock<BTreeMap<EntryId, CatalogEntry>>,
}

impl InMemoryInventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in the catalog.
    pub fn len(&self) -> ServiceResult<usize> {
        Ok(self.read()?.len())
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> ServiceResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> ServiceResult<RwLockReadGuard<'_, BTreeMap<EntryId, CatalogEntry>>> {
        self.catalog
            .read()
            .map_err(|e| ServiceError::Fault(format!("catalog lock poisoned: {e}")))
    }

    fn write(&self) -> ServiceResult<RwLockWriteGuard<'_, BTreeMap<EntryId, CatalogEntry>>> {
        self.catalog
            .write()
            .map_err(|e| ServiceError::Fault(format!("catalog lock poisoned: {e}")))
    }

    fn pick_editor_picks(&self, count: usize) -> ServiceResult<Vec<CatalogEntry>> {
        let catalog = self.read()?;
        let picks: Vec<&CatalogEntry> = catalog.values().filter(|e| e.editor_pick).collect();

        let amount = count.min(picks.len());
        let mut chosen: Vec<CatalogEntry> = picks
            .choose_multiple(&mut rand::thread_rng(), amount)
            .map(|e| (*e).clone())
            .collect();
        chosen.sort_by_key(|e| e.id);
        Ok(chosen)
    }
}

fn validate_id(id: EntryId) -> Result<(), DomainError> {
    if id == 0 {
        return Err(DomainError::InvalidId { id });
    }
    Ok(())
}

fn validate_new_entry(entry: &CatalogEntry) -> Result<(), DomainError> {
    validate_id(entry.id)?;

    let reason = if entry.title.is_empty() {
        Some("title is empty")
    } else if entry.author.is_empty() {
        Some("author is empty")
    } else if !entry.price.is_finite() || entry.price < 0.0 {
        Some("price must be a non-negative number")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(DomainError::InvalidEntry {
            id: entry.id,
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// Validate copy requests against the catalog and merge repeated identifiers.
fn validate_copy_requests(
    catalog: &BTreeMap<EntryId, CatalogEntry>,
    requests: &[ReplenishRequest],
) -> Result<BTreeMap<EntryId, u32>, DomainError> {
    let mut merged = BTreeMap::new();

    for request in requests {
        validate_id(request.id)?;
        if request.quantity == 0 {
            return Err(DomainError::InvalidQuantity {
                id: request.id,
                quantity: request.quantity,
            });
        }
        if !catalog.contains_key(&request.id) {
            return Err(DomainError::NotInCatalog { id: request.id });
        }

        let quantity: &mut u32 = merged.entry(request.id).or_default();
        *quantity = quantity.saturating_add(request.quantity);
    }

    Ok(merged)
}

#[async_trait]
impl InventoryService for InMemoryInventory {
    async fn reset_catalog(&self) -> ServiceResult<()> {
        self.write()?.clear();
        Ok(())
    }

    async fn add_entries(&self, entries: Vec<CatalogEntry>) -> ServiceResult<()> {
        let mut catalog = self.write()?;

        let mut incoming = BTreeSet::new();
        for entry in &entries {
            validate_new_entry(entry)?;
            if catalog.contains_key(&entry.id) || !incoming.insert(entry.id) {
                return Err(DomainError::DuplicateEntry { id: entry.id }.into());
            }
        }

        for entry in entries {
            catalog.insert(entry.id, entry);
        }
        Ok(())
    }

    async fn add_copies(&self, requests: Vec<ReplenishRequest>) -> ServiceResult<()> {
        let mut catalog = self.write()?;
        let merged = validate_copy_requests(&catalog, &requests)?;

        for (id, quantity) in merged {
            if let Some(entry) = catalog.get_mut(&id) {
                entry.copies = entry.copies.saturating_add(quantity);
            }
        }
        Ok(())
    }

    async fn purchase(&self, requests: Vec<PurchaseRequest>) -> ServiceResult<()> {
        let mut catalog = self.write()?;
        let merged = validate_copy_requests(&catalog, &requests)?;

        let mut first_shortfall = None;
        for (id, requested) in &merged {
            if let Some(entry) = catalog.get_mut(id) {
                if entry.copies < *requested {
                    entry.sale_misses += 1;
                    first_shortfall.get_or_insert(DomainError::InsufficientStock {
                        id: *id,
                        requested: *requested,
                        available: entry.copies,
                    });
                }
            }
        }

        if let Some(err) = first_shortfall {
            debug!("Purchase rejected: {}", err);
            return Err(err.into());
        }

        for (id, requested) in merged {
            if let Some(entry) = catalog.get_mut(&id) {
                entry.copies -= requested;
            }
        }
        Ok(())
    }

    async fn fetch_all(&self) -> ServiceResult<Vec<CatalogEntry>> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn fetch_by_ids(&self, ids: &BTreeSet<EntryId>) -> ServiceResult<Vec<CatalogEntry>> {
        let catalog = self.read()?;

        ids.iter()
            .map(|id| {
                validate_id(*id)?;
                catalog
                    .get(id)
                    .cloned()
                    .ok_or(DomainError::NotInCatalog { id: *id })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(ServiceError::from)
    }

    async fn fetch_editor_picks(&self, count: usize) -> ServiceResult<Vec<CatalogEntry>> {
        self.pick_editor_picks(count)
    }
}
