//! Core types for the bookstore load testing harness.
//!
//! This crate provides the data model shared by the generator, the
//! inventory service contract and the workload runner:
//!
//! - [`CatalogEntry`] - A stocked catalog entry with sales and rating counters
//! - [`CopyRequest`] - An `(id, quantity)` pair used for purchases and replenishment
//! - [`EntryId`] - Catalog entry identifier
//!
//! # Architecture
//!
//! ```text
//! catalog-core (this crate)
//!    │
//!    ├─── loadtest-generator  (produces CatalogEntry batches)
//!    ├─── inventory-service   (InventoryService contract over these types)
//!    ├─── inventory-http      (JSON transport of the same types)
//!    └─── loadtest-workload   (drives the interaction mix)
//! ```

pub mod entry;

pub use entry::{
    ids_of, CatalogEntry, CopyRequest, EntryId, PurchaseRequest, ReplenishRequest,
};
