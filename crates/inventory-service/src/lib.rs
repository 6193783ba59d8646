//! Inventory service contract for the bookstore load testing harness.
//!
//! The workload harness only ever talks to the service through the
//! [`InventoryService`] trait. Two implementations exist:
//!
//! - [`InMemoryInventory`] - an in-process store shared by all tasks
//! - `inventory_http::HttpInventoryClient` - a client for a remote instance
//!
//! Every operation either succeeds or fails with a [`ServiceError`]. Only
//! [`ServiceError::Domain`] is a business-rule rejection; everything else is
//! a fault.

pub mod error;
pub mod memory;
pub mod service;

pub use error::{DomainError, ServiceError, ServiceResult};
pub use memory::InMemoryInventory;
pub use service::InventoryService;
