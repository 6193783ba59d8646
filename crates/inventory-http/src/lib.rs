//! HTTP/JSON transport for the bookstore inventory service.
//!
//! [`router`] exposes any [`InventoryService`](inventory_service::InventoryService)
//! over HTTP and [`HttpInventoryClient`] implements the same trait against a
//! remote instance, so the workload harness cannot tell a local service from
//! a remote one.
//!
//! ## Routes
//!
//! | Method | Path                   | Body / query            | Response            |
//! |--------|------------------------|-------------------------|---------------------|
//! | GET    | `/health`              |                         | `{"status":...}`    |
//! | POST   | `/stock/reset`         |                         | 204                 |
//! | POST   | `/stock/entries`       | `[CatalogEntry]`        | 204                 |
//! | GET    | `/stock/entries`       |                         | `[CatalogEntry]`    |
//! | POST   | `/stock/copies`        | `[CopyRequest]`         | 204                 |
//! | POST   | `/store/purchase`      | `[CopyRequest]`         | 204                 |
//! | POST   | `/store/entries`       | `[EntryId]`             | `[CatalogEntry]`    |
//! | GET    | `/store/editor-picks`  | `?count=N`              | `[CatalogEntry]`    |
//!
//! Domain errors are answered with `422 Unprocessable Entity` and the
//! serialized [`DomainError`](inventory_service::DomainError); any other
//! failure with `500` and `{"error": "..."}`.

pub mod client;
pub mod server;

pub use client::HttpInventoryClient;
pub use server::{router, serve, DEFAULT_PORT};

/// Path of the health check route.
pub const HEALTH_PATH: &str = "/health";
/// Path of the catalog reset route.
pub const RESET_PATH: &str = "/stock/reset";
/// Path of the stock entries route (add and list).
pub const STOCK_ENTRIES_PATH: &str = "/stock/entries";
/// Path of the replenishment route.
pub const COPIES_PATH: &str = "/stock/copies";
/// Path of the purchase route.
pub const PURCHASE_PATH: &str = "/store/purchase";
/// Path of the lookup-by-identifier route.
pub const STORE_ENTRIES_PATH: &str = "/store/entries";
/// Path of the editor picks route.
pub const EDITOR_PICKS_PATH: &str = "/store/editor-picks";
