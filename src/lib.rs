//! Bookstore load testing harness
//!
//! Drives an inventory service with a probabilistic mix of stock
//! acquisition, replenishment and customer purchase interactions, then
//! reports latency, throughput and success rate.
//!
//! # Crates
//!
//! - `catalog_core` - Catalog entry and copy request types
//! - `loadtest_generator` - Random catalog entries with unique identifiers
//! - `inventory_service` - Service contract, domain errors and the in-memory store
//! - `inventory_http` - HTTP server and client for the service contract
//! - `loadtest_workload` - Interaction runners, coordinator and report
//!
//! # CLI Usage
//!
//! ```bash
//! # Run against an in-process inventory
//! bookstore-loadtest run --concurrency 8 --measured-iterations 1000
//!
//! # Serve an inventory, then load it from another machine
//! bookstore-loadtest serve --port 8081
//! bookstore-loadtest run --target remote --server-address http://host:8081 --format table
//!
//! # Start from a YAML file and override a single value
//! bookstore-loadtest run --config workload.yaml --seed 42
//! ```

pub mod cli;
pub mod config;

pub use config::{HarnessConfig, ServiceTarget, DEFAULT_SERVER_ADDRESS};
