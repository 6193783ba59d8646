//! Concurrent workload runner for the bookstore load testing harness.
//!
//! This crate drives a shared [`InventoryService`](inventory_service::InventoryService)
//! with a probabilistic mix of interactions and reports throughput, latency
//! and success rate:
//! 1. Reset the catalog, seed it and read the seeded entries back
//! 2. Run one [`InteractionRunner`] per concurrency slot, each doing a
//!    warm-up phase followed by a measured phase
//! 3. Join every runner and aggregate their [`RunResult`]s into an
//!    [`AggregateReport`]
//!
//! # Example
//!
//! ```ignore
//! use inventory_service::InMemoryInventory;
//! use loadtest_workload::{WorkloadConfig, WorkloadCoordinator};
//! use std::sync::Arc;
//!
//! let config = WorkloadConfig::default()
//!     .with_concurrency(8)
//!     .with_measured_iterations(1_000);
//!
//! let mut coordinator = WorkloadCoordinator::new(config, Arc::new(InMemoryInventory::new()))?;
//! let report = coordinator.run().await?;
//! println!("{}", report.summary());
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod metrics;
pub mod mix;
pub mod report;
pub mod runner;

pub use config::WorkloadConfig;
pub use coordinator::WorkloadCoordinator;
pub use error::WorkloadError;
pub use metrics::RunResult;
pub use mix::{Interaction, InteractionMix};
pub use report::AggregateReport;
pub use runner::{InteractionRunner, Phase};
