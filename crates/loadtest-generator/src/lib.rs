//! Synthetic catalog generator for the bookstore load testing harness.
//!
//! This crate provides the [`CatalogGenerator`] which produces batches of
//! [`CatalogEntry`](catalog_core::CatalogEntry) values with fresh, ascending
//! identifiers, and samples subsets of identifiers for customer interactions.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │   CatalogGenerator   │   shared by all workload tasks (Arc)
//! │                      │
//! │  - last_issued (u64, │
//! │    atomic counter)   │
//! └──────────┬───────────┘
//!            │  rng: &mut R  (owned by each task)
//!            ▼
//!   Vec<CatalogEntry> { id, title, author, price, copies, ... }
//! ```
//!
//! Randomness always comes from the caller so that each task can own an
//! independently seeded RNG; only the identifier counter is shared.
//!
//! # Example
//!
//! ```rust
//! use loadtest_generator::CatalogGenerator;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let generator = CatalogGenerator::new(&mut rng);
//! let batch = generator.next_batch(&mut rng, 10);
//! assert_eq!(batch.len(), 10);
//! ```

pub mod generator;
pub mod generators;

// Re-exports for convenience
pub use generator::{CatalogGenerator, MAX_INITIAL_OFFSET};
