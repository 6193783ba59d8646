//! Configuration types for workload runs.

use crate::error::WorkloadError;
use crate::mix::InteractionMix;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Golden-ratio increment used to derive independent per-stream seeds.
const SEED_STREAM_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

/// Configuration for a workload run.
///
/// Read once before the run and shared immutably by every task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Number of concurrent tasks.
    pub concurrency: usize,
    /// Iterations each task runs before measurement starts.
    pub warmup_iterations: usize,
    /// Iterations each task runs while measuring.
    pub measured_iterations: usize,
    /// Probabilities of the interaction categories.
    pub mix: InteractionMix,
    /// Entries generated by each rare inventory interaction.
    pub entries_to_add: usize,
    /// Least-stocked entries replenished by each frequent inventory interaction.
    pub entries_to_replenish: usize,
    /// Copies added to each replenished entry.
    pub copies_to_add: u32,
    /// Editor picks fetched by each customer interaction.
    pub editor_picks_to_fetch: usize,
    /// Entries sampled from the editor picks for purchase.
    pub entries_to_buy: usize,
    /// Copies bought of each sampled entry.
    pub copies_to_buy: u32,
    /// Entries seeded into the catalog before the run.
    pub initial_catalog_size: usize,
    /// Base seed for reproducible random streams (entropy when unset).
    pub seed: Option<u64>,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            concurrency: 25,
            warmup_iterations: 100,
            measured_iterations: 500,
            mix: InteractionMix::default(),
            entries_to_add: 5,
            entries_to_replenish: 5,
            copies_to_add: 10,
            editor_picks_to_fetch: 10,
            entries_to_buy: 5,
            copies_to_buy: 1,
            initial_catalog_size: 10,
            seed: None,
        }
    }
}

impl WorkloadConfig {
    /// Set the number of concurrent tasks.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the warm-up iteration count per task.
    pub fn with_warmup_iterations(mut self, iterations: usize) -> Self {
        self.warmup_iterations = iterations;
        self
    }

    /// Set the measured iteration count per task.
    pub fn with_measured_iterations(mut self, iterations: usize) -> Self {
        self.measured_iterations = iterations;
        self
    }

    /// Set the interaction mix.
    pub fn with_mix(mut self, mix: InteractionMix) -> Self {
        self.mix = mix;
        self
    }

    /// Set the rare inventory batch size.
    pub fn with_entries_to_add(mut self, count: usize) -> Self {
        self.entries_to_add = count;
        self
    }

    /// Set how many least-stocked entries are replenished and by how many copies.
    pub fn with_replenishment(mut self, entries: usize, copies: u32) -> Self {
        self.entries_to_replenish = entries;
        self.copies_to_add = copies;
        self
    }

    /// Set the customer interaction sizes.
    pub fn with_purchase(mut self, editor_picks: usize, entries: usize, copies: u32) -> Self {
        self.editor_picks_to_fetch = editor_picks;
        self.entries_to_buy = entries;
        self.copies_to_buy = copies;
        self
    }

    /// Set the number of entries seeded before the run.
    pub fn with_initial_catalog_size(mut self, size: usize) -> Self {
        self.initial_catalog_size = size;
        self
    }

    /// Set the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject configurations the workload cannot run.
    pub fn validate(&self) -> Result<(), WorkloadError> {
        self.mix.validate().map_err(WorkloadError::Config)?;

        let counts = [
            ("concurrency", self.concurrency),
            ("measured_iterations", self.measured_iterations),
            ("entries_to_add", self.entries_to_add),
            ("entries_to_replenish", self.entries_to_replenish),
            ("copies_to_add", self.copies_to_add as usize),
            ("editor_picks_to_fetch", self.editor_picks_to_fetch),
            ("entries_to_buy", self.entries_to_buy),
            ("copies_to_buy", self.copies_to_buy as usize),
            ("initial_catalog_size", self.initial_catalog_size),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(WorkloadError::Config(format!("{name} must be positive")));
            }
        }
        Ok(())
    }

    /// RNG for random stream `stream`.
    ///
    /// With a seed configured, each stream gets a distinct deterministic
    /// seed; otherwise every stream is seeded from OS entropy. Stream 0
    /// belongs to the coordinator, stream `n + 1` to task `n`.
    pub fn rng_for_stream(&self, stream: u64) -> StdRng {
        match self.seed {
            Some(seed) => {
                StdRng::seed_from_u64(seed.wrapping_add(stream.wrapping_mul(SEED_STREAM_STEP)))
            }
            None => StdRng::from_entropy(),
        }
    }
}
