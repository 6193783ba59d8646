//! Per-task interaction loop.

use crate::config::WorkloadConfig;
use crate::error::WorkloadError;
use crate::metrics::RunResult;
use crate::mix::{Interaction, DRAW_RANGE};
use catalog_core::{ids_of, CatalogEntry, CopyRequest, EntryId, ReplenishRequest};
use inventory_service::{InventoryService, ServiceResult};
use loadtest_generator::CatalogGenerator;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace};

/// Lifecycle of a runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Interactions run but nothing is counted.
    Warmup,
    /// Interactions are counted and timed.
    Measuring,
    /// The iteration budget is exhausted.
    Done,
}

/// Runs one task's share of the workload against a shared service.
///
/// Each runner owns its random stream and its counters; the configuration,
/// the service and the identifier generator are shared with sibling tasks.
pub struct InteractionRunner {
    task: usize,
    config: Arc<WorkloadConfig>,
    service: Arc<dyn InventoryService>,
    generator: Arc<CatalogGenerator>,
    rng: StdRng,
    phase: Phase,
    result: RunResult,
}

impl InteractionRunner {
    pub fn new(
        task: usize,
        config: Arc<WorkloadConfig>,
        service: Arc<dyn InventoryService>,
        generator: Arc<CatalogGenerator>,
        rng: StdRng,
    ) -> Self {
        Self {
            task,
            config,
            service,
            generator,
            rng,
            phase: Phase::Warmup,
            result: RunResult::new(task),
        }
    }

    /// Run the warm-up phase then the measured phase.
    ///
    /// Domain errors are counted as failed iterations and never stop the
    /// loop. Any other service error aborts the task.
    pub async fn run(mut self) -> Result<RunResult, WorkloadError> {
        debug!(
            "Task {} warming up for {} iterations",
            self.task, self.config.warmup_iterations
        );
        for _ in 0..self.config.warmup_iterations {
            self.iterate().await?;
        }

        self.phase = Phase::Measuring;
        let measured = self.config.measured_iterations;
        let start = Instant::now();
        for _ in 0..measured {
            self.iterate().await?;
        }
        self.result.set_elapsed(start.elapsed());
        self.phase = Phase::Done;

        debug!(
            "Task {} finished: {}/{} iterations succeeded in {:?}",
            self.task,
            self.result.successful_iterations,
            self.result.total_iterations,
            self.result.elapsed()
        );
        Ok(self.result)
    }

    async fn iterate(&mut self) -> Result<(), WorkloadError> {
        let draw = self.rng.gen_range(0.0..DRAW_RANGE);
        let interaction = self.config.mix.select(draw);

        let succeeded = match self.perform(interaction).await {
            Ok(()) => true,
            Err(err) if err.is_domain() => {
                trace!("Task {} {} interaction failed: {}", self.task, interaction, err);
                false
            }
            Err(err) => {
                return Err(WorkloadError::TaskFault {
                    task: self.task,
                    reason: format!("{interaction} interaction: {err}"),
                })
            }
        };

        if self.phase == Phase::Measuring {
            self.result.record(interaction, succeeded);
        }
        Ok(())
    }

    /// Perform a single interaction.
    pub async fn perform(&mut self, interaction: Interaction) -> ServiceResult<()> {
        match interaction {
            Interaction::RareInventory => self.acquire_new_entries().await,
            Interaction::FrequentInventory => self.replenish_least_stocked().await,
            Interaction::FrequentCustomer => self.purchase_editor_picks().await,
        }
    }

    /// Add a batch of entries whose identifiers are not in the catalog yet.
    ///
    /// The snapshot is taken before generation, so a sibling task can still
    /// add one of these identifiers in between.
    async fn acquire_new_entries(&mut self) -> ServiceResult<()> {
        let existing = ids_of(&self.service.fetch_all().await?);
        let batch = self
            .generator
            .next_batch(&mut self.rng, self.config.entries_to_add);

        self.service
            .add_entries(without_existing(batch, &existing))
            .await
    }

    async fn replenish_least_stocked(&mut self) -> ServiceResult<()> {
        let entries = self.service.fetch_all().await?;
        let requests = least_stocked(
            entries,
            self.config.entries_to_replenish,
            self.config.copies_to_add,
        );
        self.service.add_copies(requests).await
    }

    async fn purchase_editor_picks(&mut self) -> ServiceResult<()> {
        let picks = self
            .service
            .fetch_editor_picks(self.config.editor_picks_to_fetch)
            .await?;
        let sample = self.generator.sample_ids(
            &mut self.rng,
            &ids_of(&picks),
            self.config.entries_to_buy,
        );

        let entries = self.service.fetch_by_ids(&sample).await?;
        let requests = entries
            .iter()
            .map(|entry| CopyRequest::new(entry.id, self.config.copies_to_buy))
            .collect();
        self.service.purchase(requests).await
    }
}

/// Drop entries whose identifier is already in `existing`.
pub fn without_existing(
    batch: Vec<CatalogEntry>,
    existing: &BTreeSet<EntryId>,
) -> Vec<CatalogEntry> {
    batch
        .into_iter()
        .filter(|entry| !existing.contains(&entry.id))
        .collect()
}

/// Replenishment requests for the `count` entries with the fewest copies.
///
/// Ties keep the order in which the entries were fetched.
pub fn least_stocked(
    mut entries: Vec<CatalogEntry>,
    count: usize,
    copies: u32,
) -> Vec<ReplenishRequest> {
    entries.sort_by_key(|entry| entry.copies);
    entries
        .iter()
        .take(count)
        .map(|entry| CopyRequest::new(entry.id, copies))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: EntryId, copies: u32) -> CatalogEntry {
        CatalogEntry {
            id,
            title: format!("title-{id}"),
            author: format!("author-{id}"),
            price: 1.0,
            copies,
            sale_misses: 0,
            times_rated: 0,
            total_rating: 0,
            editor_pick: false,
        }
    }

    #[test]
    fn test_without_existing() {
        let batch = (4..=8).map(|id| entry(id, 1)).collect();
        let existing: BTreeSet<EntryId> = (1..=5).collect();

        let kept: Vec<_> = without_existing(batch, &existing)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(kept, vec![6, 7, 8]);
    }

    #[test]
    fn test_without_existing_all_colliding() {
        let batch = vec![entry(1, 1), entry(2, 1)];
        let existing: BTreeSet<EntryId> = [1, 2, 3].into_iter().collect();
        assert!(without_existing(batch, &existing).is_empty());
    }

    #[test]
    fn test_least_stocked_ties_keep_fetch_order() {
        let entries = vec![
            entry(10, 5),
            entry(11, 2),
            entry(12, 9),
            entry(13, 2),
            entry(14, 5),
        ];

        let requests = least_stocked(entries, 3, 10);
        assert_eq!(
            requests,
            vec![
                CopyRequest::new(11, 10),
                CopyRequest::new(13, 10),
                CopyRequest::new(10, 10),
            ]
        );
    }

    #[test]
    fn test_least_stocked_fewer_entries_than_count() {
        let requests = least_stocked(vec![entry(1, 3)], 5, 2);
        assert_eq!(requests, vec![CopyRequest::new(1, 2)]);
        assert!(least_stocked(Vec::new(), 5, 2).is_empty());
    }
}
