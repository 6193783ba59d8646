//! Run orchestration: initialization, task fan-out and aggregation.

use crate::config::WorkloadConfig;
use crate::error::WorkloadError;
use crate::metrics::RunResult;
use crate::report::AggregateReport;
use crate::runner::InteractionRunner;
use catalog_core::{ids_of, EntryId};
use inventory_service::InventoryService;
use loadtest_generator::CatalogGenerator;
use rand::rngs::StdRng;
use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Coordinates a complete workload run against one service.
pub struct WorkloadCoordinator {
    config: Arc<WorkloadConfig>,
    service: Arc<dyn InventoryService>,
    generator: Arc<CatalogGenerator>,
    rng: StdRng,
}

impl WorkloadCoordinator {
    /// Create a coordinator, rejecting invalid configuration before the
    /// service is touched.
    pub fn new(
        config: WorkloadConfig,
        service: Arc<dyn InventoryService>,
    ) -> Result<Self, WorkloadError> {
        config.validate()?;

        let mut rng = config.rng_for_stream(0);
        let generator = CatalogGenerator::new(&mut rng);

        Ok(Self {
            config: Arc::new(config),
            service,
            generator: Arc::new(generator),
            rng,
        })
    }

    /// Run the workload to completion.
    pub async fn run(&mut self) -> Result<AggregateReport, WorkloadError> {
        self.run_until(std::future::pending()).await
    }

    /// Run the workload, abandoning it with [`WorkloadError::Interrupted`]
    /// if `shutdown` completes first.
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<AggregateReport, WorkloadError>
    where
        F: Future<Output = ()>,
    {
        let start = Instant::now();
        self.initialize().await?;

        let results = self.run_tasks(shutdown).await?;
        let report = AggregateReport::from_results(results);

        info!(
            "Workload completed in {:?}: {}/{} iterations succeeded across {} tasks",
            start.elapsed(),
            report.successful_iterations,
            report.total_iterations,
            report.tasks.len()
        );
        Ok(report)
    }

    /// Reset the catalog, seed it and read the seeded entries back.
    ///
    /// Returns the seeded identifiers.
    pub async fn initialize(&mut self) -> Result<BTreeSet<EntryId>, WorkloadError> {
        info!("Resetting catalog");
        self.service
            .reset_catalog()
            .await
            .map_err(|e| WorkloadError::initialization("reset catalog", e))?;

        let entries = self
            .generator
            .next_batch(&mut self.rng, self.config.initial_catalog_size);
        let seeded = ids_of(&entries);

        info!("Seeding catalog with {} entries", seeded.len());
        self.service
            .add_entries(entries)
            .await
            .map_err(|e| WorkloadError::initialization("seed catalog", e))?;

        let read_back = self
            .service
            .fetch_by_ids(&seeded)
            .await
            .map_err(|e| WorkloadError::initialization("read back seeded entries", e))?;
        let found = ids_of(&read_back);
        if found != seeded {
            return Err(WorkloadError::Initialization(format!(
                "read back {} of {} seeded entries",
                found.intersection(&seeded).count(),
                seeded.len()
            )));
        }

        debug!("Verified {} seeded entries", found.len());
        Ok(seeded)
    }

    async fn run_tasks<F>(&self, shutdown: F) -> Result<Vec<RunResult>, WorkloadError>
    where
        F: Future<Output = ()>,
    {
        let concurrency = self.config.concurrency;
        info!(
            "Starting {} tasks ({} warm-up + {} measured iterations each)",
            concurrency, self.config.warmup_iterations, self.config.measured_iterations
        );

        let mut tasks = JoinSet::new();
        for task in 0..concurrency {
            let runner = InteractionRunner::new(
                task,
                Arc::clone(&self.config),
                Arc::clone(&self.service),
                Arc::clone(&self.generator),
                self.config.rng_for_stream(task as u64 + 1),
            );
            tasks.spawn(runner.run());
        }

        let mut results = Vec::with_capacity(concurrency);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                joined = tasks.join_next() => match joined {
                    None => break,
                    Some(Ok(Ok(result))) => {
                        debug!("Task {} completed", result.task);
                        results.push(result);
                    }
                    Some(Ok(Err(err))) => {
                        error!("{}", err);
                        tasks.abort_all();
                        return Err(err);
                    }
                    Some(Err(join_err)) => {
                        error!("Task join failed: {}", join_err);
                        tasks.abort_all();
                        return Err(WorkloadError::TaskAborted(join_err.to_string()));
                    }
                },
                _ = &mut shutdown => {
                    warn!(
                        "Interrupted, abandoning {} running tasks",
                        tasks.len()
                    );
                    tasks.abort_all();
                    return Err(WorkloadError::Interrupted);
                }
            }
        }

        Ok(results)
    }
}
