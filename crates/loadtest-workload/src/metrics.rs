//! Per-task counters for a workload run.

use crate::mix::Interaction;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Counters produced by one task over its measured phase.
///
/// Only measured iterations are counted; warm-up iterations never show up
/// here. `successful_iterations <= total_iterations`,
/// `successful_customer_iterations <= total_customer_iterations` and
/// `total_customer_iterations <= total_iterations` always hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    /// Index of the task that produced this result.
    pub task: usize,
    /// Measured iterations whose interaction succeeded.
    pub successful_iterations: u64,
    /// Wall time of the measured phase, in nanoseconds.
    pub measured_elapsed_nanos: u64,
    /// Measured iterations attempted.
    pub total_iterations: u64,
    /// Measured customer interactions that succeeded.
    pub successful_customer_iterations: u64,
    /// Measured customer interactions attempted.
    pub total_customer_iterations: u64,
}

impl RunResult {
    /// Create an empty result for `task`.
    pub fn new(task: usize) -> Self {
        Self {
            task,
            ..Default::default()
        }
    }

    /// Count one measured iteration of `interaction`.
    pub fn record(&mut self, interaction: Interaction, succeeded: bool) {
        self.total_iterations += 1;
        if succeeded {
            self.successful_iterations += 1;
        }

        if interaction.is_customer() {
            self.total_customer_iterations += 1;
            if succeeded {
                self.successful_customer_iterations += 1;
            }
        }
    }

    /// Store the measured wall time, saturating at `u64::MAX` nanoseconds.
    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.measured_elapsed_nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
    }

    /// Measured wall time.
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.measured_elapsed_nanos)
    }

    /// Measured iterations that failed with a domain error.
    pub fn failed_iterations(&self) -> u64 {
        self.total_iterations
            .saturating_sub(self.successful_iterations)
    }

    /// Whether the counter ordering invariants hold.
    pub fn is_consistent(&self) -> bool {
        self.successful_iterations <= self.total_iterations
            && self.successful_customer_iterations <= self.total_customer_iterations
            && self.total_customer_iterations <= self.total_iterations
            && self.successful_customer_iterations <= self.successful_iterations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts() {
        let mut result = RunResult::new(3);

        result.record(Interaction::RareInventory, true);
        result.record(Interaction::FrequentInventory, false);
        result.record(Interaction::FrequentCustomer, true);
        result.record(Interaction::FrequentCustomer, false);

        assert_eq!(result.task, 3);
        assert_eq!(result.total_iterations, 4);
        assert_eq!(result.successful_iterations, 2);
        assert_eq!(result.total_customer_iterations, 2);
        assert_eq!(result.successful_customer_iterations, 1);
        assert_eq!(result.failed_iterations(), 2);
        assert!(result.is_consistent());
    }

    #[test]
    fn test_elapsed() {
        let mut result = RunResult::new(0);
        result.set_elapsed(Duration::from_millis(1500));

        assert_eq!(result.measured_elapsed_nanos, 1_500_000_000);
        assert_eq!(result.elapsed(), Duration::from_millis(1500));
    }

    #[test]
    fn test_inconsistent_counters() {
        let result = RunResult {
            task: 0,
            successful_iterations: 5,
            measured_elapsed_nanos: 0,
            total_iterations: 4,
            successful_customer_iterations: 0,
            total_customer_iterations: 0,
        };
        assert!(!result.is_consistent());
        assert_eq!(result.failed_iterations(), 0);
    }
}
