//! Error types for the workload runner.

use inventory_service::ServiceError;
use thiserror::Error;

/// Fatal errors that abort a workload run.
///
/// Domain errors raised by the service during an interaction never show up
/// here; runners count them as failed iterations.
#[derive(Error, Debug)]
pub enum WorkloadError {
    /// Invalid configuration, detected before touching the service.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reset, seed or read-back failed before any task started.
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// A running task hit a non-domain fault.
    #[error("Task {task} failed: {reason}")]
    TaskFault { task: usize, reason: String },

    /// A task panicked or was cancelled by the runtime.
    #[error("Task terminated abnormally: {0}")]
    TaskAborted(String),

    /// The run was interrupted before every task completed.
    #[error("Workload interrupted before all tasks completed")]
    Interrupted,
}

impl WorkloadError {
    /// Wrap a service error raised during initialization.
    pub fn initialization(stage: &str, err: ServiceError) -> Self {
        WorkloadError::Initialization(format!("{stage}: {err}"))
    }
}
