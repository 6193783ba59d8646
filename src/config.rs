//! Harness configuration: workload settings plus the service target.
//!
//! Values come from built-in defaults, optionally overridden by a YAML file,
//! optionally overridden again by command-line flags.

use anyhow::Context;
use inventory_http::HttpInventoryClient;
use inventory_service::{InMemoryInventory, InventoryService};
use loadtest_workload::WorkloadConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Address of a remote inventory server when none is configured.
pub const DEFAULT_SERVER_ADDRESS: &str = "http://localhost:8081";

fn default_server_address() -> String {
    DEFAULT_SERVER_ADDRESS.to_string()
}

/// Where the inventory service under test lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum ServiceTarget {
    /// An in-process inventory created for the run.
    #[default]
    Local,
    /// An inventory server reached over HTTP.
    Remote {
        #[serde(default = "default_server_address")]
        address: String,
    },
}

impl fmt::Display for ServiceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceTarget::Local => write!(f, "local in-memory inventory"),
            ServiceTarget::Remote { address } => write!(f, "remote inventory at {address}"),
        }
    }
}

impl ServiceTarget {
    /// Build the service handle shared by every task of a run.
    pub fn connect(&self) -> anyhow::Result<Arc<dyn InventoryService>> {
        match self {
            ServiceTarget::Local => Ok(Arc::new(InMemoryInventory::new())),
            ServiceTarget::Remote { address } => {
                let client = HttpInventoryClient::new(address)
                    .with_context(|| format!("Failed to create client for {address}"))?;
                Ok(Arc::new(client))
            }
        }
    }
}

/// Complete configuration of one harness invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub workload: WorkloadConfig,
    pub service: ServiceTarget,
}

impl HarnessConfig {
    /// Parse a YAML document. Missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse harness configuration")
    }

    /// Load a YAML configuration file.
    pub fn from_yaml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path:?}"))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid config file: {path:?}"))
    }
}
