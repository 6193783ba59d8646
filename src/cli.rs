//! CLI argument definitions for bookstore-loadtest.

use crate::config::{HarnessConfig, ServiceTarget, DEFAULT_SERVER_ADDRESS};
use clap::{Args, Parser, Subcommand, ValueEnum};
use inventory_http::DEFAULT_PORT;
use loadtest_workload::AggregateReport;
use std::path::PathBuf;

/// Workload generator and benchmark harness for bookstore inventory services.
#[derive(Parser)]
#[command(name = "bookstore-loadtest")]
#[command(about = "Workload generator and benchmark harness for bookstore inventory services")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a workload against a local or remote inventory and print the report
    Run(RunArgs),

    /// Serve an in-memory inventory over HTTP
    Serve(ServeArgs),
}

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Table,
    Markdown,
    Json,
}

impl OutputFormat {
    pub fn render(self, report: &AggregateReport) -> anyhow::Result<String> {
        Ok(match self {
            OutputFormat::Text => report.summary(),
            OutputFormat::Table => report.format_table(),
            OutputFormat::Markdown => report.format_markdown(),
            OutputFormat::Json => serde_json::to_string_pretty(report)?,
        })
    }
}

/// Kind of service target selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetKind {
    Local,
    Remote,
}

/// Arguments of the `run` subcommand.
///
/// Every workload flag is optional; when given it overrides the value from
/// `--config` (or the built-in default).
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// YAML configuration file
    #[arg(long, value_name = "PATH", env = "BOOKSTORE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of concurrent tasks
    #[arg(short, long, env = "BOOKSTORE_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Warm-up iterations per task
    #[arg(long, env = "BOOKSTORE_WARMUP_ITERATIONS")]
    pub warmup_iterations: Option<usize>,

    /// Measured iterations per task
    #[arg(long, env = "BOOKSTORE_MEASURED_ITERATIONS")]
    pub measured_iterations: Option<usize>,

    /// Percentage of rare inventory interactions
    #[arg(long)]
    pub rare_inventory_percent: Option<f64>,

    /// Percentage of frequent inventory interactions
    #[arg(long)]
    pub frequent_inventory_percent: Option<f64>,

    /// Entries seeded into the catalog before the run
    #[arg(long)]
    pub initial_catalog_size: Option<usize>,

    /// Seed for reproducible random streams
    #[arg(long, env = "BOOKSTORE_SEED")]
    pub seed: Option<u64>,

    /// Service target
    #[arg(long, value_enum)]
    pub target: Option<TargetKind>,

    /// Address of the remote inventory server (implies --target remote)
    #[arg(long, env = "BOOKSTORE_SERVER_ADDRESS")]
    pub server_address: Option<String>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl RunArgs {
    /// Load `--config` (if any) and apply the command-line overrides.
    pub fn resolve_config(&self) -> anyhow::Result<HarnessConfig> {
        let mut config = match &self.config {
            Some(path) => HarnessConfig::from_yaml_file(path)?,
            None => HarnessConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    /// Apply the flags that were given on top of `config`.
    pub fn apply_overrides(&self, config: &mut HarnessConfig) {
        let workload = &mut config.workload;
        if let Some(concurrency) = self.concurrency {
            workload.concurrency = concurrency;
        }
        if let Some(iterations) = self.warmup_iterations {
            workload.warmup_iterations = iterations;
        }
        if let Some(iterations) = self.measured_iterations {
            workload.measured_iterations = iterations;
        }
        if let Some(percent) = self.rare_inventory_percent {
            workload.mix.rare_inventory_percent = percent;
        }
        if let Some(percent) = self.frequent_inventory_percent {
            workload.mix.frequent_inventory_percent = percent;
        }
        if let Some(size) = self.initial_catalog_size {
            workload.initial_catalog_size = size;
        }
        if self.seed.is_some() {
            workload.seed = self.seed;
        }

        let configured_address = match &config.service {
            ServiceTarget::Remote { address } => Some(address.clone()),
            ServiceTarget::Local => None,
        };
        let remote = |address: Option<String>| ServiceTarget::Remote {
            address: address
                .or(configured_address.clone())
                .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
        };

        config.service = match (self.target, &self.server_address) {
            (Some(TargetKind::Local), _) => ServiceTarget::Local,
            (Some(TargetKind::Remote), address) => remote(address.clone()),
            (None, Some(address)) => remote(Some(address.clone())),
            (None, None) => config.service.clone(),
        };
    }
}

/// Arguments of the `serve` subcommand.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "BOOKSTORE_SERVER_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse_run(args: &[&str]) -> RunArgs {
        let mut argv = vec!["bookstore-loadtest", "run"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Run(args) => args,
            Commands::Serve(_) => panic!("Expected run subcommand"),
        }
    }

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = parse_run(&[
            "--concurrency",
            "3",
            "--measured-iterations",
            "40",
            "--rare-inventory-percent",
            "0",
            "--frequent-inventory-percent",
            "0",
            "--seed",
            "11",
            "--format",
            "json",
        ]);

        let mut config = HarnessConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.workload.concurrency, 3);
        assert_eq!(config.workload.measured_iterations, 40);
        assert_eq!(config.workload.warmup_iterations, 100);
        assert_eq!(config.workload.mix.customer_percent(), 100.0);
        assert_eq!(config.workload.seed, Some(11));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(config.service, ServiceTarget::Local);
    }

    #[test]
    fn test_target_selection() {
        let mut config = HarnessConfig::default();
        parse_run(&["--target", "remote"]).apply_overrides(&mut config);
        assert_eq!(
            config.service,
            ServiceTarget::Remote {
                address: DEFAULT_SERVER_ADDRESS.to_string()
            }
        );

        let mut config = HarnessConfig::default();
        parse_run(&["--server-address", "http://10.0.0.5:8081"]).apply_overrides(&mut config);
        assert_eq!(
            config.service,
            ServiceTarget::Remote {
                address: "http://10.0.0.5:8081".to_string()
            }
        );

        let mut config = HarnessConfig {
            service: ServiceTarget::Remote {
                address: "http://from-file:8081".to_string(),
            },
            ..Default::default()
        };
        parse_run(&["--target", "remote"]).apply_overrides(&mut config);
        assert_eq!(
            config.service,
            ServiceTarget::Remote {
                address: "http://from-file:8081".to_string()
            }
        );

        parse_run(&["--target", "local"]).apply_overrides(&mut config);
        assert_eq!(config.service, ServiceTarget::Local);
    }

    #[test]
    fn test_serve_default_port() {
        match Cli::try_parse_from(["bookstore-loadtest", "serve"]).unwrap().command {
            Commands::Serve(args) => assert_eq!(args.port, DEFAULT_PORT),
            Commands::Run(_) => panic!("Expected serve subcommand"),
        }
    }
}
