//! Command-line interface for bookstore-loadtest
//!
//! # Usage Examples
//!
//! ```bash
//! # Default workload (25 tasks, 100 warm-up + 500 measured iterations each)
//! bookstore-loadtest run
//!
//! # Reproducible run with a per-task table
//! bookstore-loadtest run --seed 7 --format table
//!
//! # Inventory server on port 8081
//! RUST_LOG=info bookstore-loadtest serve
//! ```

use anyhow::Context;
use bookstore_loadtest::cli::{Cli, Commands, RunArgs, ServeArgs};
use clap::Parser;
use inventory_service::{InMemoryInventory, InventoryService};
use loadtest_workload::WorkloadCoordinator;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run_workload(args).await,
        Commands::Serve(args) => run_server(args).await,
    }
}

async fn run_workload(args: RunArgs) -> anyhow::Result<()> {
    let config = args.resolve_config()?;
    info!("Running workload against {}", config.service);

    let service = config.service.connect()?;
    let mut coordinator = WorkloadCoordinator::new(config.workload, service)
        .context("Invalid workload configuration")?;

    let report = coordinator
        .run_until(ctrl_c())
        .await
        .context("Workload run failed")?;

    let rendered = args.format.render(&report)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write report to {path:?}"))?;
            info!("Report written to {:?}", path);
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let listener = TcpListener::bind((args.host.as_str(), args.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", args.host, args.port))?;
    let service: Arc<dyn InventoryService> = Arc::new(InMemoryInventory::new());

    tokio::select! {
        result = inventory_http::serve(listener, service) => {
            result.context("Inventory server failed")?;
        }
        _ = ctrl_c() => {
            info!("Shutting down inventory server");
        }
    }
    Ok(())
}

/// Completes on Ctrl-C; never completes if the signal cannot be installed.
async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
