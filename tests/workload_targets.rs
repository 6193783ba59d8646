//! End-to-end runs of the harness against local and remote targets.

use bookstore_loadtest::cli::{OutputFormat, RunArgs};
use bookstore_loadtest::{HarnessConfig, ServiceTarget};
use inventory_service::{InMemoryInventory, InventoryService};
use loadtest_workload::{WorkloadCoordinator, WorkloadError};
use std::io::Write;
use std::sync::Arc;
use tokio::net::TcpListener;

const SMALL_WORKLOAD: &str = r#"
workload:
  concurrency: 3
  warmup_iterations: 2
  measured_iterations: 15
  initial_catalog_size: 8
  seed: 31
"#;

#[tokio::test]
async fn test_local_run_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SMALL_WORKLOAD.as_bytes()).unwrap();

    let args = RunArgs {
        config: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let config = args.resolve_config().unwrap();
    assert_eq!(config.service, ServiceTarget::Local);

    let service = config.service.connect().unwrap();
    let mut coordinator = WorkloadCoordinator::new(config.workload, service).unwrap();
    let report = coordinator.run().await.unwrap();

    assert_eq!(report.tasks.len(), 3);
    assert_eq!(report.total_iterations, 45);

    let text = OutputFormat::Text.render(&report).unwrap();
    assert!(text.starts_with("Average latency: "));
    assert_eq!(text.lines().count(), 4);

    let json = OutputFormat::Json.render(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["total_iterations"], 45);
}

#[tokio::test]
async fn test_cli_flags_override_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SMALL_WORKLOAD.as_bytes()).unwrap();

    let args = RunArgs {
        config: Some(file.path().to_path_buf()),
        concurrency: Some(5),
        seed: Some(1),
        ..Default::default()
    };
    let config = args.resolve_config().unwrap();

    assert_eq!(config.workload.concurrency, 5);
    assert_eq!(config.workload.measured_iterations, 15);
    assert_eq!(config.workload.seed, Some(1));
}

#[tokio::test]
async fn test_missing_config_file_is_error() {
    let args = RunArgs {
        config: Some("/nonexistent/bookstore.yaml".into()),
        ..Default::default()
    };
    assert!(args.resolve_config().is_err());
}

#[tokio::test]
async fn test_remote_run_over_http() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    let served: Arc<dyn InventoryService> = Arc::new(InMemoryInventory::new());
    tokio::spawn(async move {
        let _ = inventory_http::serve(listener, served).await;
    });

    let mut config = HarnessConfig::from_yaml_str(SMALL_WORKLOAD).unwrap();
    config.service = ServiceTarget::Remote { address };

    let service = config.service.connect().unwrap();
    let mut coordinator = WorkloadCoordinator::new(config.workload, service).unwrap();
    let report = coordinator.run().await.unwrap();

    assert_eq!(report.total_iterations, 45);
    for result in &report.tasks {
        assert!(result.is_consistent());
    }
}

#[tokio::test]
async fn test_unreachable_remote_fails_initialization() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let mut config = HarnessConfig::from_yaml_str(SMALL_WORKLOAD).unwrap();
    config.service = ServiceTarget::Remote { address };

    let service = config.service.connect().unwrap();
    let mut coordinator = WorkloadCoordinator::new(config.workload, service).unwrap();
    let err = coordinator.run().await.unwrap_err();

    assert!(matches!(err, WorkloadError::Initialization(_)));
}
