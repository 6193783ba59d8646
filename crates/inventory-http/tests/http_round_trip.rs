//! End-to-end tests for the HTTP transport.
//!
//! These tests start the inventory server on an ephemeral port backed by an
//! in-memory inventory and drive it through `HttpInventoryClient`.

use catalog_core::{CatalogEntry, CopyRequest, EntryId};
use inventory_http::HttpInventoryClient;
use inventory_service::{DomainError, InMemoryInventory, InventoryService, ServiceError};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::net::TcpListener;

fn entry(id: EntryId, copies: u32, editor_pick: bool) -> CatalogEntry {
    CatalogEntry {
        id,
        title: format!("title-{id}"),
        author: format!("author-{id}"),
        price: 19.99,
        copies,
        sale_misses: 0,
        times_rated: 2,
        total_rating: 7,
        editor_pick,
    }
}

/// Start a test server and return its base URL.
async fn start_test_server() -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);

    let service: Arc<dyn InventoryService> = Arc::new(InMemoryInventory::new());
    tokio::spawn(async move {
        let _ = inventory_http::serve(listener, service).await;
    });

    Ok(base_url)
}

#[tokio::test]
async fn test_round_trip_operations() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .try_init();

    let base_url = start_test_server().await.unwrap();
    let client = HttpInventoryClient::new(&base_url).unwrap();

    client.reset_catalog().await.unwrap();
    client
        .add_entries(vec![entry(1, 5, true), entry(2, 1, false), entry(3, 2, true)])
        .await
        .unwrap();

    let all = client.fetch_all().await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0], entry(1, 5, true));

    client
        .add_copies(vec![CopyRequest::new(2, 4)])
        .await
        .unwrap();
    client
        .purchase(vec![CopyRequest::new(1, 2), CopyRequest::new(2, 5)])
        .await
        .unwrap();

    let ids: BTreeSet<EntryId> = [1, 2].into_iter().collect();
    let fetched = client.fetch_by_ids(&ids).await.unwrap();
    assert_eq!(fetched[0].copies, 3);
    assert_eq!(fetched[1].copies, 0);

    let picks = client.fetch_editor_picks(10).await.unwrap();
    let pick_ids: Vec<_> = picks.iter().map(|e| e.id).collect();
    assert_eq!(pick_ids, vec![1, 3]);
}

#[tokio::test]
async fn test_editor_picks_count_larger_than_catalog() {
    let base_url = start_test_server().await.unwrap();
    let client = HttpInventoryClient::new(&base_url).unwrap();

    client
        .add_entries(vec![entry(1, 5, true), entry(2, 1, false), entry(3, 2, true)])
        .await
        .unwrap();

    for count in [1_000_000_000_000, usize::MAX] {
        let picks = client.fetch_editor_picks(count).await.unwrap();
        let pick_ids: Vec<_> = picks.iter().map(|e| e.id).collect();
        assert_eq!(pick_ids, vec![1, 3], "count {count}");
    }

    // server is still serving after the large requests
    assert_eq!(client.fetch_all().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_domain_errors_survive_transport() {
    let base_url = start_test_server().await.unwrap();
    let client = HttpInventoryClient::new(&base_url).unwrap();

    client.add_entries(vec![entry(7, 1, false)]).await.unwrap();

    let err = client
        .purchase(vec![CopyRequest::new(7, 3)])
        .await
        .unwrap_err();
    match err {
        ServiceError::Domain(DomainError::InsufficientStock {
            id,
            requested,
            available,
        }) => {
            assert_eq!((id, requested, available), (7, 3, 1));
        }
        other => panic!("Expected insufficient stock, got {other:?}"),
    }

    let err = client.add_entries(vec![entry(7, 1, false)]).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::DuplicateEntry { id: 7 })
    ));

    let ids: BTreeSet<EntryId> = [8].into_iter().collect();
    let err = client.fetch_by_ids(&ids).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::NotInCatalog { id: 8 })
    ));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpInventoryClient::new(&format!("http://{addr}")).unwrap();
    let err = client.fetch_all().await.unwrap_err();

    assert!(matches!(err, ServiceError::Transport(_)));
    assert!(!err.is_domain());
}
