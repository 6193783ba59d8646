//! Concurrency tests for the in-memory inventory.
//!
//! Many tasks buy and replenish the same entries at once; the final stock
//! must equal the initial stock plus replenishments minus successful sales.

use catalog_core::{ids_of, CopyRequest};
use inventory_service::{InMemoryInventory, InventoryService};
use loadtest_generator::CatalogGenerator;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_purchases_conserve_stock() {
    let mut rng = StdRng::seed_from_u64(42);
    let generator = CatalogGenerator::starting_after(0).with_initial_copies(50);
    let entries = generator.next_batch(&mut rng, 4);
    let ids = ids_of(&entries);

    let inventory = Arc::new(InMemoryInventory::new());
    inventory.add_entries(entries).await.unwrap();

    let sold = Arc::new(AtomicI64::new(0));
    let mut handles = Vec::new();
    for task in 0..8u64 {
        let inventory = Arc::clone(&inventory);
        let sold = Arc::clone(&sold);
        let ids = ids.clone();
        handles.push(tokio::spawn(async move {
            for round in 0..40u64 {
                let requests: Vec<_> = ids.iter().map(|id| CopyRequest::new(*id, 1)).collect();
                if (task + round) % 5 == 0 {
                    inventory.add_copies(requests).await.unwrap();
                    sold.fetch_sub(ids.len() as i64, Ordering::SeqCst);
                } else {
                    match inventory.purchase(requests).await {
                        Ok(()) => {
                            sold.fetch_add(ids.len() as i64, Ordering::SeqCst);
                        }
                        Err(e) => assert!(e.is_domain(), "unexpected fault: {e}"),
                    }
                }
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let remaining: i64 = inventory
        .fetch_all()
        .await
        .unwrap()
        .iter()
        .map(|e| e.copies as i64)
        .sum();
    let initial = 50 * ids.len() as i64;
    assert_eq!(remaining + sold.load(Ordering::SeqCst), initial);
}

#[tokio::test]
async fn test_editor_picks_subset_of_catalog() {
    let mut rng = StdRng::seed_from_u64(7);
    let generator = CatalogGenerator::starting_after(100);
    let entries = generator.next_batch(&mut rng, 30);
    let expected_picks = entries.iter().filter(|e| e.editor_pick).count();

    let inventory = InMemoryInventory::new();
    inventory.add_entries(entries.clone()).await.unwrap();

    let picks = inventory.fetch_editor_picks(usize::MAX).await.unwrap();
    assert_eq!(picks.len(), expected_picks);
    assert!(ids_of(&picks).is_subset(&ids_of(&entries)));
}
