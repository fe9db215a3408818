//! Tests for single-file transfers.

mod common;

use common::{FakeServer, MemoryStore};
use ftp_to_s3_source::{RemoteSource, SourceConnection};
use ftp_to_s3_transfer::{SuccessCounter, TransferJob, TransferOutcome, TransferUnit};

fn job(name: &str) -> TransferJob {
    TransferJob::new("/pub", name, "backup/")
}

#[tokio::test]
async fn test_success_uploads_and_counts() {
    let server = FakeServer::with_listing(&[]);
    let store = MemoryStore::new();
    let counter = SuccessCounter::new();
    let unit = TransferUnit::new(&server, &store, "bucket", counter.clone());

    let outcome: TransferOutcome = unit.execute(&job("a.txt")).await;

    assert_eq!(outcome, TransferOutcome::Success);
    assert_eq!(counter.get(), 1);
    assert_eq!(
        store.get("backup/a.txt").unwrap(),
        b"contents of /pub/a.txt".to_vec()
    );
    assert_eq!((server.opened(), server.closed()), (1, 1));
}

#[tokio::test]
async fn test_connect_failure_opens_nothing() {
    let server = FakeServer::with_listing(&[]).refuse_connects();
    let store = MemoryStore::new();
    let counter = SuccessCounter::new();
    let unit = TransferUnit::new(&server, &store, "bucket", counter.clone());

    let outcome = unit.execute(&job("a.txt")).await;

    assert_eq!(outcome, TransferOutcome::Failure("/pub/a.txt".to_string()));
    assert_eq!(counter.get(), 0);
    assert_eq!((server.opened(), server.closed()), (0, 0));
    assert!(store.keys().is_empty());
}

#[tokio::test]
async fn test_fetch_failure_skips_upload() {
    let server = FakeServer::with_listing(&[]).fail_fetch("/pub/a.txt", 1);
    let store = MemoryStore::new();
    let counter = SuccessCounter::new();
    let unit = TransferUnit::new(&server, &store, "bucket", counter.clone());

    let outcome = unit.execute(&job("a.txt")).await;

    assert!(outcome.is_failure());
    assert_eq!(counter.get(), 0);
    assert!(store.keys().is_empty());
    assert_eq!(server.closed(), 1);
}

#[tokio::test]
async fn test_upload_failure_is_failure() {
    let server = FakeServer::with_listing(&[]);
    let store = MemoryStore::new().fail_put("backup/a.txt", 1);
    let counter = SuccessCounter::new();
    let unit = TransferUnit::new(&server, &store, "bucket", counter.clone());

    let outcome = unit.execute(&job("a.txt")).await;

    assert_eq!(outcome, TransferOutcome::Failure("/pub/a.txt".to_string()));
    assert_eq!(counter.get(), 0);
    assert_eq!(server.closed(), 1);
}

#[tokio::test]
async fn test_close_error_does_not_change_outcome() {
    let server = FakeServer::with_listing(&[]).fail_close();
    let store = MemoryStore::new();
    let counter = SuccessCounter::new();
    let unit = TransferUnit::new(&server, &store, "bucket", counter.clone());

    let outcome = unit.execute(&job("a.txt")).await;

    assert_eq!(outcome, TransferOutcome::Success);
    assert_eq!(counter.get(), 1);
    assert_eq!(server.closed(), 1);
}

#[tokio::test]
async fn test_login_failure_closes_connection() {
    let server = FakeServer::with_listing(&[]);
    // The first connection is treated as the listing one.
    let mut listing = server.connect().await.unwrap();
    listing.close().await.unwrap();
    let server = server.fail_worker_logins(1);
    let store = MemoryStore::new();
    let counter = SuccessCounter::new();
    let unit = TransferUnit::new(&server, &store, "bucket", counter.clone());

    let outcome = unit.execute(&job("a.txt")).await;

    assert_eq!(outcome, TransferOutcome::Failure("/pub/a.txt".to_string()));
    assert_eq!(counter.get(), 0);
    assert_eq!(server.fetch_attempts("/pub/a.txt"), 0);
    assert_eq!((server.opened(), server.closed()), (2, 2));
}
