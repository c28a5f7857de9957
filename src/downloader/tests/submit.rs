use crate::downloader::test_helpers::create_test_downloader;
use crate::error::Error;
use crate::request::DEFAULT_MIME_TYPE;
use crate::types::{DestinationKind, DownloadOptions};

#[tokio::test]
async fn test_download_registers_and_enqueues() {
    let (downloader, engine, _notice_tx, _temp_dir) = create_test_downloader();

    let handle = downloader
        .download("https://example.com/a", "f1", DownloadOptions::default())
        .await
        .unwrap();

    assert_eq!(engine.enqueued_count(), 1);
    assert!(
        downloader.is_queued("https://example.com/a"),
        "URL must be tracked the moment download() returns"
    );
    assert_eq!(downloader.queued_count(), 1);
    assert!(
        downloader.lookup(handle.id()).is_some(),
        "a tracked download can be re-subscribed to by id"
    );
    assert!(
        handle.try_outcome().is_none(),
        "no outcome before any completion notice"
    );
}

#[tokio::test]
async fn test_request_descriptor_carries_defaults() {
    let (downloader, engine, _notice_tx, temp_dir) = create_test_downloader();

    downloader
        .download("https://example.com/a", "f1", DownloadOptions::default())
        .await
        .unwrap();

    let requests = engine.enqueued.lock().unwrap();
    let request = &requests[0];
    assert_eq!(request.url, "https://example.com/a");
    assert_eq!(request.title, "f1");
    assert_eq!(request.mime_type, DEFAULT_MIME_TYPE);
    assert_eq!(
        request.target_path,
        temp_dir.path().join("public").join("Downloads").join("f1")
    );
}

#[tokio::test]
async fn test_destination_prepared_before_enqueue() {
    let (downloader, _engine, _notice_tx, temp_dir) = create_test_downloader();
    let folder = temp_dir.path().join("public").join("Downloads");
    std::fs::create_dir_all(&folder).unwrap();
    std::fs::write(folder.join("f1"), "stale").unwrap();

    downloader
        .download("https://example.com/a", "f1", DownloadOptions::default())
        .await
        .unwrap();

    assert!(folder.is_dir());
    assert!(
        !folder.join("f1").exists(),
        "stale file must be deleted during request building"
    );
}

#[tokio::test]
async fn test_invalid_url_rejected_before_engine() {
    let (downloader, engine, _notice_tx, _temp_dir) = create_test_downloader();

    let result = downloader
        .download("definitely not a url", "f1", DownloadOptions::default())
        .await;

    assert!(matches!(result, Err(Error::InvalidUrl { .. })));
    assert_eq!(
        engine.enqueued_count(),
        0,
        "engine must not be consulted for an unparseable URL"
    );
    assert_eq!(downloader.queued_count(), 0);
}

#[tokio::test]
async fn test_engine_rejection_leaves_registry_empty() {
    let (downloader, engine, _notice_tx, _temp_dir) = create_test_downloader();
    engine.reject_enqueues();

    let result = downloader
        .download("https://example.com/a", "f1", DownloadOptions::default())
        .await;

    assert!(matches!(result, Err(Error::Engine(_))));
    assert!(
        !downloader.is_queued("https://example.com/a"),
        "a rejected submission must not be tracked"
    );
}

#[tokio::test]
async fn test_download_to_private_uses_private_base() {
    let (downloader, engine, _notice_tx, temp_dir) = create_test_downloader();

    downloader
        .download_to_private("https://example.com/a", "f1", "cache", "application/pdf", false)
        .await
        .unwrap();

    let requests = engine.enqueued.lock().unwrap();
    let request = &requests[0];
    assert_eq!(request.destination, DestinationKind::Private);
    assert_eq!(request.mime_type, "application/pdf");
    assert_eq!(
        request.target_path,
        temp_dir.path().join("private").join("cache").join("f1")
    );
}

#[tokio::test]
async fn test_download_to_public_in_explicit_sub_dir() {
    let (downloader, engine, _notice_tx, temp_dir) = create_test_downloader();

    downloader
        .download_to_public_in("https://example.com/a", "f1", "invoices", "*/*", true)
        .await
        .unwrap();

    let requests = engine.enqueued.lock().unwrap();
    assert_eq!(
        requests[0].target_path,
        temp_dir.path().join("public").join("invoices").join("f1")
    );
}
