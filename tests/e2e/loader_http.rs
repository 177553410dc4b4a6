//! Index loader over a real HTTP boundary.

use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;

use portq::PqError;
use portq::catalog::{HttpSource, IndexLoader, LoadStatus};

use crate::common::index_json;

fn source(server: &MockServer) -> HttpSource {
    HttpSource::new(server.url("/ports.json"), Duration::from_secs(5)).expect("http source")
}

#[tokio::test]
async fn three_concurrent_gets_issue_one_fetch() {
    let server = MockServer::start_async().await;
    let now = chrono::Utc::now().timestamp();
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/ports.json");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(index_json(now));
        })
        .await;

    let loader = Arc::new(IndexLoader::new(source(&server)));
    let (a, b, c) = tokio::join!(loader.get(), loader.get(), loader.get());

    let catalog = a.expect("first get");
    assert_eq!(catalog.len(), 3);
    assert!(b.is_ok() && c.is_ok());
    assert_eq!(loader.fetch_count(), 1);
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn cached_catalog_survives_later_gets() {
    let server = MockServer::start_async().await;
    let now = chrono::Utc::now().timestamp();
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/ports.json");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(index_json(now));
        })
        .await;

    let loader = IndexLoader::new(source(&server));
    for _ in 0..5 {
        let catalog = loader.get().await.expect("get");
        assert_eq!(catalog.ports()[0].name, "vim");
    }
    assert_eq!(loader.status(), LoadStatus::Ready);
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn server_error_fails_once_and_sticks() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/ports.json");
            then.status(500).body("upstream exploded");
        })
        .await;

    let loader = IndexLoader::new(source(&server));

    let first = loader.get().await.expect_err("500 must fail");
    assert!(matches!(first, PqError::IndexLoad(_)), "got {first:?}");

    let second = loader.get().await.expect_err("failure is sticky");
    assert!(matches!(second, PqError::IndexUnavailable(_)), "got {second:?}");

    assert_eq!(loader.status(), LoadStatus::Failed);
    // No automatic retry happened.
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn malformed_payload_is_a_load_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/ports.json");
            then.status(200)
                .header("content-type", "application/json")
                .body("{\"not\": \"an array\"}");
        })
        .await;

    let loader = IndexLoader::new(source(&server));
    let err = loader.get().await.expect_err("bad payload must fail");
    assert!(matches!(err, PqError::IndexLoad(_)));
}
