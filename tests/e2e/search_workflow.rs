//! Full pipeline: HTTP index -> loader -> parser -> evaluator -> report.

use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;

use portq::catalog::{HttpSource, IndexLoader};
use portq::engine::{QueryEngine, SearchOutcome, SearchOptions};

use crate::common::index_json;

async fn engine_against_mock(server: &MockServer, options: SearchOptions) -> QueryEngine {
    let now = chrono::Utc::now().timestamp();
    server
        .mock_async(|when, then| {
            when.method(GET).path("/ports.json");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(index_json(now));
        })
        .await;

    let source =
        HttpSource::new(server.url("/ports.json"), Duration::from_secs(5)).expect("http source");
    QueryEngine::new(Arc::new(IndexLoader::new(source)), options)
}

fn hit_names(outcome: &SearchOutcome) -> Vec<String> {
    match outcome {
        SearchOutcome::NoQuery => panic!("expected results, got NoQuery"),
        SearchOutcome::Results(report) => {
            report.hits.iter().map(|p| p.name.clone()).collect()
        }
    }
}

#[tokio::test]
async fn broken_filter_example() {
    let server = MockServer::start_async().await;
    let engine = engine_against_mock(&server, SearchOptions::default()).await;

    let outcome = engine
        .search("category:editors && !is:broken")
        .await
        .expect("search");
    assert_eq!(hit_names(&outcome), vec!["vim"]);
}

#[tokio::test]
async fn wildcard_returns_everything_in_order() {
    let server = MockServer::start_async().await;
    let engine = engine_against_mock(&server, SearchOptions::default()).await;

    let outcome = engine.search("*").await.expect("search");
    assert_eq!(hit_names(&outcome), vec!["vim", "nano", "libfoo"]);
}

#[tokio::test]
async fn wildcard_respects_configured_cap() {
    let server = MockServer::start_async().await;
    let engine = engine_against_mock(
        &server,
        SearchOptions {
            max_results: 2,
            ..SearchOptions::default()
        },
    )
    .await;

    match engine.search("*").await.expect("search") {
        SearchOutcome::Results(report) => {
            assert_eq!(report.total, 3);
            assert_eq!(report.hits.len(), 2);
            assert!(report.truncated);
        }
        SearchOutcome::NoQuery => panic!("wildcard is a query"),
    }
}

#[tokio::test]
async fn empty_query_is_distinct_from_zero_matches() {
    let server = MockServer::start_async().await;
    let engine = engine_against_mock(&server, SearchOptions::default()).await;

    assert!(matches!(
        engine.search("   ").await.expect("search"),
        SearchOutcome::NoQuery
    ));

    match engine.search("name:doesnotexist").await.expect("search") {
        SearchOutcome::Results(report) => assert!(report.hits.is_empty()),
        SearchOutcome::NoQuery => panic!("zero matches must still be Results"),
    }
}

#[tokio::test]
async fn repeated_searches_reuse_the_single_fetch() {
    let server = MockServer::start_async().await;
    let engine = engine_against_mock(&server, SearchOptions::default()).await;

    for raw in ["vim", "is:broken", "license:mit || name:nano", "*"] {
        engine.search(raw).await.expect("search");
    }
    assert_eq!(engine.loader().fetch_count(), 1);
}

#[tokio::test]
async fn report_carries_header_data() {
    let server = MockServer::start_async().await;
    let engine = engine_against_mock(&server, SearchOptions::default()).await;

    match engine.search("editor").await.expect("search") {
        SearchOutcome::Results(report) => {
            assert_eq!(report.query, "editor");
            assert_eq!(report.total, 2);
            assert_eq!(report.highlight_terms, vec!["editor"]);
        }
        SearchOutcome::NoQuery => panic!("expected results"),
    }
}
