//! End-to-end test of the source -> pool -> sink pipeline, minus the CLI.

use std::num::NonZeroUsize;

use axum::{Router, routing::get};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use urlfetch::fetcher::{HttpConfig, build_client, spawn_pool};
use urlfetch::{sink, source};

#[tokio::test]
async fn test_full_pipeline_writes_results_json() {
    let app = Router::new().route("/", get(|| async { "ok" }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // One good URL, one blank line, one URL nobody answers.
    let dead = {
        let l = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = l.local_addr().unwrap();
        drop(l);
        format!("http://{}/", addr)
    };
    let input = format!("{}/\n\n{}\n", base, dead);

    let token = CancellationToken::new();
    let client = build_client(&HttpConfig::default()).unwrap();
    let (jobs_tx, jobs_rx) = async_channel::bounded(2);

    let results = spawn_pool(client, token.clone(), NonZeroUsize::new(2).unwrap(), jobs_rx);
    let producer = tokio::spawn(async move {
        source::feed_lines(input.as_bytes(), jobs_tx, token).await
    });

    let out = sink::collect(results).await;
    producer.await.unwrap().unwrap();

    assert_eq!(out.len(), 2);

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("results.json");
    sink::write_json(&path, &out).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let entries = parsed.as_array().unwrap();
    assert_eq!(entries.len(), 2);

    let ok = entries
        .iter()
        .find(|e| e["status"] == 200)
        .expect("one entry must have succeeded");
    assert_eq!(ok["length"], 2);
    assert!(ok.get("error").is_none());

    let failed = entries
        .iter()
        .find(|e| e["status"] == 0)
        .expect("one entry must have failed");
    assert_eq!(failed["length"], 0);
    assert!(failed["error"].is_string());
}
