//! Worker pool: distributes URLs from a shared intake channel across a
//! fixed number of fetch loops.
//!
//! The intake channel is multi-consumer, so each worker gets its own
//! receiver handle and pulls jobs directly. Only the producer closes the
//! intake; workers never push to it. Each worker holds a clone of the
//! output sender, and the output channel closes once the last clone is
//! dropped, which happens exactly when the last worker exits.

use std::num::NonZeroUsize;

use reqwest::Client;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::FetchResult;
use super::http::fetch_one;

/// Spawn `workers` fetch loops consuming from `intake`.
///
/// Returns the output channel carrying exactly one [`FetchResult`] per
/// consumed URL, in arrival order across racing workers. The channel
/// closes after every worker has stopped, which happens once the intake
/// is exhausted or the token has been cancelled and in-flight jobs have
/// drained.
///
/// The client is passed in rather than built here so tests can point the
/// pool at whatever transport configuration they need.
pub fn spawn_pool(
    client: Client,
    token: CancellationToken,
    workers: NonZeroUsize,
    intake: async_channel::Receiver<String>,
) -> mpsc::Receiver<FetchResult> {
    let (results_tx, results_rx) = mpsc::channel(workers.get());

    for worker_id in 0..workers.get() {
        let client = client.clone();
        let token = token.clone();
        let intake = intake.clone();
        let results = results_tx.clone();

        tokio::spawn(worker_loop(worker_id, client, token, intake, results));
    }

    // Workers now hold the only senders; the channel closes when the last
    // worker exits.
    results_rx
}

async fn worker_loop(
    worker_id: usize,
    client: Client,
    token: CancellationToken,
    intake: async_channel::Receiver<String>,
    results: mpsc::Sender<FetchResult>,
) {
    debug!(worker_id, "worker started");

    loop {
        // Race the next job against shutdown. Once cancelled, stop
        // pulling; jobs still queued belong to nobody.
        let url = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            job = intake.recv() => match job {
                Ok(url) => url,
                Err(_) => break, // intake closed and drained
            },
        };

        // A pulled job always yields a result. Cancellation mid-flight
        // tags it with an error instead of dropping it.
        let result = tokio::select! {
            r = fetch_one(&client, &url) => r,
            _ = token.cancelled() => {
                FetchResult::failure(url.as_str(), 0, "request canceled: shutdown requested")
            }
        };

        if results.send(result).await.is_err() {
            break; // sink went away
        }
    }

    debug!(worker_id, "worker stopped");
}
