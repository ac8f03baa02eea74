//! Wires the job source, worker pool, and result sink together for one
//! run of the binary.

use std::path::Path;

use tokio::fs::File;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::info;

use urlfetch::fetcher::{self, HttpConfig};
use urlfetch::{sink, source};

use crate::cli::Cli;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

const RESULTS_PATH: &str = "results.json";

pub async fn run(cli: Cli) -> Result<(), AnyError> {
    let file = File::open(&cli.file)
        .await
        .map_err(|e| format!("open {}: {}", cli.file.display(), e))?;
    let reader = BufReader::new(file);

    let client = fetcher::build_client(&HttpConfig::default())?;
    let token = CancellationToken::new();
    tokio::spawn(watch_signals(token.clone()));

    let (jobs_tx, jobs_rx) = async_channel::bounded(cli.workers.get());
    let results = fetcher::spawn_pool(client, token.clone(), cli.workers, jobs_rx);
    let producer = tokio::spawn(source::feed_lines(reader, jobs_tx, token));

    let out = sink::collect(results).await;

    // The output channel only closes after the intake does, so the
    // producer has already finished by now.
    producer.await??;

    sink::write_json(Path::new(RESULTS_PATH), &out)
        .map_err(|e| format!("write {}: {}", RESULTS_PATH, e))?;

    info!(results = out.len(), path = RESULTS_PATH, "run complete");
    Ok(())
}

async fn watch_signals(token: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm = signal(SignalKind::terminate()).expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown requested");
    token.cancel();
}
