//! Result sink: drains the output channel and serializes the run's
//! results to disk.

use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::info;

use crate::fetcher::FetchResult;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to create {path}: {source}")]
    Create {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to encode results: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Drain the output channel until it closes, keeping arrival order.
pub async fn collect(mut results: mpsc::Receiver<FetchResult>) -> Vec<FetchResult> {
    let mut all = Vec::new();

    while let Some(result) = results.recv().await {
        info!(
            url = %result.url,
            status = result.status,
            length = result.length,
            error = ?result.error,
            "got result"
        );
        all.push(result);
    }

    all
}

/// Write the accumulated results as a pretty-printed JSON array. Entries
/// without an error omit the `error` field entirely.
pub fn write_json(path: &Path, results: &[FetchResult]) -> Result<(), SinkError> {
    let file = std::fs::File::create(path).map_err(|source| SinkError::Create {
        path: path.display().to_string(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, results)?;

    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|source| SinkError::Write {
            path: path.display().to_string(),
            source,
        })?;

    Ok(())
}
