//! Job source: feeds newline-delimited URLs into the intake channel.

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read URL list: {0}")]
    Io(#[from] std::io::Error),
}

/// Read URLs line by line from `reader` and forward them to the intake
/// channel. Blank lines are skipped; every other line is forwarded
/// uninterpreted, malformed or not.
///
/// Cancellation stops the loop outright: no further lines are scanned or
/// sent. The sender is dropped on return, closing the intake — this is
/// the only place the intake is ever closed.
pub async fn feed_lines<R>(
    reader: R,
    intake: async_channel::Sender<String>,
    token: CancellationToken,
) -> Result<(), SourceError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut fed = 0usize;

    loop {
        let line = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            line = lines.next_line() => match line? {
                Some(line) => line,
                None => break, // input exhausted
            },
        };

        if line.is_empty() {
            continue;
        }

        // The intake is bounded, so a send can block while every worker
        // is busy; keep it responsive to shutdown.
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            sent = intake.send(line) => {
                if sent.is_err() {
                    break; // all workers gone
                }
                fed += 1;
            }
        }
    }

    debug!(fed, "job source finished");
    Ok(())
}
