//! Quote-source collaborators: the batch HTTP client, an offline fake feed,
//! and the background poller thread that hands snapshots to the pipeline.
//!
//! The feed is an infinite, possibly-failing sequence. A failed poll is
//! degraded into a placeholder snapshot so the table keeps rendering; the
//! core never special-cases error content beyond normal formatting.

mod fake;
mod iex;

pub use fake::FakeFeed;
pub use iex::{DEFAULT_BASE_URL, IexFeed};

use std::fmt;
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::pipeline::PipelineTx;
use crate::snapshot::Snapshot;

/// Column label of the degraded snapshot shown while the feed is down.
pub const CONNECTION_LOST: &str = "Connection lost!";

#[derive(Debug, Clone)]
pub enum FeedError {
    /// Transport-level failure (connect, TLS, non-2xx status).
    Http(String),
    /// The response decoded but left requested symbols unanswered.
    MissingSymbols(Vec<String>),
    /// The response body did not have the expected shape.
    Decode(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Http(msg) => write!(f, "quote request failed: {msg}"),
            FeedError::MissingSymbols(symbols) => {
                write!(f, "no quote data for: {}", symbols.join(", "))
            }
            FeedError::Decode(msg) => write!(f, "malformed quote response: {msg}"),
        }
    }
}

impl std::error::Error for FeedError {}

/// A source of quote snapshots, polled at a fixed interval.
pub trait QuoteFeed: Send {
    fn poll(&mut self) -> Result<Snapshot, FeedError>;
}

/// The snapshot rendered in place of real data while the feed is failing.
pub fn degraded_snapshot() -> Snapshot {
    Snapshot::placeholder(CONNECTION_LOST)
}

/// Spawns the background poller: fetch, hand off, sleep, forever.
///
/// The poller never blocks the foreground loop; a full hand-off slot is
/// overwritten, and a failed poll sends the degraded snapshot instead of
/// dying. The thread stops only when the consumer goes away and is
/// otherwise abandoned at process exit.
pub fn spawn_poller(
    mut feed: Box<dyn QuoteFeed>,
    interval: Duration,
    tx: PipelineTx,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        loop {
            let snapshot = match feed.poll() {
                Ok(snapshot) => {
                    debug!(rows = snapshot.row_count(), "poll succeeded");
                    snapshot
                }
                Err(e) => {
                    warn!("poll failed: {e}");
                    degraded_snapshot()
                }
            };
            if !tx.send_snapshot(snapshot) {
                break;
            }
            thread::sleep(interval);
        }
    })
}
