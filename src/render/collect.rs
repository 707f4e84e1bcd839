//! Fan-in: drain the completion channel with a bounded deadline.

use std::collections::HashMap;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::dispatch::JobOutcome;
use super::error::{FailureKind, JobFailure};
use crate::cache::TileCache;
use crate::planner::{Fingerprint, RenderJob};

/// Consume one outcome per dispatched job, merging successes into `tiles`.
///
/// Waits at most `timeout` for the whole set. Merging is keyed by name, so
/// any completion order yields the same final cache. When the deadline
/// expires, every still-outstanding fingerprint is marked as timed out
/// instead of blocking forever on a stalled worker. Returns the failure
/// list; empty means the cache now holds every planned name.
pub(crate) fn collect(
    rx: &Receiver<JobOutcome>,
    jobs: &[RenderJob],
    timeout: Duration,
    tiles: &mut TileCache,
) -> Vec<JobFailure> {
    let deadline = Instant::now() + timeout;
    let mut outstanding: HashMap<String, Fingerprint> = jobs
        .iter()
        .map(|job| (job.name().to_owned(), job.fingerprint()))
        .collect();
    let total = outstanding.len();
    let mut failures = Vec::new();
    let mut collected = 0usize;

    while !outstanding.is_empty() {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(outcome) => {
                let Some(fingerprint) = outstanding.remove(&outcome.name) else {
                    // Every fingerprint reports at most once; anything
                    // beyond that was never planned here.
                    warn!(layer = %outcome.name, "dropping unplanned render result");
                    continue;
                };
                collected += 1;
                match outcome.result {
                    Ok(image) => {
                        debug!(
                            layer = %fingerprint,
                            n = collected,
                            total,
                            "collected render result"
                        );
                        tiles.insert(fingerprint.name.clone(), image);
                    }
                    Err(error) => {
                        warn!(layer = %fingerprint, %error, "render job failed");
                        failures.push(JobFailure {
                            fingerprint,
                            kind: FailureKind::Render,
                            message: error.to_string(),
                        });
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                for (_, fingerprint) in outstanding.drain() {
                    warn!(layer = %fingerprint, ?timeout, "render job timed out");
                    failures.push(JobFailure {
                        fingerprint,
                        kind: FailureKind::Timeout,
                        message: format!("no result within {:?}", timeout),
                    });
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                // All senders gone without reporting. Cannot happen while
                // dispatch converts panics to outcomes, but a partial cache
                // must never be handed onward.
                for (_, fingerprint) in outstanding.drain() {
                    failures.push(JobFailure {
                        fingerprint,
                        kind: FailureKind::Render,
                        message: "worker exited without reporting".to_owned(),
                    });
                }
            }
        }
    }

    failures
}
