//! Fan-out/fan-in rendering of a layer stack.
//!
//! One invocation flows through four steps:
//!
//! ```text
//! StackSpec ──► plan_jobs ──► dispatch ──► collect ──► composite
//!                  │             │            │            │
//!                  │        one worker   merge into   declaration-
//!              dedup against  per job,   TileCache,   order paint
//!              pre-seeded     shared     bounded      (external)
//!              cache          channel    deadline
//! ```
//!
//! Planning is single-threaded and fails fast on configuration errors, so
//! a broken stack never spawns a worker. All workers launch together once
//! planning succeeds — the degree of parallelism equals the job count.
//! The collector is the only blocking point; it owns the cache during
//! merge and hands it, fully populated, to the compositor. Compositing is
//! never invoked when any job failed or timed out.

mod collect;
mod dispatch;
mod error;

pub use error::{AggregateError, FailureKind, JobFailure, StackError};

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::cache::TileCache;
use crate::coord::TileCoord;
use crate::planner::plan_jobs;
use crate::source::{Compositor, TileSource};
use crate::stack::StackSpec;
use image::RgbaImage;

/// Standard base tile dimension for seamless bitmap tiling.
pub const DEFAULT_TILE_DIM: u32 = 256;

/// Tuning for a [`StackRenderer`].
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Bound on waiting for the whole set of job results (default: 10s)
    pub timeout: Duration,
    /// Base tile dimension bitmap references are tiled against (default: 256)
    pub tile_dim: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            tile_dim: DEFAULT_TILE_DIM,
        }
    }
}

impl RenderConfig {
    /// Set the collection timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the base tile dimension for bitmap tiling.
    pub fn with_tile_dim(mut self, tile_dim: u32) -> Self {
        self.tile_dim = tile_dim;
        self
    }
}

/// Renders layer stacks: plans jobs, fans out one worker per job, collects
/// results into the tile cache, then hands off to the compositor.
///
/// Stateless across invocations — the cache lives and dies with one
/// [`render_stack`](Self::render_stack) call.
pub struct StackRenderer {
    source: Arc<dyn TileSource>,
    compositor: Arc<dyn Compositor>,
    config: RenderConfig,
}

impl StackRenderer {
    /// Create a renderer over the given collaborators.
    pub fn new(
        source: Arc<dyn TileSource>,
        compositor: Arc<dyn Compositor>,
        config: RenderConfig,
    ) -> Self {
        Self {
            source,
            compositor,
            config,
        }
    }

    /// Render one tile of the stack.
    ///
    /// `tiles` may be pre-seeded with layers rendered elsewhere; those
    /// names are never rendered again. On success the compositor observed
    /// a cache holding every name the stack references. If planning finds
    /// invalid directives, or any job fails or times out, the compositor
    /// is not invoked and the error carries per-fingerprint detail.
    pub fn render_stack(
        &self,
        stack: &StackSpec,
        coord: TileCoord,
        mut tiles: TileCache,
    ) -> Result<RgbaImage, StackError> {
        let jobs = plan_jobs(
            stack,
            coord,
            &tiles,
            self.source.as_ref(),
            self.config.tile_dim,
        )?;
        debug!(%coord, jobs = jobs.len(), preseeded = tiles.len(), "planned render jobs");

        if !jobs.is_empty() {
            let (tx, rx) = mpsc::channel();
            let workers = dispatch::dispatch(&jobs, &self.source, &tx);
            // Workers hold the only remaining senders; the channel closes
            // once every worker has reported.
            drop(tx);

            let failures = collect::collect(&rx, &jobs, self.config.timeout, &mut tiles);
            let timed_out = failures
                .iter()
                .any(|failure| failure.kind == FailureKind::Timeout);
            reap(workers, timed_out);

            if !failures.is_empty() {
                return Err(AggregateError::new(failures).into());
            }
        }

        let image = self.compositor.composite(stack, coord, &tiles)?;
        Ok(image)
    }
}

/// Join every worker that has finished.
///
/// After a timeout, workers that are still running are detached: an OS
/// thread cannot be cancelled, and its eventual send lands on a closed
/// channel once the receiver is dropped.
fn reap(workers: Vec<dispatch::Worker>, timed_out: bool) {
    for worker in workers {
        if !timed_out || worker.handle.is_finished() {
            let _ = worker.handle.join();
            debug!(layer = %worker.name, "joined render worker");
        } else {
            warn!(layer = %worker.name, "detaching stalled render worker");
        }
    }
}
