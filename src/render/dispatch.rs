//! Worker fan-out: one thread per planned job.
//!
//! Every worker is launched after planning completes, runs exactly one
//! job, and reports exactly one outcome on the shared completion channel.
//! Workers never touch the tile cache; the channel is the only thing they
//! share with the collector. A panic inside a render is caught at the
//! worker boundary and converted into a failed outcome — letting it
//! propagate would orphan the collector's wait on that fingerprint.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::debug;

use crate::planner::{JobKind, RenderJob};
use crate::source::{SourceError, TileSource};
use image::RgbaImage;

/// What a worker reports back on the completion channel.
pub(crate) struct JobOutcome {
    pub name: String,
    pub result: Result<RgbaImage, SourceError>,
}

/// A spawned worker, kept for joining once collection ends.
pub(crate) struct Worker {
    pub name: String,
    pub handle: JoinHandle<()>,
}

/// Launch one worker per job, all together.
///
/// Each worker holds a clone of `tx` and sends exactly one outcome; the
/// send result is ignored because a collector that has already given up
/// on a stalled invocation drops the receiver.
pub(crate) fn dispatch(
    jobs: &[RenderJob],
    source: &Arc<dyn TileSource>,
    tx: &Sender<JobOutcome>,
) -> Vec<Worker> {
    jobs.iter()
        .map(|job| {
            let source = Arc::clone(source);
            let tx = tx.clone();
            let work = job.clone();
            debug!(layer = %job.name(), coord = %job.coord(), "starting render worker");

            let handle = thread::Builder::new()
                .name(format!("render-{}", job.name()))
                .spawn(move || {
                    let result = run_job(&work, source.as_ref());
                    let _ = tx.send(JobOutcome {
                        name: work.name().to_owned(),
                        result,
                    });
                })
                .expect("failed to spawn render worker");

            Worker {
                name: job.name().to_owned(),
                handle,
            }
        })
        .collect()
}

fn run_job(job: &RenderJob, source: &dyn TileSource) -> Result<RgbaImage, SourceError> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| match job.kind() {
        JobKind::ConfiguredLayer => source.render_layer(job.name(), job.coord()),
        JobKind::Bitmap { tile_dim } => source.render_bitmap(job.name(), job.coord(), tile_dim),
    }));

    match outcome {
        Ok(result) => result,
        Err(payload) => Err(SourceError::RenderFailed(panic_message(payload))),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        format!("render panicked: {}", text)
    } else if let Some(text) = payload.downcast_ref::<String>() {
        format!("render panicked: {}", text)
    } else {
        "render panicked".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::TileCoord;
    use std::sync::mpsc;

    /// Source whose layer render always panics.
    struct PanickingSource;

    impl TileSource for PanickingSource {
        fn is_layer(&self, _: &str) -> bool {
            true
        }

        fn render_layer(&self, _: &str, _: TileCoord) -> Result<RgbaImage, SourceError> {
            panic!("renderer exploded")
        }

        fn render_bitmap(&self, _: &str, _: TileCoord, _: u32) -> Result<RgbaImage, SourceError> {
            Ok(RgbaImage::new(1, 1))
        }
    }

    #[test]
    fn test_panic_becomes_failed_outcome() {
        let source: Arc<dyn TileSource> = Arc::new(PanickingSource);
        let jobs = vec![RenderJob::new(
            "base".to_owned(),
            JobKind::ConfiguredLayer,
            TileCoord::new(12, 0, 0),
        )];
        let (tx, rx) = mpsc::channel();

        let workers = dispatch(&jobs, &source, &tx);
        drop(tx);

        let outcome = rx.recv().unwrap();
        assert_eq!(outcome.name, "base");
        let error = outcome.result.unwrap_err();
        assert!(error.to_string().contains("renderer exploded"));

        // Exactly one outcome per worker, then the channel closes.
        assert!(rx.recv().is_err());
        for worker in workers {
            worker.handle.join().unwrap();
        }
    }

    #[test]
    fn test_each_job_reports_once() {
        struct CountingSource;

        impl TileSource for CountingSource {
            fn is_layer(&self, _: &str) -> bool {
                true
            }

            fn render_layer(&self, name: &str, _: TileCoord) -> Result<RgbaImage, SourceError> {
                if name == "bad" {
                    Err(SourceError::RenderFailed("no good".to_owned()))
                } else {
                    Ok(RgbaImage::new(1, 1))
                }
            }

            fn render_bitmap(
                &self,
                _: &str,
                _: TileCoord,
                _: u32,
            ) -> Result<RgbaImage, SourceError> {
                Ok(RgbaImage::new(1, 1))
            }
        }

        let source: Arc<dyn TileSource> = Arc::new(CountingSource);
        let coord = TileCoord::new(12, 0, 0);
        let jobs = vec![
            RenderJob::new("good".to_owned(), JobKind::ConfiguredLayer, coord),
            RenderJob::new("bad".to_owned(), JobKind::ConfiguredLayer, coord),
        ];
        let (tx, rx) = mpsc::channel();

        let workers = dispatch(&jobs, &source, &tx);
        drop(tx);

        let outcomes: Vec<_> = rx.into_iter().collect();
        assert_eq!(outcomes.len(), 2);
        for worker in workers {
            worker.handle.join().unwrap();
        }
    }
}
