//! Failure types for the fan-out/fan-in render phase.

use crate::planner::{Fingerprint, PlanError};
use crate::source::SourceError;
use std::fmt;
use thiserror::Error;

/// How a dispatched job failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The underlying render returned an error or panicked
    Render,
    /// No result arrived within the configured bound
    Timeout,
}

/// One failed job, attributed to its fingerprint.
///
/// The fingerprint lets callers retry exactly the jobs that failed while
/// reusing the rest of the cache.
#[derive(Debug, Clone)]
pub struct JobFailure {
    pub fingerprint: Fingerprint,
    pub kind: FailureKind,
    pub message: String,
}

impl fmt::Display for JobFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FailureKind::Render => write!(f, "{}: {}", self.fingerprint, self.message),
            FailureKind::Timeout => write!(f, "{}: timed out ({})", self.fingerprint, self.message),
        }
    }
}

/// One or more jobs failed or timed out; compositing was not attempted.
#[derive(Debug, Clone)]
pub struct AggregateError {
    failures: Vec<JobFailure>,
}

impl AggregateError {
    pub(crate) fn new(failures: Vec<JobFailure>) -> Self {
        Self { failures }
    }

    /// Every failure, one per fingerprint.
    pub fn failures(&self) -> &[JobFailure] {
        &self.failures
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} render job(s) failed: ", self.failures.len())?;
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateError {}

/// Top-level error returned by [`StackRenderer::render_stack`].
///
/// [`StackRenderer::render_stack`]: crate::render::StackRenderer::render_stack
#[derive(Debug, Error)]
pub enum StackError {
    /// The stack descriptor was invalid; nothing was dispatched
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// One or more render jobs failed or timed out
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    /// Every job succeeded but the compositing pass failed
    #[error("compositing failed: {0}")]
    Composite(#[from] SourceError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::TileCoord;
    use crate::planner::JobKind;

    fn fingerprint(name: &str) -> Fingerprint {
        Fingerprint {
            name: name.to_owned(),
            kind: JobKind::ConfiguredLayer,
            coord: TileCoord::new(12, 656, 1582),
        }
    }

    #[test]
    fn test_job_failure_display_distinguishes_timeouts() {
        let render = JobFailure {
            fingerprint: fingerprint("base"),
            kind: FailureKind::Render,
            message: "decode error".to_owned(),
        };
        let timeout = JobFailure {
            fingerprint: fingerprint("halos"),
            kind: FailureKind::Timeout,
            message: "no result within 10s".to_owned(),
        };

        assert_eq!(render.to_string(), "base@12/656/1582: decode error");
        assert!(timeout.to_string().contains("timed out"));
    }

    #[test]
    fn test_aggregate_display_names_every_failure() {
        let error = AggregateError::new(vec![
            JobFailure {
                fingerprint: fingerprint("A"),
                kind: FailureKind::Render,
                message: "boom".to_owned(),
            },
            JobFailure {
                fingerprint: fingerprint("B"),
                kind: FailureKind::Timeout,
                message: "no result within 10s".to_owned(),
            },
        ]);

        let message = error.to_string();
        assert!(message.starts_with("2 render job(s) failed"));
        assert!(message.contains("A@"));
        assert!(message.contains("B@"));
    }
}
