//! Job planning: walk the stack once and decide what must be rendered.
//!
//! Planning is a pure, single-threaded pass over the stack descriptor.
//! It produces the deduplicated set of render jobs for one coordinate and
//! gathers every configuration error it finds, so bad stacks fail before
//! a single worker is spawned. The "known names" set driving dedup is
//! local to the pass — concurrency only begins after planning returns.

mod error;
mod job;
mod plan;

pub use error::{DirectiveError, PlanError};
pub use job::{Fingerprint, JobKind, RenderJob};
pub use plan::plan_jobs;
