//! Single-pass planner over the stack descriptor.

use std::collections::HashSet;
use tracing::debug;

use super::{DirectiveError, JobKind, PlanError, RenderJob};
use crate::cache::TileCache;
use crate::coord::TileCoord;
use crate::source::TileSource;
use crate::stack::StackSpec;

/// Walk the stack once and produce the deduplicated set of render jobs.
///
/// Names already present in `tiles` are treated as known and plan no job.
/// A name referenced multiple times across the stack — as a source in one
/// directive and a mask in another, or repeated as a source — plans
/// exactly once. Directives whose zoom range excludes `coord.zoom` are
/// skipped entirely.
///
/// Sources are classified as configured layers when the active
/// configuration knows the name, and as bitmap references otherwise.
/// Masks are always layer references; a mask the configuration does not
/// know is a planning error.
///
/// Every invalid directive found in the pass is reported together; any
/// error fails the whole invocation before a single worker is spawned.
/// Job order in the returned plan carries no meaning — jobs are mutually
/// independent.
pub fn plan_jobs(
    stack: &StackSpec,
    coord: TileCoord,
    tiles: &TileCache,
    source: &dyn TileSource,
    tile_dim: u32,
) -> Result<Vec<RenderJob>, PlanError> {
    let mut known: HashSet<String> = tiles.names().map(str::to_owned).collect();
    let mut jobs = Vec::new();
    let mut errors = Vec::new();

    for (index, layer) in stack.layers().iter().enumerate() {
        if let Some(range) = layer.zoom {
            if !range.contains(coord.zoom) {
                debug!(directive = index, %coord, zoom = %range, "directive outside zoom range, skipping");
                continue;
            }
        }

        if let (Some(src), Some(mask), Some(color)) = (&layer.source, &layer.mask, &layer.color) {
            errors.push(DirectiveError::SourceMaskColor {
                index,
                coord,
                source_name: src.clone(),
                mask: mask.clone(),
                color: color.clone(),
            });
            continue;
        }

        if let Some(name) = &layer.source {
            if known.insert(name.clone()) {
                let kind = if source.is_layer(name) {
                    JobKind::ConfiguredLayer
                } else {
                    JobKind::Bitmap { tile_dim }
                };
                debug!(layer = %name, %coord, ?kind, "planned source render job");
                jobs.push(RenderJob::new(name.clone(), kind, coord));
            }
        }

        if let Some(name) = &layer.mask {
            if !known.contains(name) {
                if !source.is_layer(name) {
                    errors.push(DirectiveError::UnknownMask {
                        index,
                        coord,
                        mask: name.clone(),
                    });
                    continue;
                }
                known.insert(name.clone());
                debug!(layer = %name, %coord, "planned mask render job");
                jobs.push(RenderJob::new(name.clone(), JobKind::ConfiguredLayer, coord));
            }
        }
    }

    if errors.is_empty() {
        Ok(jobs)
    } else {
        Err(PlanError { errors })
    }
}
