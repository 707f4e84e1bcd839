//! Planned units of render work.

use crate::coord::TileCoord;
use std::fmt;

/// How a planned job renders its layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    /// The name refers to a layer in the active configuration.
    ConfiguredLayer,
    /// The name is a local path or URL, tiled seamlessly against
    /// `tile_dim`×`tile_dim` parent tiles.
    Bitmap { tile_dim: u32 },
}

/// One planned unit of render work.
///
/// Jobs are independent of one another: the plan is a flat fan-out, no
/// job depends on another job's result. At most one job with a given
/// fingerprint is ever scheduled per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderJob {
    name: String,
    kind: JobKind,
    coord: TileCoord,
}

impl RenderJob {
    pub(crate) fn new(name: String, kind: JobKind, coord: TileCoord) -> Self {
        Self { name, kind, coord }
    }

    /// The layer reference this job resolves.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The kind of rendering the job performs.
    pub fn kind(&self) -> JobKind {
        self.kind
    }

    /// The coordinate being rendered.
    pub fn coord(&self) -> TileCoord {
        self.coord
    }

    /// The job's identity, used to attribute results and failures.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint {
            name: self.name.clone(),
            kind: self.kind,
            coord: self.coord,
        }
    }
}

/// Identity of a render job: name, kind and coordinate.
///
/// Failures carry their fingerprint so callers can retry exactly the jobs
/// that failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub name: String,
    pub kind: JobKind,
    pub coord: TileCoord,
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.coord)
    }
}
