//! External collaborator contracts.
//!
//! The orchestration core does not render pixels itself. Per-layer
//! rendering and the final compositing pass are supplied by the caller
//! through the traits here, mirroring how the tile generator abstracts
//! its imagery providers: the core depends on `Arc<dyn TileSource>` and
//! `Arc<dyn Compositor>`, never on concrete renderers.

use crate::cache::TileCache;
use crate::coord::TileCoord;
use crate::stack::StackSpec;
use image::RgbaImage;
use thiserror::Error;

/// Errors reported by tile sources and compositors.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The name does not resolve to anything renderable
    #[error("unknown layer {0:?}")]
    UnknownLayer(String),

    /// The underlying render operation failed
    #[error("render failed: {0}")]
    RenderFailed(String),

    /// A bitmap reference could not be fetched or decoded
    #[error("bitmap {reference:?} failed: {message}")]
    BitmapFailed {
        reference: String,
        message: String,
    },

    /// The compositing pass itself failed
    #[error("composite failed: {0}")]
    CompositeFailed(String),
}

/// Supplies per-layer rendering for one invocation.
///
/// Implementations must be safe to share across worker threads; each
/// render call runs on its own worker and must not assume any ordering
/// relative to sibling calls.
pub trait TileSource: Send + Sync {
    /// Whether `name` refers to a layer in the active configuration.
    fn is_layer(&self, name: &str) -> bool;

    /// Render one configured layer at the given coordinate.
    fn render_layer(&self, name: &str, coord: TileCoord) -> Result<RgbaImage, SourceError>;

    /// Fetch a local file or URL bitmap and tile it seamlessly against the
    /// coordinate, assuming `tile_dim`×`tile_dim` parent tiles.
    fn render_bitmap(
        &self,
        reference: &str,
        coord: TileCoord,
        tile_dim: u32,
    ) -> Result<RgbaImage, SourceError>;
}

/// Produces the final composited image once every layer is rendered.
///
/// Invoked exactly once per successful invocation, with a cache holding
/// every name the stack references. Walks the directives in declaration
/// order and paints each onto an accumulator using its blend mode,
/// opacity, adjustments and mask.
pub trait Compositor: Send + Sync {
    fn composite(
        &self,
        stack: &StackSpec,
        coord: TileCoord,
        tiles: &TileCache,
    ) -> Result<RgbaImage, SourceError>;
}
