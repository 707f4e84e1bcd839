//! Tile coordinates in the slippy-map grid.

use std::fmt;

/// Address of one output tile: zoom level plus column/row in the grid.
///
/// Column counts west to east, row counts north to south, both starting
/// at zero. One invocation of the renderer targets exactly one coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Zoom level
    pub zoom: u8,
    /// X coordinate (east-west), 0 at west
    pub column: u32,
    /// Y coordinate (north-south), 0 at north
    pub row: u32,
}

impl TileCoord {
    /// Create a new tile coordinate.
    pub fn new(zoom: u8, column: u32, row: u32) -> Self {
        Self { zoom, column, row }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.column, self.row)
    }
}
