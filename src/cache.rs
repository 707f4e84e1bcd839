//! Per-invocation cache of rendered layer images.
//!
//! The cache maps layer names to rendered images and lives for exactly one
//! `render_stack` call. The caller may pre-seed it with layers rendered
//! elsewhere (for example when memoizing across sibling stacks); pre-seeded
//! names are never rendered again. During collection the cache is mutated
//! only by the collector's single-threaded merge loop — workers never touch
//! it — and the compositor receives it read-only.

use image::RgbaImage;
use std::collections::HashMap;

/// Rendered layer images keyed by name.
#[derive(Debug, Clone, Default)]
pub struct TileCache {
    tiles: HashMap<String, RgbaImage>,
}

impl TileCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a rendered image under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, image: RgbaImage) {
        self.tiles.insert(name.into(), image);
    }

    /// Look up the image rendered for `name`.
    pub fn get(&self, name: &str) -> Option<&RgbaImage> {
        self.tiles.get(name)
    }

    /// Whether an image for `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.tiles.contains_key(name)
    }

    /// The names currently cached, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tiles.keys().map(String::as_str)
    }

    /// Number of cached images.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl FromIterator<(String, RgbaImage)> for TileCache {
    fn from_iter<I: IntoIterator<Item = (String, RgbaImage)>>(iter: I) -> Self {
        Self {
            tiles: iter.into_iter().collect(),
        }
    }
}
