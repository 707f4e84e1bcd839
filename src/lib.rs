//! Tilewich - layered, composite tile rendering.
//!
//! This library renders one output tile by combining independently
//! rendered source layers according to a declarative stack description,
//! in the manner of a Photoshop layer stack: other configured tile
//! layers, local or remote bitmaps, and solid colors are painted bottom
//! to top with blend modes, opacity, adjustments and masks.
//!
//! The crate owns the orchestration only: it plans the minimal set of
//! distinct render jobs for a stack, runs them on parallel workers,
//! collects every result with a bounded wait, and hands the populated
//! cache to an external compositor. Per-layer rendering and the pixel
//! math are supplied by the caller through the [`source`] traits.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tilewich::cache::TileCache;
//! use tilewich::coord::TileCoord;
//! use tilewich::render::{RenderConfig, StackRenderer};
//! use tilewich::stack::StackSpec;
//!
//! let stack = StackSpec::from_json(
//!     r#"[
//!         {"src": "base"},
//!         {"src": "outlines", "mask": "halos"},
//!         {"src": "streets"}
//!     ]"#,
//! )?;
//!
//! let renderer = StackRenderer::new(source, compositor, RenderConfig::default());
//! let image = renderer.render_stack(&stack, TileCoord::new(12, 656, 1582), TileCache::new())?;
//! ```

pub mod cache;
pub mod coord;
pub mod planner;
pub mod render;
pub mod source;
pub mod stack;

/// Version of the tilewich library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
