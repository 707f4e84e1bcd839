//! Stack descriptor: the ordered list of layer directives that describes
//! one composite output.
//!
//! A stack is pure data, typically deserialized from the JSON provider
//! configuration. Order is semantically significant — directives paint
//! bottom to top — and is preserved unchanged through planning, rendering
//! and compositing. Validation of cross-field rules (the src/mask/color
//! triple) happens during planning so that bad directives are reported
//! with their position and target coordinate instead of aborting
//! construction.

mod directive;
mod zoom;

pub use directive::{Adjustment, BlendMode, LayerDirective, UnknownBlendMode};
pub use zoom::{ParseZoomRangeError, ZoomRange};

use serde::Deserialize;

/// Ordered stack of layer directives, bottom to top.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct StackSpec {
    layers: Vec<LayerDirective>,
}

impl StackSpec {
    /// Create a stack from an already-built list of directives.
    pub fn new(layers: Vec<LayerDirective>) -> Self {
        Self { layers }
    }

    /// Parse a stack from its JSON form: an array of directive objects.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The directives in paint order.
    pub fn layers(&self) -> &[LayerDirective] {
        &self.layers
    }

    /// Number of directives in the stack.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the stack has no directives at all.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl FromIterator<LayerDirective> for StackSpec {
    fn from_iter<I: IntoIterator<Item = LayerDirective>>(iter: I) -> Self {
        Self {
            layers: iter.into_iter().collect(),
        }
    }
}
