//! Individual layer directives and their field types.

use super::ZoomRange;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Blend mode applied when a layer is painted onto the accumulator.
///
/// The blend math itself lives in the compositor; this crate only carries
/// the mode through from configuration to the compositing handoff.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    #[default]
    Normal,
    Screen,
    Add,
    Multiply,
    Subtract,
    LinearLight,
    HardLight,
}

/// Error for a blend mode string the compositor does not support.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown blend mode {0:?}")]
pub struct UnknownBlendMode(pub String);

impl BlendMode {
    /// The configuration string for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Screen => "screen",
            BlendMode::Add => "add",
            BlendMode::Multiply => "multiply",
            BlendMode::Subtract => "subtract",
            BlendMode::LinearLight => "linear light",
            BlendMode::HardLight => "hard light",
        }
    }
}

impl FromStr for BlendMode {
    type Err = UnknownBlendMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(BlendMode::Normal),
            "screen" => Ok(BlendMode::Screen),
            "add" => Ok(BlendMode::Add),
            "multiply" => Ok(BlendMode::Multiply),
            "subtract" => Ok(BlendMode::Subtract),
            "linear light" => Ok(BlendMode::LinearLight),
            "hard light" => Ok(BlendMode::HardLight),
            other => Err(UnknownBlendMode(other.to_owned())),
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BlendMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// One adjustment application: a name plus opaque parameters, passed
/// through to the compositor untouched.
///
/// The JSON form is an array whose first element is the adjustment name
/// and whose remaining elements are its parameters, e.g.
/// `["curves", [0, 181, 255]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjustment {
    pub name: String,
    pub parameters: Vec<serde_json::Value>,
}

impl<'de> Deserialize<'de> for Adjustment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AdjustmentVisitor;

        impl<'de> Visitor<'de> for AdjustmentVisitor {
            type Value = Adjustment;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an adjustment array [name, params...]")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Adjustment, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let name: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let mut parameters = Vec::new();
                while let Some(value) = seq.next_element()? {
                    parameters.push(value);
                }
                Ok(Adjustment { name, parameters })
            }
        }

        deserializer.deserialize_seq(AdjustmentVisitor)
    }
}

/// One entry of a stack.
///
/// At most two of `source`, `mask` and `color` may be populated on the
/// same directive; the triple is rejected during planning, not here, so
/// the error can name the directive's position and target coordinate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayerDirective {
    /// Named layer reference, or a literal bitmap path/URL.
    #[serde(rename = "src")]
    pub source: Option<String>,
    /// Layer reference used as a mask; always a configured layer.
    pub mask: Option<String>,
    /// Literal fill color, e.g. `"#ff9900"`.
    pub color: Option<String>,
    /// Restricts the directive to these zoom levels.
    pub zoom: Option<ZoomRange>,
    /// Blend mode used when painting this layer.
    #[serde(rename = "mode")]
    pub mode: BlendMode,
    /// Opacity in `[0, 1]`; values outside the range are clamped.
    #[serde(deserialize_with = "clamped_opacity")]
    pub opacity: f32,
    /// Adjustments applied in order before painting.
    pub adjustments: Vec<Adjustment>,
}

impl Default for LayerDirective {
    fn default() -> Self {
        Self {
            source: None,
            mask: None,
            color: None,
            zoom: None,
            mode: BlendMode::Normal,
            opacity: 1.0,
            adjustments: Vec::new(),
        }
    }
}

impl LayerDirective {
    /// Directive painting a named layer or bitmap reference.
    pub fn from_source(name: impl Into<String>) -> Self {
        Self {
            source: Some(name.into()),
            ..Self::default()
        }
    }

    /// Directive painting a solid color.
    pub fn from_color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    /// Add a mask reference.
    pub fn with_mask(mut self, name: impl Into<String>) -> Self {
        self.mask = Some(name.into());
        self
    }

    /// Add a color literal.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Restrict the directive to a zoom range.
    pub fn with_zoom(mut self, zoom: ZoomRange) -> Self {
        self.zoom = Some(zoom);
        self
    }

    /// Set the blend mode.
    pub fn with_mode(mut self, mode: BlendMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the opacity, clamped to `[0, 1]`.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

fn clamped_opacity<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let opacity = f32::deserialize(deserializer)?;
    Ok(opacity.clamp(0.0, 1.0))
}
