//! Zoom restrictions on stack directives.
//!
//! A directive may be limited to a zoom range given either as a single
//! level (`"12"` or `12`) or an inclusive span (`"12-18"`). A directive
//! whose range excludes the target zoom is skipped entirely: it plans no
//! job and is invisible to compositing.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Inclusive zoom range attached to a layer directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomRange {
    lo: u8,
    hi: u8,
}

/// Error parsing a zoom restriction string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid zoom range {0:?}: expected \"12\" or \"12-18\"")]
pub struct ParseZoomRangeError(pub String);

impl ZoomRange {
    /// Range covering `lo` through `hi` inclusive, in either order.
    pub fn new(lo: u8, hi: u8) -> Self {
        Self {
            lo: lo.min(hi),
            hi: lo.max(hi),
        }
    }

    /// Range covering exactly one zoom level.
    pub fn single(zoom: u8) -> Self {
        Self { lo: zoom, hi: zoom }
    }

    /// Whether `zoom` falls inside the range.
    pub fn contains(&self, zoom: u8) -> bool {
        self.lo <= zoom && zoom <= self.hi
    }
}

impl FromStr for ZoomRange {
    type Err = ParseZoomRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseZoomRangeError(s.to_owned());
        match s.split_once('-') {
            Some((lo, hi)) => {
                let lo = lo.trim().parse().map_err(|_| err())?;
                let hi = hi.trim().parse().map_err(|_| err())?;
                Ok(Self::new(lo, hi))
            }
            None => {
                let zoom = s.trim().parse().map_err(|_| err())?;
                Ok(Self::single(zoom))
            }
        }
    }
}

impl fmt::Display for ZoomRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lo == self.hi {
            write!(f, "{}", self.lo)
        } else {
            write!(f, "{}-{}", self.lo, self.hi)
        }
    }
}

impl<'de> Deserialize<'de> for ZoomRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // The JSON form is either a string or a bare number.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Level(u8),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Level(zoom) => Ok(ZoomRange::single(zoom)),
            Raw::Text(text) => text.parse().map_err(de::Error::custom),
        }
    }
}
