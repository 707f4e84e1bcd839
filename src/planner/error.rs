//! Planning-time configuration errors.

use crate::coord::TileCoord;
use std::fmt;
use thiserror::Error;

/// A single invalid directive, identified by its position in the stack
/// and the coordinate being rendered.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DirectiveError {
    /// src, mask and color were all populated on one directive
    #[error(
        "directive {index} at {coord}: src, mask and color cannot all be set \
         (src={source_name:?}, mask={mask:?}, color={color:?})"
    )]
    SourceMaskColor {
        index: usize,
        coord: TileCoord,
        // Not named `source`: thiserror reserves that name for the
        // error-source chain.
        source_name: String,
        mask: String,
        color: String,
    },

    /// A mask referenced a name with no configured layer behind it
    #[error("directive {index} at {coord}: mask {mask:?} is not a configured layer")]
    UnknownMask {
        index: usize,
        coord: TileCoord,
        mask: String,
    },
}

/// Planning failed; no workers were spawned.
///
/// Carries every invalid directive found in the planning pass so a broken
/// stack is reported in one round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanError {
    pub errors: Vec<DirectiveError>,
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid stack ({} error(s)): ", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for PlanError {}
