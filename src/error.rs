//! Errors raised while building a grid or playing on one.

use itertools::Itertools;
use thiserror::Error;

use crate::location::Location;
use crate::side::Side;

/// Reasons a grid cannot be set up as requested.
///
/// These are collected by a [`Builder`](crate::builder::Builder) while building and are never recovered from internally.
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
pub enum ConfigurationError {
    /// Width or height was zero.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    NonPositiveDimensions {
        /// Requested column count.
        width: usize,
        /// Requested row count.
        height: usize,
    },
    /// The power source was placed outside the grid.
    #[error("power source at {0:?} lies outside the grid")]
    SourceOutOfBounds(Location),
}

/// A layout generator broke one of its own invariants.
///
/// On a correctly connected grid this cannot happen; it is reported rather than ignored because a partial spanning tree would corrupt everything downstream.
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
pub enum GenerationError {
    /// The sorted edge list ran out before the tree spanned every piece.
    #[error("edge list exhausted after accepting {accepted} of {required} spanning edges")]
    EdgesExhausted {
        /// Edges accepted so far.
        accepted: usize,
        /// One fewer than the piece count.
        required: usize,
    },
}

/// A rejected player command. The grid is left untouched.
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
pub enum InvalidMove {
    /// No piece lives at this location.
    #[error("no piece at {0:?}")]
    OutOfBounds(Location),
    /// The source piece has no live link on this side.
    #[error("the power source has no live link toward {0}")]
    NotLinked(Side),
}

/// Everything that can stop a grid from being initialized.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum InitError {
    /// The builder was misconfigured, for every reason listed.
    #[error("invalid configuration: {}", .0.iter().join("; "))]
    Configuration(Vec<ConfigurationError>),
    /// Wire layout failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl From<ConfigurationError> for InitError {
    fn from(value: ConfigurationError) -> Self {
        Self::Configuration(vec![value])
    }
}
