//! Sides of a piece and the quarter turns that move stubs between them.

use strum::{Display, EnumString, VariantArray};

use crate::location::Location;

/// One of the four sides of a piece, which is also the direction of a step to the neighbor on that side.
///
/// Variants are declared in clockwise order starting from the top; [`Side::VARIANTS`] iterates them that way.
#[derive(Copy, Clone, VariantArray, EnumString, Display, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    /// Toward row 0. Parses from `up` as well.
    #[strum(to_string = "top", serialize = "up")]
    Top,
    /// Toward the last column.
    Right,
    /// Toward the last row. Parses from `down` as well.
    #[strum(to_string = "bottom", serialize = "down")]
    Bottom,
    /// Toward column 0.
    Left,
}

impl Side {
    /// The "forward" sides.
    ///
    /// Stepping forward from a location reaches a location later in column-major order, so enumerating only these from every piece visits each grid edge exactly once.
    pub const FORWARD_VARIANTS: &'static [Self] = &[Self::Right, Self::Bottom];

    /// Attempt the step from `location` across `self` and return the resultant [`Location`].
    ///
    /// The result is not bounds-checked; stepping off the top or left edge wraps to a huge coordinate, which is never within a grid.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Top => location.offset_by((0, -1)),
            Self::Right => location.offset_by((1, 0)),
            Self::Bottom => location.offset_by((0, 1)),
            Self::Left => location.offset_by((-1, 0)),
        }
    }

    /// The side facing this one across an edge.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// The side a stub on `self` ends up on after one quarter turn in `rotation`.
    pub fn turned(&self, rotation: Rotation) -> Self {
        match rotation {
            Rotation::Clockwise => match self {
                Self::Top => Self::Right,
                Self::Right => Self::Bottom,
                Self::Bottom => Self::Left,
                Self::Left => Self::Top,
            },
            Rotation::CounterClockwise => match self {
                Self::Top => Self::Left,
                Self::Left => Self::Bottom,
                Self::Bottom => Self::Right,
                Self::Right => Self::Top,
            },
        }
    }

    /// Determine the side of `a` that faces `b`.
    ///
    /// Returns [`None`] unless the two locations are orthogonally adjacent.
    pub fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|side| side.attempt_from(a) == b).copied()
    }
}

/// Direction of a quarter turn.
#[derive(Copy, Clone, VariantArray, EnumString, Display, Eq, PartialEq, Hash, Debug)]
#[strum(serialize_all = "kebab-case")]
pub enum Rotation {
    /// Top goes to right, right to bottom.
    #[strum(to_string = "clockwise", serialize = "cw")]
    Clockwise,
    /// Top goes to left, left to bottom.
    #[strum(to_string = "counter-clockwise", serialize = "ccw")]
    CounterClockwise,
}
