use std::num::NonZero;

use ndarray::Ix;

/// A column or row index.
pub type Coord = usize;
/// A width or height. Grids are never empty.
pub type Dimension = NonZero<Coord>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(column, row)` on a grid. The top left corner is `Location(0, 0)`.
///
/// The derived ordering is ascending column, then row, which is the iteration order used wherever ties must be broken reproducibly.
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// Index into the row-major piece array.
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// Whether this location lies on a grid of `dims`, given in `(width, height)` order.
    pub(crate) fn within(&self, dims: (Dimension, Dimension)) -> bool {
        self.0 < dims.0.get() && self.1 < dims.1.get()
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}
