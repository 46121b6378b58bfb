use std::collections::HashSet;

use crate::grid::Grid;
use crate::location::Location;
use crate::side::Side;

/// An inclusive rectangle `[x1, x2] x [y1, y2]`.
///
/// Coordinates are signed because subdivision can produce an empty rectangle with `x2 < x1`, which frames nothing and splits no further.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
struct Region {
    x1: isize,
    x2: isize,
    y1: isize,
    y2: isize,
}

impl Region {
    fn width_span(&self) -> isize {
        self.x2 - self.x1
    }

    fn height_span(&self) -> isize {
        self.y2 - self.y1
    }

    /// The stubs this region's frame puts on the piece at `(x, y)`.
    ///
    /// Top corners point down, bottom corners turn inward and up, the side columns run vertically and the bottom row horizontally.
    /// The top row between the corners and the interior get nothing.
    fn frame_stubs(&self, x: isize, y: isize) -> &'static [Side] {
        let on_side_column = x == self.x1 || x == self.x2;
        if y == self.y1 {
            if on_side_column { &[Side::Bottom] } else if y == self.y2 { &[Side::Left, Side::Right] } else { &[] }
        } else if y == self.y2 {
            if x == self.x1 {
                &[Side::Right, Side::Top]
            } else if x == self.x2 {
                &[Side::Left, Side::Top]
            } else {
                &[Side::Left, Side::Right]
            }
        } else if on_side_column {
            &[Side::Top, Side::Bottom]
        } else {
            &[]
        }
    }

    /// The sub-regions to frame next.
    ///
    /// The gating is deliberately lopsided: the left half is split off at width spans above one, the right half only above two,
    /// and the top half of a region starting on an odd row only when it is taller than one.
    /// Two-row regions keep both rows in each half rather than splitting vertically.
    fn subdivide(&self) -> Vec<Region> {
        let (dx, dy) = (self.width_span(), self.height_span());
        let (mx, my) = ((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2);
        let mut out = Vec::with_capacity(4);

        if dx > 1 && (self.y1 % 2 == 0 || dy > 1) {
            out.push(Region { x1: self.x1, x2: mx, y1: self.y1, y2: my });
        }
        if dx > 1 && self.x1 % 2 == 0 && self.y1 == 0 && self.y2 == 1 {
            // halves the absolute right edge, not the span
            out.push(Region { x1: self.x1, x2: self.x2 / 2, y1: self.y1, y2: self.y2 });
        }
        if dx >= 1 && dy == 1 {
            out.push(Region { x1: self.x1, x2: mx, y1: self.y1, y2: self.y2 });
        }
        if dx > 2 && dy >= 2 {
            out.push(Region { x1: mx + 1, x2: self.x2, y1: self.y1, y2: my });
        }
        if dx > 2 && dy == 1 {
            out.push(Region { x1: mx + 1, x2: self.x2, y1: self.y1, y2: self.y2 });
        }
        if dx > 1 && dy > 2 {
            out.push(Region { x1: self.x1, x2: mx, y1: my + 1, y2: self.y2 });
        }
        if dx > 2 && dy > 2 {
            out.push(Region { x1: mx + 1, x2: self.x2, y1: my + 1, y2: self.y2 });
        }

        out
    }
}

/// Frame the whole grid, then keep subdividing and framing until regions collapse to a single row or column.
///
/// Framing only ever sets stubs, so the order regions are visited in does not matter and a region reached twice is framed once.
/// Grids at least as tall as they are wide come out as a single tree; wide, short grids leave pieces unreachable.
pub(super) fn lay_out(grid: &mut Grid) {
    let whole = Region {
        x1: 0,
        x2: grid.width() as isize - 1,
        y1: 0,
        y2: grid.height() as isize - 1,
    };

    let mut worklist = vec![whole];
    let mut framed = HashSet::new();
    while let Some(region) = worklist.pop() {
        if !framed.insert(region) {
            continue;
        }

        for x in region.x1..=region.x2 {
            for y in region.y1..=region.y2 {
                let Some(piece) = grid.piece_mut(Location(x as usize, y as usize)) else { continue };
                region.frame_stubs(x, y).iter().for_each(|side| piece.stubs.set(*side, true));
            }
        }

        worklist.extend(region.subdivide());
    }
}
