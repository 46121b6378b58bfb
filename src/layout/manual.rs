use crate::grid::Grid;
use crate::side::Side;

/// The row where the side columns turn inward and the interior runs all four ways.
const JUNCTION_ROW: usize = 4;

/// Hand-authored pattern: vertical wires everywhere, closed off at the top and bottom rows, with a crossbar on [`JUNCTION_ROW`].
///
/// The result is a single tree when the grid is one column wide or more than five rows tall.
pub(super) fn lay_out(grid: &mut Grid) {
    let last_col = grid.width() - 1;
    let last_row = grid.height() - 1;

    for location in grid.locations().collect::<Vec<_>>() {
        let (x, y) = (location.0, location.1);
        let stubs: &[Side] = if y == 0 {
            &[Side::Bottom]
        } else if y == last_row {
            &[Side::Top]
        } else if x == 0 || x == last_col {
            // side columns turn inward on the junction row
            match (y == JUNCTION_ROW, x == 0) {
                (true, true) => &[Side::Top, Side::Bottom, Side::Right],
                (true, false) => &[Side::Top, Side::Bottom, Side::Left],
                _ => &[Side::Top, Side::Bottom],
            }
        } else if y == JUNCTION_ROW {
            &[Side::Top, Side::Right, Side::Bottom, Side::Left]
        } else {
            &[Side::Top, Side::Bottom]
        };

        if let Some(piece) = grid.piece_mut(location) {
            stubs.iter().for_each(|side| piece.stubs.set(*side, true));
        }
    }
}
