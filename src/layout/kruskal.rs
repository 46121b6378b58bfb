use log::{debug, trace};
use rand::Rng;
use unordered_pair::UnorderedPair;

use crate::error::GenerationError;
use crate::grid::Grid;
use crate::location::Location;
use crate::side::{Rotation, Side};
use crate::union_find::Representatives;

/// A candidate wire between two adjacent pieces, weighted at random.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SpanningEdge {
    /// The two adjacent pieces joined.
    pub ends: UnorderedPair<Location>,
    /// Random sort key in `[0, node_count)`.
    pub weight: usize,
}

impl SpanningEdge {
    /// The side of `ends.0` facing `ends.1`.
    pub fn side(&self) -> Option<Side> {
        Side::direction_to(self.ends.0, self.ends.1)
    }
}

/// Every edge of the grid exactly once, each with a weight drawn uniformly from `[0, node_count)`.
///
/// Only forward edges are emitted (to the right and below), column by column, so no seen-set is needed.
/// The bottom right piece has no forward neighbor and emits nothing.
pub(crate) fn gen_edges<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Vec<SpanningEdge> {
    let max_weight = grid.node_count();
    let mut edges = Vec::with_capacity(
        // horizontal edges
        (grid.width() - 1) * grid.height()
            // vertical edges
            + (grid.height() - 1) * grid.width(),
    );

    for piece in grid.pieces() {
        for side in Side::FORWARD_VARIANTS {
            if let Some(neighbor) = piece.neighbor(*side) {
                edges.push(SpanningEdge {
                    ends: UnorderedPair(piece.location(), neighbor),
                    weight: rng.gen_range(0..max_weight),
                });
            }
        }
    }

    edges
}

/// Pick a minimum spanning tree of `edges` over every location of `grid`.
///
/// Edges are taken lightest first, ties in the order given, and accepted only when they join two different components.
/// Stops as soon as `node_count - 1` edges are accepted; running out of edges first is an error.
pub(crate) fn spanning_tree(grid: &Grid, mut edges: Vec<SpanningEdge>) -> Result<Vec<SpanningEdge>, GenerationError> {
    // stable, so equal weights keep their enumeration order
    edges.sort_by_key(|edge| edge.weight);

    let required = grid.node_count() - 1;
    let mut representatives = Representatives::new(grid.locations());
    let mut accepted = Vec::with_capacity(required);

    let mut worklist = edges.into_iter();
    while accepted.len() < required {
        let Some(edge) = worklist.next() else {
            return Err(GenerationError::EdgesExhausted { accepted: accepted.len(), required });
        };

        let UnorderedPair(from, to) = edge.ends;
        if representatives.same_component(from, to) {
            continue;
        }

        representatives.union(from, to);
        trace!("accepted spanning edge {:?} -> {:?} with weight {}", from, to, edge.weight);
        accepted.push(edge);
    }

    Ok(accepted)
}

/// Wire up a random spanning tree and return the accepted edges.
pub(super) fn lay_out<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Result<Vec<SpanningEdge>, GenerationError> {
    let edges = gen_edges(grid, rng);
    debug!("growing a spanning tree from {} candidate edges", edges.len());
    let tree = spanning_tree(grid, edges)?;

    for edge in &tree {
        let UnorderedPair(from, to) = edge.ends;
        // adjacency is guaranteed by gen_edges
        let Some(side) = edge.side() else { continue };

        if let Some(piece) = grid.piece_mut(from) {
            piece.stubs.set(side, true);
        }
        if let Some(piece) = grid.piece_mut(to) {
            piece.stubs.set(side.opposite(), true);
        }
    }

    Ok(tree)
}

/// Turn every piece counter-clockwise zero to three times, each count drawn uniformly.
///
/// Stubs move with their piece, so the underlying layout is only hidden, never changed.
pub(crate) fn scramble<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    for location in grid.locations().collect::<Vec<_>>() {
        let turns = rng.gen_range(0..4);
        if let Some(piece) = grid.piece_mut(location) {
            (0..turns).for_each(|_| piece.rotate(Rotation::CounterClockwise));
        }
    }
}
