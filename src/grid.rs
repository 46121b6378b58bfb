use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use log::debug;
use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;

use crate::error::InvalidMove;
use crate::layout::SpanningEdge;
use crate::location::{Dimension, Location};
use crate::piece::{Piece, Wires};
use crate::side::{Rotation, Side};

/// A rectangular grid of [`Piece`]s and the single power source moving among them.
///
/// This is the whole state of one game. It is normally obtained from a [`GridBuilder`](crate::builder::GridBuilder) or [`initialize`](crate::initialize),
/// which lay out wires, resolve connectivity, size the power radius and run the first propagation.
///
/// Pieces are stored in an arena indexed by [`Location`]; every neighbor relation is a [`Location`] as well.
#[derive(Clone, Debug)]
pub struct Grid {
    pub(crate) pieces: Array2<Piece>,
    // width, height
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) source: Location,
    pub(crate) radius: usize,
    pub(crate) powered: HashSet<Location>,
    pub(crate) spanning_edges: Vec<SpanningEdge>,
}

impl Grid {
    /// Allocate a bare grid of `dims`, given in `(width, height)` order, and link every piece to its orthogonal neighbors.
    ///
    /// No wires are laid. The source starts in the top left corner and the radius is zero until estimated.
    pub(crate) fn new(dims: (Dimension, Dimension)) -> Self {
        let mut pieces = Array2::from_shape_fn((dims.1.get(), dims.0.get()), |ind| Piece::new(Location::from(ind)));

        for x in 0..dims.0.get() {
            for y in 0..dims.1.get() {
                let location = Location(x, y);
                // link down and to the right, if possible, and have the partner link back
                for side in Side::FORWARD_VARIANTS {
                    let other = side.attempt_from(location);
                    if !other.within(dims) {
                        continue;
                    }

                    pieces[location.as_index()].set_neighbor(*side, other);
                    pieces[other.as_index()].set_neighbor(side.opposite(), location);
                }
            }
        }

        let source = Location(0, 0);
        pieces[source.as_index()].is_source = true;

        Self {
            pieces,
            dims,
            source,
            radius: 0,
            powered: HashSet::new(),
            spanning_edges: Vec::new(),
        }
    }

    /// `(width, height)`
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.dims.0.get()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.dims.1.get()
    }

    /// Number of pieces, `width * height`.
    pub fn node_count(&self) -> usize {
        self.pieces.len()
    }

    /// Whether `location` lies on this grid.
    pub fn contains(&self, location: Location) -> bool {
        location.within(self.dims)
    }

    /// The piece at `location`, or [`None`] if it is off the grid.
    pub fn piece(&self, location: Location) -> Option<&Piece> {
        self.pieces.get(location.as_index())
    }

    pub(crate) fn piece_mut(&mut self, location: Location) -> Option<&mut Piece> {
        self.pieces.get_mut(location.as_index())
    }

    /// Every location in column-major order: column by column, top to bottom within a column.
    pub fn locations(&self) -> impl Iterator<Item = Location> {
        let height = self.height();
        (0..self.width()).flat_map(move |x| (0..height).map(move |y| Location(x, y)))
    }

    /// Every piece, in the order of [`Self::locations`].
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.locations().map(move |location| &self.pieces[location.as_index()])
    }

    /// Where the power source sits.
    pub fn source(&self) -> Location {
        self.source
    }

    /// How many hops from the source a piece may be and still receive power.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// The edges accepted while growing a random spanning tree. Empty for every other layout.
    pub fn spanning_edges(&self) -> &[SpanningEdge] {
        &self.spanning_edges
    }

    /// Rotate the piece at `location` by a quarter turn.
    ///
    /// Only stubs change. Call [`Self::resolve_connectivity`] and [`Self::propagate`] before reading links or power,
    /// or use [`Self::rotate_and_refresh`] to do all of it.
    pub fn rotate(&mut self, location: Location, rotation: Rotation) -> Result<(), InvalidMove> {
        let piece = self.piece_mut(location).ok_or(InvalidMove::OutOfBounds(location))?;
        piece.rotate(rotation);
        Ok(())
    }

    /// Rotate, then resolve connectivity and propagate again.
    ///
    /// An out of bounds `location` leaves the grid exactly as it was.
    pub fn rotate_and_refresh(&mut self, location: Location, rotation: Rotation) -> Result<&HashSet<Location>, InvalidMove> {
        if !self.contains(location) {
            return Err(InvalidMove::OutOfBounds(location));
        }

        self.rotate(location, rotation)?;
        self.resolve_connectivity();
        Ok(self.propagate())
    }

    /// Recompute the link flags of every piece from the stubs of it and its neighbors.
    ///
    /// A link on side S exists iff this piece has a stub on S and the neighbor across S has a stub on the opposite side.
    pub fn resolve_connectivity(&mut self) {
        let stubs = self.pieces.map(|piece| piece.stubs);

        for piece in self.pieces.iter_mut() {
            let mut links = Wires::default();
            for side in piece.stubs.sides() {
                let Some(neighbor) = piece.neighbor(side) else { continue };
                links.set(side, stubs[neighbor.as_index()].get(side.opposite()));
            }
            piece.links = links;
        }
    }

    /// Whether two pieces are adjacent and joined by matching stubs, judged from stubs alone.
    pub fn is_connected(&self, a: Location, b: Location) -> bool {
        let Some(side) = Side::direction_to(a, b) else { return false };
        match (self.piece(a), self.piece(b)) {
            (Some(from), Some(to)) => from.stubs.get(side) && to.stubs.get(side.opposite()),
            _ => false,
        }
    }

    /// Live links as an undirected graph over locations, each edge labelled with the forward side it crosses.
    ///
    /// Pieces without any link are still present as isolated nodes.
    pub fn link_graph(&self) -> UnGraphMap<Location, Side> {
        let mut graph = UnGraphMap::with_capacity(self.node_count(), self.node_count());
        for piece in self.pieces() {
            graph.add_node(piece.location);
            for side in Side::FORWARD_VARIANTS {
                if !piece.links.get(*side) {
                    continue;
                }
                if let Some(neighbor) = piece.neighbor(*side) {
                    graph.add_edge(piece.location, neighbor, *side);
                }
            }
        }

        graph
    }

    /// Move the power source one piece across `side`.
    ///
    /// Fails, without touching anything, unless the current source piece has a live link on that side.
    /// On success the caller must propagate again; [`Self::move_source_and_refresh`] does so.
    pub fn move_source(&mut self, side: Side) -> bool {
        self.try_move_source(side).is_ok()
    }

    pub(crate) fn try_move_source(&mut self, side: Side) -> Result<Location, InvalidMove> {
        let current = &self.pieces[self.source.as_index()];
        let destination = match current.neighbor(side) {
            Some(destination) if current.links.get(side) => destination,
            _ => return Err(InvalidMove::NotLinked(side)),
        };

        self.pieces[self.source.as_index()].is_source = false;
        self.pieces[destination.as_index()].is_source = true;
        debug!("power source moved {} from {:?} to {:?}", side, self.source, destination);
        self.source = destination;

        Ok(destination)
    }

    /// Move the source, resolve connectivity and propagate again.
    pub fn move_source_and_refresh(&mut self, side: Side) -> Result<&HashSet<Location>, InvalidMove> {
        self.try_move_source(side)?;
        self.resolve_connectivity();
        Ok(self.propagate())
    }

    /// Read-only snapshot of the powered pieces as of the last propagation.
    pub fn powered(&self) -> &HashSet<Location> {
        &self.powered
    }

    /// Whether every piece is powered. Deciding that this means victory is up to the caller.
    pub fn solved(&self) -> bool {
        self.powered.len() == self.node_count()
    }

    /// Put `source` at an arbitrary location, bypassing the link check. Used while configuring a new grid.
    pub(crate) fn place_source(&mut self, location: Location) {
        self.pieces[self.source.as_index()].is_source = false;
        self.pieces[location.as_index()].is_source = true;
        self.source = location;
    }
}

// bits: top 1, right 2, bottom 4, left 8
const LIGHT_GLYPHS: [char; 16] = [' ', '╵', '╶', '└', '╷', '│', '┌', '├', '╴', '┘', '─', '┴', '┐', '┤', '┬', '┼'];
const HEAVY_GLYPHS: [char; 16] = [' ', '╹', '╺', '┗', '╻', '┃', '┏', '┣', '╸', '┛', '━', '┻', '┓', '┫', '┳', '╋'];

fn glyph(piece: &Piece) -> char {
    let bits = piece.stubs.bits() as usize;
    if piece.is_powered { HEAVY_GLYPHS[bits] } else { LIGHT_GLYPHS[bits] }
}

fn print(board: Array2<char>) -> String {
    let mut out = String::with_capacity(board.nrows() * (board.ncols() + 1));

    for row in board.rows() {
        for col in row {
            out.push(*col);
        }
        out.push('\n');
    }

    out
}

/// One line per row, each piece drawn as a box-drawing glyph of its stubs; heavy glyphs are powered.
impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", print(self.pieces.map(glyph)))
    }
}
