use strum::VariantArray;

use crate::location::Location;
use crate::side::{Rotation, Side};

/// One boolean per side of a piece.
///
/// Used both for wire stubs (set by layout generators and moved by rotation) and for links (derived from stubs).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Wires {
    /// Flag on [`Side::Top`].
    pub top: bool,
    /// Flag on [`Side::Right`].
    pub right: bool,
    /// Flag on [`Side::Bottom`].
    pub bottom: bool,
    /// Flag on [`Side::Left`].
    pub left: bool,
}

impl Wires {
    /// The flag on `side`.
    pub fn get(&self, side: Side) -> bool {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    pub(crate) fn set(&mut self, side: Side, value: bool) {
        match side {
            Side::Top => self.top = value,
            Side::Right => self.right = value,
            Side::Bottom => self.bottom = value,
            Side::Left => self.left = value,
        }
    }

    /// Every side with its flag set, in clockwise order from the top.
    pub fn sides(&self) -> impl Iterator<Item = Side> + '_ {
        Side::VARIANTS.iter().copied().filter(|side| self.get(*side))
    }

    /// Packed as top 1, right 2, bottom 4, left 8.
    pub fn bits(&self) -> u8 {
        Side::VARIANTS.iter()
            .enumerate()
            .filter(|(_, side)| self.get(**side))
            .fold(0, |acc, (bit, _)| acc | (1u8 << bit))
    }

    /// How many sides are set.
    pub fn count(&self) -> usize {
        self.sides().count()
    }

    /// These flags after one quarter turn.
    pub(crate) fn rotated(&self, rotation: Rotation) -> Self {
        let mut out = Self::default();
        for side in self.sides() {
            out.set(side.turned(rotation), true);
        }
        out
    }
}

/// A single grid cell.
///
/// Neighbors are held as [`Location`]s into the owning [`Grid`](crate::Grid), never as references.
#[derive(Clone, Debug)]
pub struct Piece {
    pub(crate) location: Location,
    pub(crate) stubs: Wires,
    // derived from stubs, see Grid::resolve_connectivity
    pub(crate) links: Wires,
    pub(crate) is_source: bool,
    pub(crate) is_powered: bool,
    // None is "infinitely far", i.e. unreached
    pub(crate) distance: Option<usize>,
    pub(crate) neighbors: [Option<Location>; 4],
}

impl Piece {
    pub(crate) fn new(location: Location) -> Self {
        Self {
            location,
            stubs: Wires::default(),
            links: Wires::default(),
            is_source: false,
            is_powered: false,
            distance: None,
            neighbors: [None; 4],
        }
    }

    /// Where this piece sits. Never changes.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Shorthand for `location().0`.
    pub fn col(&self) -> usize {
        self.location.0
    }

    /// Shorthand for `location().1`.
    pub fn row(&self) -> usize {
        self.location.1
    }

    /// Which sides this piece emits a wire toward.
    pub fn stubs(&self) -> Wires {
        self.stubs
    }

    /// Which stubs currently meet a matching stub on the neighboring piece.
    pub fn links(&self) -> Wires {
        self.links
    }

    /// Whether the power source currently sits here.
    pub fn is_source(&self) -> bool {
        self.is_source
    }

    /// Whether the last propagation reached this piece within the radius.
    pub fn is_powered(&self) -> bool {
        self.is_powered
    }

    /// Hop count from the power source over live links, or [`None`] if the last propagation did not reach this piece.
    pub fn distance(&self) -> Option<usize> {
        self.distance
    }

    /// The adjacent piece across `side`, if not at the border.
    pub fn neighbor(&self, side: Side) -> Option<Location> {
        self.neighbors[side as usize]
    }

    /// Every existing neighbor with the side it lies across.
    pub fn neighbors(&self) -> impl Iterator<Item = (Side, Location)> + '_ {
        Side::VARIANTS.iter()
            .filter_map(|side| self.neighbor(*side).map(|location| (*side, location)))
    }

    pub(crate) fn set_neighbor(&mut self, side: Side, location: Location) {
        self.neighbors[side as usize] = Some(location);
    }

    pub(crate) fn rotate(&mut self, rotation: Rotation) {
        self.stubs = self.stubs.rotated(rotation);
    }

    pub(crate) fn power_down(&mut self) {
        self.is_powered = false;
        self.distance = None;
    }
}
