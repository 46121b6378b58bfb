#![warn(missing_docs)]

//! # `voltaic`
//!
//! The wiring and power-propagation engine behind rotate-the-pieces connectivity puzzles such as LightEmAll.
//! Every piece on a rectangular grid carries up to four wire stubs; a power source lights every piece it can reach through matching stubs,
//! as long as that piece lies within the power radius.
//!
//! Begin with a [`GridBuilder`] (or the [`initialize`] shorthand), choosing a [`Strategy`] for the initial wires.
//! Building yields a [`Grid`] with connectivity resolved, radius sized and power propagated once.
//! From there, [`rotate_and_refresh`](Grid::rotate_and_refresh) and [`move_source_and_refresh`](Grid::move_source_and_refresh)
//! are the two player commands, and [`powered`](Grid::powered) plus the per-[`Piece`] flags are everything a renderer needs.
//!
//! # Internals
//! Pieces live in an arena indexed by [`Location`]. Neighbors are locations too, so the grid is plain data with no shared ownership.
//!
//! A link on side S of a piece exists iff that piece has a stub on S and the neighbor across S has a stub on the opposite side.
//! Links are kept as flags on each piece and are re-derived in full after every rotation.
//! Traversals then run over an undirected graph of the live links:
//!
//! 1. Power is a breadth-first flood from the source. Each piece reached records its hop count and is powered iff that count is within the radius.
//! 2. The radius is sized once, at initialization, as half the diameter of the source's component plus one.
//!    On a tree the diameter comes from the classic pair of searches; a component containing a cycle is measured exhaustively.
//!
//! The random spanning tree layout is Kruskal's algorithm over randomly weighted grid edges, joined with a union-find table.
//! Randomness is always injected, so a seeded [`rand::rngs::StdRng`] reproduces a game exactly.

pub use builder::{initialize, Builder, GridBuilder};
pub use error::{ConfigurationError, GenerationError, InitError, InvalidMove};
pub use grid::Grid;
pub use layout::{SpanningEdge, Strategy};
pub use location::{Dimension, Location};
pub use piece::{Piece, Wires};
pub use radius::diameter;
pub use side::{Rotation, Side};

pub mod builder;
pub mod error;
pub(crate) mod grid;
pub mod layout;
pub(crate) mod location;
pub(crate) mod piece;
pub(crate) mod power;
pub(crate) mod radius;
pub mod side;
mod tests;
pub(crate) mod union_find;
#[cfg(feature = "wasm")]
pub mod wasm;
