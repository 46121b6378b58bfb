//! Strategies that lay out the initial wire stubs of a grid.
//!
//! Every strategy writes stub flags only. Links do not exist yet when a layout runs and are resolved afterward.

use log::debug;
use rand::Rng;
use strum::{Display, EnumString, VariantArray};

pub use kruskal::SpanningEdge;
pub(crate) use kruskal::scramble;

use crate::error::GenerationError;
use crate::grid::Grid;

mod fractal;
pub(crate) mod kruskal;
mod manual;

/// Which wire layout to generate.
#[derive(Copy, Clone, Debug, Default, Display, EnumString, VariantArray, Eq, PartialEq, Hash)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Strategy {
    /// A fixed pattern that depends only on where a piece sits relative to the border.
    Manual,
    /// Recursive quadrant subdivision, each quadrant framed by wires.
    #[strum(to_string = "fractal", serialize = "fractals")]
    Fractal,
    /// A random spanning tree grown with Kruskal's algorithm.
    #[default]
    Kruskal,
    /// No wires at all.
    Empty,
}

impl Strategy {
    /// Lay out stubs on `grid`. Only [`Strategy::Kruskal`] draws from `rng`.
    pub(crate) fn generate<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) -> Result<(), GenerationError> {
        debug!("laying out {} wires on a {}x{} grid", self, grid.width(), grid.height());
        match self {
            Self::Manual => manual::lay_out(grid),
            Self::Fractal => fractal::lay_out(grid),
            Self::Kruskal => grid.spanning_edges = kruskal::lay_out(grid, rng)?,
            Self::Empty => {}
        }

        Ok(())
    }
}
