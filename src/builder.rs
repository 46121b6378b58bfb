//! Configure and build [`Grid`]s.

use std::num::NonZero;

use log::debug;
use rand::Rng;

use crate::error::{ConfigurationError, InitError};
use crate::grid::Grid;
use crate::layout::{self, Strategy};
use crate::location::{Dimension, Location};

/// Functionality all grid builders must implement.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
pub trait Builder: Clone {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(width, height)` order.
    fn with_dims(dims: (Dimension, Dimension)) -> Self;
    /// Check the validity of this builder, ensuring no [`ConfigurationError`] has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<ConfigurationError>)` otherwise.
    fn is_valid(&self) -> Option<&Vec<ConfigurationError>>;
    /// Convert the state of this builder into a ready-to-play [`Grid`], drawing any randomness from `rng`.
    fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Grid, InitError>;
}

/// A builder for rectangular grids of four-sided pieces.
///
/// Building runs the whole initialization: neighbors are linked, wires laid out by the chosen [`Strategy`], connectivity resolved,
/// the radius estimated from the source's component, the layout optionally scrambled, and power propagated once.
#[derive(Clone, Debug)]
pub struct GridBuilder {
    // width, height
    dims: (Dimension, Dimension),
    strategy: Strategy,
    scramble: bool,
    source: Location,
    invalid_reasons: Vec<ConfigurationError>,
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::new(8).unwrap(), NonZero::new(8).unwrap()))
    }
}

impl Builder for GridBuilder {
    fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            strategy: Strategy::default(),
            scramble: false,
            source: Location(0, 0),
            invalid_reasons: Default::default(),
        }
    }

    fn is_valid(&self) -> Option<&Vec<ConfigurationError>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Grid, InitError> {
        if let Some(reasons) = self.is_valid() {
            return Err(InitError::Configuration(reasons.clone()));
        }

        let mut grid = Grid::new(self.dims);
        grid.place_source(self.source);

        self.strategy.generate(&mut grid, rng)?;
        grid.resolve_connectivity();
        grid.estimate_radius();

        if self.scramble {
            layout::scramble(&mut grid, rng);
            grid.resolve_connectivity();
        }

        grid.propagate();
        debug!("initialized {}x{} {} grid, {} powered", grid.width(), grid.height(), self.strategy, grid.powered().len());

        Ok(grid)
    }
}

impl GridBuilder {
    /// Choose the wire layout. Defaults to [`Strategy::Kruskal`].
    pub fn strategy(&mut self, strategy: Strategy) -> &mut Self {
        self.strategy = strategy;
        self
    }

    /// Whether to turn every piece a random number of quarter turns once the radius is sized.
    ///
    /// The radius therefore always reflects the unscrambled layout.
    pub fn scramble(&mut self, scramble: bool) -> &mut Self {
        self.scramble = scramble;
        self
    }

    /// Place the power source somewhere other than the top left corner.
    ///
    /// May cause the builder to enter a [`SourceOutOfBounds`](ConfigurationError::SourceOutOfBounds) invalid state if `location` is off the grid.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn source(&mut self, location: Location) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !location.within(self.dims) {
            self.invalid_reasons.push(ConfigurationError::SourceOutOfBounds(location));
            return self;
        }

        self.source = location;
        self
    }
}

/// Build a `width` by `height` grid laid out by `strategy`, with the source in the top left corner.
///
/// Either dimension being zero is a [`ConfigurationError::NonPositiveDimensions`].
pub fn initialize<R: Rng + ?Sized>(width: usize, height: usize, strategy: Strategy, rng: &mut R) -> Result<Grid, InitError> {
    let (Some(w), Some(h)) = (NonZero::new(width), NonZero::new(height)) else {
        return Err(ConfigurationError::NonPositiveDimensions { width, height }.into());
    };

    GridBuilder::with_dims((w, h))
        .strategy(strategy)
        .build(rng)
}
