//! Bindings for a JavaScript renderer.
//!
//! Per-piece data is returned as flat arrays in row-major order, `row * width + col`.

use std::num::NonZero;
use std::str::FromStr;

use js_sys::Error;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use crate::builder::{Builder, GridBuilder};
use crate::grid::Grid;
use crate::layout::Strategy;
use crate::location::Location;
use crate::side::{Rotation, Side};

/// One game session, owning its grid.
#[wasm_bindgen]
pub struct Game {
    grid: Grid,
}

fn js_error(message: impl ToString) -> JsValue {
    Error::new(&message.to_string()).into()
}

#[wasm_bindgen]
impl Game {
    /// `strategy` is one of `manual`, `fractal`, `kruskal` or `empty`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: usize, height: usize, strategy: &str, scramble: bool, seed: u32) -> Result<Game, JsValue> {
        let (Some(w), Some(h)) = (NonZero::new(width), NonZero::new(height)) else {
            return Err(js_error(format!("grid dimensions must be positive, got {}x{}", width, height)));
        };
        let strategy = Strategy::from_str(strategy).map_err(js_error)?;

        let grid = GridBuilder::with_dims((w, h))
            .strategy(strategy)
            .scramble(scramble)
            .build(&mut StdRng::seed_from_u64(seed.into()))
            .map_err(js_error)?;

        Ok(Game { grid })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Power radius, fixed for the session.
    pub fn radius(&self) -> usize {
        self.grid.radius()
    }

    /// Column of the power source.
    pub fn source_col(&self) -> usize {
        self.grid.source().0
    }

    /// Row of the power source.
    pub fn source_row(&self) -> usize {
        self.grid.source().1
    }

    /// Turn the piece at `(col, row)` a quarter turn and repropagate. Fails off the grid.
    pub fn rotate(&mut self, col: usize, row: usize, clockwise: bool) -> Result<(), JsValue> {
        let rotation = if clockwise { Rotation::Clockwise } else { Rotation::CounterClockwise };
        self.grid.rotate_and_refresh(Location(col, row), rotation).map_err(js_error)?;
        Ok(())
    }

    /// `side` is one of `top`/`up`, `right`, `bottom`/`down` or `left`. Returns whether the source moved.
    pub fn move_source(&mut self, side: &str) -> bool {
        let Ok(side) = Side::from_str(side) else { return false };
        self.grid.move_source_and_refresh(side).is_ok()
    }

    /// Stub flags, packed as in [`Wires::bits`](crate::Wires::bits).
    pub fn stubs(&self) -> Vec<u8> {
        self.grid.pieces.iter().map(|piece| piece.stubs().bits()).collect()
    }

    /// Link flags, packed as in [`Wires::bits`](crate::Wires::bits).
    pub fn links(&self) -> Vec<u8> {
        self.grid.pieces.iter().map(|piece| piece.links().bits()).collect()
    }

    /// Hop count from the source for every piece, `-1` where power did not reach.
    pub fn distances(&self) -> Vec<i32> {
        self.grid.pieces.iter()
            .map(|piece| piece.distance().and_then(|d| i32::try_from(d).ok()).unwrap_or(-1))
            .collect()
    }

    /// `1` for every powered piece, `0` otherwise.
    pub fn powered(&self) -> Vec<u8> {
        self.grid.pieces.iter().map(|piece| piece.is_powered() as u8).collect()
    }

    /// Whether every piece is powered.
    pub fn solved(&self) -> bool {
        self.grid.solved()
    }

    /// The board drawn with box-drawing characters.
    pub fn render(&self) -> String {
        self.grid.to_string()
    }
}
