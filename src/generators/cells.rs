//! Cell tiling generator.
//!
//! The surface is cut into a 64x64 lattice. Each lattice point is hashed with
//! a small polynomial, folded by the grid's `wrap` and `modulus`, and the
//! resulting cell index picks a step on a cosine palette. Every cell is
//! opaque.

use crate::color::{Color, CosinePalette};
use crate::generators::{Generator, Uv};
use crate::params::RenderParameters;

/// Lattice cells per surface edge.
const UNZOOM: f64 = 64.0;
/// Lattice offset applied before flooring.
const OFFSET: (f64, f64) = (-0.25 * UNZOOM, -2.0);
/// Palette advance per cell index.
const PALETTE_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy)]
pub struct CellGenerator {
    pub palette: CosinePalette,
}

impl Default for CellGenerator {
    fn default() -> Self {
        Self {
            palette: CosinePalette::RAINBOW,
        }
    }
}

impl CellGenerator {
    pub fn new(palette: CosinePalette) -> Self {
        Self { palette }
    }

    /// Cell index of the lattice point `(x, y)`. Degenerate moduli are raised to 1.
    pub fn cell(x: f64, y: f64, params: &RenderParameters) -> f64 {
        let wrap = params.grid.wrap.max(1.0);
        let modulus = params.grid.modulus.max(1.0);
        glsl_mod(glsl_mod(x * (x + 32.0 * y), wrap), modulus)
    }

    fn lattice(uv: Uv) -> (f64, f64) {
        (
            (uv.u * UNZOOM + OFFSET.0).floor(),
            (uv.v * UNZOOM + OFFSET.1).floor(),
        )
    }
}

/// `x - y * floor(x / y)`: the result takes the sign of `y`.
fn glsl_mod(x: f64, y: f64) -> f64 {
    x - y * (x / y).floor()
}

impl Generator for CellGenerator {
    fn name(&self) -> &'static str {
        "cells"
    }

    fn color_at(&self, uv: Uv, params: &RenderParameters) -> Color {
        let (x, y) = Self::lattice(uv);
        let cell = Self::cell(x, y, params);
        self.palette
            .sample(params.mod2 + PALETTE_STEP * cell)
            .clamped()
    }
}
