//! Mapping modifiers, colours and the seed stream to render uniforms.

use crate::color::Color;
use crate::preset::{self, ColorSet, ModifierSet};
use crate::seed::RandomStream;

/// Integer lattice parameters of the cell tiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGrid {
    /// Number of distinct cell indices (palette steps).
    pub modulus: f64,
    /// Period of the coordinate hash before it is folded into `modulus`.
    pub wrap: f64,
}

impl CellGrid {
    /// `density` is the clamped density modifier, `seed` a stream draw in [0, 1).
    pub fn new(density: f64, seed: f64) -> Self {
        let modulus = 2.0 + (32.0 * density * (0.2 + seed)).floor();
        let wrap = modulus * (1.0 + 64.0 * seed).floor() + 1.0;
        Self { modulus, wrap }
    }
}

/// Concrete uniforms for a single render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParameters {
    pub mod1: f64,
    pub mod2: f64,
    /// The one value drawn from the stream for this pass.
    pub seed: f64,
    pub grid: CellGrid,
    pub background: Color,
}

/// Resolve the density and hue modifiers, falling back to the preset.
pub(crate) fn resolve_modifiers(modifiers: &ModifierSet) -> (f64, f64) {
    let defaults = &preset::style_metadata().options;
    let read = |name: &str| {
        modifiers
            .get(name)
            .or_else(|| defaults.get(name))
            .unwrap_or(0.0)
    };
    (read(preset::DENSITY), read(preset::HUE))
}

/// Combine modifiers and colours with exactly one draw from `stream`.
pub fn map_parameters(
    modifiers: &ModifierSet,
    colors: &ColorSet,
    stream: &mut RandomStream,
) -> RenderParameters {
    let (mod1, mod2) = resolve_modifiers(modifiers);
    let seed = stream.next_f64();
    let grid = CellGrid::new(mod1, seed);

    tracing::debug!(
        mod1,
        mod2,
        seed,
        modulus = grid.modulus,
        wrap = grid.wrap,
        "mapped render parameters"
    );

    RenderParameters {
        mod1,
        mod2,
        seed,
        grid,
        background: colors.background().clamped(),
    }
}
