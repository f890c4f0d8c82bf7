//! Art generators - each maps render parameters to a colour per coordinate.

pub mod cells;

use crate::color::Color;
use crate::params::RenderParameters;

pub use cells::CellGenerator;

/// Normalised surface coordinate, origin at the bottom-left, both axes in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uv {
    pub u: f64,
    pub v: f64,
}

impl Uv {
    pub const fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }
}

/// Trait for all art generators.
///
/// Implementations are pure: the output depends only on `uv` and `params`,
/// which lets a surface evaluate pixels in any order or in parallel.
pub trait Generator: Sync {
    /// Name of this generator style.
    fn name(&self) -> &'static str;

    /// Colour at `uv`. May be translucent; the surface composites it over
    /// the background.
    fn color_at(&self, uv: Uv, params: &RenderParameters) -> Color;
}
