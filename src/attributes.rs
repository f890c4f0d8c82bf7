//! Trait attributes describing a rendered instance.
//!
//! Attributes follow the OpenSea metadata convention: an ordered list of
//! `{ "trait_type": ..., "value": ... }` objects. They are computed on demand
//! from the same seed stream as the render, never cached.

use crate::block::Block;
use crate::params::{resolve_modifiers, CellGrid};
use crate::preset::{self, ModifierSet};
use crate::seed::{create_stream, Seed};
use serde::Serialize;
use std::fmt;

/// Every n-th block carries the centennial easter egg.
pub const CENTENNIAL_INTERVAL: u64 = 100;
/// Seeds divisible by this (1% of seed space) are singularities.
pub const SINGULARITY_DIVISOR: u64 = 100;

pub const TRAIT_CENTENNIAL: &str = "Easter Egg";
pub const TRAIT_SINGULARITY: &str = "Anomaly";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Integer(u64),
    Float(f64),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(s) => f.write_str(s),
            AttributeValue::Integer(n) => write!(f, "{n}"),
            AttributeValue::Float(x) => write!(f, "{x}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: AttributeValue,
}

impl Attribute {
    fn new(trait_type: &str, value: AttributeValue) -> Self {
        Self {
            trait_type: trait_type.to_string(),
            value,
        }
    }

    fn text(trait_type: &str, value: &str) -> Self {
        Self::new(trait_type, AttributeValue::Text(value.to_string()))
    }
}

fn density_label(density: f64) -> &'static str {
    if density < 1.0 / 3.0 {
        "Sparse"
    } else if density < 2.0 / 3.0 {
        "Balanced"
    } else {
        "Dense"
    }
}

/// Build the attribute list for `block` rendered with `modifiers`.
///
/// Replays the render's single stream draw so the reported grid matches the
/// image exactly.
pub fn extract_attributes(seed: Seed, block: &Block, modifiers: &ModifierSet) -> Vec<Attribute> {
    let (density, hue) = resolve_modifiers(modifiers);
    let grid = CellGrid::new(density, create_stream(seed).next_f64());

    let mut attributes = vec![
        Attribute::text("Style", preset::style_metadata().name),
        Attribute::new("Palette Size", AttributeValue::Integer(grid.modulus as u64)),
        Attribute::new("Pattern Period", AttributeValue::Integer(grid.wrap as u64)),
        Attribute::text("Density", density_label(density)),
        Attribute::new(
            "Hue Shift",
            AttributeValue::Float((hue * 100.0).round() / 100.0),
        ),
    ];

    if block.number % CENTENNIAL_INTERVAL == 0 {
        attributes.push(Attribute::text(TRAIT_CENTENNIAL, "Centennial"));
    }
    if seed.value() % SINGULARITY_DIVISOR == 0 {
        attributes.push(Attribute::text(TRAIT_SINGULARITY, "Singularity"));
    }

    attributes
}
