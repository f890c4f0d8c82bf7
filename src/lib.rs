//! blockart - Deterministic generative art from block hashes.
//!
//! A block hash seeds a Mersenne Twister stream, the stream and a handful of
//! bounded modifiers resolve into render parameters, and a pure per-pixel
//! generator turns those into an image. The same inputs yield the same image
//! and the same NFT attributes on every run.

pub mod attributes;
pub mod block;
pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod generators;
pub mod metadata;
pub mod params;
pub mod pipeline;
pub mod preset;
pub mod seed;

pub use attributes::{extract_attributes, Attribute, AttributeValue};
pub use block::Block;
pub use config::BlockartConfig;
pub use error::StyleError;
pub use generators::Generator;
pub use params::{map_parameters, RenderParameters};
pub use pipeline::RenderPass;
pub use preset::{style_metadata, ColorSet, ModifierSet, StyleMetadata};
pub use seed::{create_stream, derive_seed, RandomStream, Seed};
