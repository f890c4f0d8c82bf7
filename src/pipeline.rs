//! One render pass over a snapshot of block and parameters.
//!
//! A pass copies its inputs, so later edits to the caller's modifier or
//! colour sets cannot leak into an image or attribute list already produced.

use crate::attributes::{extract_attributes, Attribute};
use crate::block::Block;
use crate::canvas;
use crate::error::StyleError;
use crate::generators::Generator;
use crate::metadata::TokenMetadata;
use crate::params::{map_parameters, RenderParameters};
use crate::preset::{style_metadata, ColorSet, ModifierSet};
use crate::seed::{create_stream, derive_seed, Seed};
use image::RgbImage;

#[derive(Debug, Clone)]
pub struct RenderPass {
    block: Block,
    modifiers: ModifierSet,
    seed: Seed,
    params: RenderParameters,
}

impl RenderPass {
    /// Derive the seed and map parameters for `block`.
    ///
    /// Fails with [`StyleError::InvalidBlockData`] before anything is drawn.
    pub fn prepare(
        block: &Block,
        modifiers: &ModifierSet,
        colors: &ColorSet,
    ) -> Result<Self, StyleError> {
        let seed = derive_seed(&block.hash)?;
        let mut stream = create_stream(seed);
        let params = map_parameters(modifiers, colors, &mut stream);

        tracing::debug!(block = block.number, %seed, "prepared render pass");

        Ok(Self {
            block: block.clone(),
            modifiers: modifiers.clone(),
            seed,
            params,
        })
    }

    pub fn block(&self) -> &Block {
        &self.block
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    pub fn params(&self) -> &RenderParameters {
        &self.params
    }

    pub fn rasterize(&self, generator: &dyn Generator, width: u32, height: u32) -> RgbImage {
        canvas::rasterize(generator, &self.params, width, height)
    }

    pub fn attributes(&self) -> Vec<Attribute> {
        extract_attributes(self.seed, &self.block, &self.modifiers)
    }

    /// Metadata for minting; `image` is the URI of the rendered file, if any.
    pub fn metadata(&self, image: &str) -> TokenMetadata {
        let style = style_metadata();
        TokenMetadata {
            name: format!("{} #{}", style.name, self.block.number),
            description: style.description.to_string(),
            image: image.to_string(),
            attributes: self.attributes(),
        }
    }
}
