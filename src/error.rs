//! Error taxonomy for the generation pipeline.
//!
//! Only [`StyleError::InvalidBlockData`] can come out of a render pass.
//! The remaining variants are raised while building or overriding a
//! modifier/colour set, before any rendering starts. Numeric edge cases
//! (out-of-range modifiers, degenerate moduli) are absorbed where they occur.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StyleError {
    /// The block hash cannot seed a render.
    #[error("invalid block data for hash `{hash}`: {reason}")]
    InvalidBlockData { hash: String, reason: &'static str },

    /// A modifier or colour name that the style does not declare.
    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),

    /// A modifier/colour set that violates the declared schema.
    #[error("invalid parameter schema: {0}")]
    InvalidSchema(String),

    /// A colour string that is not `#rrggbb` or `#rrggbbaa`.
    #[error("invalid color `{0}`")]
    InvalidColor(String),
}

impl StyleError {
    pub(crate) fn invalid_block(hash: &str, reason: &'static str) -> Self {
        Self::InvalidBlockData {
            hash: hash.to_string(),
            reason,
        }
    }
}
