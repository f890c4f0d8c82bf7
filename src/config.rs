//! Configuration loading for blockart.
//!
//! Configuration is loaded from TOML files with environment variable overrides.

use crate::color::Color;
use crate::error::StyleError;
use crate::preset::{ColorSet, ModifierSet};
use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "config.default.toml";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct BlockartConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub style: StyleConfig,

    #[serde(default)]
    pub blocks: BlocksConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: String,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_directory() -> String {
    "output".to_string()
}

fn default_width() -> u32 {
    512
}

fn default_height() -> u32 {
    512
}

/// Overrides applied on top of the style preset.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StyleConfig {
    #[serde(default)]
    pub modifiers: BTreeMap<String, f64>,

    /// Hex strings, e.g. `background = "#0a0a0a"`.
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
}

impl StyleConfig {
    pub fn apply(
        &self,
        modifiers: &mut ModifierSet,
        colors: &mut ColorSet,
    ) -> Result<(), StyleError> {
        for (name, value) in &self.modifiers {
            modifiers.set(name, *value)?;
        }
        for (name, hex) in &self.colors {
            colors.set(name, hex.parse::<Color>()?)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct BlocksConfig {
    /// JSON array of `{ "number": .., "hash": .. }`. Built-in samples when unset.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl BlockartConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("BLOCKART").separator("_"))
            .build()?;

        let blockart_config = config.try_deserialize().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "invalid configuration, using defaults");
            BlockartConfig::default()
        });
        Ok(blockart_config)
    }
}
