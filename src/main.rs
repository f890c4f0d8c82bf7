//! blockart CLI - Render block-seeded generative art and its NFT metadata.

use anyhow::{bail, Context, Result};
use blockart::block::Block;
use blockart::canvas;
use blockart::color::Color;
use blockart::config::BlockartConfig;
use blockart::generators::{CellGenerator, Generator};
use blockart::pipeline::RenderPass;
use blockart::preset::{style_metadata, ColorSet, ModifierSet};
use clap::{Args, Parser};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "blockart")]
#[command(about = "Generate deterministic art and NFT attributes from block hashes")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "blockart.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Render one block to a PNG
    Render {
        #[command(flatten)]
        selection: Selection,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Width of the output
        #[arg(long)]
        width: Option<u32>,

        /// Height of the output
        #[arg(long)]
        height: Option<u32>,

        /// Also write token metadata next to the image
        #[arg(long)]
        metadata: bool,
    },

    /// Print the attribute list for a block
    Attributes {
        #[command(flatten)]
        selection: Selection,
    },

    /// Print the full token metadata for a block
    Metadata {
        #[command(flatten)]
        selection: Selection,

        /// Image URI to embed
        #[arg(long, default_value = "")]
        image: String,
    },

    /// Print the style's identity and default preset
    Preset,

    /// Render every block in the block list at several sizes
    Showcase {
        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// JSON file with blocks to render
        #[arg(long)]
        blocks: Option<PathBuf>,
    },
}

/// Which block to use and how to tune it.
#[derive(Args)]
struct Selection {
    /// Index into the block list
    #[arg(short, long, default_value = "0", conflicts_with = "hash")]
    block: usize,

    /// JSON file with blocks (defaults to the built-in samples)
    #[arg(long)]
    blocks: Option<PathBuf>,

    /// Explicit block hash instead of the block list
    #[arg(long, requires = "number")]
    hash: Option<String>,

    /// Block number for --hash
    #[arg(long, requires = "hash")]
    number: Option<u64>,

    /// Modifier override, e.g. "mod1=0.8" (repeatable)
    #[arg(short = 'm', long = "mod", value_parser = parse_assignment)]
    modifiers: Vec<(String, String)>,

    /// Colour override, e.g. "background=#101018" (repeatable)
    #[arg(short = 'c', long = "color", value_parser = parse_assignment)]
    colors: Vec<(String, String)>,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got `{s}`"))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

impl Selection {
    fn block(&self, config: &BlockartConfig) -> Result<Block> {
        if let (Some(hash), Some(number)) = (&self.hash, self.number) {
            return Ok(Block::new(number, hash.clone()));
        }
        let blocks = load_blocks(self.blocks.as_deref(), config)?;
        match blocks.get(self.block) {
            Some(block) => Ok(block.clone()),
            None => bail!(
                "block index {} out of range (block list has {})",
                self.block,
                blocks.len()
            ),
        }
    }

    /// Preset, then config overrides, then command-line overrides.
    fn parameters(&self, config: &BlockartConfig) -> Result<(ModifierSet, ColorSet)> {
        let style = style_metadata();
        let mut modifiers = style.options.clone();
        let mut colors = style.colors.clone();
        config.style.apply(&mut modifiers, &mut colors)?;

        for (name, value) in &self.modifiers {
            let value: f64 = value
                .parse()
                .with_context(|| format!("modifier `{name}` is not a number"))?;
            modifiers.set(name, value)?;
        }
        for (name, value) in &self.colors {
            colors.set(name, value.parse::<Color>()?)?;
        }
        Ok((modifiers, colors))
    }

    fn prepare(&self, config: &BlockartConfig) -> Result<RenderPass> {
        let block = self.block(config)?;
        let (modifiers, colors) = self.parameters(config)?;
        let pass = RenderPass::prepare(&block, &modifiers, &colors)
            .with_context(|| format!("block {} cannot be rendered", block.number))?;
        Ok(pass)
    }
}

fn load_blocks(path: Option<&Path>, config: &BlockartConfig) -> Result<Vec<Block>> {
    match path.or(config.blocks.file.as_deref()) {
        Some(path) => Block::load_all(path),
        None => Ok(Block::samples()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("blockart=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = BlockartConfig::load(&cli.config)?;
    let generator = CellGenerator::default();

    match cli.command {
        Commands::Render {
            selection,
            output,
            width,
            height,
            metadata,
        } => {
            let width = width.unwrap_or(config.output.width);
            let height = height.unwrap_or(config.output.height);
            let pass = selection.prepare(&config)?;

            println!(
                "Rendering block {} (seed {}) with {}...",
                pass.block().number,
                pass.seed(),
                generator.name()
            );

            let image = pass.rasterize(&generator, width, height);

            let output_dir = PathBuf::from(&config.output.directory);
            fs::create_dir_all(&output_dir)?;
            let output_path = output.unwrap_or_else(|| {
                output_dir.join(format!("{}_{}.png", generator.name(), pass.block().number))
            });

            image
                .save(&output_path)
                .with_context(|| format!("writing {}", output_path.display()))?;
            println!("Saved to {}", output_path.display());
            println!("  digest {}", canvas::digest(&image));

            if metadata {
                let metadata_path = output_path.with_extension("json");
                let uri = output_path.display().to_string();
                fs::write(&metadata_path, pass.metadata(&uri).to_json()?)?;
                println!("Saved metadata to {}", metadata_path.display());
            }
        }

        Commands::Attributes { selection } => {
            let pass = selection.prepare(&config)?;
            println!("{}", serde_json::to_string_pretty(&pass.attributes())?);
        }

        Commands::Metadata { selection, image } => {
            let pass = selection.prepare(&config)?;
            println!("{}", pass.metadata(&image).to_json()?);
        }

        Commands::Preset => {
            println!("{}", serde_json::to_string_pretty(style_metadata())?);
        }

        Commands::Showcase { output_dir, blocks } => {
            let output_dir = output_dir
                .unwrap_or_else(|| PathBuf::from(&config.output.directory).join("showcase"));
            fs::create_dir_all(&output_dir)?;

            let blocks = load_blocks(blocks.as_deref(), &config)?;
            let style = style_metadata();
            let mut modifiers = style.options.clone();
            let mut colors = style.colors.clone();
            config.style.apply(&mut modifiers, &mut colors)?;

            println!("Generating showcase for {} blocks...", blocks.len());

            let sizes: [(u32, &str); 3] = [(256, "256"), (1024, "1k"), (2048, "2k")];

            for block in &blocks {
                let pass = match RenderPass::prepare(block, &modifiers, &colors) {
                    Ok(pass) => pass,
                    Err(e) => {
                        tracing::warn!(block = block.number, error = %e, "skipping block");
                        continue;
                    }
                };

                for (size, label) in &sizes {
                    let image = pass.rasterize(&generator, *size, *size);
                    let filename = format!("{}_{}_{}.png", generator.name(), block.number, label);
                    image.save(output_dir.join(&filename))?;
                    println!("  Created {}", filename);
                }
            }

            println!("Done! Showcase saved to {}", output_dir.display());
        }
    }

    Ok(())
}
