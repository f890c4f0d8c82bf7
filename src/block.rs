//! Block records that drive generation.
//!
//! Only the hash and number are read. Blocks come from a JSON file or from
//! the deterministic samples below.

use anyhow::{Context, Result};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A block as supplied by the block source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block height.
    pub number: u64,
    /// Block hash, `0x`-prefixed hex.
    pub hash: String,
}

impl Block {
    pub fn new(number: u64, hash: impl Into<String>) -> Self {
        Self {
            number,
            hash: hash.into(),
        }
    }

    /// Create a sample block for testing/demo purposes.
    ///
    /// The same `id` always yields the same hash.
    pub fn sample(id: u64) -> Self {
        let mut rng = rand::rngs::StdRng::seed_from_u64(id);
        let bytes: [u8; 32] = rng.gen();
        let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
        Self {
            number: 12_000_000 + id * 97,
            hash: format!("0x{hex}"),
        }
    }

    /// The built-in block list: a handful of samples to flip between.
    pub fn samples() -> Vec<Block> {
        (1..=3).map(Block::sample).collect()
    }

    /// Load a JSON array of blocks.
    pub fn load_all(path: &Path) -> Result<Vec<Block>> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading blocks from {}", path.display()))?;
        let blocks: Vec<Block> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing blocks in {}", path.display()))?;
        anyhow::ensure!(!blocks.is_empty(), "{} contains no blocks", path.display());
        Ok(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::derive_seed;
    use pretty_assertions::assert_eq;

    #[test]
    fn samples_are_deterministic_and_valid() {
        assert_eq!(Block::sample(5), Block::sample(5));
        assert_ne!(Block::sample(5).hash, Block::sample(6).hash);
        for block in Block::samples() {
            assert_eq!(block.hash.len(), 66);
            assert!(derive_seed(&block.hash).is_ok());
        }
    }

    #[test]
    fn loads_json_block_lists() {
        let dir = std::env::temp_dir().join(format!("blockart-blocks-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("blocks.json");
        fs::write(
            &path,
            r#"[{"number": 100, "hash": "0x00000000000000aa00"}, {"number": 101, "hash": "0xff00ff00ff00ff00ff"}]"#,
        )
        .unwrap();

        let blocks = Block::load_all(&path).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], Block::new(100, "0x00000000000000aa00"));

        fs::write(&path, "[]").unwrap();
        assert!(Block::load_all(&path).is_err());
        fs::remove_dir_all(&dir).unwrap();
    }
}
