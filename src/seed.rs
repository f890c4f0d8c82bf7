//! Seed derivation and the deterministic random stream.
//!
//! A block hash is reduced to a [`Seed`] (the first 16 hex digits), and the
//! seed keys an MT19937 generator. Every random value used for a render is
//! drawn from that stream, so the same hash always produces the same art.

use crate::error::StyleError;
use rand::RngCore;
use std::fmt;

/// Number of leading hex digits consumed from a block hash.
pub const SEED_HEX_DIGITS: usize = 16;

/// Root of all pseudo-randomness for one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Seed(u64);

impl Seed {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    /// 32-bit key for the generator: the low 32 bits, as MT19937 seeding
    /// with an unsigned 32-bit conversion keeps them.
    pub const fn stream_key(self) -> u32 {
        self.0 as u32
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Parse the seed out of a block hash.
///
/// Accepts an optional `0x`/`0X` prefix. The remainder must be entirely hex
/// and at least [`SEED_HEX_DIGITS`] long.
pub fn derive_seed(hash: &str) -> Result<Seed, StyleError> {
    let digits = hash
        .strip_prefix("0x")
        .or_else(|| hash.strip_prefix("0X"))
        .unwrap_or(hash);

    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(StyleError::invalid_block(hash, "hash contains non-hex characters"));
    }
    if digits.len() < SEED_HEX_DIGITS {
        return Err(StyleError::invalid_block(hash, "hash is shorter than 16 hex digits"));
    }

    u64::from_str_radix(&digits[..SEED_HEX_DIGITS], 16)
        .map(Seed)
        .map_err(|_| StyleError::invalid_block(hash, "hash prefix is not a valid integer"))
}

/// Start a fresh stream for `seed`.
pub fn create_stream(seed: Seed) -> RandomStream {
    RandomStream::new(seed.stream_key())
}

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// MT19937 Mersenne Twister.
///
/// `next_f64` has 32-bit resolution (`next_u32 / 2^32`), which keeps the
/// sequence identical to other MT19937 "random()" implementations.
#[derive(Clone)]
pub struct RandomStream {
    state: [u32; N],
    index: usize,
}

impl RandomStream {
    pub fn new(key: u32) -> Self {
        let mut state = [0u32; N];
        state[0] = key;
        for i in 1..N {
            let prev = state[i - 1] ^ (state[i - 1] >> 30);
            state[i] = 1_812_433_253u32.wrapping_mul(prev).wrapping_add(i as u32);
        }
        Self { state, index: N }
    }

    fn twist(&mut self) {
        for k in 0..N {
            let y = (self.state[k] & UPPER_MASK) | (self.state[(k + 1) % N] & LOWER_MASK);
            let mag = if y & 1 == 1 { MATRIX_A } else { 0 };
            self.state[k] = self.state[(k + M) % N] ^ (y >> 1) ^ mag;
        }
        self.index = 0;
    }

    pub fn next_u32(&mut self) -> u32 {
        if self.index >= N {
            self.twist();
        }
        let mut y = self.state[self.index];
        self.index += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^ (y >> 18)
    }

    /// Next value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 * (1.0 / 4_294_967_296.0)
    }
}

impl fmt::Debug for RandomStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomStream")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl RngCore for RandomStream {
    fn next_u32(&mut self) -> u32 {
        RandomStream::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        let hi = RandomStream::next_u32(self) as u64;
        let lo = RandomStream::next_u32(self) as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = RandomStream::next_u32(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::Rng;
    use sha2::{Digest, Sha256};
    use std::collections::HashSet;

    #[test]
    fn parses_first_sixteen_hex_digits() {
        let seed = derive_seed("0x00000000000000aa1234567890abcdef").unwrap();
        assert_eq!(seed.value(), 170);

        let seed = derive_seed("FFFFFFFFFFFFFFFF00").unwrap();
        assert_eq!(seed.value(), u64::MAX);
    }

    #[test]
    fn prefix_is_optional() {
        assert_eq!(
            derive_seed("0x0123456789abcdef").unwrap(),
            derive_seed("0123456789abcdef").unwrap()
        );
        assert_eq!(
            derive_seed("0X0123456789ABCDEF").unwrap(),
            derive_seed("0x0123456789abcdef").unwrap()
        );
    }

    #[test]
    fn rejects_short_or_non_hex_hashes() {
        for bad in [
            "",
            "0x",
            "0x1234",
            "0x0123456789abcde",
            "0x0123456789abcdefzz",
            "0x 123456789abcdef0",
        ] {
            assert!(
                matches!(derive_seed(bad), Err(StyleError::InvalidBlockData { .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn derivation_is_pure() {
        let hash = "0x9f3c2e1d4b5a69788796a5b4c3d2e1f00112233445566778899aabbccddeeff";
        assert_eq!(derive_seed(hash).unwrap(), derive_seed(hash).unwrap());
    }

    #[test]
    fn no_collisions_across_ten_thousand_hashes() {
        let seeds: HashSet<Seed> = (0u32..10_000)
            .map(|i| {
                let digest = Sha256::digest(i.to_le_bytes());
                let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
                derive_seed(&format!("0x{hex}")).unwrap()
            })
            .collect();
        assert_eq!(seeds.len(), 10_000);
    }

    #[test]
    fn stream_key_keeps_low_bits() {
        assert_eq!(Seed::new(170).stream_key(), 170);
        assert_eq!(Seed::new(1 << 32).stream_key(), 0);
        assert_eq!(Seed::new(0xdead_beef_0000_00aa).stream_key(), 170);
    }

    #[test]
    fn high_seed_bits_do_not_change_the_stream() {
        let mut wide = create_stream(Seed::new(0x1_0000_00aa));
        let mut narrow = RandomStream::new(170);
        let first = wide.next_f64();
        assert!((first - 0.052645421121269464).abs() < 1e-15, "got {first}");
        assert_eq!(first, narrow.next_f64());
        assert_eq!(wide.next_u32(), narrow.next_u32());
    }

    #[test]
    fn matches_reference_mt19937_output() {
        let mut stream = RandomStream::new(5489);
        assert_eq!(stream.next_u32(), 3_499_211_612);
        assert_eq!(stream.next_u32(), 581_869_302);
    }

    #[test]
    fn first_value_for_seed_170_is_stable() {
        let mut stream = create_stream(Seed::new(170));
        let first = stream.next_f64();
        assert!((first - 0.052645421121269464).abs() < 1e-15, "got {first}");
    }

    #[test]
    fn floats_stay_in_unit_interval_across_twists() {
        let mut stream = create_stream(Seed::new(42));
        for _ in 0..2_000 {
            let v = stream.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn streams_are_independent() {
        let mut a = create_stream(Seed::new(7));
        let mut b = create_stream(Seed::new(7));
        let first = a.next_u32();
        a.next_u32();
        assert_eq!(b.next_u32(), first);
    }

    #[test]
    fn works_as_a_rand_rng() {
        let mut stream = create_stream(Seed::new(99));
        let roll: u8 = stream.gen_range(1..=6);
        assert!((1..=6).contains(&roll));

        let mut buf = [0u8; 7];
        stream.fill_bytes(&mut buf);
    }
}
