//! Hash expansion: turns a unique token and the secret seed into an output
//! stream of any length.
//!
//! Each output chunk is the BLAKE3 digest of a [`SeedBlock`]:
//!
//! ```text
//! ┌────────────┬─────────────┬─────────────┬───────────────┐
//! │ token.low  │ token.high  │ inner (LE)  │ seed          │
//! │ 8 bytes    │ 8 bytes     │ 8 bytes     │ 32 bytes      │
//! └────────────┴─────────────┴─────────────┴───────────────┘
//! ```
//!
//! The token is unique per read and the inner counter is strictly increasing
//! within a read, so no two digests in the life of a reader share an input.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    counter::Token,
    entropy::{SEED_LEN, Seed},
};

/// Bytes produced by one hash invocation.
pub const OUTPUT_CHUNK: usize = blake3::OUT_LEN;

const INNER_LEN: usize = 8;
const INNER_OFFSET: usize = Token::LEN;
const SEED_OFFSET: usize = INNER_OFFSET + INNER_LEN;

/// Length of the hash input for one output chunk.
pub const SEED_BLOCK_LEN: usize = SEED_OFFSET + SEED_LEN;

/// The input to one hash invocation. Holds a copy of the seed, so it is
/// wiped when dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct SeedBlock([u8; SEED_BLOCK_LEN]);

impl SeedBlock {
    pub(crate) fn new(seed: &Seed, token: Token) -> Self {
        let mut block = [0_u8; SEED_BLOCK_LEN];
        block[..INNER_OFFSET].copy_from_slice(&token.to_le_bytes());
        block[SEED_OFFSET..].copy_from_slice(seed.as_bytes());
        Self(block)
    }

    #[inline]
    pub(crate) fn set_inner(&mut self, inner: u64) {
        self.0[INNER_OFFSET..SEED_OFFSET].copy_from_slice(&inner.to_le_bytes());
    }

    #[inline]
    pub(crate) fn digest(&self) -> blake3::Hash {
        blake3::hash(&self.0)
    }

    #[cfg(test)]
    pub(crate) fn as_bytes(&self) -> &[u8; SEED_BLOCK_LEN] {
        &self.0
    }
}

/// Fills `out` with the hash stream for `token`.
///
/// Chunk `i` of the output is `BLAKE3(token ‖ i ‖ seed)`; the last chunk is
/// truncated to fit. An empty buffer performs no hashing.
pub(crate) fn expand(seed: &Seed, token: Token, out: &mut [u8]) {
    if out.is_empty() {
        return;
    }

    let mut block = SeedBlock::new(seed, token);
    for (inner, chunk) in (0_u64..).zip(out.chunks_mut(OUTPUT_CHUNK)) {
        block.set_inner(inner);
        let digest = block.digest();
        chunk.copy_from_slice(&digest.as_bytes()[..chunk.len()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn expanded(seed: &Seed, token: Token, len: usize) -> Vec<u8> {
        let mut out = vec![0_u8; len];
        expand(seed, token, &mut out);
        out
    }

    #[test]
    fn fills_exact_length() {
        let seed = Seed::fixed(3);
        for len in 0..=300 {
            let mut out = vec![0_u8; len + 8];
            expand(&seed, Token::ZERO, &mut out[..len]);
            // Bytes past the requested length are left alone.
            assert!(out[len..].iter().all(|&b| b == 0), "overrun at {len}");
        }
    }

    #[test]
    fn chunks_are_digests_of_seed_blocks() {
        let seed = Seed::fixed(9);
        let token = Token::from_words(5, 1);
        let out = expanded(&seed, token, 3 * OUTPUT_CHUNK + 7);

        for (i, chunk) in out.chunks(OUTPUT_CHUNK).enumerate() {
            let mut input = Vec::with_capacity(SEED_BLOCK_LEN);
            input.extend_from_slice(&5_u64.to_le_bytes());
            input.extend_from_slice(&1_u64.to_le_bytes());
            input.extend_from_slice(&(i as u64).to_le_bytes());
            input.extend_from_slice(&[9; SEED_LEN]);
            let expected = blake3::hash(&input);
            assert_eq!(chunk, &expected.as_bytes()[..chunk.len()]);
        }
    }

    #[test]
    fn shorter_read_is_prefix_of_longer_read() {
        let seed = Seed::fixed(1);
        let token = Token::from_raw(77);
        let long = expanded(&seed, token, 100);
        let short = expanded(&seed, token, 40);
        assert_eq!(&long[..40], &short[..]);
    }

    #[test]
    fn distinct_tokens_give_distinct_streams() {
        let seed = Seed::fixed(1);
        let a = expanded(&seed, Token::from_raw(0), 64);
        let b = expanded(&seed, Token::from_raw(1), 64);
        let c = expanded(&seed, Token::from_words(0, 1), 64);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
        assert_ne!(a[..OUTPUT_CHUNK], a[OUTPUT_CHUNK..]);
    }

    #[test]
    fn distinct_seeds_give_distinct_streams() {
        let a = expanded(&Seed::fixed(1), Token::ZERO, 32);
        let b = expanded(&Seed::fixed(2), Token::ZERO, 32);
        assert_ne!(a, b);
    }

    #[test]
    fn seed_blocks_never_repeat() {
        let seed = Seed::fixed(0);
        let tokens = [
            Token::ZERO,
            Token::from_raw(1),
            Token::from_words(0, 1),
            Token::from_words(u64::MAX, 0),
            Token::from_words(u64::MAX, u64::MAX),
        ];

        let mut seen = HashSet::new();
        for token in tokens {
            let mut block = SeedBlock::new(&seed, token);
            for inner in [0, 1, 2, 255, 256, u64::MAX] {
                block.set_inner(inner);
                assert!(seen.insert(*block.as_bytes()), "{token:?}/{inner}");
            }
        }
        assert_eq!(seen.len(), tokens.len() * 6);
    }
}
