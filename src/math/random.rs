//! Seeded xorshift* generator owned by each generation run
//!
//! The state update uses the shift triple (13, 17, 5) applied left, right, left,
//! and every output is the new state multiplied by a fixed odd constant.
//! Two generators never share state, so interleaved runs stay reproducible.

use rand::{RngCore, SeedableRng};

/// Multiplier applied to the xorshift state to scramble the output
pub const XORSHIFT_STAR_MULTIPLIER: u64 = 0x2545_F491_4F6C_DD1D;

/// Substitute state used when a run is seeded with zero
///
/// A zero xorshift state is a fixed point and would emit zeros forever.
pub const ZERO_SEED_REPLACEMENT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic 64-bit xorshift* generator
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XorShiftStar {
    state: u64,
}

impl XorShiftStar {
    /// Create a generator whose state is the given seed
    pub const fn new(seed: u64) -> Self {
        let state = if seed == 0 {
            ZERO_SEED_REPLACEMENT
        } else {
            seed
        };
        Self { state }
    }

    /// Current internal state
    pub const fn state(&self) -> u64 {
        self.state
    }

    /// Advance the state and return the full 64-bit output
    pub const fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x.wrapping_mul(XORSHIFT_STAR_MULTIPLIER)
    }

    /// Advance the state and return the high 32 bits of the output
    pub const fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Uniform sample in `[0, 1)` built from the top 53 output bits
    pub const fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (1u64 << 53) as f64;
        (self.next_u64() >> 11) as f64 * SCALE
    }

    /// Uniform index in `0..len`, or `None` for an empty range
    pub fn next_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let index = (self.next_f64() * len as f64) as usize;
        Some(index.min(len - 1))
    }
}

impl Default for XorShiftStar {
    fn default() -> Self {
        Self::new(crate::io::configuration::DEFAULT_SEED)
    }
}

impl RngCore for XorShiftStar {
    fn next_u32(&mut self) -> u32 {
        Self::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        Self::next_u64(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = Self::next_u64(self).to_le_bytes();
            for (slot, byte) in chunk.iter_mut().zip(bytes) {
                *slot = byte;
            }
        }
    }
}

impl SeedableRng for XorShiftStar {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
