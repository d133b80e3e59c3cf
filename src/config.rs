//! Hash configuration.

use crate::error::{BlockhashError, Result};
use std::fmt;

/// The number of blocks along each side of the image.
///
/// A hash computed with `HashBits(n)` has `n * n` bits. Only powers of two
/// `>= 2` are accepted, which guarantees that the flattened block matrix can
/// be split into four equal bands. Hex encoding additionally requires
/// `n * n` to be a multiple of 16, see [`HashBits::is_hex_encodable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HashBits(u32);

impl HashBits {
    /// 8 × 8 blocks, 64 bit hash.
    pub const EIGHT: HashBits = HashBits(8);
    /// 16 × 16 blocks, 256 bit hash.
    pub const SIXTEEN: HashBits = HashBits(16);

    /// Validates `bits`.
    ///
    /// Fails with [`BlockhashError::InvalidConfiguration`] unless `bits` is a
    /// power of two and at least 2.
    pub fn new(bits: u32) -> Result<Self> {
        if bits < 2 || !bits.is_power_of_two() {
            return Err(BlockhashError::invalid_configuration(format!(
                "bits must be a power of two >= 2, got {bits}"
            )));
        }
        // bits * bits must fit in a usize on every target
        if bits > u16::MAX as u32 {
            return Err(BlockhashError::invalid_configuration(format!(
                "bits must be at most {}, got {bits}",
                u16::MAX
            )));
        }
        Ok(HashBits(bits))
    }

    /// Number of blocks along one side of the grid.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Total number of blocks, and of bits in the hash.
    pub fn block_count(self) -> usize {
        (self.0 as usize) * (self.0 as usize)
    }

    /// Whether a hash of this size can be written as hex, which packs
    /// 16 bits per chunk.
    pub fn is_hex_encodable(self) -> bool {
        self.block_count() % 16 == 0
    }

    /// Length of the hex encoding of a hash of this size.
    pub fn hex_len(self) -> usize {
        self.block_count() / 4
    }
}

impl Default for HashBits {
    fn default() -> Self {
        HashBits::SIXTEEN
    }
}

impl TryFrom<u32> for HashBits {
    type Error = BlockhashError;

    fn try_from(bits: u32) -> Result<Self> {
        HashBits::new(bits)
    }
}

impl fmt::Display for HashBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
