//! The result of hashing an image.

use crate::config::HashBits;
use crate::error::{BlockhashError, Result};
use crate::hex;

/// A blockhash: `bits * bits` values, each 0 or 1, in row-major block order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hash {
    size: HashBits,
    bits: Vec<u8>,
}

impl Hash {
    /// Wraps a bit matrix.
    ///
    /// Fails with [`BlockhashError::InvalidInput`] if `bits` does not hold
    /// `size * size` elements or contains anything other than 0 and 1.
    pub fn from_bits(size: HashBits, bits: Vec<u8>) -> Result<Self> {
        if bits.len() != size.block_count() {
            return Err(BlockhashError::invalid_input(format!(
                "expected {} bits for a {size}x{size} hash, got {}",
                size.block_count(),
                bits.len()
            )));
        }
        if let Some(pos) = bits.iter().position(|&b| b > 1) {
            return Err(BlockhashError::invalid_input(format!(
                "bit {pos} is {}, expected 0 or 1",
                bits[pos]
            )));
        }
        Ok(Hash { size, bits })
    }

    /// The grid size the hash was computed with.
    pub fn hash_bits(&self) -> HashBits {
        self.size
    }

    /// The bit matrix.
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// The bit matrix as booleans.
    pub fn to_bools(&self) -> Vec<bool> {
        self.bits.iter().map(|&b| b == 1).collect()
    }

    /// Consumes the hash, returning the bit matrix.
    pub fn into_bits(self) -> Vec<u8> {
        self.bits
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always false for a hash produced by this crate.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Lowercase hexadecimal representation, four digits per 16 bits.
    ///
    /// Fails with [`BlockhashError::InvalidInput`] for hashes of fewer than
    /// 16 bits, see [`HashBits::is_hex_encodable`].
    pub fn to_hex(&self) -> Result<String> {
        hex::encode(&self.bits)
    }
}
