//! Hexadecimal encoding of bit matrices.

use crate::error::{BlockhashError, Result};
use std::fmt::Write;

/// Number of bits packed into each group of four hex digits.
pub const CHUNK_BITS: usize = 16;

/// Packs one chunk of up to 16 bits. The first bit of the chunk becomes the
/// most significant bit of the result.
fn pack_chunk(chunk: &[u8]) -> u16 {
    chunk
        .iter()
        .rev()
        .enumerate()
        .filter(|&(_, &bit)| bit == 1)
        .fold(0u16, |acc, (i, _)| acc | (1 << i))
}

/// Encodes a matrix of 0s and 1s as a lowercase hexadecimal string.
///
/// The matrix is read in chunks of 16 bits. Within a chunk the first bit is
/// the most significant, and each chunk is written as four zero padded hex
/// digits. Elements other than 1 are treated as unset.
///
/// Fails with [`BlockhashError::InvalidInput`] if the length of `bits` is
/// not a multiple of 16.
///
/// # Examples
/// ```
/// use blockhash::hex::encode;
///
/// let mut bits = vec![0u8; 32];
/// bits[0] = 1;
/// bits[31] = 1;
/// assert_eq!(encode(&bits).unwrap(), "80000001");
/// ```
pub fn encode(bits: &[u8]) -> Result<String> {
    if bits.len() % CHUNK_BITS != 0 {
        return Err(BlockhashError::invalid_input(format!(
            "bit count must be a multiple of {CHUNK_BITS} to encode as hex, got {}",
            bits.len()
        )));
    }

    let mut hex = String::with_capacity(bits.len() / 4);
    for chunk in bits.chunks_exact(CHUNK_BITS) {
        // writing to a String cannot fail
        let _ = write!(hex, "{:04x}", pack_chunk(chunk));
    }
    Ok(hex)
}
