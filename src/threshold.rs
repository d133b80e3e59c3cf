//! Conversion of block values to bits by thresholding each horizontal band
//! against its own median.

use crate::error::{BlockhashError, Result};
use crate::math::{half_block_value, median};
use crate::reduce::BlockValues;
use tracing::trace;

/// Number of contiguous bands the flattened block matrix is split into.
pub const NUM_BANDS: usize = 4;

/// Thresholds the values of `blocks`, see [`threshold_values`].
pub fn threshold_blocks(blocks: &BlockValues) -> Result<Vec<u8>> {
    threshold_values(blocks.as_slice(), blocks.pixels_per_block())
}

/// Converts a flattened block matrix into a matrix of 0s and 1s of the same
/// length and order.
///
/// `values` is split into [`NUM_BANDS`] contiguous bands of equal length and
/// each band is compared against its own [`median`]. A value maps to 1 if it
/// is greater than the median, or if it equals the median and the median
/// is above [`half_block_value`]. Everything else maps to 0.
///
/// Fails with [`BlockhashError::InvalidConfiguration`] if `values` is empty
/// or its length is not a multiple of [`NUM_BANDS`].
///
/// # Examples
/// ```
/// use blockhash::threshold::threshold_values;
///
/// let values = [
///     1, 5, 3, 9, // median 7
///     400, 400, 400, 400, // median 400, above the half block value 384
///     10, 20, 30, 40, // median 35
///     0, 0, 0, 0, // median 0
/// ];
/// let bits = threshold_values(&values, 1).unwrap();
/// assert_eq!(bits, vec![0, 0, 0, 1, 1, 1, 1, 1, 0, 0, 0, 1, 0, 0, 0, 0]);
/// ```
pub fn threshold_values(values: &[u64], pixels_per_block: u64) -> Result<Vec<u8>> {
    if values.is_empty() || values.len() % NUM_BANDS != 0 {
        return Err(BlockhashError::invalid_configuration(format!(
            "block count must be a positive multiple of {NUM_BANDS}, got {}",
            values.len()
        )));
    }

    let half = half_block_value(pixels_per_block);
    let band_size = values.len() / NUM_BANDS;

    let mut bits = Vec::with_capacity(values.len());
    for (i, band) in values.chunks_exact(band_size).enumerate() {
        let m = median(band);
        let keep_ties = m > half;
        trace!(band = i, median = m, half_block_value = half, "thresholding band");
        bits.extend(band.iter().map(|&v| u8::from(v > m || (keep_ties && v == m))));
    }

    debug_assert_eq!(bits.len(), values.len());
    Ok(bits)
}
