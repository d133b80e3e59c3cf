//! Assorted arithmetic used by the thresholding stage.

use itertools::Itertools;

/// Returns the median of `data` in the blockhash convention.
///
/// For odd lengths this is the middle element of the sorted values. For even
/// lengths it is the truncated mean of the sorted elements at `len / 2` and
/// `len / 2 + 1`, i.e. the upper middle element and its successor rather
/// than the two middle elements. Published blockhash values depend on this
/// indexing. A two element slice has no successor; its upper element is used
/// twice.
///
/// # Panics
/// If `data` is empty.
///
/// # Examples
/// ```
/// use blockhash::math::median;
///
/// assert_eq!(median(&[3, 1, 2]), 2);
/// // (sorted[2] + sorted[3]) / 2
/// assert_eq!(median(&[4, 1, 3, 2]), 3);
/// ```
pub fn median(data: &[u64]) -> u64 {
    assert!(!data.is_empty(), "median of an empty slice");

    let sorted: Vec<u64> = data.iter().copied().sorted_unstable().collect();
    let len = sorted.len();
    let mid = len / 2;
    if len % 2 == 0 {
        let next = (mid + 1).min(len - 1);
        // the sum of two block values cannot overflow: each is at most
        // 3 * 65535 * pixels per block
        (sorted[mid] + sorted[next]) / 2
    } else {
        sorted[mid]
    }
}

/// The value a block would have if every channel of every pixel sat at the
/// midpoint of the 8-bit range: `pixels_per_block * 256 * 3 / 2`.
///
/// Block values are on the 16-bit scale, so any block that is not close to
/// black lies above this value. The mismatch is part of the published
/// algorithm and is kept for hash compatibility.
pub fn half_block_value(pixels_per_block: u64) -> u64 {
    pixels_per_block * 256 * 3 / 2
}
