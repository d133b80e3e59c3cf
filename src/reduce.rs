//! Reduction of a pixel grid to one intensity value per block.

use crate::config::HashBits;
use crate::definitions::ChannelIntensity;
use crate::error::{BlockhashError, Result};
use image::GenericImageView;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// The summed channel intensities of each block of an image, in row-major
/// order: the value of block `(x, y)` is at index `y * bits + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockValues {
    bits: HashBits,
    block_width: u32,
    block_height: u32,
    values: Vec<u64>,
}

impl BlockValues {
    /// Wraps precomputed block values.
    ///
    /// Fails with [`BlockhashError::InvalidConfiguration`] if `values` does not
    /// hold exactly `bits * bits` entries or a block would be empty.
    pub fn from_values(
        bits: HashBits,
        block_width: u32,
        block_height: u32,
        values: Vec<u64>,
    ) -> Result<Self> {
        if values.len() != bits.block_count() {
            return Err(BlockhashError::invalid_configuration(format!(
                "expected {} block values for bits = {bits}, got {}",
                bits.block_count(),
                values.len()
            )));
        }
        if block_width == 0 || block_height == 0 {
            return Err(BlockhashError::invalid_configuration(format!(
                "blocks must not be empty, got {block_width}x{block_height}"
            )));
        }
        Ok(BlockValues {
            bits,
            block_width,
            block_height,
            values,
        })
    }

    /// Number of blocks along each side.
    pub fn bits(&self) -> HashBits {
        self.bits
    }

    /// Width and height of a block in pixels.
    pub fn block_dimensions(&self) -> (u32, u32) {
        (self.block_width, self.block_height)
    }

    /// Number of pixels summed into each block.
    pub fn pixels_per_block(&self) -> u64 {
        self.block_width as u64 * self.block_height as u64
    }

    /// Value of the block in column `x` and row `y`.
    ///
    /// # Panics
    /// If `x` or `y` is not less than `bits`.
    pub fn get(&self, x: u32, y: u32) -> u64 {
        let n = self.bits.get();
        assert!(x < n && y < n, "block ({x}, {y}) outside a {n}x{n} grid");
        self.values[(y * n + x) as usize]
    }

    /// The flattened block values.
    pub fn as_slice(&self) -> &[u64] {
        &self.values
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a validated matrix.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Size in pixels of a single block of `image`, after checking that every
/// block holds at least one pixel.
pub(crate) fn check_dimensions<I: GenericImageView>(image: &I, bits: HashBits) -> Result<(u32, u32)> {
    let (width, height) = image.dimensions();
    let n = bits.get();
    if width < n || height < n {
        return Err(BlockhashError::invalid_configuration(format!(
            "image of {width}x{height} pixels is smaller than the {n}x{n} block grid"
        )));
    }
    Ok((width / n, height / n))
}

/// Sums the intensities of block `(bx, by)`.
fn block_sum<I>(image: &I, bx: u32, by: u32, block_width: u32, block_height: u32) -> u64
where
    I: GenericImageView,
    I::Pixel: ChannelIntensity,
{
    let x0 = bx * block_width;
    let y0 = by * block_height;
    let mut sum = 0u64;
    for y in y0..y0 + block_height {
        for x in x0..x0 + block_width {
            sum += image.get_pixel(x, y).intensity();
        }
    }
    sum
}

/// Divides `image` into `bits × bits` blocks and sums the
/// [intensity](ChannelIntensity) of every pixel in each block.
///
/// Blocks are `width / bits` by `height / bits` pixels. When a dimension is
/// not a multiple of `bits` the trailing columns or rows are left out of
/// every block.
///
/// Fails with [`BlockhashError::InvalidConfiguration`] if the image is
/// narrower or shorter than `bits` pixels.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate blockhash;
/// # fn main() {
/// use blockhash::{reduce::block_values, HashBits};
///
/// let image = gray_image!(
///     1, 1, 2, 2;
///     1, 1, 2, 2;
///     3, 3, 4, 4;
///     3, 3, 4, 4);
///
/// let blocks = block_values(&image, HashBits::new(2).unwrap()).unwrap();
/// // 4 pixels per block, 3 channels each, widened to 16 bits
/// assert_eq!(blocks.as_slice(), &[12 * 257, 24 * 257, 36 * 257, 48 * 257]);
/// # }
/// ```
pub fn block_values<I>(image: &I, bits: HashBits) -> Result<BlockValues>
where
    I: GenericImageView,
    I::Pixel: ChannelIntensity,
{
    let (block_width, block_height) = check_dimensions(image, bits)?;
    let n = bits.get();

    let mut values = Vec::with_capacity(bits.block_count());
    for by in 0..n {
        for bx in 0..n {
            values.push(block_sum(image, bx, by, block_width, block_height));
        }
    }

    BlockValues::from_values(bits, block_width, block_height, values)
}

#[cfg(feature = "rayon")]
#[doc = generate_parallel_doc_comment!("block_values")]
pub fn block_values_parallel<I>(image: &I, bits: HashBits) -> Result<BlockValues>
where
    I: GenericImageView + Sync,
    I::Pixel: ChannelIntensity,
{
    let (block_width, block_height) = check_dimensions(image, bits)?;
    let n = bits.get() as usize;

    let values = (0..bits.block_count())
        .into_par_iter()
        .map(|i| {
            let (bx, by) = ((i % n) as u32, (i / n) as u32);
            block_sum(image, bx, by, block_width, block_height)
        })
        .collect();

    BlockValues::from_values(bits, block_width, block_height, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    fn bits(n: u32) -> HashBits {
        HashBits::new(n).unwrap()
    }

    #[test]
    fn test_block_values_row_major() {
        let image = gray_image!(
            1, 2;
            3, 4);
        let blocks = block_values(&image, bits(2)).unwrap();
        assert_eq!(blocks.pixels_per_block(), 1);
        assert_eq!(blocks.as_slice(), &[3 * 257, 6 * 257, 9 * 257, 12 * 257]);
        assert_eq!(blocks.get(1, 0), 6 * 257);
        assert_eq!(blocks.get(0, 1), 9 * 257);
    }

    #[test]
    fn test_block_values_sums_rgb_channels() {
        let image = rgb_image!(
            [1, 2, 3], [0, 0, 0];
            [0, 0, 0], [10, 20, 30]);
        let blocks = block_values(&image, bits(2)).unwrap();
        assert_eq!(blocks.as_slice(), &[6 * 257, 0, 0, 60 * 257]);
    }

    #[test]
    fn test_block_values_truncates_trailing_pixels() {
        // 5x3 image, 2x2 grid: blocks are 2x1, last column and row dropped
        let image = gray_image!(
            1, 1, 2, 2, 200;
            3, 3, 4, 4, 200;
            200, 200, 200, 200, 200);
        let blocks = block_values(&image, bits(2)).unwrap();
        assert_eq!(blocks.block_dimensions(), (2, 1));
        assert_eq!(
            blocks.as_slice(),
            &[6 * 257, 12 * 257, 18 * 257, 24 * 257]
        );
    }

    #[test]
    fn test_block_values_length() {
        let image = RgbImage::from_pixel(37, 41, Rgb([9, 9, 9]));
        let blocks = block_values(&image, bits(16)).unwrap();
        assert_eq!(blocks.len(), 256);
        assert_eq!(blocks.block_dimensions(), (2, 2));
        assert!(blocks.as_slice().iter().all(|&v| v == 4 * 27 * 257));
    }

    #[test]
    fn test_block_values_image_too_small() {
        let image = GrayImage::from_pixel(16, 15, Luma([1]));
        let err = block_values(&image, bits(16)).unwrap_err();
        assert!(matches!(err, BlockhashError::InvalidConfiguration(_)));

        let image = GrayImage::from_pixel(15, 16, Luma([1]));
        assert!(block_values(&image, bits(16)).is_err());

        let image = GrayImage::new(0, 0);
        assert!(block_values(&image, bits(2)).is_err());
    }

    #[test]
    fn test_from_values_checks_length() {
        assert!(BlockValues::from_values(bits(2), 1, 1, vec![0; 4]).is_ok());
        assert!(BlockValues::from_values(bits(2), 1, 1, vec![0; 5]).is_err());
        assert!(BlockValues::from_values(bits(2), 0, 1, vec![0; 4]).is_err());
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_bounds() {
        let blocks = BlockValues::from_values(bits(2), 1, 1, vec![0; 4]).unwrap();
        blocks.get(2, 0);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_parallel_matches_sequential() {
        let image = RgbImage::from_fn(67, 45, |x, y| Rgb([(x * 3) as u8, (y * 5) as u8, (x ^ y) as u8]));
        for n in [2, 4, 8, 16] {
            assert_eq!(
                block_values(&image, bits(n)).unwrap(),
                block_values_parallel(&image, bits(n)).unwrap()
            );
        }
    }
}

#[cfg(not(miri))]
#[cfg(test)]
mod proptests {
    use super::*;
    use crate::proptest_utils::arbitrary_image;
    use image::Rgb;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn proptest_block_values_len(img in arbitrary_image::<Rgb<u8>>(8..40, 8..40)) {
            let blocks = block_values(&img, HashBits::EIGHT).unwrap();
            prop_assert_eq!(blocks.len(), 64);
        }

        #[test]
        fn proptest_block_values_bounded(img in arbitrary_image::<Rgb<u8>>(4..30, 4..30)) {
            let blocks = block_values(&img, HashBits::new(4).unwrap()).unwrap();
            let max = blocks.pixels_per_block() * 3 * 65535;
            prop_assert!(blocks.as_slice().iter().all(|&v| v <= max));
        }
    }
}
