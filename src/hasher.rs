//! Computing hashes: decode, reduce to block values, threshold.

use crate::config::HashBits;
use crate::decode::Decoder;
use crate::definitions::ChannelIntensity;
use crate::error::Result;
use crate::hash::Hash;
use crate::reduce::{self, BlockValues};
use crate::threshold::threshold_blocks;
use image::{DynamicImage, GenericImageView};
use std::io::Read;
use tracing::debug;

/// Hashes images with a fixed grid size and decoder.
///
/// # Example
/// ```
/// use blockhash::{Blockhasher, HashBits};
/// use image::{DynamicImage, RgbImage};
///
/// # fn main() -> blockhash::Result<()> {
/// let image = RgbImage::from_fn(64, 48, |x, y| image::Rgb([x as u8 * 4, y as u8 * 5, 0]));
/// let hasher = Blockhasher::new(8)?;
/// let hash = hasher.hash_image(&DynamicImage::ImageRgb8(image))?;
/// assert_eq!(hash.hash_bits(), HashBits::EIGHT);
/// assert_eq!(hash.to_hex()?.len(), 16);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Blockhasher {
    bits: HashBits,
    decoder: Decoder,
    #[cfg(feature = "rayon")]
    parallel: bool,
}

impl Blockhasher {
    /// A hasher dividing images into `bits × bits` blocks, decoding JPEG and
    /// PNG streams.
    ///
    /// Fails with [`BlockhashError::InvalidConfiguration`](crate::BlockhashError::InvalidConfiguration)
    /// unless `bits` is a power of two `>= 2`.
    pub fn new(bits: u32) -> Result<Self> {
        Ok(Self::with_bits(HashBits::new(bits)?))
    }

    /// A hasher for an already validated grid size.
    pub fn with_bits(bits: HashBits) -> Self {
        Blockhasher {
            bits,
            ..Default::default()
        }
    }

    /// Replaces the decoder used by [`Blockhasher::hash_reader`].
    pub fn decoder(self, decoder: Decoder) -> Self {
        Blockhasher { decoder, ..self }
    }

    /// Sums blocks on the rayon thread pool. Hashes are unchanged.
    #[cfg(feature = "rayon")]
    pub fn parallel(self, parallel: bool) -> Self {
        Blockhasher { parallel, ..self }
    }

    /// The grid size.
    pub fn bits(&self) -> HashBits {
        self.bits
    }

    /// Decodes an image from `reader` and hashes it.
    ///
    /// The reader is consumed to the end. Opening and closing the
    /// underlying resource is left to the caller.
    pub fn hash_reader<R: Read>(&self, reader: R) -> Result<Hash> {
        let image = self.decoder.decode(reader)?;
        self.hash_image(&image)
    }

    /// Hashes a decoded image.
    ///
    /// Images with more than 8 bits per channel are read at 16 bits per
    /// channel, everything else at its native depth.
    pub fn hash_image(&self, image: &DynamicImage) -> Result<Hash> {
        match image {
            DynamicImage::ImageLuma8(buf) => self.hash_pixels(buf),
            DynamicImage::ImageLumaA8(buf) => self.hash_pixels(buf),
            DynamicImage::ImageRgb8(buf) => self.hash_pixels(buf),
            DynamicImage::ImageRgba8(buf) => self.hash_pixels(buf),
            DynamicImage::ImageLuma16(buf) => self.hash_pixels(buf),
            DynamicImage::ImageLumaA16(buf) => self.hash_pixels(buf),
            DynamicImage::ImageRgb16(buf) => self.hash_pixels(buf),
            DynamicImage::ImageRgba16(buf) => self.hash_pixels(buf),
            other => {
                // reject before converting the whole image
                reduce::check_dimensions(other, self.bits)?;
                self.hash_pixels(&other.to_rgba16())
            }
        }
    }

    /// Hashes any pixel grid whose pixels report a
    /// [channel intensity](ChannelIntensity).
    pub fn hash_pixels<I>(&self, image: &I) -> Result<Hash>
    where
        I: GenericImageView + Sync,
        I::Pixel: ChannelIntensity,
    {
        let blocks = self.block_values(image)?;
        let (block_width, block_height) = blocks.block_dimensions();
        debug!(
            width = image.width(),
            height = image.height(),
            bits = self.bits.get(),
            block_width,
            block_height,
            "reduced image to blocks"
        );
        let bits = threshold_blocks(&blocks)?;
        Hash::from_bits(self.bits, bits)
    }

    #[cfg(feature = "rayon")]
    fn block_values<I>(&self, image: &I) -> Result<BlockValues>
    where
        I: GenericImageView + Sync,
        I::Pixel: ChannelIntensity,
    {
        if self.parallel {
            reduce::block_values_parallel(image, self.bits)
        } else {
            reduce::block_values(image, self.bits)
        }
    }

    #[cfg(not(feature = "rayon"))]
    fn block_values<I>(&self, image: &I) -> Result<BlockValues>
    where
        I: GenericImageView + Sync,
        I::Pixel: ChannelIntensity,
    {
        reduce::block_values(image, self.bits)
    }
}

/// Decodes a JPEG or PNG image from `reader` and computes its blockhash
/// with `bits × bits` blocks.
///
/// `bits` is validated before the stream is read.
///
/// # Example
/// ```no_run
/// use std::fs::File;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = blockhash::blockhash(File::open("almond-blossom.jpg")?, 16)?;
/// println!("Bits {:?}", &hash.bits()[..32]);
/// println!("Hex {}", hash.to_hex()?);
/// # Ok(())
/// # }
/// ```
pub fn blockhash<R: Read>(reader: R, bits: u32) -> Result<Hash> {
    Blockhasher::new(bits)?.hash_reader(reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BlockhashError;
    use image::{GrayImage, ImageFormat, Luma, Rgb, Rgb32FImage, RgbImage, Rgba};
    use std::io::Cursor;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, ((x + y) % 256) as u8])
        })
    }

    fn png_bytes(image: DynamicImage) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_hash_length_and_values() {
        let image = gradient(100, 80);
        for bits in [4, 8, 16] {
            let hash = Blockhasher::new(bits).unwrap().hash_pixels(&image).unwrap();
            assert_eq!(hash.len(), (bits * bits) as usize);
            assert!(hash.bits().iter().all(|&b| b <= 1));
            assert_eq!(hash.to_hex().unwrap().len(), (bits * bits / 4) as usize);
        }
    }

    #[test]
    fn test_deterministic() {
        let image = DynamicImage::ImageRgb8(gradient(64, 64));
        let hasher = Blockhasher::new(16).unwrap();
        assert_eq!(hasher.hash_image(&image).unwrap(), hasher.hash_image(&image).unwrap());
    }

    #[test]
    fn test_left_dark_right_bright() {
        let image = GrayImage::from_fn(8, 8, |x, _| Luma([if x < 4 { 10 } else { 240 }]));
        let hash = Blockhasher::new(4).unwrap().hash_pixels(&image).unwrap();
        assert_eq!(hash.bits(), &[0, 0, 1, 1].repeat(4)[..]);
        assert_eq!(hash.to_hex().unwrap(), "3333");
    }

    #[test]
    fn test_reader_matches_image() {
        let image = DynamicImage::ImageRgb8(gradient(50, 40));
        let hasher = Blockhasher::new(8).unwrap();
        let from_reader = hasher.hash_reader(png_bytes(image.clone()).as_slice()).unwrap();
        assert_eq!(from_reader, hasher.hash_image(&image).unwrap());
        assert_eq!(blockhash(png_bytes(image).as_slice(), 8).unwrap(), from_reader);
    }

    #[test]
    fn test_hash_image_matches_converted_pixels() {
        let rgb = gradient(33, 17);
        let hasher = Blockhasher::new(8).unwrap();
        let expected = hasher.hash_pixels(&rgb).unwrap();

        let rgba = DynamicImage::ImageRgb8(rgb.clone()).to_rgba8();
        assert_eq!(hasher.hash_pixels(&rgba).unwrap(), expected);
        let rgb16 = DynamicImage::ImageRgb8(rgb.clone()).into_rgb16();
        assert_eq!(hasher.hash_image(&DynamicImage::ImageRgb16(rgb16)).unwrap(), expected);
        let rgb32f: Rgb32FImage = DynamicImage::ImageRgb8(rgb).into_rgb32f();
        assert_eq!(hasher.hash_image(&DynamicImage::ImageRgb32F(rgb32f)).unwrap(), expected);
    }

    #[test]
    fn test_transparent_pixels_are_dark() {
        let opaque = image::RgbaImage::from_fn(16, 16, |x, _| {
            if x < 8 { Rgba([0, 0, 0, 255]) } else { Rgba([255, 255, 255, 255]) }
        });
        let mut transparent = opaque.clone();
        for y in 0..16 {
            for x in 8..16 {
                transparent.put_pixel(x, y, Rgba([255, 255, 255, 0]));
            }
        }
        let hasher = Blockhasher::new(4).unwrap();
        assert_eq!(hasher.hash_pixels(&opaque).unwrap().to_hex().unwrap(), "3333");
        assert_eq!(hasher.hash_pixels(&transparent).unwrap().to_hex().unwrap(), "0000");
    }

    #[test]
    fn test_invalid_bits() {
        for bits in [0, 1, 3, 6] {
            let err = blockhash(&b""[..], bits).unwrap_err();
            assert!(matches!(err, BlockhashError::InvalidConfiguration(_)), "bits = {bits}");
        }
    }

    #[test]
    fn test_image_smaller_than_grid() {
        let hasher = Blockhasher::new(16).unwrap();
        let err = hasher.hash_pixels(&gradient(15, 100)).unwrap_err();
        assert!(matches!(err, BlockhashError::InvalidConfiguration(_)));

        let tiny = DynamicImage::ImageRgb32F(Rgb32FImage::new(100, 3));
        let err = hasher.hash_image(&tiny).unwrap_err();
        assert!(matches!(err, BlockhashError::InvalidConfiguration(_)));

        let err = hasher.hash_reader(png_bytes(DynamicImage::ImageRgb8(gradient(8, 8))).as_slice());
        assert!(matches!(err, Err(BlockhashError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_decode_error_aborts() {
        let err = blockhash(&b"\x89PNG\r\n\x1a\n garbage"[..], 16).unwrap_err();
        assert!(matches!(err, BlockhashError::Decode(_)));
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_parallel_hash_matches() {
        let image = DynamicImage::ImageRgb8(gradient(123, 77));
        let hasher = Blockhasher::new(16).unwrap();
        assert_eq!(
            hasher.clone().parallel(true).hash_image(&image).unwrap(),
            hasher.hash_image(&image).unwrap()
        );
    }
}
