//! Trait definitions and type aliases.

use image::{ImageBuffer, Luma, LumaA, Pixel, Rgb, Rgba};

/// An `ImageBuffer` containing Pixels of type P with storage `Vec<P::Subpixel>`.
pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;

/// Largest channel value on the 16-bit scale.
pub const CHANNEL_MAX: u64 = u16::MAX as u64;

/// Pixels that can report the summed intensity of their red, green and blue
/// channels.
///
/// Channels are normalized to 16 bits (an 8-bit value `c` becomes
/// `c * 257`) and premultiplied by alpha, so a fully transparent pixel has
/// intensity zero. Gray pixels contribute their luma on each of the three
/// channels. All block values, and therefore all hashes, are computed on
/// this scale.
pub trait ChannelIntensity {
    /// Returns `R + G + B` on the 16-bit, alpha-premultiplied scale.
    fn intensity(&self) -> u64;
}

/// Widens an 8-bit channel to 16 bits.
#[inline]
fn widen(c: u8) -> u64 {
    c as u64 * 257
}

#[inline]
fn premultiply(c: u64, alpha: u64) -> u64 {
    c * alpha / CHANNEL_MAX
}

/// Creates an implementation of ChannelIntensity for a pixel type with
/// the given channel widening.
macro_rules! implement_intensity {
    (Rgb<$t:ty>, $widen:expr) => {
        impl ChannelIntensity for Rgb<$t> {
            #[inline]
            fn intensity(&self) -> u64 {
                let [r, g, b] = self.0;
                $widen(r) + $widen(g) + $widen(b)
            }
        }
    };
    (Rgba<$t:ty>, $widen:expr) => {
        impl ChannelIntensity for Rgba<$t> {
            #[inline]
            fn intensity(&self) -> u64 {
                let [r, g, b, a] = self.0;
                let a = $widen(a);
                premultiply($widen(r), a) + premultiply($widen(g), a) + premultiply($widen(b), a)
            }
        }
    };
    (Luma<$t:ty>, $widen:expr) => {
        impl ChannelIntensity for Luma<$t> {
            #[inline]
            fn intensity(&self) -> u64 {
                3 * $widen(self.0[0])
            }
        }
    };
    (LumaA<$t:ty>, $widen:expr) => {
        impl ChannelIntensity for LumaA<$t> {
            #[inline]
            fn intensity(&self) -> u64 {
                let [l, a] = self.0;
                3 * premultiply($widen(l), $widen(a))
            }
        }
    };
}

implement_intensity!(Rgb<u8>, widen);
implement_intensity!(Rgba<u8>, widen);
implement_intensity!(Luma<u8>, widen);
implement_intensity!(LumaA<u8>, widen);
implement_intensity!(Rgb<u16>, u64::from);
implement_intensity!(Rgba<u16>, u64::from);
implement_intensity!(Luma<u16>, u64::from);
implement_intensity!(LumaA<u16>, u64::from);
