//! Utils for building small test images inline.

/// Helper for defining greyscale images.
///
/// Columns are separated by commas and rows by semi-colons.
/// By default a subpixel type of `u8` is used but this can be
/// overridden, as shown in the examples.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate blockhash;
/// # fn main() {
/// use image::{GrayImage, ImageBuffer, Luma};
///
/// // An empty grayscale image with pixel type Luma<u8>
/// let empty = gray_image!();
///
/// assert_eq!(
///     empty,
///     GrayImage::from_raw(0, 0, vec![]).unwrap()
/// );
///
/// // A 2x3 grayscale image with pixel type Luma<u8>
/// let image = gray_image!(
///     1, 2, 3;
///     4, 5, 6);
///
/// assert_eq!(
///     image,
///     GrayImage::from_raw(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap()
/// );
///
/// // A 2x3 grayscale image with pixel type Luma<u16>
/// let image = gray_image!(type: u16,
///     1, 2, 3;
///     4, 5, 6);
///
/// assert_eq!(
///     image,
///     ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap()
/// );
/// # }
/// ```
#[macro_export]
macro_rules! gray_image {
    // Empty image with default channel type u8
    () => {
        $crate::gray_image!(type: u8)
    };
    // Empty image with the given channel type
    (type: $channel_type:ty) => {{
        ::image::ImageBuffer::<::image::Luma<$channel_type>, Vec<$channel_type>>::new(0, 0)
    }};
    // Non-empty image of default channel type u8
    ($( $( $x: expr ),*);*) => {
        $crate::gray_image!(type: u8, $( $( $x ),*);*)
    };
    // Non-empty image of given channel type
    (type: $channel_type:ty, $( $( $x: expr ),*);*) => {{
        let nested_array = [ $( [ $($x),* ] ),* ];
        let height = nested_array.len() as u32;
        let width = nested_array[0].len() as u32;

        let flat_array: Vec<$channel_type> = nested_array.iter()
            .flat_map(|row| row.iter())
            .cloned()
            .collect();

        ::image::ImageBuffer::<::image::Luma<$channel_type>, Vec<$channel_type>>::from_raw(width, height, flat_array)
            .unwrap()
    }}
}

/// Helper for defining RGB images.
///
/// Pixels are delineated by square brackets, columns are
/// separated by commas and rows are separated by semi-colons.
/// By default a subpixel type of `u8` is used but this can be
/// overridden, as shown in the examples.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate blockhash;
/// # fn main() {
/// use image::{ImageBuffer, Rgb, RgbImage};
///
/// // A 2x3 RGB image with pixel type Rgb<u8>
/// let image = rgb_image!(
///     [1, 2, 3], [4, 5, 6], [7, 8, 9];
///     [9, 8, 7], [6, 5, 4], [3, 2, 1]);
///
/// let equivalent = RgbImage::from_raw(3, 2, vec![
///     1, 2, 3, 4, 5, 6, 7, 8, 9,
///     9, 8, 7, 6, 5, 4, 3, 2, 1
/// ]).unwrap();
///
/// assert_eq!(image, equivalent);
///
/// // A 1x2 RGB image with pixel type Rgb<u16>
/// let image = rgb_image!(type: u16,
///     [1, 2, 3], [4, 5, 6]);
///
/// assert_eq!(
///     image,
///     ImageBuffer::<Rgb<u16>, Vec<u16>>::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap()
/// );
/// # }
/// ```
#[macro_export]
macro_rules! rgb_image {
    // Non-empty image of default channel type u8
    ($( $( [$r: expr, $g: expr, $b: expr]),*);*) => {
        $crate::rgb_image!(type: u8, $( $( [$r, $g, $b]),*);*)
    };
    // Non-empty image of given channel type
    (type: $channel_type:ty, $( $( [$r: expr, $g: expr, $b: expr]),*);*) => {{
        let nested_array = [$( [ $([$r, $g, $b]),*]),*];
        let height = nested_array.len() as u32;
        let width = nested_array[0].len() as u32;

        let flat_array: Vec<$channel_type> = nested_array.iter()
            .flat_map(|row| row.iter().flat_map(|p| p.iter()))
            .cloned()
            .collect();

        ::image::ImageBuffer::<::image::Rgb<$channel_type>, Vec<$channel_type>>::from_raw(width, height, flat_array)
            .unwrap()
    }}
}

/// Helper for defining RGBA images.
///
/// Pixels are delineated by square brackets, columns are
/// separated by commas and rows are separated by semi-colons.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate blockhash;
/// # fn main() {
/// use image::RgbaImage;
///
/// let image = rgba_image!(
///     [1, 2, 3, 255], [4, 5, 6, 0]);
///
/// assert_eq!(
///     image,
///     RgbaImage::from_raw(2, 1, vec![1, 2, 3, 255, 4, 5, 6, 0]).unwrap()
/// );
/// # }
/// ```
#[macro_export]
macro_rules! rgba_image {
    ($( $( [$r: expr, $g: expr, $b: expr, $a: expr]),*);*) => {{
        let nested_array = [$( [ $([$r, $g, $b, $a]),*]),*];
        let height = nested_array.len() as u32;
        let width = nested_array[0].len() as u32;

        let flat_array: Vec<u8> = nested_array.iter()
            .flat_map(|row| row.iter().flat_map(|p| p.iter()))
            .cloned()
            .collect();

        ::image::RgbaImage::from_raw(width, height, flat_array).unwrap()
    }}
}
