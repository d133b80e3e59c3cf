//! Decoding of encoded image streams into pixel grids.
//!
//! Formats are accepted only after being registered with a [`Decoder`].
//! Build one decoder at startup and share it between hashes.

use crate::error::{BlockhashError, Result};
use image::error::{ImageFormatHint, UnsupportedError, UnsupportedErrorKind};
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};
use std::io::{Cursor, Read};
use tracing::debug;

/// An explicit set of image formats to decode.
///
/// [`Decoder::default`] registers JPEG and PNG. The format of a stream is
/// sniffed from its leading bytes, never from a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoder {
    formats: Vec<ImageFormat>,
}

impl Decoder {
    /// A decoder with no registered formats. It rejects every stream until
    /// formats are registered.
    pub fn new() -> Self {
        Decoder {
            formats: Vec::new(),
        }
    }

    /// A decoder for every format this build of the crate can read.
    pub fn all() -> Self {
        Decoder {
            formats: ImageFormat::all().filter(|f| f.reading_enabled()).collect(),
        }
    }

    /// Registers `format`.
    ///
    /// Fails with [`BlockhashError::InvalidConfiguration`] if the crate was
    /// built without a decoder for it.
    pub fn register(&mut self, format: ImageFormat) -> Result<()> {
        if !format.reading_enabled() {
            return Err(BlockhashError::invalid_configuration(format!(
                "no decoder for {format:?} in this build"
            )));
        }
        if !self.formats.contains(&format) {
            self.formats.push(format);
        }
        Ok(())
    }

    /// Builder form of [`Decoder::register`].
    pub fn with_format(mut self, format: ImageFormat) -> Result<Self> {
        self.register(format)?;
        Ok(self)
    }

    /// Whether streams of `format` are accepted.
    pub fn is_registered(&self, format: ImageFormat) -> bool {
        self.formats.contains(&format)
    }

    /// The registered formats, in registration order.
    pub fn formats(&self) -> &[ImageFormat] {
        &self.formats
    }

    /// Reads `reader` to the end and decodes it.
    ///
    /// Read failures, unrecognised or unregistered formats and corrupt data
    /// all fail with [`BlockhashError::Decode`].
    pub fn decode<R: Read>(&self, mut reader: R) -> Result<DynamicImage> {
        let mut buf = Vec::new();
        reader
            .read_to_end(&mut buf)
            .map_err(ImageError::IoError)?;

        let reader = ImageReader::new(Cursor::new(buf))
            .with_guessed_format()
            .map_err(ImageError::IoError)?;
        let format = reader
            .format()
            .ok_or_else(|| unsupported(ImageFormatHint::Unknown))?;
        if !self.is_registered(format) {
            return Err(unsupported(ImageFormatHint::Exact(format)).into());
        }

        let image = reader.decode()?;
        debug!(
            ?format,
            width = image.width(),
            height = image.height(),
            color = ?image.color(),
            "decoded image"
        );
        Ok(image)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder {
            formats: vec![ImageFormat::Jpeg, ImageFormat::Png],
        }
    }
}

fn unsupported(hint: ImageFormatHint) -> ImageError {
    ImageError::Unsupported(UnsupportedError::from_format_and_kind(
        hint.clone(),
        UnsupportedErrorKind::Format(hint),
    ))
}
