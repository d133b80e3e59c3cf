//! A [blockhash] perceptual image hashing library based on the
//! [image] crate.
//!
//! The hash is computed in three stages: the pixel grid is divided into
//! `bits × bits` blocks whose channel intensities are summed
//! ([`reduce`]), every block value is compared against the median of its
//! horizontal band ([`threshold`]), and the resulting bit matrix is packed
//! into a lowercase hexadecimal string ([`hex`]).
//!
//! Hashes of visually similar images differ in few bits. This is not a
//! cryptographic hash.
//!
//! # Example
//! ```no_run
//! use std::fs::File;
//!
//! # fn main() -> blockhash::Result<()> {
//! let file = File::open("tulips.jpg").expect("fixture is present");
//! let hash = blockhash::blockhash(file, 16)?;
//! assert_eq!(hash.len(), 256);
//! println!("{}", hash.to_hex()?);
//! # Ok(())
//! # }
//! ```
//!
//! [blockhash]: http://blockhash.io
//! [image]: https://github.com/image-rs/image
#![deny(missing_docs)]
#![allow(clippy::needless_range_loop, clippy::many_single_char_names)]

#[macro_use]
pub mod utils;
#[macro_use]
mod doc_macros;
pub mod config;
pub mod decode;
pub mod definitions;
pub mod error;
pub mod hash;
pub mod hasher;
pub mod hex;
pub mod math;
#[cfg(any(feature = "property-testing", test))]
pub mod proptest_utils;
pub mod reduce;
pub mod threshold;

pub use config::HashBits;
pub use decode::Decoder;
pub use error::{BlockhashError, Result};
pub use hash::Hash;
pub use hasher::{blockhash, Blockhasher};
