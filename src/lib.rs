//! # zenbmpread
//!
//! Strict, memory-safe loader for uncompressed Windows BMP files, producing
//! an RGB or RGBA byte buffer ready for texture upload.
//!
//! ## Supported Formats
//!
//! - 1, 4 and 8-bit palette images
//! - 24-bit BGR
//! - 16 and 32-bit `BI_BITFIELDS` images, with an optional alpha mask
//!
//! Everything else (RLE, OS/2 headers, embedded JPEG/PNG, 2-bit) is rejected.
//!
//! ## Output
//!
//! By default rows are bottom-up, padded to a multiple of 4 bytes, RGB, and
//! the image must have power-of-two dimensions. [`LoadFlags`] changes each of
//! these. A load either returns a complete [`Image`] or an error; there is no
//! partial output.
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmpread::LoadFlags;
//!
//! // Probe without decoding
//! let info = zenbmpread::probe("sprite.bmp")?;
//! println!("{}x{} at {} bpp", info.width, info.height, info.bits_per_pixel);
//!
//! let mut image = zenbmpread::load("sprite.bmp", LoadFlags::TOP_DOWN | LoadFlags::ALPHA)?;
//! for row in image.rows() {
//!     assert_eq!(row.len(), image.width as usize * 4);
//! }
//! image.release();
//! # Ok::<(), zenbmpread::BmpError>(())
//! ```
//!
//! ## Credits
//!
//! Header parsing follows [zune-bmp](https://github.com/etemesi254/zune-image)
//! by Caleb Etemesi (MIT/Apache-2.0/Zlib licensed).

#![forbid(unsafe_code)]

extern crate alloc;

mod bmp;
mod decode;
mod error;
mod flags;
mod info;
mod limits;
mod pixel;

use std::io::{Read, Seek};
use std::path::Path;

// Re-exports
pub use bmp::Compression;
pub use decode::{DecodeRequest, Image};
pub use error::BmpError;
pub use flags::LoadFlags;
pub use info::ImageInfo;
pub use limits::Limits;
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
pub use pixel::PixelLayout;

/// Load the BMP file at `path`.
pub fn load(path: impl AsRef<Path>, flags: LoadFlags) -> Result<Image, BmpError> {
    DecodeRequest::new(flags).load(path)
}

/// Load a BMP file from a seekable stream positioned at its first byte.
pub fn load_from_reader<R: Read + Seek>(reader: R, flags: LoadFlags) -> Result<Image, BmpError> {
    DecodeRequest::new(flags).decode(reader)
}

/// Free an image's buffer and clear its descriptor. Safe to call repeatedly.
pub fn release(image: &mut Image) {
    image.release();
}

/// Read the headers of the BMP file at `path` without decoding it.
pub fn probe(path: impl AsRef<Path>) -> Result<ImageInfo, BmpError> {
    info::probe_path(path.as_ref())
}
