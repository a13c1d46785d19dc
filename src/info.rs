use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::bmp::Compression;
use crate::error::BmpError;

/// Header fields of a BMP file, read without decoding any pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ImageInfo {
    /// Declared width. Not validated.
    pub width: i32,
    /// Declared height; negative when rows are stored top-down.
    pub height: i32,
    pub bits_per_pixel: u16,
    pub compression: Compression,
    /// Size of the info block as declared in the file.
    pub info_size: u32,
    /// Byte offset of the pixel data from the start of the file.
    pub data_offset: u32,
    /// File size field from the file header. Not validated.
    pub file_size: u32,
}

impl ImageInfo {
    /// Parse the headers at the start of `reader`.
    ///
    /// Fails on a bad magic, an info block smaller than 40 bytes, or a
    /// truncated header, exactly as a full decode would.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, BmpError> {
        crate::bmp::probe(reader)
    }

    /// Parse the headers of an in-memory file.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BmpError> {
        Self::from_reader(data)
    }

    /// Whether the file stores its first row at the top of the image.
    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }

    /// Absolute height, or `None` for `i32::MIN`.
    pub fn line_count(&self) -> Option<u32> {
        self.height.checked_abs().map(i32::cast_unsigned)
    }

    /// Whether this compression and depth pair can be decoded at all.
    /// Dimensions and masks are only checked by a full decode.
    pub fn is_supported(&self) -> bool {
        matches!(
            (self.compression, self.bits_per_pixel),
            (Compression::None, 1 | 4 | 8 | 24) | (Compression::Bitfields, 16 | 32)
        )
    }
}

pub(crate) fn probe_path(path: &Path) -> Result<ImageInfo, BmpError> {
    ImageInfo::from_reader(BufReader::new(File::open(path)?))
}
