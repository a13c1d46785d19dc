//! File header and info block parsing.

use std::io::Read;

use log::trace;

use super::reader::LeReader;
use crate::error::BmpError;

/// Size of the file header on disk.
pub(crate) const FILE_HEADER_SIZE: u32 = 14;

/// Smallest info block this loader understands (BITMAPINFOHEADER).
pub(crate) const MIN_INFO_SIZE: u32 = 40;

/// Pixel storage scheme declared in the info block.
#[non_exhaustive]
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Compression {
    /// Uncompressed (`BI_RGB`).
    None,
    /// 8-bit run-length encoding (recognized, not decoded).
    Rle8,
    /// 4-bit run-length encoding (recognized, not decoded).
    Rle4,
    /// Channel bit masks (`BI_BITFIELDS`).
    Bitfields,
    /// Any other value.
    Other(u32),
}

impl Compression {
    pub(crate) fn from_u32(num: u32) -> Self {
        match num {
            0 => Self::None,
            1 => Self::Rle8,
            2 => Self::Rle4,
            3 => Self::Bitfields,
            other => Self::Other(other),
        }
    }

    /// The raw value as stored in the file.
    pub fn to_u32(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Rle8 => 1,
            Self::Rle4 => 2,
            Self::Bitfields => 3,
            Self::Other(v) => v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FileHeader {
    /// Not validated.
    pub file_size: u32,
    /// Not validated.
    pub reserved: u32,
    pub data_offset: u32,
}

impl FileHeader {
    /// Reads the 14-byte file header. Fails right after the magic bytes if
    /// they aren't `BM`.
    pub(crate) fn read<R: Read>(r: &mut LeReader<R>) -> Result<Self, BmpError> {
        let magic = [r.read_u8()?, r.read_u8()?];
        if magic != *b"BM" {
            return Err(BmpError::UnrecognizedFormat);
        }
        let file_size = r.read_u32()?;
        let reserved = r.read_u32()?;
        let data_offset = r.read_u32()?;
        Ok(Self {
            file_size,
            reserved,
            data_offset,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InfoHeader {
    /// Declared size of the info block, at least [`MIN_INFO_SIZE`].
    pub size: u32,
    pub width: i32,
    /// Negative when rows are stored top-down.
    pub height: i32,
    pub planes: u16,
    pub bits: u16,
    pub compression: Compression,
    /// Red, green, blue, alpha masks. All zero unless the compression is
    /// [`Compression::Bitfields`]; alpha is only read when `size > 40`.
    pub masks: [u32; 4],
}

impl InfoHeader {
    pub(crate) fn read<R: Read>(r: &mut LeReader<R>) -> Result<Self, BmpError> {
        let size = r.read_u32()?;
        if size < MIN_INFO_SIZE {
            return Err(BmpError::InfoHeaderTooSmall(size));
        }

        let width = r.read_i32()?;
        let height = r.read_i32()?;
        let planes = r.read_u16()?;
        let bits = r.read_u16()?;
        let compression = Compression::from_u32(r.read_u32()?);

        // image size, x/y pixels per meter, colors used, important colors
        for _ in 0..5 {
            r.read_u32()?;
        }

        let mut masks = [0u32; 4];
        if compression == Compression::Bitfields {
            masks[0] = r.read_u32()?;
            masks[1] = r.read_u32()?;
            masks[2] = r.read_u32()?;
            if size > MIN_INFO_SIZE {
                masks[3] = r.read_u32()?;
            }
        }

        trace!("Info size: {size}");
        trace!("Width: {width}, height: {height}");
        trace!("Bit depth: {bits}, compression: {compression:?}");

        Ok(Self {
            size,
            width,
            height,
            planes,
            bits,
            compression,
            masks,
        })
    }

    /// Whether the file stores its first row at the top of the image.
    pub(crate) fn is_top_down(&self) -> bool {
        self.height < 0
    }
}
