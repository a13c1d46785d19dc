//! Header validation and derived layout.
//!
//! [`ContextBuilder::build`] reads everything ahead of the pixel data,
//! rejects anything it can't safely decode, and returns an immutable
//! [`DecodeContext`]. Nothing is allocated for the output until a context
//! exists.

use std::io::{Read, Seek};

use log::{debug, trace, warn};

use super::bitfield::BitFields;
use super::checked;
use super::headers::{FILE_HEADER_SIZE, FileHeader, InfoHeader};
use super::layout::{LineLayout, RowOrder};
use super::palette::Palette;
use super::reader::LeReader;
use super::scanline::{BitDepth, DepthKind};
use crate::error::BmpError;
use crate::flags::LoadFlags;
use crate::limits::Limits;

/// Everything needed to convert the pixel data, fully validated.
#[derive(Debug)]
pub(crate) struct DecodeContext {
    pub flags: LoadFlags,
    pub header: FileHeader,
    pub info: InfoHeader,
    pub width: u32,
    /// Absolute value of the declared height.
    pub lines: u32,
    pub layout: LineLayout,
    pub depth: BitDepth,
    /// `out_line_len * lines`, already checked against overflow and limits.
    pub output_len: usize,
}

pub(crate) struct ContextBuilder<'a> {
    flags: LoadFlags,
    limits: Option<&'a Limits>,
}

impl<'a> ContextBuilder<'a> {
    pub(crate) fn new(flags: LoadFlags) -> Self {
        Self {
            flags,
            limits: None,
        }
    }

    pub(crate) fn with_limits(mut self, limits: Option<&'a Limits>) -> Self {
        self.limits = limits;
        self
    }

    /// Parse and validate from the start of the stream. On success the
    /// stream is left somewhere ahead of the pixel data.
    pub(crate) fn build<R: Read + Seek>(
        &self,
        r: &mut LeReader<R>,
    ) -> Result<DecodeContext, BmpError> {
        let header = FileHeader::read(r)?;
        trace!(
            "File size: {}, reserved: {}, data offset: {}",
            header.file_size, header.reserved, header.data_offset
        );
        let info = InfoHeader::read(r)?;

        self.validate(r, header, info)
            .inspect_err(|e| debug!("Rejecting bitmap: {e}"))
    }

    fn validate<R: Read + Seek>(
        &self,
        r: &mut LeReader<R>,
        header: FileHeader,
        info: InfoHeader,
    ) -> Result<DecodeContext, BmpError> {
        if info.planes != 1 {
            warn!("Planes field is {}, expected 1", info.planes);
        }

        if info.width <= 0 || info.height == 0 {
            return Err(BmpError::InvalidDimensions {
                width: info.width,
                height: info.height,
            });
        }

        let kind = DepthKind::classify(info.compression, info.bits)?;

        let width = checked::narrow(info.width.cast_unsigned(), "width")?;
        let file_line_len = checked::line_length(width, usize::from(info.bits))?;

        let channels = if self.flags.contains(LoadFlags::ALPHA) {
            4
        } else {
            3
        };
        let pixel_bytes = checked::mul(width, channels, "output row")?;
        let out_line_len = if self.flags.contains(LoadFlags::BYTE_ALIGN) {
            pixel_bytes
        } else {
            checked::line_length(width, channels * 8)?
        };

        let abs_height = if info.height < 0 {
            checked::negate(info.height, "height")?
        } else {
            info.height
        };
        let lines = abs_height.cast_unsigned();

        if !self.flags.contains(LoadFlags::ANY_SIZE)
            && !(checked::is_power_of_two(info.width) && checked::is_power_of_two(abs_height))
        {
            return Err(BmpError::NotPowerOfTwo {
                width: info.width.cast_unsigned(),
                height: lines,
            });
        }

        if let Some(limits) = self.limits {
            limits.check(info.width.cast_unsigned(), lines)?;
        }

        let output_len = checked::mul(
            out_line_len,
            checked::narrow(lines, "height")?,
            "output buffer",
        )?;
        if let Some(limits) = self.limits {
            limits.check_memory(output_len)?;
        }

        let tables_start = u64::from(FILE_HEADER_SIZE) + u64::from(info.size);
        let (depth, tables_len) = match kind {
            DepthKind::Indexed(bits) => {
                let palette = Palette::read(r, bits, tables_start)?;
                let len = palette.len() as u64 * 4;
                (BitDepth::indexed(bits, palette), len)
            }
            DepthKind::Bgr24 => (BitDepth::TwentyFour, 0),
            DepthKind::Masked(bits) => {
                let fields = BitFields::new(info.masks, bits)?;
                (BitDepth::masked(bits, fields), 0)
            }
        };

        if u64::from(header.data_offset) < tables_start + tables_len {
            warn!(
                "Pixel data offset {} lies inside the headers (which end at {})",
                header.data_offset,
                tables_start + tables_len
            );
        }

        let order = RowOrder::new(
            info.is_top_down(),
            self.flags.contains(LoadFlags::TOP_DOWN),
        );

        trace!("Lines: {lines}, channels: {channels}");
        trace!("File line: {file_line_len} bytes, output line: {out_line_len} bytes");
        trace!("Row order: {order:?}");

        Ok(DecodeContext {
            flags: self.flags,
            header,
            info,
            width: info.width.cast_unsigned(),
            lines,
            layout: LineLayout {
                file_line_len,
                out_line_len,
                pixel_bytes,
                channels,
                order,
            },
            depth,
            output_len,
        })
    }
}
