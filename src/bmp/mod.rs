//! BMP decode pipeline (internal).
//!
//! Use top-level [`crate::load`], [`crate::load_from_reader`] or
//! [`crate::DecodeRequest`].

mod bitfield;
mod checked;
mod context;
mod headers;
mod layout;
mod palette;
mod reader;
mod scanline;

pub use headers::Compression;

use alloc::vec::Vec;
use std::io::{Read, Seek};

use log::{debug, trace};

use crate::decode::Image;
use crate::error::BmpError;
use crate::flags::LoadFlags;
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use context::ContextBuilder;
use headers::{FileHeader, InfoHeader};
use reader::LeReader;

/// Decode a whole image from the start of `reader`.
///
/// The output buffer only leaves this function inside a successful result;
/// on any error it is dropped together with the palette and scratch line.
pub(crate) fn decode<R: Read + Seek>(
    reader: R,
    flags: LoadFlags,
    limits: Option<&Limits>,
) -> Result<Image, BmpError> {
    let mut r = LeReader::new(reader);
    let ctx = ContextBuilder::new(flags)
        .with_limits(limits)
        .build(&mut r)?;
    debug_assert_eq!(ctx.depth.bits(), ctx.info.bits);

    // A file too short for its declared lines can't succeed; fail before
    // committing memory to it.
    let data_len = checked::mul(
        ctx.layout.file_line_len,
        checked::narrow(ctx.lines, "height")?,
        "pixel data",
    )?;
    let needed = u64::from(ctx.header.data_offset).saturating_add(data_len as u64);
    let available = r.stream_len()?;
    if available < needed {
        debug!("Stream holds {available} bytes, pixel data needs {needed}");
        return Err(BmpError::UnexpectedEof);
    }

    let mut output = alloc_zeroed(ctx.output_len)?;
    let mut scratch = alloc_zeroed(ctx.layout.file_line_len)?;

    r.seek_to(u64::from(ctx.header.data_offset))?;
    trace!(
        "Decoding {} lines of {}-bit data from offset {}",
        ctx.lines, ctx.info.bits, ctx.header.data_offset
    );
    layout::decode_lines(&mut r, &ctx.depth, &ctx.layout, &mut scratch, &mut output)?;

    Ok(Image::new(
        output,
        ctx.width,
        ctx.lines,
        ctx.flags,
        PixelLayout::from_alpha(ctx.layout.channels == 4),
        ctx.layout.out_line_len,
    ))
}

/// Parse the file header and info block and nothing else.
pub(crate) fn probe<R: Read>(reader: R) -> Result<ImageInfo, BmpError> {
    let mut r = LeReader::new(reader);
    let header = FileHeader::read(&mut r)?;
    let info = InfoHeader::read(&mut r)?;
    Ok(ImageInfo {
        width: info.width,
        height: info.height,
        bits_per_pixel: info.bits,
        compression: info.compression,
        info_size: info.size,
        data_offset: header.data_offset,
        file_size: header.file_size,
    })
}

/// A zero-filled buffer of `len` bytes, or [`BmpError::Allocation`] if the
/// allocator refuses.
pub(crate) fn alloc_zeroed(len: usize) -> Result<Vec<u8>, BmpError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| BmpError::Allocation(len))?;
    buf.resize(len, 0);
    Ok(buf)
}
