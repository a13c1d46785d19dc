//! Output row order and the per-line decode loop.

use std::io::Read;

use super::reader::LeReader;
use super::scanline::BitDepth;
use crate::error::BmpError;

/// Direction in which file lines fill the output buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowOrder {
    /// The n-th file line lands in the n-th output row.
    Forward,
    /// The n-th file line lands in the n-th row from the end.
    Reverse,
}

impl RowOrder {
    /// Rows keep their order when the file and the caller agree on
    /// top-down vs bottom-up, and are reversed otherwise.
    pub(crate) fn new(file_top_down: bool, want_top_down: bool) -> Self {
        if file_top_down == want_top_down {
            Self::Forward
        } else {
            Self::Reverse
        }
    }
}

/// Geometry shared by every line of one decode.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LineLayout {
    /// Bytes per raw file line, including its padding.
    pub file_line_len: usize,
    /// Bytes per output row, including its padding.
    pub out_line_len: usize,
    /// Bytes of pixel data at the start of each output row.
    pub pixel_bytes: usize,
    pub channels: usize,
    pub order: RowOrder,
}

/// Read one raw line per output row, forward through the stream, and
/// convert it into `output`. `output` must be exactly `lines` rows long;
/// any short read fails the whole decode.
pub(crate) fn decode_lines<R: Read>(
    r: &mut LeReader<R>,
    depth: &BitDepth,
    layout: &LineLayout,
    scratch: &mut [u8],
    output: &mut [u8],
) -> Result<(), BmpError> {
    debug_assert_eq!(scratch.len(), layout.file_line_len);
    debug_assert_eq!(output.len() % layout.out_line_len, 0);

    match layout.order {
        RowOrder::Forward => fill_rows(
            r,
            depth,
            layout,
            scratch,
            output.chunks_exact_mut(layout.out_line_len),
        ),
        RowOrder::Reverse => fill_rows(
            r,
            depth,
            layout,
            scratch,
            output.rchunks_exact_mut(layout.out_line_len),
        ),
    }
}

fn fill_rows<'a, R: Read>(
    r: &mut LeReader<R>,
    depth: &BitDepth,
    layout: &LineLayout,
    scratch: &mut [u8],
    rows: impl Iterator<Item = &'a mut [u8]>,
) -> Result<(), BmpError> {
    for row in rows {
        r.read_exact(scratch)?;
        depth.decode_line(scratch, &mut row[..layout.pixel_bytes], layout.channels);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn layout(order: RowOrder) -> LineLayout {
        // 1 pixel wide, 24-bit in, RGB out with padding
        LineLayout {
            file_line_len: 4,
            out_line_len: 4,
            pixel_bytes: 3,
            channels: 3,
            order,
        }
    }

    #[test]
    fn order_from_flags() {
        assert_eq!(RowOrder::new(false, false), RowOrder::Forward);
        assert_eq!(RowOrder::new(true, true), RowOrder::Forward);
        assert_eq!(RowOrder::new(true, false), RowOrder::Reverse);
        assert_eq!(RowOrder::new(false, true), RowOrder::Reverse);
    }

    #[test]
    fn forward_fill() {
        let data = [1, 2, 3, 0, 4, 5, 6, 0];
        let mut r = LeReader::new(Cursor::new(&data[..]));
        let mut scratch = [0u8; 4];
        let mut out = [0xAAu8; 8];
        decode_lines(
            &mut r,
            &BitDepth::TwentyFour,
            &layout(RowOrder::Forward),
            &mut scratch,
            &mut out,
        )
        .unwrap();
        // padding bytes are left as they were
        assert_eq!(out, [3, 2, 1, 0xAA, 6, 5, 4, 0xAA]);
    }

    #[test]
    fn reverse_fill() {
        let data = [1, 2, 3, 0, 4, 5, 6, 0];
        let mut r = LeReader::new(Cursor::new(&data[..]));
        let mut scratch = [0u8; 4];
        let mut out = [0u8; 8];
        decode_lines(
            &mut r,
            &BitDepth::TwentyFour,
            &layout(RowOrder::Reverse),
            &mut scratch,
            &mut out,
        )
        .unwrap();
        assert_eq!(out, [6, 5, 4, 0, 3, 2, 1, 0]);
    }

    #[test]
    fn short_stream_fails() {
        let data = [1, 2, 3, 0, 4, 5];
        let mut r = LeReader::new(Cursor::new(&data[..]));
        let mut scratch = [0u8; 4];
        let mut out = [0u8; 8];
        let err = decode_lines(
            &mut r,
            &BitDepth::TwentyFour,
            &layout(RowOrder::Forward),
            &mut scratch,
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(err, BmpError::UnexpectedEof));
    }
}
