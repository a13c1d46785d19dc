//! Per-depth conversion of one raw file line into RGB(A) bytes.

use super::bitfield::{BitFields, DEFAULT_ALPHA};
use super::headers::Compression;
use super::palette::{Palette, PaletteEntry};
use crate::error::BmpError;

/// Pixel encoding of the file, with whatever each encoding needs to decode.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BitDepth {
    One(Palette),
    Four(Palette),
    Eight(Palette),
    Sixteen(BitFields),
    TwentyFour,
    ThirtyTwo(BitFields),
}

/// Depth and compression, before the palette or masks are loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DepthKind {
    Indexed(u16),
    Bgr24,
    Masked(u16),
}

impl DepthKind {
    /// The supported (compression, depth) pairs: uncompressed 1/4/8/24,
    /// bit-masked 16/32.
    pub(crate) fn classify(compression: Compression, bits: u16) -> Result<Self, BmpError> {
        match (compression, bits) {
            (Compression::None, 1 | 4 | 8) => Ok(Self::Indexed(bits)),
            (Compression::None, 24) => Ok(Self::Bgr24),
            (Compression::Bitfields, 16 | 32) => Ok(Self::Masked(bits)),
            _ => Err(BmpError::UnsupportedVariant {
                compression: compression.to_u32(),
                bits,
            }),
        }
    }
}

impl BitDepth {
    pub(crate) fn indexed(bits: u16, palette: Palette) -> Self {
        match bits {
            1 => Self::One(palette),
            4 => Self::Four(palette),
            _ => Self::Eight(palette),
        }
    }

    pub(crate) fn masked(bits: u16, fields: BitFields) -> Self {
        if bits == 16 {
            Self::Sixteen(fields)
        } else {
            Self::ThirtyTwo(fields)
        }
    }

    pub(crate) fn bits(&self) -> u16 {
        match self {
            Self::One(_) => 1,
            Self::Four(_) => 4,
            Self::Eight(_) => 8,
            Self::Sixteen(_) => 16,
            Self::TwentyFour => 24,
            Self::ThirtyTwo(_) => 32,
        }
    }

    /// Convert the raw line `src` into `dst`, which holds exactly one output
    /// row's pixels (`width * channels` bytes, no padding).
    pub(crate) fn decode_line(&self, src: &[u8], dst: &mut [u8], channels: usize) {
        let out = dst.chunks_exact_mut(channels);
        match self {
            Self::One(palette) => {
                let indices = src
                    .iter()
                    .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1));
                for (px, index) in out.zip(indices) {
                    put_entry(px, palette.get(index));
                }
            }
            Self::Four(palette) => {
                let indices = src.iter().flat_map(|&byte| [byte >> 4, byte & 0x0f]);
                for (px, index) in out.zip(indices) {
                    put_entry(px, palette.get(index));
                }
            }
            Self::Eight(palette) => {
                for (px, &index) in out.zip(src) {
                    put_entry(px, palette.get(index));
                }
            }
            Self::TwentyFour => {
                for (px, bgr) in out.zip(src.chunks_exact(3)) {
                    px[0] = bgr[2];
                    px[1] = bgr[1];
                    px[2] = bgr[0];
                    if channels == 4 {
                        px[3] = DEFAULT_ALPHA;
                    }
                }
            }
            Self::Sixteen(fields) => {
                for (px, raw) in out.zip(src.chunks_exact(2)) {
                    let v = u32::from(u16::from_le_bytes([raw[0], raw[1]]));
                    fields.unpack(v, px);
                }
            }
            Self::ThirtyTwo(fields) => {
                for (px, raw) in out.zip(src.chunks_exact(4)) {
                    let v = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
                    fields.unpack(v, px);
                }
            }
        }
    }
}

#[inline]
fn put_entry(px: &mut [u8], entry: PaletteEntry) {
    px[0] = entry.red;
    px[1] = entry.green;
    px[2] = entry.blue;
    if let Some(a) = px.get_mut(3) {
        *a = DEFAULT_ALPHA;
    }
}
