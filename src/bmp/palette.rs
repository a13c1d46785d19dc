//! Color table for 1, 4 and 8-bit images.

use alloc::vec::Vec;
use std::io::{Read, Seek};

use super::reader::LeReader;
use crate::error::BmpError;

/// One color table entry. On disk each is 4 bytes: blue, green, red and
/// an unused byte.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub(crate) struct PaletteEntry {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
}

/// Exactly `2^bits` entries, so any index a pixel can hold is in range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Read `2^bits` entries starting at `offset` bytes into the stream.
    pub(crate) fn read<R: Read + Seek>(
        r: &mut LeReader<R>,
        bits: u16,
        offset: u64,
    ) -> Result<Self, BmpError> {
        debug_assert!(bits <= 8);
        let colors = 1usize << bits;

        let mut raw = super::alloc_zeroed(colors * 4)?;
        r.seek_to(offset)?;
        r.read_exact(&mut raw)?;

        let entries = raw
            .chunks_exact(4)
            .map(|c| PaletteEntry {
                blue: c[0],
                green: c[1],
                red: c[2],
            })
            .collect();
        Ok(Self { entries })
    }

    #[inline]
    pub(crate) fn get(&self, index: u8) -> PaletteEntry {
        self.entries[usize::from(index)]
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn from_entries(entries: Vec<PaletteEntry>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_bgr_entries_at_offset() {
        let mut data = vec![0xEE; 6];
        data.extend_from_slice(&[1, 2, 3, 0, 4, 5, 6, 0]);
        let mut r = LeReader::new(Cursor::new(data));
        let palette = Palette::read(&mut r, 1, 6).unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(
            palette.get(0),
            PaletteEntry {
                blue: 1,
                green: 2,
                red: 3,
            }
        );
        assert_eq!(palette.get(1).red, 6);
    }

    #[test]
    fn short_palette_fails() {
        let data = vec![0u8; 4 * 15];
        let mut r = LeReader::new(Cursor::new(data));
        assert!(matches!(
            Palette::read(&mut r, 4, 0),
            Err(BmpError::UnexpectedEof)
        ));
    }

    #[test]
    fn eight_bit_palette_has_256_entries() {
        let data: Vec<u8> = (0..1024u32).map(|i| i as u8).collect();
        let mut r = LeReader::new(Cursor::new(data));
        let palette = Palette::read(&mut r, 8, 0).unwrap();
        assert_eq!(palette.len(), 256);
        assert_eq!(palette.get(255).blue, 252);
    }
}
