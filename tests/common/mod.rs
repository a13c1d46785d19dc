//! Synthetic BMP writer for integration tests.

#![allow(dead_code)]

/// Everything needed to lay out a test file. `rows` are raw file lines in
/// file order, without padding; [`BmpFile::encode`] pads them.
pub struct BmpFile {
    pub width: i32,
    pub height: i32,
    pub bits: u16,
    pub compression: u32,
    pub info_size: u32,
    /// BGRA quads written right after the info block.
    pub palette: Vec<[u8; 4]>,
    /// Written after the standard 40 bytes of the info block.
    pub masks: Vec<u32>,
    /// Junk bytes between the headers and the pixel data.
    pub gap: usize,
    pub rows: Vec<Vec<u8>>,
}

impl BmpFile {
    pub fn new(width: i32, height: i32, bits: u16, rows: Vec<Vec<u8>>) -> Self {
        Self {
            width,
            height,
            bits,
            compression: 0,
            info_size: 40,
            palette: Vec::new(),
            masks: Vec::new(),
            gap: 0,
            rows,
        }
    }

    /// 24-bit file from `[b, g, r]` pixels, one inner vec per file line.
    pub fn bgr24(width: i32, height: i32, lines: &[Vec<[u8; 3]>]) -> Self {
        let rows = lines.iter().map(|line| line.concat()).collect();
        Self::new(width, height, 24, rows)
    }

    pub fn with_palette(mut self, palette: Vec<[u8; 4]>) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_masks(mut self, masks: &[u32]) -> Self {
        self.compression = 3;
        self.masks = masks.to_vec();
        self
    }

    pub fn with_info_size(mut self, size: u32) -> Self {
        self.info_size = size;
        self
    }

    pub fn with_compression(mut self, compression: u32) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_gap(mut self, gap: usize) -> Self {
        self.gap = gap;
        self
    }

    pub fn encode(&self) -> Vec<u8> {
        let headers_end = 14 + (self.info_size as usize).max(40 + self.masks.len() * 4);
        let data_offset = headers_end + self.palette.len() * 4 + self.gap;
        let pixel_data_size: usize = self.rows.iter().map(|r| padded(r.len())).sum();
        let file_size = data_offset + pixel_data_size;

        let mut out = Vec::with_capacity(file_size);

        // File header (14 bytes)
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&(file_size as u32).to_le_bytes());
        out.extend_from_slice(&[0u8; 4]); // reserved
        out.extend_from_slice(&(data_offset as u32).to_le_bytes());

        // BITMAPINFOHEADER fields (40 bytes)
        out.extend_from_slice(&self.info_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes()); // positive = bottom-up
        out.extend_from_slice(&1u16.to_le_bytes()); // planes
        out.extend_from_slice(&self.bits.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&(pixel_data_size as u32).to_le_bytes());
        out.extend_from_slice(&2835u32.to_le_bytes()); // h resolution (72 DPI)
        out.extend_from_slice(&2835u32.to_le_bytes()); // v resolution
        out.extend_from_slice(&(self.palette.len() as u32).to_le_bytes()); // colors used
        out.extend_from_slice(&0u32.to_le_bytes()); // important colors

        for mask in &self.masks {
            out.extend_from_slice(&mask.to_le_bytes());
        }
        out.resize(headers_end, 0);

        for entry in &self.palette {
            out.extend_from_slice(entry);
        }
        out.resize(data_offset, 0xEE);

        for row in &self.rows {
            out.extend_from_slice(row);
            out.resize(out.len() + padded(row.len()) - row.len(), 0);
        }
        out
    }
}

fn padded(len: usize) -> usize {
    (len + 3) & !3
}

/// `2^bits` palette entries, entry `i` being blue `i`, green `2i`, red `3i`.
pub fn ramp_palette(bits: u16) -> Vec<[u8; 4]> {
    (0..1usize << bits)
        .map(|i| {
            let i = i as u8;
            [i, i.wrapping_mul(2), i.wrapping_mul(3), 0]
        })
        .collect()
}

pub fn checkerboard(w: usize, h: usize) -> Vec<Vec<[u8; 3]>> {
    (0..h)
        .map(|y| {
            (0..w)
                .map(|x| {
                    if (x + y) % 2 == 0 {
                        [200, 220, 240]
                    } else {
                        [10, 40, 70]
                    }
                })
                .collect()
        })
        .collect()
}

pub fn noise_pattern(w: usize, h: usize) -> Vec<Vec<[u8; 3]>> {
    let mut state: u32 = 0xDEAD_BEEF;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state as u8
    };
    (0..h)
        .map(|_| (0..w).map(|_| [next(), next(), next()]).collect())
        .collect()
}

/// Expected output for 24-bit `lines`: RGB rows in file order, or reversed,
/// each padded to `stride`.
pub fn expected_rgb(lines: &[Vec<[u8; 3]>], reverse: bool, stride: usize) -> Vec<u8> {
    let mut out = Vec::new();
    let mut push = |line: &Vec<[u8; 3]>| {
        let start = out.len();
        for [b, g, r] in line {
            out.extend_from_slice(&[*r, *g, *b]);
        }
        out.resize(start + stride, 0);
    };
    if reverse {
        lines.iter().rev().for_each(&mut push);
    } else {
        lines.iter().for_each(&mut push);
    }
    out
}
