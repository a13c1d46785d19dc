//! Channel extraction for `BI_BITFIELDS` images.

use crate::error::BmpError;

/// Alpha written for every pixel that carries no alpha of its own.
pub(crate) const DEFAULT_ALPHA: u8 = 255;

/// One channel of a bit-mask pixel format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BitField {
    pub mask: u32,
    /// Position of the lowest set bit.
    pub shift: u32,
    /// Number of (contiguous) set bits.
    pub count: u32,
    /// Scales the extracted value so its maximum lands on 255.
    pub multiplier: f32,
}

impl BitField {
    /// An absent channel.
    pub(crate) const EMPTY: Self = Self {
        mask: 0,
        shift: 0,
        count: 0,
        multiplier: 0.0,
    };

    /// Derive a field from a raw mask. The set bits must form one run.
    pub(crate) fn from_mask(mask: u32) -> Result<Self, BmpError> {
        if mask == 0 {
            return Ok(Self::EMPTY);
        }
        let shift = mask.trailing_zeros();
        let count = mask.count_ones();
        let run = (1u64 << count) - 1;
        if u64::from(mask >> shift) != run {
            return Err(BmpError::InvalidBitfields("mask bits are not contiguous"));
        }
        Ok(Self {
            mask,
            shift,
            count,
            multiplier: (255.0 / run as f64) as f32,
        })
    }

    pub(crate) fn is_present(&self) -> bool {
        self.mask != 0
    }

    pub(crate) fn overlaps(&self, other: &BitField) -> bool {
        self.mask & other.mask != 0
    }

    /// Extract this channel from a raw pixel and scale it to 0..=255.
    #[inline]
    pub(crate) fn extract(&self, pixel: u32) -> u8 {
        let raw = (pixel & self.mask) >> self.shift;
        (raw as f32 * self.multiplier + 0.5).min(255.0) as u8
    }
}

/// Red, green, blue and alpha fields of a bit-mask pixel format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BitFields {
    pub red: BitField,
    pub green: BitField,
    pub blue: BitField,
    pub alpha: BitField,
}

impl BitFields {
    /// Build from `[red, green, blue, alpha]` masks, rejecting non-contiguous
    /// or overlapping masks and masks wider in total than a pixel.
    pub(crate) fn new(masks: [u32; 4], bits_per_pixel: u16) -> Result<Self, BmpError> {
        let [r, g, b, a] = masks;
        let fields = [
            BitField::from_mask(r)?,
            BitField::from_mask(g)?,
            BitField::from_mask(b)?,
            BitField::from_mask(a)?,
        ];

        for (i, field) in fields.iter().enumerate() {
            if fields[i + 1..].iter().any(|other| field.overlaps(other)) {
                return Err(BmpError::InvalidBitfields("channel masks overlap"));
            }
        }

        let total: u32 = fields.iter().map(|f| f.count).sum();
        if total > u32::from(bits_per_pixel) {
            return Err(BmpError::InvalidBitfields(
                "channel masks are wider than a pixel",
            ));
        }

        let [red, green, blue, alpha] = fields;
        Ok(Self {
            red,
            green,
            blue,
            alpha,
        })
    }

    /// Write R, G, B and, for 4-channel output, A into `out`.
    #[inline]
    pub(crate) fn unpack(&self, pixel: u32, out: &mut [u8]) {
        out[0] = self.red.extract(pixel);
        out[1] = self.green.extract(pixel);
        out[2] = self.blue.extract(pixel);
        if let Some(a) = out.get_mut(3) {
            *a = if self.alpha.is_present() {
                self.alpha.extract(pixel)
            } else {
                DEFAULT_ALPHA
            };
        }
    }
}
