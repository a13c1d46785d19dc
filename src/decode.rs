use alloc::vec::Vec;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use log::debug;

use crate::error::BmpError;
use crate::flags::LoadFlags;
use crate::limits::Limits;
use crate::pixel::PixelLayout;

/// A fully decoded image.
///
/// The buffer holds `height` rows of `row_stride()` bytes each, in the row
/// order requested by [`LoadFlags::TOP_DOWN`]. Each row starts with
/// `row_bytes()` bytes of RGB or RGBA pixels; any remaining bytes are
/// zero padding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    pixels: Vec<u8>,
    pub width: u32,
    /// Number of rows, always positive for a loaded image.
    pub height: u32,
    /// Flags the image was loaded with.
    pub flags: LoadFlags,
    pub layout: PixelLayout,
    row_stride: usize,
}

impl Image {
    pub(crate) fn new(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        flags: LoadFlags,
        layout: PixelLayout,
        row_stride: usize,
    ) -> Self {
        debug_assert_eq!(pixels.len(), row_stride * height as usize);
        Self {
            pixels,
            width,
            height,
            flags,
            layout,
            row_stride,
        }
    }

    /// The whole buffer, padding included.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Bytes from the start of one row to the start of the next.
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Bytes of pixel data in each row, excluding padding.
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.layout.bytes_per_pixel()
    }

    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Pixel bytes of each row in buffer order, without padding.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        let row_bytes = self.row_bytes();
        self.pixels
            .chunks_exact(self.row_stride.max(1))
            .map(move |row| &row[..row_bytes])
    }

    /// Free the buffer and reset the descriptor. Calling this again, or on
    /// a default image, does nothing.
    pub fn release(&mut self) {
        *self = Self::default();
    }

    pub fn is_released(&self) -> bool {
        self.pixels.is_empty() && self.width == 0 && self.height == 0
    }

    #[cfg(feature = "rgb")]
    fn check_view<P: crate::DecodePixel>(&self) -> Result<(), BmpError> {
        if self.layout != P::layout() {
            return Err(BmpError::LayoutMismatch {
                expected: P::layout(),
                actual: self.layout,
            });
        }
        if self.row_stride != self.row_bytes() {
            return Err(BmpError::PaddedRows {
                stride: self.row_stride,
                row_bytes: self.row_bytes(),
            });
        }
        Ok(())
    }

    /// Reinterpret the buffer as typed pixels.
    ///
    /// Returns [`BmpError::LayoutMismatch`] if the layout doesn't match `P`,
    /// and [`BmpError::PaddedRows`] if rows carry padding (load with
    /// [`LoadFlags::BYTE_ALIGN`] to avoid it).
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        self.check_view::<P>()?;
        Ok(self.pixels().as_pixels())
    }

    /// Borrow the buffer as an [`imgref::ImgRef`] of typed pixels.
    ///
    /// Same restrictions as [`Image::as_pixels`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(&self) -> Result<imgref::ImgRef<'_, P>, BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }

    /// Copy into an [`imgref::ImgVec`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::DecodePixel>(&self) -> Result<imgref::ImgVec<P>, BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgVec::new(
            pixels.to_vec(),
            self.width as usize,
            self.height as usize,
        ))
    }
}

/// Decode request builder.
///
/// ```no_run
/// use zenbmpread::{DecodeRequest, Limits, LoadFlags};
///
/// let limits = Limits {
///     max_pixels: Some(16 * 1024 * 1024),
///     ..Default::default()
/// };
/// let image = DecodeRequest::new(LoadFlags::TOP_DOWN | LoadFlags::ANY_SIZE)
///     .with_limits(&limits)
///     .load("texture.bmp")?;
/// println!("{}x{} {:?}", image.width, image.height, image.layout);
/// # Ok::<(), zenbmpread::BmpError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DecodeRequest<'a> {
    flags: LoadFlags,
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(flags: LoadFlags) -> Self {
        Self {
            flags,
            limits: None,
        }
    }

    /// Reject images exceeding `limits` before allocating their output.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Open and decode the file at `path`.
    pub fn load(self, path: impl AsRef<Path>) -> Result<Image, BmpError> {
        let path = path.as_ref();
        debug!("Loading {}", path.display());
        let file = File::open(path)?;
        self.decode(BufReader::new(file))
    }

    /// Decode from a seekable stream positioned at the start of the file.
    pub fn decode<R: Read + Seek>(self, reader: R) -> Result<Image, BmpError> {
        crate::bmp::decode(reader, self.flags, self.limits)
    }

    /// Decode from an in-memory file.
    pub fn decode_bytes(self, data: &[u8]) -> Result<Image, BmpError> {
        self.decode(Cursor::new(data))
    }
}
