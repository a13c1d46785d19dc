//! Little-endian primitive reads over a byte stream.

use std::io::{Read, Seek, SeekFrom};

use crate::error::BmpError;

/// Wraps a byte stream and reads little-endian integers from it.
///
/// Every read either fills the whole value or fails; end of stream is
/// reported as [`BmpError::UnexpectedEof`].
pub(crate) struct LeReader<R> {
    inner: R,
}

impl<R: Read> LeReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read `n` (at most 4) little-endian bytes into a host-order `u32`.
    fn read_le_bytes(&mut self, n: usize) -> Result<u32, BmpError> {
        debug_assert!(n <= 4);
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf[..n])?;
        Ok(u32::from_le_bytes(buf))
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, BmpError> {
        Ok(self.read_le_bytes(1)? as u8)
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16, BmpError> {
        Ok(self.read_le_bytes(2)? as u16)
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32, BmpError> {
        self.read_le_bytes(4)
    }

    /// Reads a `u32` and reinterprets its bits as two's complement.
    pub(crate) fn read_i32(&mut self) -> Result<i32, BmpError> {
        Ok(self.read_u32()?.cast_signed())
    }

    /// Fill `buf` completely or fail.
    pub(crate) fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), BmpError> {
        self.inner.read_exact(buf)?;
        Ok(())
    }
}

impl<R: Seek> LeReader<R> {
    pub(crate) fn seek_to(&mut self, offset: u64) -> Result<(), BmpError> {
        self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    /// Total length of the stream. The read position is left unchanged.
    pub(crate) fn stream_len(&mut self) -> Result<u64, BmpError> {
        let pos = self.inner.stream_position()?;
        let end = self.inner.seek(SeekFrom::End(0))?;
        if end != pos {
            self.inner.seek(SeekFrom::Start(pos))?;
        }
        Ok(end)
    }
}
