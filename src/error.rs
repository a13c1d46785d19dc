use alloc::string::String;

/// Errors from BMP loading.
///
/// Every variant aborts the whole load; no partial image is ever returned.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("I/O error: {0}")]
    Io(std::io::Error),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("info header is {0} bytes, need at least 40")]
    InfoHeaderTooSmall(u32),

    #[error("unsupported format variant: compression {compression}, {bits} bits per pixel")]
    UnsupportedVariant { compression: u32, bits: u16 },

    #[error("invalid bit field masks: {0}")]
    InvalidBitfields(&'static str),

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("dimensions {width}x{height} are not powers of two")]
    NotPowerOfTwo { width: u32, height: u32 },

    #[error("arithmetic overflow computing {0}")]
    Overflow(&'static str),

    #[error("failed to allocate {0} bytes")]
    Allocation(usize),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: crate::PixelLayout,
        actual: crate::PixelLayout,
    },

    #[error("rows are padded ({stride} byte stride for {row_bytes} pixel bytes)")]
    PaddedRows { stride: usize, row_bytes: usize },
}

impl From<std::io::Error> for BmpError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            BmpError::UnexpectedEof
        } else {
            BmpError::Io(e)
        }
    }
}
