//! Overflow-checked arithmetic for sizes derived from header fields.
//!
//! Width, height and bit depth are attacker controlled; every size computed
//! from them goes through these helpers and fails with
//! [`BmpError::Overflow`] instead of wrapping.

use crate::error::BmpError;

pub(crate) fn add(a: usize, b: usize, what: &'static str) -> Result<usize, BmpError> {
    a.checked_add(b).ok_or(BmpError::Overflow(what))
}

pub(crate) fn mul(a: usize, b: usize, what: &'static str) -> Result<usize, BmpError> {
    a.checked_mul(b).ok_or(BmpError::Overflow(what))
}

/// Convert a `u32` to the platform index type.
pub(crate) fn narrow(v: u32, what: &'static str) -> Result<usize, BmpError> {
    usize::try_from(v).map_err(|_| BmpError::Overflow(what))
}

/// Negate, rejecting `i32::MIN`.
pub(crate) fn negate(v: i32, what: &'static str) -> Result<i32, BmpError> {
    v.checked_neg().ok_or(BmpError::Overflow(what))
}

/// Whether the magnitude of `x` has exactly one bit set.
///
/// `i32::MIN` counts: its magnitude is 2^31 even though it can't be negated.
pub(crate) fn is_power_of_two(x: i32) -> bool {
    x.unsigned_abs().is_power_of_two()
}

/// Byte length of a scan line of `width` pixels at `bits_per_pixel`, padded
/// to a whole number of 32-bit words.
pub(crate) fn line_length(width: usize, bits_per_pixel: usize) -> Result<usize, BmpError> {
    let bits = mul(width, bits_per_pixel, "scan line bits")?;
    let padded = add(bits, 31, "scan line padding")? & !31;
    let bytes = padded / 8;
    if bytes == 0 {
        return Err(BmpError::Overflow("scan line length"));
    }
    Ok(bytes)
}
