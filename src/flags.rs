use bitflags::bitflags;

bitflags! {
    /// Options controlling the shape of the output buffer.
    ///
    /// The empty set gives the legacy texture-upload layout: bottom-up rows,
    /// each padded to a 4-byte boundary, RGB, power-of-two dimensions only.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LoadFlags: u32 {
        /// Emit rows top-down (first row of the buffer is the top of the image).
        const TOP_DOWN   = 0b0001;
        /// Pack output rows with no padding.
        const BYTE_ALIGN = 0b0010;
        /// Accept images whose width or height is not a power of two.
        const ANY_SIZE   = 0b0100;
        /// Emit RGBA instead of RGB.
        const ALPHA      = 0b1000;
    }
}
