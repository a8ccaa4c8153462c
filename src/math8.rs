//! 8-bit fixed-point helpers for the emission hot path.

/// Scale an 8-bit value by a fraction (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
/// `fraction = 255` is the identity, `fraction = 0` yields 0.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn scale8(value: u8, fraction: u8) -> u8 {
    ((value as u16 * (1 + fraction as u16)) >> 8) as u8
}

/// Scale all three channels of a color triple in place
#[inline]
pub const fn nscale8x3(channels: &mut [u8; 3], fraction: u8) {
    channels[0] = scale8(channels[0], fraction);
    channels[1] = scale8(channels[1], fraction);
    channels[2] = scale8(channels[2], fraction);
}
