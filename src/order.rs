//! Wire color ordering.
//!
//! Clockless chips expect their channels in a chip-specific order (most
//! WS281x variants are GRB on the wire). The order is fixed once per
//! controller to match the chip wiring.

use crate::Rgb;

/// Permutation mapping buffer channels to wire positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorOrder {
    Rgb,
    Rbg,
    /// Native order of the WS2812 family
    #[default]
    Grb,
    Gbr,
    Brg,
    Bgr,
}

impl ColorOrder {
    /// Extract the channel bytes of `color` in wire order
    #[inline]
    pub const fn channels(self, color: Rgb) -> [u8; 3] {
        match self {
            ColorOrder::Rgb => [color.r, color.g, color.b],
            ColorOrder::Rbg => [color.r, color.b, color.g],
            ColorOrder::Grb => [color.g, color.r, color.b],
            ColorOrder::Gbr => [color.g, color.b, color.r],
            ColorOrder::Brg => [color.b, color.r, color.g],
            ColorOrder::Bgr => [color.b, color.g, color.r],
        }
    }

    /// Reassemble a color from channel bytes in wire order
    ///
    /// Inverse of [`ColorOrder::channels`]; used when decoding a captured
    /// waveform back into colors.
    #[inline]
    pub const fn assemble(self, wire: [u8; 3]) -> Rgb {
        let [a, b, c] = wire;
        match self {
            ColorOrder::Rgb => Rgb { r: a, g: b, b: c },
            ColorOrder::Rbg => Rgb { r: a, g: c, b: b },
            ColorOrder::Grb => Rgb { r: b, g: a, b: c },
            ColorOrder::Gbr => Rgb { r: c, g: a, b: b },
            ColorOrder::Brg => Rgb { r: b, g: c, b: a },
            ColorOrder::Bgr => Rgb { r: c, g: b, b: a },
        }
    }
}
