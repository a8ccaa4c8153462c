//! Per-chipset bit timings.
//!
//! A clockless bit is three fixed-duration phases: the line is high for T1,
//! then low for T2 (zero bit) or T3 (one bit). All three are expressed in
//! core clock cycles so the emission loop can hand them straight to the
//! cycle-burning delay primitive. T1+T2+T3 must equal the chip's documented
//! bit period; that is an authoring rule checked by the test suite, not at
//! runtime.

use embassy_time::Duration;

/// Bits transmitted per pixel (three 8-bit channels).
pub const BITS_PER_PIXEL: u32 = 24;

/// Resolved timing specification for one chipset at one CPU frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipsetTiming {
    /// High phase, core cycles
    pub t1: u32,
    /// Low phase for a zero bit, core cycles
    pub t2: u32,
    /// Low phase for a one bit, core cycles
    pub t3: u32,
    /// Minimum inter-frame latch wait
    pub reset: Duration,
    /// Core frequency the cycle counts were resolved against
    pub cpu_hz: u32,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
const fn ns_to_cycles(ns: u32, cpu_hz: u32) -> u32 {
    // Round to the nearest cycle; truncating would shorten every phase.
    ((ns as u64 * cpu_hz as u64 + 500_000_000) / 1_000_000_000) as u32
}

impl ChipsetTiming {
    /// Build a timing spec from raw cycle counts
    pub const fn from_cycles(t1: u32, t2: u32, t3: u32, reset_us: u64, cpu_hz: u32) -> Self {
        Self {
            t1,
            t2,
            t3,
            reset: Duration::from_micros(reset_us),
            cpu_hz,
        }
    }

    /// Build a timing spec from datasheet nanoseconds at a given core frequency
    pub const fn from_ns(t1_ns: u32, t2_ns: u32, t3_ns: u32, reset_us: u64, cpu_hz: u32) -> Self {
        Self::from_cycles(
            ns_to_cycles(t1_ns, cpu_hz),
            ns_to_cycles(t2_ns, cpu_hz),
            ns_to_cycles(t3_ns, cpu_hz),
            reset_us,
            cpu_hz,
        )
    }

    /// WS2812/WS2812B: 250/625/375 ns, 1250 ns bit period
    pub const fn ws2812(cpu_hz: u32) -> Self {
        Self::from_ns(250, 625, 375, 280, cpu_hz)
    }

    /// WS2811 in 800 kHz mode: 320/640/320 ns, 1280 ns bit period
    pub const fn ws2811(cpu_hz: u32) -> Self {
        Self::from_ns(320, 640, 320, 50, cpu_hz)
    }

    /// SK6812: 300/600/300 ns, 1200 ns bit period
    pub const fn sk6812(cpu_hz: u32) -> Self {
        Self::from_ns(300, 600, 300, 80, cpu_hz)
    }

    /// TM1803 (400 kHz family): 700/1100/700 ns, 2500 ns bit period
    pub const fn tm1803(cpu_hz: u32) -> Self {
        Self::from_ns(700, 1100, 700, 24, cpu_hz)
    }

    /// Total bit period in core cycles
    pub const fn bit_period(&self) -> u32 {
        self.t1 + self.t2 + self.t3
    }

    /// Estimated duration of one frame of `pixel_count` pixels
    ///
    /// The transmission is bit-banged, so no timer observes it; this
    /// estimate is what the output facade uses to advance its time base.
    #[allow(clippy::cast_lossless)]
    pub const fn frame_duration(&self, pixel_count: usize) -> Duration {
        let cycles = pixel_count as u64 * BITS_PER_PIXEL as u64 * self.bit_period() as u64;
        Duration::from_micros(cycles * 1_000_000 / self.cpu_hz as u64)
    }
}
