//! Output driver facade.
//!
//! Wraps the protocol engine with the bookkeeping a frame needs around it:
//! the latch wait since the previous frame, the interrupt-masking critical
//! section, and the estimated-elapsed-time base (the transmission is
//! bit-banged, so no timer observes it).

use core::iter;

use embassy_time::{Duration, Instant, block_for};

use crate::Rgb;
use crate::delay::CycleTimer;
use crate::engine::ClocklessEmitter;
use crate::order::ColorOrder;
use crate::pin::ClocklessPin;
use crate::timing::ChipsetTiming;

/// Identity scale fraction (no brightness reduction).
pub const FULL_BRIGHTNESS: u8 = 255;

/// One clockless strip on one pin
///
/// Binds a pin, a cycle timer, a timing spec and a color order for the
/// lifetime of the strip. All emission calls are synchronous, blocking and
/// non-allocating; the pixel buffer is only borrowed for the duration of
/// the call. The controller owns its pin's registers exclusively while a
/// call runs; keeping two controllers off the same pin is the integration
/// layer's responsibility.
pub struct ClocklessController<P: ClocklessPin, T: CycleTimer> {
    pin: P,
    timer: T,
    timing: ChipsetTiming,
    order: ColorOrder,
    last_frame: Option<Instant>,
    transmitted: Duration,
}

impl<P: ClocklessPin, T: CycleTimer> ClocklessController<P, T> {
    pub const fn new(pin: P, timer: T, timing: ChipsetTiming, order: ColorOrder) -> Self {
        Self {
            pin,
            timer,
            timing,
            order,
            last_frame: None,
            transmitted: Duration::from_ticks(0),
        }
    }

    /// One-time pin setup: configure as output, line idle low
    pub fn init(&mut self) {
        self.pin.set_output();
        self.pin.low();
    }

    /// Emit the buffer contents
    ///
    /// A zero-length buffer is a no-op and returns without acquiring the
    /// critical section.
    pub fn show(&mut self, pixels: &[Rgb], scale: u8) {
        if pixels.is_empty() {
            return;
        }
        self.emit_frame(pixels.iter().copied(), pixels.len(), scale);
    }

    /// Fill `count` pixels with one color
    pub fn show_color(&mut self, color: Rgb, count: usize, scale: u8) {
        if count == 0 {
            return;
        }
        self.emit_frame(iter::repeat_n(color, count), count, scale);
    }

    /// Emit an all-black frame
    pub fn clear_leds(&mut self, count: usize) {
        self.show_color(Rgb::new(0, 0, 0), count, FULL_BRIGHTNESS);
    }

    /// Timing spec this controller was built with
    pub const fn timing(&self) -> ChipsetTiming {
        self.timing
    }

    /// Estimated cumulative transmission time across all frames
    pub const fn transmitted(&self) -> Duration {
        self.transmitted
    }

    fn emit_frame(&mut self, pixels: impl Iterator<Item = Rgb>, count: usize, scale: u8) {
        self.wait_for_latch();
        // Scoped interrupt masking: restored on every exit path of the
        // closure. The chip samples pulse widths, so nothing may preempt
        // the emitter mid-frame.
        critical_section::with(|_cs| {
            let mut emitter = ClocklessEmitter::new(&mut self.pin, &mut self.timer, self.timing);
            emitter.emit(pixels, self.order, scale);
        });
        self.last_frame = Some(Instant::now());
        self.transmitted += self.timing.frame_duration(count);
    }

    /// Block until the chip's minimum latch time has passed since the
    /// previous frame
    fn wait_for_latch(&self) {
        let Some(last) = self.last_frame else {
            return;
        };
        let elapsed = last.elapsed();
        if elapsed < self.timing.reset {
            block_for(self.timing.reset - elapsed);
        }
    }
}
