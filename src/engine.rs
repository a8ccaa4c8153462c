//! Clockless protocol state machine.
//!
//! One bit is three fixed phases: raise the line, hold T1, lower it, hold T2
//! for a zero or T3 for a one. Every phase is realized by burning cycles on
//! the CPU, with the fixed cost of each pin write subtracted so phase totals
//! come out exact on the wire.
//!
//! The low phase of a byte's final bit additionally reserves `PREP_COST`
//! cycles; the load, reorder and scale work for the *next* channel byte runs
//! in that otherwise idle tail, so byte boundaries add no latency to the
//! waveform.

use crate::Rgb;
use crate::delay::CycleTimer;
use crate::math8::scale8;
use crate::order::ColorOrder;
use crate::pin::ClocklessPin;
use crate::timing::ChipsetTiming;

/// One-frame emitter over a pin and a cycle timer
///
/// Borrows the pin and timer for the duration of a single frame. The caller
/// is responsible for the critical section; nothing here may be interrupted
/// for more than a few bit periods.
pub(crate) struct ClocklessEmitter<'a, P: ClocklessPin, T: CycleTimer> {
    pin: &'a mut P,
    timer: &'a mut T,
    timing: ChipsetTiming,
}

impl<'a, P: ClocklessPin, T: CycleTimer> ClocklessEmitter<'a, P, T> {
    pub(crate) fn new(pin: &'a mut P, timer: &'a mut T, timing: ChipsetTiming) -> Self {
        Self { pin, timer, timing }
    }

    /// Clock out every pixel of `pixels` in wire order
    ///
    /// Scaling is applied inline per channel byte; a fraction of 0 still
    /// clocks out all data bits at full cadence. An empty iterator emits
    /// nothing.
    #[inline(always)]
    pub(crate) fn emit(
        &mut self,
        mut pixels: impl Iterator<Item = Rgb>,
        order: ColorOrder,
        scale: u8,
    ) {
        let Some(first) = pixels.next() else {
            return;
        };
        let mut channels = order.channels(first);
        let mut channel_idx = 1usize;
        let mut current = scale8(channels[0], scale);

        loop {
            self.emit_byte(current);
            // This work lands in the cycles emit_byte reserved out of the
            // final low phase.
            if channel_idx < 3 {
                current = scale8(channels[channel_idx], scale);
                channel_idx += 1;
            } else if let Some(next) = pixels.next() {
                channels = order.channels(next);
                current = scale8(channels[0], scale);
                channel_idx = 1;
            } else {
                break;
            }
        }
    }

    /// Clock out one byte, MSB first
    ///
    /// The low phase of bit 7 is shortened by `PREP_COST` so the caller's
    /// next-byte preparation stays inside the bit period.
    #[inline(always)]
    fn emit_byte(&mut self, mut byte: u8) {
        let t1 = self.timing.t1.saturating_sub(T::TOGGLE_COST);
        for bit in 0..8 {
            self.pin.high();
            self.timer.burn_cycles(t1);
            let low = if byte & 0x80 == 0 {
                self.timing.t2
            } else {
                self.timing.t3
            };
            self.pin.low();
            let mut reserve = T::TOGGLE_COST;
            if bit == 7 {
                reserve += T::PREP_COST;
            }
            self.timer.burn_cycles(low.saturating_sub(reserve));
            byte <<= 1;
        }
    }
}
