//! Simulated GPIO line for host-side verification.
//!
//! A [`SimLine`] is a virtual pin plus a cycle clock behind a critical
//! section (same interior-mutability shape as the rest of the crate's
//! shared state). The pin view and the timer view share one timeline: a pin
//! write costs [`TOGGLE_CYCLES`] simulated cycles and records any level
//! change, `burn_cycles(n)` advances the clock by exactly `n`. Captured
//! transitions can be decoded back into pixels with [`decode_frame`].
//!
//! Everything here is portable `no_std` code; downstream crates can use it
//! in their own tests.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Vec;

use crate::Rgb;
use crate::delay::CycleTimer;
use crate::order::ColorOrder;
use crate::pin::ClocklessPin;
use crate::timing::ChipsetTiming;

/// Simulated cycle cost of one pin register write.
///
/// Matches `SimTimer::TOGGLE_COST`, so the emission loop's phase accounting
/// produces cycle-exact edges on the simulated line.
pub const TOGGLE_CYCLES: u32 = 2;

/// One recorded edge on the simulated line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Cycle at which the line changed level
    pub cycle: u64,
    /// Level after the change
    pub level: bool,
}

struct LineState<const CAP: usize> {
    clock: u64,
    level: bool,
    transitions: Vec<Transition, CAP>,
    overflowed: bool,
}

/// A virtual GPIO line with a cycle-accurate clock
///
/// `CAP` bounds the number of recorded transitions (a frame of `n` pixels
/// produces `n * 48` edges).
pub struct SimLine<const CAP: usize> {
    state: Mutex<RefCell<LineState<CAP>>>,
}

impl<const CAP: usize> SimLine<CAP> {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(LineState {
                clock: 0,
                level: false,
                transitions: Vec::new(),
                overflowed: false,
            })),
        }
    }

    /// Pin view onto this line
    pub const fn pin(&self) -> SimPin<'_, CAP> {
        SimPin { line: self }
    }

    /// Timer view onto this line
    pub const fn timer(&self) -> SimTimer<'_, CAP> {
        SimTimer { line: self }
    }

    /// Current simulated cycle count
    pub fn clock(&self) -> u64 {
        critical_section::with(|cs| self.state.borrow(cs).borrow().clock)
    }

    /// Current line level
    pub fn level(&self) -> bool {
        critical_section::with(|cs| self.state.borrow(cs).borrow().level)
    }

    /// Copy of the recorded transitions
    pub fn transitions(&self) -> Vec<Transition, CAP> {
        critical_section::with(|cs| self.state.borrow(cs).borrow().transitions.clone())
    }

    /// Whether more transitions occurred than `CAP` could record
    pub fn overflowed(&self) -> bool {
        critical_section::with(|cs| self.state.borrow(cs).borrow().overflowed)
    }

    /// Drop recorded transitions, keeping the clock and level
    pub fn clear(&self) {
        critical_section::with(|cs| {
            let mut state = self.state.borrow(cs).borrow_mut();
            state.transitions.clear();
            state.overflowed = false;
        });
    }

    fn write(&self, level: bool) {
        critical_section::with(|cs| {
            let mut state = self.state.borrow(cs).borrow_mut();
            if state.level != level {
                state.level = level;
                let cycle = state.clock;
                if state.transitions.push(Transition { cycle, level }).is_err() {
                    state.overflowed = true;
                }
            }
            // The write costs cycles whether or not the level changed.
            state.clock += u64::from(TOGGLE_CYCLES);
        });
    }

    fn advance(&self, cycles: u32) {
        critical_section::with(|cs| {
            self.state.borrow(cs).borrow_mut().clock += u64::from(cycles);
        });
    }
}

impl<const CAP: usize> Default for SimLine<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

/// [`ClocklessPin`] view of a [`SimLine`]
pub struct SimPin<'a, const CAP: usize> {
    line: &'a SimLine<CAP>,
}

impl<const CAP: usize> ClocklessPin for SimPin<'_, CAP> {
    fn set_output(&mut self) {}

    #[inline]
    fn high(&mut self) {
        self.line.write(true);
    }

    #[inline]
    fn low(&mut self) {
        self.line.write(false);
    }

    #[inline]
    fn toggle(&mut self) {
        let level = self.line.level();
        self.line.write(!level);
    }

    #[inline]
    fn set(&mut self, raw: u32) {
        self.line.write(raw & self.bit_mask() != 0);
    }

    fn high_value(&self) -> u32 {
        1
    }

    fn low_value(&self) -> u32 {
        1
    }

    fn register_address(&self) -> usize {
        0
    }

    fn bit_mask(&self) -> u32 {
        1
    }
}

/// [`CycleTimer`] view of a [`SimLine`]
///
/// Byte preparation is free on the host, so `PREP_COST` is zero and the
/// reserved pipeline tail collapses out of the simulated waveform.
pub struct SimTimer<'a, const CAP: usize> {
    line: &'a SimLine<CAP>,
}

impl<const CAP: usize> CycleTimer for SimTimer<'_, CAP> {
    const TOGGLE_COST: u32 = TOGGLE_CYCLES;
    const PREP_COST: u32 = 0;

    #[inline]
    fn burn_cycles(&mut self, n: u32) {
        self.line.advance(n);
    }
}

/// Decode a captured waveform back into pixels
///
/// `end_cycle` marks the end of the frame (the clock value after emission);
/// it bounds the low phase of the final bit, which has no trailing edge.
/// Bit values are recovered from the low-phase duration, whichever of T2/T3
/// is nearer. Returns at most `MAX` pixels; trailing partial bytes are
/// dropped.
pub fn decode_frame<const MAX: usize>(
    transitions: &[Transition],
    end_cycle: u64,
    timing: &ChipsetTiming,
    order: ColorOrder,
) -> Vec<Rgb, MAX> {
    let mut pixels: Vec<Rgb, MAX> = Vec::new();
    let mut wire = [0u8; 3];
    let mut byte: u8 = 0;
    let mut bits = 0u8;
    let mut bytes = 0usize;

    let mut i = 0;
    while i + 1 < transitions.len() {
        let rise = transitions[i];
        let fall = transitions[i + 1];
        if !rise.level || fall.level {
            break;
        }
        let low_end = transitions
            .get(i + 2)
            .map_or(end_cycle, |next| next.cycle);
        let low = low_end - fall.cycle;
        let bit = u8::from(low.abs_diff(u64::from(timing.t3)) < low.abs_diff(u64::from(timing.t2)));

        byte = (byte << 1) | bit;
        bits += 1;
        if bits == 8 {
            wire[bytes] = byte;
            byte = 0;
            bits = 0;
            bytes += 1;
            if bytes == 3 {
                bytes = 0;
                if pixels.push(order.assemble(wire)).is_err() {
                    break;
                }
            }
        }
        i += 2;
    }

    pixels
}
