//! Bit-banged clockless protocol driver for WS281x-class addressable LEDs.
//!
//! Drives single-wire, self-clocked LED chips directly from a GPIO pin with
//! no protocol peripheral: every bit is encoded purely by pulse width, so
//! the emitter hits hardware-cycle timing by burning hand-counted CPU
//! cycles between pin writes inside an interrupt-masked critical section.
//!
//! The layers, leaf to root: [`pin`] (register-level pin access), [`delay`]
//! (cycle-exact busy delays), the per-bit timing state machine,
//! [`controller`] (latch waits, critical section, time bookkeeping) and
//! [`select`] (priority fallback across transmission mechanisms). The
//! [`sim`] module captures the emitted waveform on a virtual line for
//! host-side tests.

#![no_std]

pub mod controller;
pub mod delay;
pub(crate) mod engine;
pub mod math8;
pub mod order;
pub mod pin;
pub mod select;
pub mod sim;
pub mod timing;

pub use controller::{ClocklessController, FULL_BRIGHTNESS};
pub use delay::{CpuTimer, CycleTimer};
pub use math8::scale8;
pub use order::ColorOrder;
pub use pin::{ClocklessPin, FixedPin, PinBinding, RuntimePin};
pub use select::{DriverSelector, Mechanism, MechanismKind, RegisterError};
pub use timing::{BITS_PER_PIXEL, ChipsetTiming};

pub use embassy_time::{Duration, Instant};

/// Pixel color triple as stored in the caller's buffer
pub type Rgb = smart_leds::RGB8;
