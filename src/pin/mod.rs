//! Direct GPIO access for bit-banged output.
//!
//! The emission loop toggles the line several million times per second, so
//! the pin contract exposes precomputed register words instead of combining
//! them on every write. Two strategies implement it:
//!
//! - [`RuntimePin`]: the register addresses are resolved once from a
//!   platform pin table and cached. Costs one indirection per toggle.
//! - [`FixedPin`]: every address and the mask are const generics, so a
//!   toggle lowers to a store to an immediate address with no indirection.
//!
//! Register writes go through set/clear ("write 1 to set/clear") registers
//! where the platform has them, which keeps the hot path free of
//! read-modify-write sequences.

pub mod esp32;

use core::ptr;

/// GPIO contract consumed by the clockless emission loop
///
/// Implementations mutate hardware registers directly and have no runtime
/// error conditions; an invalid pin is a configuration mistake caught when
/// the binding is built.
pub trait ClocklessPin {
    /// Configure the pin as a push-pull output
    fn set_output(&mut self);

    /// Drive the line high
    fn high(&mut self);

    /// Drive the line low
    fn low(&mut self);

    /// Invert the current line level
    fn toggle(&mut self);

    /// Write a raw word to the output data register
    fn set(&mut self, raw: u32);

    /// Precomputed word written to the set register by [`ClocklessPin::high`]
    fn high_value(&self) -> u32;

    /// Precomputed word written to the clear register by [`ClocklessPin::low`]
    fn low_value(&self) -> u32;

    /// Address of the output data register
    fn register_address(&self) -> usize;

    /// Bit mask of this pin within its register group
    fn bit_mask(&self) -> u32;
}

/// Resolved register addresses and mask for one logical pin
///
/// `out` is the data register, `set`/`clear` its write-1-to-set and
/// write-1-to-clear companions, `dir_set` the output-enable set register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinBinding {
    pub out: usize,
    pub set: usize,
    pub clear: usize,
    pub dir_set: usize,
    pub mask: u32,
}

/// Pin bound through a [`PinBinding`] resolved once at startup
///
/// The common case: one memory indirection per toggle, absorbable by the
/// delay constants.
pub struct RuntimePin {
    binding: PinBinding,
}

impl RuntimePin {
    /// Bind a pin from resolved register addresses
    ///
    /// # Safety
    ///
    /// The binding must describe valid, mapped GPIO registers for this
    /// device, and the pin must not be driven by any other peripheral or
    /// controller while this binding exists.
    pub const unsafe fn new(binding: PinBinding) -> Self {
        Self { binding }
    }
}

impl ClocklessPin for RuntimePin {
    #[inline(always)]
    fn set_output(&mut self) {
        unsafe { ptr::write_volatile(self.binding.dir_set as *mut u32, self.binding.mask) }
    }

    #[inline(always)]
    fn high(&mut self) {
        unsafe { ptr::write_volatile(self.binding.set as *mut u32, self.binding.mask) }
    }

    #[inline(always)]
    fn low(&mut self) {
        unsafe { ptr::write_volatile(self.binding.clear as *mut u32, self.binding.mask) }
    }

    #[inline(always)]
    fn toggle(&mut self) {
        unsafe {
            let out = self.binding.out as *mut u32;
            ptr::write_volatile(out, ptr::read_volatile(out) ^ self.binding.mask);
        }
    }

    #[inline(always)]
    fn set(&mut self, raw: u32) {
        unsafe { ptr::write_volatile(self.binding.out as *mut u32, raw) }
    }

    #[inline(always)]
    fn high_value(&self) -> u32 {
        self.binding.mask
    }

    #[inline(always)]
    fn low_value(&self) -> u32 {
        self.binding.mask
    }

    #[inline(always)]
    fn register_address(&self) -> usize {
        self.binding.out
    }

    #[inline(always)]
    fn bit_mask(&self) -> u32 {
        self.binding.mask
    }
}

/// Pin bound at compile time to fixed register addresses
///
/// Zero-sized; every register address and the mask are const parameters, so
/// `high`/`low` compile down to a single store. Platform modules provide
/// named aliases for the pins in their tables (see [`esp32`]); a pin with
/// no alias falls back to [`RuntimePin`].
pub struct FixedPin<
    const OUT: usize,
    const SET: usize,
    const CLR: usize,
    const DIR: usize,
    const MASK: u32,
>;

impl<const OUT: usize, const SET: usize, const CLR: usize, const DIR: usize, const MASK: u32>
    FixedPin<OUT, SET, CLR, DIR, MASK>
{
    /// Bind the pin
    ///
    /// # Safety
    ///
    /// The const parameters must describe valid, mapped GPIO registers for
    /// this device, and the pin must not be driven by any other peripheral
    /// or controller while this binding exists.
    pub const unsafe fn bind() -> Self {
        Self
    }
}

impl<const OUT: usize, const SET: usize, const CLR: usize, const DIR: usize, const MASK: u32>
    ClocklessPin for FixedPin<OUT, SET, CLR, DIR, MASK>
{
    #[inline(always)]
    fn set_output(&mut self) {
        unsafe { ptr::write_volatile(DIR as *mut u32, MASK) }
    }

    #[inline(always)]
    fn high(&mut self) {
        unsafe { ptr::write_volatile(SET as *mut u32, MASK) }
    }

    #[inline(always)]
    fn low(&mut self) {
        unsafe { ptr::write_volatile(CLR as *mut u32, MASK) }
    }

    #[inline(always)]
    fn toggle(&mut self) {
        unsafe {
            let out = OUT as *mut u32;
            ptr::write_volatile(out, ptr::read_volatile(out) ^ MASK);
        }
    }

    #[inline(always)]
    fn set(&mut self, raw: u32) {
        unsafe { ptr::write_volatile(OUT as *mut u32, raw) }
    }

    #[inline(always)]
    fn high_value(&self) -> u32 {
        MASK
    }

    #[inline(always)]
    fn low_value(&self) -> u32 {
        MASK
    }

    #[inline(always)]
    fn register_address(&self) -> usize {
        OUT
    }

    #[inline(always)]
    fn bit_mask(&self) -> u32 {
        MASK
    }
}
