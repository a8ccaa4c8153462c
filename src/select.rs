//! Transmission mechanism selection with compile-time known variants.
//!
//! A platform may have several ways to emit the same clockless waveform:
//! bit-banging always works, while peripheral-assisted mechanisms (RMT, I2S,
//! SPI) need a free hardware channel. The set is closed and known per
//! platform, so mechanisms live in an enum the platform defines, never
//! behind open-ended runtime polymorphism.
//!
//! Selection walks the registered slots by descending priority and takes
//! the first enabled mechanism that can claim its hardware resource. When a
//! claim fails it falls through to the next slot; when every slot fails the
//! frame is silently dropped. Enable, disable and exclusive-selection
//! requests are deferred to the next frame boundary so a frame never mixes
//! two timing regimes.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use heapless::Vec;

use crate::Rgb;
use crate::controller::ClocklessController;
use crate::delay::CycleTimer;
use crate::pin::ClocklessPin;

/// The closed set of transmission mechanisms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MechanismKind {
    /// CPU bit-banging, this crate's engine
    BitBang,
    /// RMT-style pulse encoder peripheral
    Rmt,
    /// I2S/LCD-style parallel shifter
    I2s,
    /// SPI shift register reuse
    Spi,
}

/// One way of putting a frame on the wire
///
/// `try_claim` acquires whatever hardware resource the mechanism needs for
/// one frame; a `false` makes the selector fall back to the next slot.
pub trait Mechanism {
    fn kind(&self) -> MechanismKind;

    fn try_claim(&mut self) -> bool {
        true
    }

    fn release(&mut self) {}

    fn transmit(&mut self, pixels: &[Rgb], scale: u8);
}

/// Bit-banging needs no shared peripheral, so a claim always succeeds.
impl<P: ClocklessPin, T: CycleTimer> Mechanism for ClocklessController<P, T> {
    fn kind(&self) -> MechanismKind {
        MechanismKind::BitBang
    }

    fn transmit(&mut self, pixels: &[Rgb], scale: u8) {
        self.show(pixels, scale);
    }
}

/// Error returned when registering into a full selector table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterError<M>(pub M);

#[derive(Debug, Clone, Copy)]
enum PendingChange {
    Enable,
    Disable,
    Exclusive,
}

struct Slot<M> {
    mechanism: M,
    priority: u8,
    enabled: bool,
    pending: Option<PendingChange>,
}

/// Priority-ordered mechanism table
///
/// `N` bounds the number of registered mechanisms; the table never
/// allocates. Mechanism state changes requested between frames are applied
/// at the start of the next `show`.
pub struct DriverSelector<M: Mechanism, const N: usize> {
    slots: Vec<Slot<M>, N>,
}

impl<M: Mechanism, const N: usize> DriverSelector<M, N> {
    pub const fn new() -> Self {
        // The per-frame attempt tracking is a u32 bitmask.
        assert!(N <= 32);
        Self { slots: Vec::new() }
    }

    /// Register a mechanism with a priority; higher wins
    ///
    /// Registered mechanisms start enabled.
    pub fn register(&mut self, mechanism: M, priority: u8) -> Result<(), RegisterError<M>> {
        self.slots
            .push(Slot {
                mechanism,
                priority,
                enabled: true,
                pending: None,
            })
            .map_err(|slot| RegisterError(slot.mechanism))
    }

    /// Enable every slot of `kind` at the next frame boundary
    pub fn enable(&mut self, kind: MechanismKind) {
        self.mark(kind, PendingChange::Enable);
    }

    /// Disable every slot of `kind` at the next frame boundary
    pub fn disable(&mut self, kind: MechanismKind) {
        self.mark(kind, PendingChange::Disable);
    }

    /// At the next frame boundary, enable `kind` and disable everything else
    pub fn select_exclusive(&mut self, kind: MechanismKind) {
        for slot in &mut self.slots {
            slot.pending = Some(if slot.mechanism.kind() == kind {
                PendingChange::Exclusive
            } else {
                PendingChange::Disable
            });
        }
    }

    /// Whether any slot of `kind` is currently enabled
    pub fn is_enabled(&self, kind: MechanismKind) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.enabled && slot.mechanism.kind() == kind)
    }

    /// Emit one frame through the best available mechanism
    ///
    /// Pending state changes take effect here, before any transmission, so
    /// a frame never straddles two timing regimes. If no enabled mechanism
    /// can claim its hardware, the frame is dropped without error.
    pub fn show(&mut self, pixels: &[Rgb], scale: u8) {
        self.apply_pending();

        let mut attempted = 0u32;
        loop {
            let Some(idx) = self.next_candidate(attempted) else {
                break;
            };
            attempted |= 1 << idx;

            let slot = &mut self.slots[idx];
            if !slot.mechanism.try_claim() {
                continue;
            }
            slot.mechanism.transmit(pixels, scale);
            slot.mechanism.release();
            return;
        }

        #[cfg(feature = "esp32-log")]
        println!("clockless: no transmit mechanism available, frame dropped");
    }

    /// Highest-priority enabled slot not yet attempted this frame
    fn next_candidate(&self, attempted: u32) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(idx, slot)| slot.enabled && attempted & (1 << idx) == 0)
            .max_by_key(|(_, slot)| slot.priority)
            .map(|(idx, _)| idx)
    }

    fn mark(&mut self, kind: MechanismKind, change: PendingChange) {
        for slot in &mut self.slots {
            if slot.mechanism.kind() == kind {
                slot.pending = Some(change);
            }
        }
    }

    fn apply_pending(&mut self) {
        for slot in &mut self.slots {
            if let Some(change) = slot.pending.take() {
                slot.enabled = match change {
                    PendingChange::Enable | PendingChange::Exclusive => true,
                    PendingChange::Disable => false,
                };
            }
        }
    }
}

impl<M: Mechanism, const N: usize> Default for DriverSelector<M, N> {
    fn default() -> Self {
        Self::new()
    }
}
