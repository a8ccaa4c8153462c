//! Cycle-exact busy delays.
//!
//! The protocol has no resynchronization mechanism: a one-cycle error in any
//! phase shifts every later bit boundary in the frame. The delay therefore
//! goes through hand-counted instruction sequences per architecture, never a
//! generic loop the optimizer may collapse or unroll unpredictably.

/// Cycle accounting contract for one target
///
/// `burn_cycles(n)` burns exactly `n` core cycles. The two constants are
/// fixed costs the emission loop charges against the timing phases:
/// `TOGGLE_COST` cycles per pin write, `PREP_COST` cycles for loading and
/// scaling the next channel byte during the low tail of a byte's final bit.
pub trait CycleTimer {
    const TOGGLE_COST: u32;
    const PREP_COST: u32;

    fn burn_cycles(&mut self, n: u32);
}

/// Delay implementation running on the CPU's own pipeline
///
/// Cycle counts are verified against the instruction timings of each
/// supported core. On non-embedded targets this compiles to an approximate
/// spin so the crate still builds; host-side accuracy comes from the
/// simulated timer in [`crate::sim`] instead.
#[derive(Debug, Default)]
pub struct CpuTimer;

impl CpuTimer {
    pub const fn new() -> Self {
        Self
    }
}

impl CycleTimer for CpuTimer {
    const TOGGLE_COST: u32 = 2;
    const PREP_COST: u32 = 12;

    #[inline(always)]
    fn burn_cycles(&mut self, n: u32) {
        burn(n);
    }
}

/// Cycles consumed by one taken iteration of the counted loop.
#[cfg(any(target_arch = "xtensa", target_arch = "arm"))]
const LOOP_CYCLES: u32 = 3;
#[cfg(target_arch = "riscv32")]
const LOOP_CYCLES: u32 = 2;

/// Burn up to four cycles as straight nops
#[cfg(any(target_arch = "xtensa", target_arch = "riscv32", target_arch = "arm"))]
#[inline(always)]
fn burn_short(n: u32) {
    use core::arch::asm;
    unsafe {
        if n >= 1 {
            asm!("nop", options(nomem, nostack, preserves_flags));
        }
        if n >= 2 {
            asm!("nop", options(nomem, nostack, preserves_flags));
        }
        if n >= 3 {
            asm!("nop", options(nomem, nostack, preserves_flags));
        }
        if n >= 4 {
            asm!("nop", options(nomem, nostack, preserves_flags));
        }
    }
}

#[cfg(target_arch = "xtensa")]
#[inline(always)]
fn burn(n: u32) {
    use core::arch::asm;
    if n < 5 {
        burn_short(n);
        return;
    }
    // addi + taken bnez, 3 cycles per iteration on the LX6/LX7.
    let iters = n / LOOP_CYCLES;
    unsafe {
        asm!(
            "1:",
            "addi {0}, {0}, -1",
            "bnez {0}, 1b",
            inout(reg) iters => _,
            options(nomem, nostack),
        );
    }
    burn_short(n % LOOP_CYCLES);
}

#[cfg(target_arch = "riscv32")]
#[inline(always)]
fn burn(n: u32) {
    use core::arch::asm;
    if n < 5 {
        burn_short(n);
        return;
    }
    // addi + taken bnez, 2 cycles per iteration on the single-issue cores.
    let iters = n / LOOP_CYCLES;
    unsafe {
        asm!(
            "1:",
            "addi {0}, {0}, -1",
            "bnez {0}, 1b",
            inout(reg) iters => _,
            options(nomem, nostack),
        );
    }
    burn_short(n % LOOP_CYCLES);
}

#[cfg(target_arch = "arm")]
#[inline(always)]
fn burn(n: u32) {
    use core::arch::asm;
    if n < 5 {
        burn_short(n);
        return;
    }
    // subs + taken bne, 3 cycles per iteration on Cortex-M3/M4/M7.
    let iters = n / LOOP_CYCLES;
    unsafe {
        asm!(
            "1:",
            "subs {0}, {0}, #1",
            "bne 1b",
            inout(reg) iters => _,
            options(nomem, nostack),
        );
    }
    burn_short(n % LOOP_CYCLES);
}

#[cfg(not(any(target_arch = "xtensa", target_arch = "riscv32", target_arch = "arm")))]
#[inline(always)]
fn burn(n: u32) {
    for _ in 0..n {
        core::hint::spin_loop();
    }
}
