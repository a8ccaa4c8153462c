//! ESP32 pin table.
//!
//! The classic ESP32 exposes its GPIO matrix as two 32-pin banks with
//! write-1-to-set / write-1-to-clear companion registers, so no
//! read-modify-write is needed on the hot path. Only output-capable pins
//! appear in the table: 6-11 are claimed by the SPI flash and 34-39 are
//! input-only.

use super::{FixedPin, PinBinding};

pub const GPIO_OUT_REG: usize = 0x3FF4_4004;
pub const GPIO_OUT_W1TS_REG: usize = 0x3FF4_4008;
pub const GPIO_OUT_W1TC_REG: usize = 0x3FF4_400C;
pub const GPIO_OUT1_REG: usize = 0x3FF4_4010;
pub const GPIO_OUT1_W1TS_REG: usize = 0x3FF4_4014;
pub const GPIO_OUT1_W1TC_REG: usize = 0x3FF4_4018;
pub const GPIO_ENABLE_W1TS_REG: usize = 0x3FF4_4024;
pub const GPIO_ENABLE1_W1TS_REG: usize = 0x3FF4_4030;

/// Logical pins this platform can drive
const OUTPUT_CAPABLE: &[u8] = &[
    0, 1, 2, 3, 4, 5, 12, 13, 14, 15, 16, 17, 18, 19, 21, 22, 23, 25, 26, 27, 32, 33,
];

const fn is_output_capable(pin: u8) -> bool {
    let mut i = 0;
    while i < OUTPUT_CAPABLE.len() {
        if OUTPUT_CAPABLE[i] == pin {
            return true;
        }
        i += 1;
    }
    false
}

/// Resolve a logical pin number to its register binding
///
/// Returns `None` for pins absent from the table (input-only or reserved);
/// there is no runtime fallback beyond that, a `None` here is a
/// configuration mistake.
pub const fn pin_binding(pin: u8) -> Option<PinBinding> {
    if !is_output_capable(pin) {
        return None;
    }
    if pin < 32 {
        Some(PinBinding {
            out: GPIO_OUT_REG,
            set: GPIO_OUT_W1TS_REG,
            clear: GPIO_OUT_W1TC_REG,
            dir_set: GPIO_ENABLE_W1TS_REG,
            mask: 1 << pin,
        })
    } else {
        Some(PinBinding {
            out: GPIO_OUT1_REG,
            set: GPIO_OUT1_W1TS_REG,
            clear: GPIO_OUT1_W1TC_REG,
            dir_set: GPIO_ENABLE1_W1TS_REG,
            mask: 1 << (pin - 32),
        })
    }
}

macro_rules! bank0_gpio {
    ($($alias:ident: $pin:literal),+ $(,)?) => {
        $(
            #[doc = concat!("GPIO", stringify!($pin), ", bank 0")]
            pub type $alias = FixedPin<
                GPIO_OUT_REG,
                GPIO_OUT_W1TS_REG,
                GPIO_OUT_W1TC_REG,
                GPIO_ENABLE_W1TS_REG,
                { 1u32 << $pin },
            >;
        )+
    };
}

macro_rules! bank1_gpio {
    ($($alias:ident: $pin:literal),+ $(,)?) => {
        $(
            #[doc = concat!("GPIO", stringify!($pin), ", bank 1")]
            pub type $alias = FixedPin<
                GPIO_OUT1_REG,
                GPIO_OUT1_W1TS_REG,
                GPIO_OUT1_W1TC_REG,
                GPIO_ENABLE1_W1TS_REG,
                { 1u32 << ($pin - 32) },
            >;
        )+
    };
}

bank0_gpio! {
    Gpio0: 0,
    Gpio1: 1,
    Gpio2: 2,
    Gpio3: 3,
    Gpio4: 4,
    Gpio5: 5,
    Gpio12: 12,
    Gpio13: 13,
    Gpio14: 14,
    Gpio15: 15,
    Gpio16: 16,
    Gpio17: 17,
    Gpio18: 18,
    Gpio19: 19,
    Gpio21: 21,
    Gpio22: 22,
    Gpio23: 23,
    Gpio25: 25,
    Gpio26: 26,
    Gpio27: 27,
}

bank1_gpio! {
    Gpio32: 32,
    Gpio33: 33,
}
