//! DIO Pad Register Definitions
//!
//! Every DIO pad has a configuration register at `DIO_BASE + 4 * n` that
//! selects its function and sets its electrical properties. UART RX is not
//! a pad function: the UART input is routed from a pad through the
//! `DIO_UART_SRC` register instead.
//!
//! | Signal  | Routing                        | Default DIO |
//! |---------|--------------------------------|-------------|
//! | UART TX | pad function `DIO_MODE_UART_TX` | DIO5        |
//! | UART RX | `DIO_UART_SRC` input select     | DIO4        |

use super::{DIO_BASE, write_reg};
use crate::driver::config::PinConfig;

// =============================================================================
// Register Offsets
// =============================================================================

/// Stride between pad configuration registers
pub const DIO_CFG_STRIDE: usize = 0x04;

/// UART input source select register offset
pub const DIO_UART_SRC_OFFSET: usize = 0x80;

// =============================================================================
// DIO_CFG bit fields
// =============================================================================

/// Pad function field mask (bits 5:0)
pub const DIO_CFG_MODE_MASK: u32 = 0x3F;

/// Pad function: general-purpose input
pub const DIO_MODE_INPUT: u32 = 0x00;

/// Pad function: UART TX output
pub const DIO_MODE_UART_TX: u32 = 0x0A;

/// Pull control shift (bits 9:8)
pub const DIO_CFG_PULL_SHIFT: u32 = 8;

/// Low-pass filter enable (bit 10)
pub const DIO_CFG_LPF_ENABLE: u32 = 1 << 10;

/// Drive strength shift (bits 13:12)
pub const DIO_CFG_DRIVE_SHIFT: u32 = 12;

// =============================================================================
// DIO_UART_SRC bit fields
// =============================================================================

/// RX pad select mask (bits 3:0)
pub const DIO_UART_SRC_RX_MASK: u32 = 0xF;

/// Pad configuration value for `mode` with the given electrical settings
pub const fn cfg_bits(mode: u32, pins: &PinConfig) -> u32 {
    let mut bits = (mode & DIO_CFG_MODE_MASK)
        | ((pins.pull as u32) << DIO_CFG_PULL_SHIFT)
        | ((pins.drive as u32) << DIO_CFG_DRIVE_SHIFT);
    if pins.low_pass_filter {
        bits |= DIO_CFG_LPF_ENABLE;
    }
    bits
}

/// DIO pad registers
pub struct DioRegs;

impl DioRegs {
    /// Route UART TX to `tx_pin` and UART RX from `rx_pin`.
    pub fn configure_uart(tx_pin: u8, rx_pin: u8, pins: &PinConfig) {
        // SAFETY: pin numbers are validated against DIO_COUNT before bring-up
        unsafe {
            write_reg(
                DIO_BASE + tx_pin as usize * DIO_CFG_STRIDE,
                cfg_bits(DIO_MODE_UART_TX, pins),
            );
            write_reg(
                DIO_BASE + rx_pin as usize * DIO_CFG_STRIDE,
                cfg_bits(DIO_MODE_INPUT, pins),
            );
            write_reg(
                DIO_BASE + DIO_UART_SRC_OFFSET,
                rx_pin as u32 & DIO_UART_SRC_RX_MASK,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::config::{DriveStrength, Pull};

    #[test]
    fn default_pad_settings_encoding() {
        let bits = cfg_bits(DIO_MODE_UART_TX, &PinConfig::new());

        assert_eq!(bits & DIO_CFG_MODE_MASK, DIO_MODE_UART_TX);
        assert_eq!((bits >> DIO_CFG_PULL_SHIFT) & 0x3, Pull::WeakUp as u32);
        assert_eq!((bits >> DIO_CFG_DRIVE_SHIFT) & 0x3, DriveStrength::X6 as u32);
        assert_ne!(bits & DIO_CFG_LPF_ENABLE, 0);
    }

    #[test]
    fn filter_and_pull_can_be_disabled() {
        let pins = PinConfig {
            drive: DriveStrength::X2,
            pull: Pull::Disabled,
            low_pass_filter: false,
        };
        assert_eq!(cfg_bits(DIO_MODE_INPUT, &pins), 0);
    }
}
