//! UART Register Definitions
//!
//! The RSL10 has a single UART. In DMA mode the data registers are serviced
//! by DMA requests instead of CPU reads and writes.

use super::dio::DioRegs;
use super::{UART_BASE, reg_rw};
use crate::driver::config::UartConfig;
use crate::driver::error::{ConfigError, ConfigResult};
use crate::hal::SerialPort;

// =============================================================================
// Register Offsets
// =============================================================================

/// Control register offset
pub const UART_CTRL_OFFSET: usize = 0x00;
/// Baud rate counter register offset
pub const UART_SPEED_CTRL_OFFSET: usize = 0x04;
/// Status register offset
pub const UART_STATUS_OFFSET: usize = 0x08;
/// Transmit data register offset
pub const UART_TX_DATA_OFFSET: usize = 0x10;
/// Receive data register offset
pub const UART_RX_DATA_OFFSET: usize = 0x14;

// =============================================================================
// Control Register (CTRL) Bits
// =============================================================================

/// UART enable
pub const UART_CTRL_ENABLE: u32 = 1 << 0;
/// Service data registers with DMA requests
pub const UART_CTRL_DMA_ENABLE: u32 = 1 << 1;
/// Divide the input clock by 12 before the baud counter
pub const UART_CTRL_PRESCALE_ENABLE: u32 = 1 << 4;

// =============================================================================
// Baud Rate Counter
// =============================================================================

/// Baud counter resolution (bits of fraction)
pub const UART_SPEED_SHIFT: u32 = 18;
/// Baud counter field mask
pub const UART_SPEED_MASK: u32 = 0xFFFF;
/// Clock division applied when prescaling
pub const UART_PRESCALE_DIVISOR: u64 = 12;

/// Baud counter and control prescale bit for a line rate.
///
/// The counter is `baud * 2^18 / clock`. When that does not fit the 16-bit
/// field the clock is prescaled by 12. Returns `None` if neither fits.
pub const fn baud_settings(sysclk_hz: u32, baud_rate: u32) -> Option<(u32, u32)> {
    if sysclk_hz == 0 || baud_rate == 0 {
        return None;
    }
    let scaled = (baud_rate as u64) << UART_SPEED_SHIFT;
    let counter = scaled / sysclk_hz as u64;
    if counter > 0 && counter <= UART_SPEED_MASK as u64 {
        return Some((counter as u32, 0));
    }
    let counter = scaled * UART_PRESCALE_DIVISOR / sysclk_hz as u64;
    if counter > 0 && counter <= UART_SPEED_MASK as u64 {
        return Some((counter as u32, UART_CTRL_PRESCALE_ENABLE));
    }
    None
}

/// UART register block
#[derive(Debug, Default)]
pub struct UartRegs;

impl UartRegs {
    /// Create a handle to the UART. Const-compatible.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    reg_rw!(ctrl, set_ctrl, UART_BASE, UART_CTRL_OFFSET, "Control register");
    reg_rw!(speed_ctrl, set_speed_ctrl, UART_BASE, UART_SPEED_CTRL_OFFSET, "Baud Rate Counter register");
    reg_rw!(status, set_status, UART_BASE, UART_STATUS_OFFSET, "Status register");
}

impl SerialPort for UartRegs {
    fn configure(&mut self, config: &UartConfig) -> ConfigResult<()> {
        let (counter, prescale) = baud_settings(config.sysclk_hz, config.baud_rate)
            .ok_or(ConfigError::InvalidBaudRate)?;

        Self::set_ctrl(0);
        DioRegs::configure_uart(config.tx_pin, config.rx_pin, &config.pins);
        Self::set_speed_ctrl(counter);
        Self::set_ctrl(UART_CTRL_ENABLE | UART_CTRL_DMA_ENABLE | prescale);
        Ok(())
    }

    fn tx_data_address(&self) -> usize {
        UART_BASE + UART_TX_DATA_OFFSET
    }

    fn rx_data_address(&self) -> usize {
        UART_BASE + UART_RX_DATA_OFFSET
    }
}
