//! Configuration types for the RSL10 UART transport

use super::error::{ConfigError, ConfigResult};
use crate::hal::TransferWidth;
use crate::internal::constants::{
    BITS_PER_FRAME, DEFAULT_BAUD_RATE, DEFAULT_RX_CHANNEL, DEFAULT_RX_PIN, DEFAULT_SYSCLK_HZ,
    DEFAULT_TX_CHANNEL, DEFAULT_TX_PIN, DIO_COUNT, DMA_CHANNEL_COUNT, MIN_CYCLES_PER_BIT,
};

/// DIO pad drive strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DriveStrength {
    /// 2x drive
    X2 = 0,
    /// 3x drive
    X3 = 1,
    /// 5x drive
    X5 = 2,
    /// 6x drive
    #[default]
    X6 = 3,
}

/// DIO pad pull resistor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Pull {
    /// No pull resistor
    Disabled = 0,
    /// Weak pull-up
    #[default]
    WeakUp = 1,
    /// Weak pull-down
    WeakDown = 2,
    /// Strong pull-up
    StrongUp = 3,
}

/// Electrical settings applied to both UART pads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// Drive strength
    pub drive: DriveStrength,
    /// Pull resistor
    pub pull: Pull,
    /// Input low-pass filter
    pub low_pass_filter: bool,
}

impl PinConfig {
    /// 6x drive, weak pull-up, filter enabled
    #[must_use]
    pub const fn new() -> Self {
        Self {
            drive: DriveStrength::X6,
            pull: Pull::WeakUp,
            low_pass_filter: true,
        }
    }
}

impl Default for PinConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete transport configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Line rate in bits per second
    pub baud_rate: u32,
    /// System clock feeding the UART in Hz
    pub sysclk_hz: u32,
    /// DIO carrying TX
    pub tx_pin: u8,
    /// DIO carrying RX
    pub rx_pin: u8,
    /// DMA channel moving TX data
    pub tx_channel: u8,
    /// DMA channel moving RX data
    pub rx_channel: u8,
    /// Element width for both buffers
    pub width: TransferWidth,
    /// Pad settings
    pub pins: PinConfig,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl UartConfig {
    /// Create a new configuration with defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            sysclk_hz: DEFAULT_SYSCLK_HZ,
            tx_pin: DEFAULT_TX_PIN,
            rx_pin: DEFAULT_RX_PIN,
            tx_channel: DEFAULT_TX_CHANNEL,
            rx_channel: DEFAULT_RX_CHANNEL,
            width: TransferWidth::Word,
            pins: PinConfig::new(),
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the line rate
    #[must_use]
    pub const fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Set the system clock frequency the UART runs from
    #[must_use]
    pub const fn with_sysclk_hz(mut self, sysclk_hz: u32) -> Self {
        self.sysclk_hz = sysclk_hz;
        self
    }

    /// Set the TX and RX DIO pins
    #[must_use]
    pub const fn with_pins(mut self, tx_pin: u8, rx_pin: u8) -> Self {
        self.tx_pin = tx_pin;
        self.rx_pin = rx_pin;
        self
    }

    /// Set the TX and RX DMA channel numbers
    #[must_use]
    pub const fn with_channels(mut self, tx_channel: u8, rx_channel: u8) -> Self {
        self.tx_channel = tx_channel;
        self.rx_channel = rx_channel;
        self
    }

    /// Set the buffer element width
    #[must_use]
    pub const fn with_width(mut self, width: TransferWidth) -> Self {
        self.width = width;
        self
    }

    /// Set the pad electrical configuration
    #[must_use]
    pub const fn with_pin_config(mut self, pins: PinConfig) -> Self {
        self.pins = pins;
        self
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Check ranges and routing.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidBaudRate`] for a zero rate, or one needing
    ///   fewer than 8 clock cycles per bit
    /// - [`ConfigError::InvalidPin`] for a pin past the last DIO, or TX and
    ///   RX on the same pin
    /// - [`ConfigError::InvalidChannel`] for a channel past the last one
    /// - [`ConfigError::ChannelConflict`] when TX and RX share a channel
    pub const fn validate(&self) -> ConfigResult<()> {
        if self.baud_rate == 0
            || (self.baud_rate as u64) * (MIN_CYCLES_PER_BIT as u64) > self.sysclk_hz as u64
        {
            return Err(ConfigError::InvalidBaudRate);
        }
        if self.tx_pin >= DIO_COUNT || self.rx_pin >= DIO_COUNT || self.tx_pin == self.rx_pin {
            return Err(ConfigError::InvalidPin);
        }
        if self.tx_channel >= DMA_CHANNEL_COUNT || self.rx_channel >= DMA_CHANNEL_COUNT {
            return Err(ConfigError::InvalidChannel);
        }
        if self.tx_channel == self.rx_channel {
            return Err(ConfigError::ChannelConflict);
        }
        Ok(())
    }

    /// Longest gap between drains, in microseconds, before received bytes
    /// can be overwritten.
    ///
    /// A ring of `capacity` elements fills in `capacity / (baud / 10)`
    /// seconds at line rate (8N1). Returns `None` for a zero baud rate.
    ///
    /// ```ignore
    /// // 256 elements at 115200 baud: about 22 ms
    /// let max_gap = UartConfig::new().max_rx_poll_interval_us(256);
    /// ```
    pub const fn max_rx_poll_interval_us(&self, capacity: usize) -> Option<u64> {
        if self.baud_rate == 0 {
            return None;
        }
        let bytes_per_second = self.baud_rate as u64 / BITS_PER_FRAME as u64;
        if bytes_per_second == 0 {
            return None;
        }
        Some(capacity as u64 * 1_000_000 / bytes_per_second)
    }
}

/// Transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Not initialized
    #[default]
    Uninitialized,
    /// Both channels configured, RX circular transfer running
    Running,
}

// =============================================================================
// Unit Tests
// =============================================================================
