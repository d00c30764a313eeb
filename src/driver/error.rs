//! Error types for the RSL10 UART transport
//!
//! Errors are organized by domain:
//! - [`ConfigError`]: Bring-up and configuration failures
//! - [`IoError`]: Runtime TX/RX failures
//!
//! The unified [`Error`] enum wraps both and is returned by the
//! [`Uart`](crate::Uart) facade.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Bring-up and configuration errors
///
/// These errors occur during [`Uart::init`](crate::Uart::init) and never
/// once the transport is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Transport already initialized
    AlreadyInitialized,
    /// Baud rate is zero or too fast for the system clock
    InvalidBaudRate,
    /// DIO pin number out of range, or TX and RX on the same pin
    InvalidPin,
    /// DMA channel number out of range
    InvalidChannel,
    /// TX and RX routed to the same DMA channel
    ChannelConflict,
    /// Buffer size is zero or not a multiple of the transfer width
    BufferMisaligned,
    /// Buffer holds more elements than one transfer can address
    BufferTooLarge,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::AlreadyInitialized => "already initialized",
            ConfigError::InvalidBaudRate => "invalid baud rate",
            ConfigError::InvalidPin => "invalid DIO pin",
            ConfigError::InvalidChannel => "invalid DMA channel",
            ConfigError::ChannelConflict => "TX and RX share a DMA channel",
            ConfigError::BufferMisaligned => "buffer size not a multiple of transfer width",
            ConfigError::BufferTooLarge => "buffer exceeds maximum transfer length",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Runtime TX/RX errors
///
/// The streams themselves only ever produce [`IoError::CapacityExceeded`];
/// the other variants come from the facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// Submitted data does not fit in the TX buffer (after the in-flight window)
    CapacityExceeded,
    /// Transport used before bring-up
    NotRunning,
    /// Bounded wait expired
    Timeout,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::CapacityExceeded => "TX buffer capacity exceeded",
            IoError::NotRunning => "transport not running",
            IoError::Timeout => "operation timed out",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// ```ignore
/// match uart.write(b"hello") {
///     Err(Error::Io(IoError::CapacityExceeded)) => { /* retry later */ }
///     Err(Error::Io(IoError::NotRunning)) => { /* call init first */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// I/O error
    Io(IoError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for transport operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for I/O operations
pub type IoResult<T> = core::result::Result<T, IoError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;

    use super::*;

    #[test]
    fn config_error_as_str_non_empty() {
        let variants = [
            ConfigError::AlreadyInitialized,
            ConfigError::InvalidBaudRate,
            ConfigError::InvalidPin,
            ConfigError::InvalidChannel,
            ConfigError::ChannelConflict,
            ConfigError::BufferMisaligned,
            ConfigError::BufferTooLarge,
        ];

        for variant in variants {
            assert!(!variant.as_str().is_empty(), "ConfigError::{variant:?} has empty string");
        }
    }

    #[test]
    fn config_error_display() {
        assert_eq!(format!("{}", ConfigError::InvalidChannel), "invalid DMA channel");
    }

    #[test]
    fn io_error_display() {
        assert_eq!(
            format!("{}", IoError::CapacityExceeded),
            "TX buffer capacity exceeded"
        );
        assert_eq!(format!("{}", IoError::Timeout), "operation timed out");
    }

    #[test]
    fn error_from_domain_errors() {
        let err: Error = ConfigError::InvalidPin.into();
        assert_eq!(err, Error::Config(ConfigError::InvalidPin));

        let err: Error = IoError::NotRunning.into();
        assert_eq!(err, Error::Io(IoError::NotRunning));
    }

    #[test]
    fn error_display_carries_domain_prefix() {
        let display = format!("{}", Error::Io(IoError::CapacityExceeded));
        assert!(display.starts_with("io:"));
        assert!(display.contains("capacity"));

        let display = format!("{}", Error::Config(ConfigError::InvalidBaudRate));
        assert!(display.starts_with("config:"));
        assert!(display.contains("baud"));
    }

    #[test]
    fn question_mark_converts_into_unified_error() {
        fn inner() -> IoResult<()> {
            Err(IoError::Timeout)
        }
        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }

        assert_eq!(outer(), Err(Error::Io(IoError::Timeout)));
    }
}
