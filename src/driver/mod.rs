//! Core driver components for the RSL10 UART transport.
//!
//! - [`config`] - Configuration types and builder
//! - [`error`] - Error types and result aliases
//! - [`interrupt`] - Channel status parsing and the interrupt entry point
//! - [`uart`] - The transport facade
//!
//! # Example
//!
//! ```ignore
//! use ph_rsl10_uart::driver::{UartConfig, Error};
//!
//! let config = UartConfig::new()
//!     .with_baud_rate(115_200)
//!     .with_pins(5, 4);
//! ```

// Submodules
pub mod config;
pub mod error;
pub mod interrupt;
pub mod uart;

// Re-exports for convenience
pub use config::{DriveStrength, PinConfig, Pull, State, UartConfig};
pub use error::{ConfigError, ConfigResult, Error, IoError, IoResult, Result};
pub use interrupt::{ChannelStatus, handle_dma_interrupt};
pub use uart::{Uart, UartDefault};
