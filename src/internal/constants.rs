//! Centralized Constants
//!
//! Single source of truth for the defaults and limits used throughout the
//! transport.
//!
//! # Organization
//!
//! - **Line settings**: default baud rate, wire framing
//! - **Routing**: default DIO pins and DMA channels
//! - **Buffers**: default TX/RX buffer sizes
//! - **Clocks**: default system clock
//!
//! Hardware register bit definitions remain in their respective modules
//! (`register/dma.rs`, `register/uart.rs`).

// =============================================================================
// Line Settings
// =============================================================================

/// Default UART baud rate
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Bits on the wire per transported byte (start + 8 data + stop, 8N1)
pub const BITS_PER_FRAME: u32 = 10;

/// Minimum system clock cycles per UART bit
pub const MIN_CYCLES_PER_BIT: u32 = 8;

// =============================================================================
// Routing
// =============================================================================

/// Default DIO carrying UART TX
pub const DEFAULT_TX_PIN: u8 = 5;

/// Default DIO carrying UART RX
pub const DEFAULT_RX_PIN: u8 = 4;

/// Number of DIO pads on the device
pub const DIO_COUNT: u8 = 16;

/// Default DMA channel used for transmit
pub const DEFAULT_TX_CHANNEL: u8 = 0;

/// Default DMA channel used for receive
pub const DEFAULT_RX_CHANNEL: u8 = 1;

/// Number of DMA channels on the device
pub const DMA_CHANNEL_COUNT: u8 = 8;

// =============================================================================
// Buffers
// =============================================================================

/// Default TX capacity in transfer elements
pub const DEFAULT_TX_ELEMENTS: usize = 0x200;

/// Default RX capacity in transfer elements
pub const DEFAULT_RX_ELEMENTS: usize = 0x100;

/// Bytes per element at the default (32-bit) transfer width
pub const DEFAULT_WORD_BYTES: usize = 4;

/// Default TX buffer size in bytes
pub const DEFAULT_TX_BUFFER_SIZE: usize = DEFAULT_TX_ELEMENTS * DEFAULT_WORD_BYTES;

/// Default RX buffer size in bytes
pub const DEFAULT_RX_BUFFER_SIZE: usize = DEFAULT_RX_ELEMENTS * DEFAULT_WORD_BYTES;

/// Hardware limit on a single transfer length (16-bit length field)
pub const MAX_TRANSFER_LENGTH: usize = 0xFFFF;

// =============================================================================
// Clocks
// =============================================================================

/// Default system clock (48 MHz crystal divided by 6)
pub const DEFAULT_SYSCLK_HZ: u32 = 8_000_000;

/// Poll interval while waiting for a TX transfer to drain
pub const FLUSH_POLL_INTERVAL_US: u32 = 10;
