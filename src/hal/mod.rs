//! Hardware Abstraction Layer
//!
//! The transport reaches hardware only through the traits in this module,
//! so the stream logic runs unchanged against the RSL10 registers or a host
//! simulation.
//!
//! # Modules
//!
//! - [`channel`]: DMA channel trait and transfer descriptors
//! - [`serial`]: UART bring-up trait

pub mod channel;
pub mod serial;

// Re-export commonly used types
pub use channel::{AddressingMode, Direction, TransferChannel, TransferDescriptor, TransferWidth};
pub use serial::SerialPort;
