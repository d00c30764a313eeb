//! Internal Implementation Details
//!
//! This module contains implementation details that are not part of the public API.
//! Types in this module may change without notice between minor versions.
//!
//! # Contents
//!
//! - [`constants`]: Defaults and hardware limits
//! - [`register`]: Raw memory-mapped register definitions for the DMA, UART and DIO blocks
//! - [`dma`]: Transport streams and the buffers they share with the DMA engine
//!
//! # Stability
//!
//! Only the items re-exported from the crate root are public API.

pub(crate) mod constants;
pub(crate) mod dma;
pub(crate) mod register;
