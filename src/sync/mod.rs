//! Synchronization Support
//!
//! Two execution contexts touch the transport: the cooperative polling loop
//! and the DMA interrupt. This module holds the pieces they share:
//!
//! - [`CriticalSectionCell`] - ISR-safe interior mutability
//! - [`TransferEvents`] - Latch the interrupt records channel events into
//!
//! The TX append/commit race is guarded separately, inside
//! [`TxStream::submit`](crate::TxStream::submit), by a critical section that
//! spans only the length update and the activity re-check.
//!
//! # Example
//!
//! ```ignore
//! use ph_rsl10_uart::sync::TransferEvents;
//!
//! static EVENTS: TransferEvents = TransferEvents::new();
//!
//! #[unsafe(no_mangle)]
//! extern "C" fn DMA1_IRQHandler() {
//!     let mut tx = DmaChannel::new(0);
//!     let mut rx = DmaChannel::new(1);
//!     ph_rsl10_uart::handle_dma_interrupt(&mut tx, &mut rx, &EVENTS);
//! }
//! ```

mod events;
mod primitives;

pub use events::{PendingEvents, TransferEvents};
pub use primitives::CriticalSectionCell;
