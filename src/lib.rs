//! RSL10 DMA UART Transport
//!
//! A `no_std`, `no_alloc` byte transport over the onsemi RSL10 UART, with
//! both directions carried by DMA and serviced from a cooperative polling
//! loop.
//!
//! # Architecture
//!
//! - **Transmit** ([`TxStream`]): a linear buffer. Data submitted while a
//!   transfer is in flight is appended past its window and the transfer
//!   length is extended in place; otherwise a fresh transfer starts at the
//!   buffer origin. A critical section around the length update catches a
//!   transfer that completes mid-append, and the append is restarted.
//! - **Receive** ([`RxStream`]): a circular buffer the DMA engine writes
//!   forever. Each drain copies out what arrived since the previous one,
//!   including across the wrap.
//! - **Interrupts** ([`handle_dma_interrupt`]): the DMA vector only reads,
//!   clears and latches channel status into [`TransferEvents`]; the polling
//!   loop consumes the latch.
//! - **Hardware seams** ([`hal`]): [`TransferChannel`] and [`SerialPort`]
//!   are implemented for the RSL10 registers by [`DmaChannel`] and
//!   [`UartRegs`], and by mocks for host tests.
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting for public types and driver logging
//!
//! # Example
//!
//! ```ignore
//! use ph_rsl10_uart::{TransferEvents, UartConfig, UartDefault};
//!
//! static EVENTS: TransferEvents = TransferEvents::new();
//! static mut UART: UartDefault<'static> =
//!     UartDefault::for_config(&EVENTS, &UartConfig::new());
//!
//! ph_rsl10_uart::uart_dma_isr!(EVENTS, tx = 0, rx = 1, DMA0_IRQHandler, DMA1_IRQHandler);
//!
//! let uart = unsafe { &mut *core::ptr::addr_of_mut!(UART) };
//! uart.init(UartConfig::new()).unwrap();
//!
//! let mut buf = [0u8; 64];
//! loop {
//!     let n = uart.read(&mut buf).unwrap();
//!     if n > 0 {
//!         // Echo; retry later if the TX buffer is full
//!         let _ = uart.write(&buf[..n]);
//!     }
//! }
//! ```
//!
//! # Polling Rate
//!
//! Received bytes are overwritten if the ring fills before it is drained.
//! [`UartConfig::max_rx_poll_interval_us`] gives the longest safe gap
//! between reads for a ring capacity.
//!
//! # Memory Requirements
//!
//! With the default configuration (512 TX and 256 RX elements of 32 bits):
//! - Total: 3 KB of SRAM, inside the [`Uart`] struct

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here; thresholds and config are in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod hal;
pub mod sync;

// Internal implementation details (pub(crate) only)
mod internal;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::{DriveStrength, PinConfig, Pull, State, UartConfig};
pub use driver::error::{ConfigError, ConfigResult, Error, IoError, IoResult, Result};
pub use driver::interrupt::{ChannelStatus, handle_dma_interrupt};
pub use driver::uart::{Uart, UartDefault};
pub use hal::{
    AddressingMode, Direction, SerialPort, TransferChannel, TransferDescriptor, TransferWidth,
};
pub use internal::dma::{RingCursor, RxStream, TxStats, TxStream};
pub use internal::register::dma::DmaChannel;
pub use internal::register::uart::UartRegs;
pub use sync::{PendingEvents, TransferEvents};

/// Shared transport constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on transport types.
pub mod constants {
    pub use crate::internal::constants::{
        // Line settings
        BITS_PER_FRAME,
        DEFAULT_BAUD_RATE,
        // Routing
        DEFAULT_RX_CHANNEL,
        DEFAULT_RX_PIN,
        DEFAULT_TX_CHANNEL,
        DEFAULT_TX_PIN,
        DIO_COUNT,
        DMA_CHANNEL_COUNT,
        // Buffers
        DEFAULT_RX_BUFFER_SIZE,
        DEFAULT_RX_ELEMENTS,
        DEFAULT_TX_BUFFER_SIZE,
        DEFAULT_TX_ELEMENTS,
        MAX_TRANSFER_LENGTH,
        // Clocks
        DEFAULT_SYSCLK_HZ,
        MIN_CYCLES_PER_BIT,
    };
}

// =============================================================================
// Macro Helpers
// =============================================================================

/// Declare the DMA interrupt vectors that service the transport.
///
/// Each named vector builds handles for the TX and RX channels and calls
/// [`handle_dma_interrupt`] with the given [`TransferEvents`] static. List
/// the vectors of both channels so either one's events are latched.
///
/// # Examples
///
/// ```ignore
/// static EVENTS: ph_rsl10_uart::TransferEvents = ph_rsl10_uart::TransferEvents::new();
///
/// ph_rsl10_uart::uart_dma_isr!(EVENTS, tx = 0, rx = 1, DMA0_IRQHandler, DMA1_IRQHandler);
/// ```
///
/// # Equivalent Code
///
/// ```ignore
/// #[unsafe(no_mangle)]
/// pub extern "C" fn DMA0_IRQHandler() {
///     let mut tx = DmaChannel::new(0);
///     let mut rx = DmaChannel::new(1);
///     handle_dma_interrupt(&mut tx, &mut rx, &EVENTS);
/// }
/// ```
#[macro_export]
macro_rules! uart_dma_isr {
    ($events:path, tx = $tx:expr, rx = $rx:expr, $($vector:ident),+ $(,)?) => {
        $(
            #[allow(non_snake_case)]
            #[unsafe(no_mangle)]
            pub extern "C" fn $vector() {
                let mut tx = $crate::DmaChannel::new($tx);
                let mut rx = $crate::DmaChannel::new($rx);
                $crate::handle_dma_interrupt(&mut tx, &mut rx, &$events);
            }
        )+
    };
}
