//! DMA channel interrupt handling.
//!
//! This module provides [`ChannelStatus`] for parsing a channel's status
//! register, and [`handle_dma_interrupt`], the single entry point the
//! interrupt vector shim calls when either UART DMA channel raises an event.

use crate::hal::TransferChannel;
use crate::internal::register::dma::{
    DMA_STATUS_COMPLETE, DMA_STATUS_COUNTER, DMA_STATUS_DISABLE, DMA_STATUS_ERROR,
    DMA_STATUS_START,
};
use crate::sync::TransferEvents;

// =============================================================================
// Channel Status
// =============================================================================

/// Event flags parsed from a DMA channel status register.
///
/// # Example
///
/// ```ignore
/// let status = channel.status();
/// if status.started {
///     // First element of the transfer has moved
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelStatus {
    /// First element of the transfer moved
    pub started: bool,
    /// Transfer length reached
    pub complete: bool,
    /// Counter threshold reached
    pub counter: bool,
    /// Channel disabled itself
    pub disabled: bool,
    /// Bus error
    pub error: bool,
}

impl ChannelStatus {
    /// Create from raw status register value
    #[inline]
    pub fn from_raw(status: u32) -> Self {
        Self {
            started: (status & DMA_STATUS_START) != 0,
            complete: (status & DMA_STATUS_COMPLETE) != 0,
            counter: (status & DMA_STATUS_COUNTER) != 0,
            disabled: (status & DMA_STATUS_DISABLE) != 0,
            error: (status & DMA_STATUS_ERROR) != 0,
        }
    }

    /// Convert to raw value for clearing (write-1-to-clear)
    #[inline]
    pub fn to_raw(&self) -> u32 {
        let mut val = 0u32;
        if self.started {
            val |= DMA_STATUS_START;
        }
        if self.complete {
            val |= DMA_STATUS_COMPLETE;
        }
        if self.counter {
            val |= DMA_STATUS_COUNTER;
        }
        if self.disabled {
            val |= DMA_STATUS_DISABLE;
        }
        if self.error {
            val |= DMA_STATUS_ERROR;
        }
        val
    }

    /// All flags set, for clearing everything
    #[must_use]
    pub const fn all() -> Self {
        Self {
            started: true,
            complete: true,
            counter: true,
            disabled: true,
            error: true,
        }
    }

    /// Check if any event occurred
    #[inline]
    pub fn any(&self) -> bool {
        self.started || self.complete || self.counter || self.disabled || self.error
    }
}

// =============================================================================
// Interrupt Entry Point
// =============================================================================

/// Service both UART DMA channels from interrupt context.
///
/// Reads and clears each channel's status, then latches the events into
/// `events` inside a critical section so the polling context picks them up
/// on its next [`Uart::read`](crate::Uart::read) or
/// [`Uart::take_events`](crate::Uart::take_events).
///
/// Returns the `(tx, rx)` status that was serviced.
///
/// # Example
///
/// ```ignore
/// static EVENTS: TransferEvents = TransferEvents::new();
///
/// #[unsafe(no_mangle)]
/// extern "C" fn DMA1_IRQHandler() {
///     let mut tx = DmaChannel::new(0);
///     let mut rx = DmaChannel::new(1);
///     handle_dma_interrupt(&mut tx, &mut rx, &EVENTS);
/// }
/// ```
pub fn handle_dma_interrupt<TX, RX>(
    tx: &mut TX,
    rx: &mut RX,
    events: &TransferEvents,
) -> (ChannelStatus, ChannelStatus)
where
    TX: TransferChannel,
    RX: TransferChannel,
{
    let tx_status = tx.status();
    let rx_status = rx.status();

    if tx_status.any() {
        tx.clear_status(tx_status);
    }
    if rx_status.any() {
        rx.clear_status(rx_status);
    }

    events.record(tx_status, rx_status);
    (tx_status, rx_status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockChannel;

    #[test]
    fn status_from_raw_parses_each_flag() {
        let status = ChannelStatus::from_raw(DMA_STATUS_START | DMA_STATUS_ERROR);
        assert!(status.started);
        assert!(status.error);
        assert!(!status.complete);
        assert!(!status.counter);
        assert!(!status.disabled);
    }

    #[test]
    fn status_to_raw_sets_each_flag() {
        let status = ChannelStatus {
            complete: true,
            disabled: true,
            ..ChannelStatus::default()
        };
        assert_eq!(status.to_raw(), DMA_STATUS_COMPLETE | DMA_STATUS_DISABLE);
    }

    #[test]
    fn status_all_round_trips_through_raw() {
        let all = ChannelStatus::all();
        assert_eq!(ChannelStatus::from_raw(all.to_raw()), all);
    }

    #[test]
    fn status_any() {
        assert!(!ChannelStatus::default().any());
        assert!(ChannelStatus::from_raw(DMA_STATUS_COUNTER).any());
    }

    #[test]
    fn interrupt_clears_and_latches_events() {
        let mut tx = MockChannel::new();
        let mut rx = MockChannel::new();
        let events = TransferEvents::new();

        tx.raise(ChannelStatus {
            complete: true,
            disabled: true,
            ..ChannelStatus::default()
        });
        rx.raise(ChannelStatus {
            started: true,
            ..ChannelStatus::default()
        });

        let (tx_status, rx_status) = handle_dma_interrupt(&mut tx, &mut rx, &events);
        assert!(tx_status.complete);
        assert!(rx_status.started);

        assert!(!tx.status().any());
        assert!(!rx.status().any());

        let latched = events.take();
        assert!(latched.rx_started);
        assert_eq!(latched.tx_completions, 1);
    }

    #[test]
    fn interrupt_with_no_events_is_noop() {
        let mut tx = MockChannel::new();
        let mut rx = MockChannel::new();
        let events = TransferEvents::new();

        let (tx_status, rx_status) = handle_dma_interrupt(&mut tx, &mut rx, &events);
        assert!(!tx_status.any());
        assert!(!rx_status.any());
        assert_eq!(events.take(), Default::default());
    }
}
