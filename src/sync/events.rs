//! Event latch shared between the DMA interrupt and the polling loop.

use super::primitives::CriticalSectionCell;
use crate::driver::interrupt::ChannelStatus;

/// Events accumulated since the polling loop last looked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PendingEvents {
    /// RX channel reported its first element
    pub rx_started: bool,
    /// Number of TX transfers that ran to completion
    pub tx_completions: u32,
    /// A channel reported a bus error
    pub error: bool,
}

/// ISR-safe latch for DMA channel events.
///
/// The interrupt handler records into it; the polling context drains it.
/// Each side holds the critical section only for a few loads and stores.
///
/// # Example
///
/// ```ignore
/// static EVENTS: TransferEvents = TransferEvents::new();
///
/// // interrupt context
/// handle_dma_interrupt(&mut tx, &mut rx, &EVENTS);
///
/// // polling context
/// let uart = Uart::new(&EVENTS, port, tx, rx);
/// ```
pub struct TransferEvents {
    inner: CriticalSectionCell<PendingEvents>,
}

impl TransferEvents {
    /// Create an empty latch (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            inner: CriticalSectionCell::new(PendingEvents {
                rx_started: false,
                tx_completions: 0,
                error: false,
            }),
        }
    }

    /// Record the serviced status of both channels.
    pub fn record(&self, tx: ChannelStatus, rx: ChannelStatus) {
        if !tx.any() && !rx.any() {
            return;
        }
        self.inner.with(|pending| {
            pending.rx_started |= rx.started;
            if tx.complete {
                pending.tx_completions = pending.tx_completions.wrapping_add(1);
            }
            pending.error |= tx.error || rx.error;
        });
    }

    /// Take everything recorded so far, leaving the latch empty.
    pub fn take(&self) -> PendingEvents {
        self.inner.with(core::mem::take)
    }

    /// Look at the recorded events without clearing them.
    pub fn peek(&self) -> PendingEvents {
        self.inner.with(|pending| *pending)
    }
}

impl Default for TransferEvents {
    fn default() -> Self {
        Self::new()
    }
}
