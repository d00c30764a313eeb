//! Transmit stream: linear append-or-restart buffer.

use super::buffer::DmaBuffer;
use crate::driver::error::{ConfigError, ConfigResult, IoError, IoResult};
use crate::driver::interrupt::ChannelStatus;
use crate::hal::{TransferChannel, TransferDescriptor, TransferWidth};
use crate::internal::constants::MAX_TRANSFER_LENGTH;

/// Counters describing how submissions were carried out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxStats {
    /// Fresh transfers programmed from the buffer origin
    pub transfers_started: u32,
    /// Submissions carried by extending an in-flight transfer
    pub appends: u32,
    /// Appends lost to a completing transfer and restarted fresh
    pub race_restarts: u32,
    /// Submissions rejected with [`IoError::CapacityExceeded`]
    pub rejected: u32,
    /// Completion events reported by the interrupt handler
    pub completions: u32,
}

/// Outbound half of the transport.
///
/// Owns a linear buffer of `SIZE` bytes and the DMA channel that drains it
/// into the UART. A submission either rides along with the transfer already
/// in flight, by writing past its window and extending the committed length,
/// or starts a new transfer from the buffer origin.
///
/// # Type Parameters
/// * `C` - DMA channel wired to the UART transmit register
/// * `SIZE` - Buffer size in bytes (a multiple of the transfer width)
pub struct TxStream<C, const SIZE: usize> {
    channel: C,
    buffer: DmaBuffer<SIZE>,
    width: TransferWidth,
    /// Peripheral data register the channel writes to
    target: usize,
    stats: TxStats,
}

impl<C, const SIZE: usize> TxStream<C, SIZE> {
    /// Create an uninitialized stream around `channel`. Const-compatible.
    pub const fn new(channel: C) -> Self {
        Self {
            channel,
            buffer: DmaBuffer::new(),
            width: TransferWidth::Word,
            target: 0,
            stats: TxStats {
                transfers_started: 0,
                appends: 0,
                race_restarts: 0,
                rejected: 0,
                completions: 0,
            },
        }
    }

    /// Capacity in elements (bytes that fit in one transfer)
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.width.elements_in(SIZE)
    }

    /// Element width in use
    #[inline(always)]
    pub fn width(&self) -> TransferWidth {
        self.width
    }

    /// Submission counters
    pub fn stats(&self) -> TxStats {
        self.stats
    }

    /// Borrow the underlying channel
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Mutably borrow the underlying channel
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    pub(crate) fn note_completions(&mut self, count: u32) {
        self.stats.completions = self.stats.completions.wrapping_add(count);
    }
}

impl<C: TransferChannel, const SIZE: usize> TxStream<C, SIZE> {
    /// Prepare the stream for use.
    ///
    /// Disables the channel; no transfer starts until data is submitted.
    /// `target` is the address of the UART transmit data register.
    ///
    /// # Errors
    ///
    /// [`ConfigError::BufferMisaligned`] if `SIZE` is not a non-zero multiple
    /// of the width, [`ConfigError::BufferTooLarge`] if the capacity exceeds
    /// the hardware transfer length.
    pub fn init(&mut self, width: TransferWidth, target: usize) -> ConfigResult<()> {
        if !width.divides(SIZE) {
            return Err(ConfigError::BufferMisaligned);
        }
        if width.elements_in(SIZE) > MAX_TRANSFER_LENGTH {
            return Err(ConfigError::BufferTooLarge);
        }

        self.channel.disable();
        self.width = width;
        self.target = target;
        self.stats = TxStats::default();
        Ok(())
    }

    /// True while a transfer is in flight
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.channel.is_active()
    }

    /// Length of the in-flight (or last) transfer in elements
    #[inline]
    pub fn committed_length(&self) -> usize {
        self.channel.committed_length()
    }

    /// Queue `data` for transmission without blocking.
    ///
    /// Every accepted byte goes out exactly once, in order after everything
    /// submitted before it. An empty slice is accepted and does nothing.
    ///
    /// # Errors
    ///
    /// [`IoError::CapacityExceeded`] if `data` is larger than the buffer, or
    /// does not fit after the window of the transfer in flight. Nothing is
    /// written and the committed length is untouched on failure.
    pub fn submit(&mut self, data: &[u8]) -> IoResult<()> {
        let n = data.len();
        let capacity = self.capacity();

        if n > capacity {
            return Err(self.reject(n, capacity));
        }
        if n == 0 {
            return Ok(());
        }

        if self.channel.is_active() {
            let active = self.channel.committed_length();
            let remaining = capacity.saturating_sub(active);
            if n > remaining {
                return Err(self.reject(n, remaining));
            }

            // Hardware only reads up to the committed length, so the region
            // past it is ours until the length is extended.
            self.buffer.write_elements(active, self.width, data);

            let channel = &mut self.channel;
            let extended = critical_section::with(|_| {
                channel.set_committed_length(active + n);
                channel.is_active()
            });

            if extended {
                self.stats.appends = self.stats.appends.wrapping_add(1);
                return Ok(());
            }

            // The transfer finished before the new length took effect.
            self.stats.race_restarts = self.stats.race_restarts.wrapping_add(1);
            #[cfg(feature = "defmt")]
            defmt::debug!("tx append raced completion, restarting {} bytes", n);
        }

        self.start_transfer(data);
        Ok(())
    }

    /// Copy `data` to the buffer origin and program a fresh transfer.
    fn start_transfer(&mut self, data: &[u8]) {
        let written = self.buffer.write_elements(0, self.width, data);
        let descriptor = TransferDescriptor::transmit(
            self.buffer.base_address(),
            self.target,
            written,
            self.width,
        );
        self.channel.configure(&descriptor);
        self.channel.clear_status(ChannelStatus::all());
        self.stats.transfers_started = self.stats.transfers_started.wrapping_add(1);
    }

    fn reject(&mut self, requested: usize, available: usize) -> IoError {
        self.stats.rejected = self.stats.rejected.wrapping_add(1);
        #[cfg(feature = "defmt")]
        defmt::debug!("tx rejected {} bytes, {} available", requested, available);
        #[cfg(not(feature = "defmt"))]
        let _ = (requested, available);
        IoError::CapacityExceeded
    }
}
