//! Receive stream: software read cursor over a hardware-written ring.

use super::buffer::DmaBuffer;
use super::cursor::RingCursor;
use crate::driver::error::{ConfigError, ConfigResult};
use crate::driver::interrupt::ChannelStatus;
use crate::hal::{TransferChannel, TransferDescriptor, TransferWidth};
use crate::internal::constants::MAX_TRANSFER_LENGTH;

/// Inbound half of the transport.
///
/// The DMA channel writes received bytes into the buffer in circular mode,
/// forever. The stream only reads: it keeps its own cursor and, on each
/// [`drain`](Self::drain), copies out whatever the hardware cursor has moved
/// past since the previous call.
///
/// If the application polls too slowly the hardware laps the read cursor and
/// the oldest unread bytes are overwritten. See
/// [`UartConfig::max_rx_poll_interval_us`](crate::UartConfig::max_rx_poll_interval_us).
pub struct RxStream<C, const SIZE: usize> {
    channel: C,
    buffer: DmaBuffer<SIZE>,
    width: TransferWidth,
    /// `None` until the channel has started and the first drain ran
    cursor: Option<RingCursor>,
    /// Start event seen through the interrupt latch
    started: bool,
}

impl<C, const SIZE: usize> RxStream<C, SIZE> {
    /// Create an uninitialized stream around `channel`. Const-compatible.
    pub const fn new(channel: C) -> Self {
        Self {
            channel,
            buffer: DmaBuffer::new(),
            width: TransferWidth::Word,
            cursor: None,
            started: false,
        }
    }

    /// Capacity in elements
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.width.elements_in(SIZE)
    }

    /// Element width in use
    #[inline(always)]
    pub fn width(&self) -> TransferWidth {
        self.width
    }

    /// Current read position, once established
    pub fn read_cursor(&self) -> Option<RingCursor> {
        self.cursor
    }

    /// Record that the channel raised its start event.
    ///
    /// The interrupt handler clears the hardware flag, so the facade forwards
    /// the latched event here.
    pub fn mark_started(&mut self) {
        self.started = true;
    }

    /// Borrow the underlying channel
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Mutably borrow the underlying channel
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }
}

impl<C: TransferChannel, const SIZE: usize> RxStream<C, SIZE> {
    /// Start circular reception from the peripheral register at `source`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::BufferMisaligned`] if `SIZE` is not a non-zero multiple
    /// of the width, [`ConfigError::BufferTooLarge`] if the capacity exceeds
    /// the hardware transfer length.
    pub fn init(&mut self, width: TransferWidth, source: usize) -> ConfigResult<()> {
        if !width.divides(SIZE) {
            return Err(ConfigError::BufferMisaligned);
        }
        let capacity = width.elements_in(SIZE);
        if capacity > MAX_TRANSFER_LENGTH {
            return Err(ConfigError::BufferTooLarge);
        }

        self.channel.disable();
        self.channel.clear_status(ChannelStatus::all());

        self.width = width;
        self.cursor = None;
        self.started = false;

        let descriptor = TransferDescriptor::receive_circular(
            source,
            self.buffer.base_address(),
            capacity,
            width,
        );
        self.channel.configure(&descriptor);
        Ok(())
    }

    /// Unread elements, without consuming them.
    pub fn pending(&self) -> usize {
        match (self.resolve_read(), self.hardware_cursor()) {
            (Some(read), Some(write)) => read.distance_to(write),
            _ => 0,
        }
    }

    /// Copy newly received bytes into `out` and return how many were copied.
    ///
    /// Never blocks. Returns 0 until the channel has started. When `out` is
    /// shorter than what is pending, the remainder stays for the next call.
    pub fn drain(&mut self, out: &mut [u8]) -> usize {
        let Some(mut read) = self.resolve_read() else {
            return 0;
        };
        self.cursor = Some(read);

        // One snapshot; the hardware only moves forward from here.
        let Some(write) = self.hardware_cursor() else {
            return 0;
        };

        let count = read.distance_to(write).min(out.len());
        if count == 0 {
            return 0;
        }

        let tail = count.min(read.run_to_end());
        self.buffer
            .read_elements(read.index(), self.width, &mut out[..tail]);
        if count > tail {
            self.buffer
                .read_elements(0, self.width, &mut out[tail..count]);
        }

        read.advance(count);
        self.cursor = Some(read);
        count
    }

    /// The stored cursor, or the destination base once the channel started.
    fn resolve_read(&self) -> Option<RingCursor> {
        if self.cursor.is_some() {
            return self.cursor;
        }
        if !self.started && !self.channel.status().started {
            return None;
        }
        self.locate(self.channel.destination_base())
    }

    fn hardware_cursor(&self) -> Option<RingCursor> {
        self.locate(self.channel.destination_cursor())
    }

    fn locate(&self, address: usize) -> Option<RingCursor> {
        let cursor = self.buffer.offset_of(address).and_then(|offset| {
            RingCursor::from_byte_offset(offset, self.width, self.capacity())
        });
        #[cfg(feature = "defmt")]
        {
            if cursor.is_none() {
                defmt::warn!("rx cursor {=usize:#x} outside receive buffer", address);
            }
        }
        cursor
    }
}
