//! DMA transfer channel abstraction.
//!
//! A [`TransferChannel`] is one DMA channel paired with a peripheral. The
//! transport streams only ever talk to hardware through this trait, which
//! keeps them testable on the host against a simulated channel.
//!
//! Addresses are plain byte addresses (`usize`). Lengths are counted in
//! transfer elements, not bytes; see [`TransferWidth`].

use crate::driver::interrupt::ChannelStatus;

/// Transfer direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Memory buffer to peripheral data register (transmit)
    MemoryToPeripheral,
    /// Peripheral data register to memory buffer (receive)
    PeripheralToMemory,
}

/// Buffer-side addressing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressingMode {
    /// Run once over `length` elements, then disable the channel
    Linear,
    /// Wrap back to the buffer base after `length` elements, forever
    Circular,
}

/// Size of one transfer element in buffer memory.
///
/// Each transported byte occupies one element. With `Word` every received
/// byte lands in its own 32-bit slot, low byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TransferWidth {
    /// 8-bit elements
    Byte = 1,
    /// 16-bit elements
    HalfWord = 2,
    /// 32-bit elements
    #[default]
    Word = 4,
}

impl TransferWidth {
    /// Bytes of buffer memory per element
    #[inline(always)]
    #[must_use]
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// Number of whole elements that fit in `size` bytes
    #[inline(always)]
    #[must_use]
    pub const fn elements_in(self, size: usize) -> usize {
        size / self.bytes()
    }

    /// True when `size` is a non-zero whole number of elements
    #[must_use]
    pub const fn divides(self, size: usize) -> bool {
        size != 0 && size % self.bytes() == 0
    }
}

/// Configuration of one DMA operation.
///
/// Built per transfer and handed to [`TransferChannel::configure`]; never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransferDescriptor {
    /// Transfer direction
    pub direction: Direction,
    /// Buffer-side addressing mode
    pub mode: AddressingMode,
    /// Source address (buffer base or peripheral register)
    pub source: usize,
    /// Destination address (peripheral register or buffer base)
    pub destination: usize,
    /// Length in elements
    pub length: usize,
    /// Element width on both sides
    pub width: TransferWidth,
    /// Raise the start event when the first element moves
    pub start_event: bool,
}

impl TransferDescriptor {
    /// Linear buffer-to-peripheral transfer of `length` elements
    #[must_use]
    pub const fn transmit(
        source: usize,
        destination: usize,
        length: usize,
        width: TransferWidth,
    ) -> Self {
        Self {
            direction: Direction::MemoryToPeripheral,
            mode: AddressingMode::Linear,
            source,
            destination,
            length,
            width,
            start_event: false,
        }
    }

    /// Circular peripheral-to-buffer transfer over `length` elements
    #[must_use]
    pub const fn receive_circular(
        source: usize,
        destination: usize,
        length: usize,
        width: TransferWidth,
    ) -> Self {
        Self {
            direction: Direction::PeripheralToMemory,
            mode: AddressingMode::Circular,
            source,
            destination,
            length,
            width,
            start_event: true,
        }
    }
}

/// One DMA channel wired to a peripheral.
///
/// Implementations map these calls onto channel registers. The committed
/// length doubles as the hardware's transfer-length register: writing it
/// while the channel is running extends or shortens the in-flight transfer.
pub trait TransferChannel {
    /// Channel number on the DMA controller
    fn number(&self) -> u8;

    /// Program and enable a transfer
    fn configure(&mut self, descriptor: &TransferDescriptor);

    /// Disable the channel, abandoning any in-flight transfer
    fn disable(&mut self);

    /// True while the channel is enabled and moving data
    fn is_active(&self) -> bool;

    /// Current transfer length in elements
    fn committed_length(&self) -> usize;

    /// Overwrite the transfer length register
    fn set_committed_length(&mut self, length: usize);

    /// Base address of the destination region
    fn destination_base(&self) -> usize;

    /// Address the next element will be written to
    fn destination_cursor(&self) -> usize;

    /// Read the channel's event status
    fn status(&self) -> ChannelStatus;

    /// Clear the given status flags (write-1-to-clear)
    fn clear_status(&mut self, status: ChannelStatus);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_width_bytes() {
        assert_eq!(TransferWidth::Byte.bytes(), 1);
        assert_eq!(TransferWidth::HalfWord.bytes(), 2);
        assert_eq!(TransferWidth::Word.bytes(), 4);
        assert_eq!(TransferWidth::default(), TransferWidth::Word);
    }

    #[test]
    fn transfer_width_elements_in() {
        assert_eq!(TransferWidth::Word.elements_in(1024), 256);
        assert_eq!(TransferWidth::Byte.elements_in(256), 256);
        assert_eq!(TransferWidth::HalfWord.elements_in(7), 3);
    }

    #[test]
    fn transfer_width_divides() {
        assert!(TransferWidth::Word.divides(8));
        assert!(!TransferWidth::Word.divides(6));
        assert!(!TransferWidth::Byte.divides(0));
    }

    #[test]
    fn transmit_descriptor_is_linear_memory_to_peripheral() {
        let desc = TransferDescriptor::transmit(0x2000_0000, 0x4000_0600, 12, TransferWidth::Word);
        assert_eq!(desc.direction, Direction::MemoryToPeripheral);
        assert_eq!(desc.mode, AddressingMode::Linear);
        assert_eq!(desc.length, 12);
        assert!(!desc.start_event);
    }

    #[test]
    fn receive_descriptor_is_circular_with_start_event() {
        let desc =
            TransferDescriptor::receive_circular(0x4000_0604, 0x2000_1000, 256, TransferWidth::Byte);
        assert_eq!(desc.direction, Direction::PeripheralToMemory);
        assert_eq!(desc.mode, AddressingMode::Circular);
        assert_eq!(desc.destination, 0x2000_1000);
        assert!(desc.start_event);
    }
}
