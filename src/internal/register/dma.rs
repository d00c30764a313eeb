//! DMA Channel Register Definitions
//!
//! Each of the eight RSL10 DMA channels has its own register block at
//! `DMA_BASE + n * DMA_CHANNEL_STRIDE`. A channel moves elements between a
//! source and a destination, either once (linear) or forever (circular),
//! and reports its events through a write-1-to-clear status register.

use super::{DMA_BASE, DMA_CHANNEL_STRIDE, chan_reg_ro, chan_reg_rw, clear_bits, modify_reg};
use crate::driver::interrupt::ChannelStatus;
use crate::hal::{AddressingMode, Direction, TransferChannel, TransferDescriptor, TransferWidth};

// =============================================================================
// Register Offsets
// =============================================================================

/// Control Register 0 offset (mode, routing, enable)
pub const DMA_CTRL0_OFFSET: usize = 0x00;
/// Source Base Address Register offset
pub const DMA_SRC_BASE_OFFSET: usize = 0x04;
/// Destination Base Address Register offset
pub const DMA_DEST_BASE_OFFSET: usize = 0x08;
/// Control Register 1 offset (transfer length, counter threshold)
pub const DMA_CTRL1_OFFSET: usize = 0x0C;
/// Next Source Address Register offset (read-only)
pub const DMA_NEXT_SRC_OFFSET: usize = 0x10;
/// Next Destination Address Register offset (read-only)
pub const DMA_NEXT_DEST_OFFSET: usize = 0x14;
/// Word Count Register offset (read-only)
pub const DMA_WORD_CNT_OFFSET: usize = 0x18;
/// Status Register offset (write-1-to-clear)
pub const DMA_STATUS_OFFSET: usize = 0x1C;

// =============================================================================
// Control Register 0 (CTRL0) Bits
// =============================================================================

/// Channel enable; hardware clears it when a linear transfer completes
pub const DMA_CTRL0_ENABLE: u32 = 1 << 0;
/// Circular addressing (wrap to base after the transfer length)
pub const DMA_CTRL0_ADDR_CIRC: u32 = 1 << 1;
/// Transfer type shift
pub const DMA_CTRL0_TRANSFER_SHIFT: u32 = 2;
/// Transfer type mask
pub const DMA_CTRL0_TRANSFER_MASK: u32 = 0x3 << 2;
/// Memory to peripheral
pub const DMA_TRANSFER_M_TO_P: u32 = 1;
/// Peripheral to memory
pub const DMA_TRANSFER_P_TO_M: u32 = 2;
/// Error interrupt enable
pub const DMA_CTRL0_ERROR_INT_EN: u32 = 1 << 6;
/// Complete interrupt enable
pub const DMA_CTRL0_COMPLETE_INT_EN: u32 = 1 << 7;
/// Counter interrupt enable
pub const DMA_CTRL0_COUNTER_INT_EN: u32 = 1 << 8;
/// Disable interrupt enable
pub const DMA_CTRL0_DISABLE_INT_EN: u32 = 1 << 9;
/// Start interrupt enable
pub const DMA_CTRL0_START_INT_EN: u32 = 1 << 10;
/// Increment source address after each element
pub const DMA_CTRL0_SRC_ADDR_INC: u32 = 1 << 12;
/// Source word size shift
pub const DMA_CTRL0_SRC_WORD_SIZE_SHIFT: u32 = 13;
/// Source select shift
pub const DMA_CTRL0_SRC_SELECT_SHIFT: u32 = 16;
/// Increment destination address after each element
pub const DMA_CTRL0_DEST_ADDR_INC: u32 = 1 << 20;
/// Destination word size shift
pub const DMA_CTRL0_DEST_WORD_SIZE_SHIFT: u32 = 21;
/// Destination select shift
pub const DMA_CTRL0_DEST_SELECT_SHIFT: u32 = 24;

/// Word size field value: 8 bits
pub const DMA_WORD_SIZE_8: u32 = 0;
/// Word size field value: 16 bits
pub const DMA_WORD_SIZE_16: u32 = 1;
/// Word size field value: 32 bits
pub const DMA_WORD_SIZE_32: u32 = 2;

/// Source/destination select: system memory
pub const DMA_SELECT_MEMORY: u32 = 0;
/// Source/destination select: UART data registers
pub const DMA_SELECT_UART: u32 = 1;

// =============================================================================
// Control Register 1 (CTRL1) Bits
// =============================================================================

/// Transfer length mask (bits 15:0)
pub const DMA_CTRL1_TRANSFER_LENGTH_MASK: u32 = 0xFFFF;
/// Counter interrupt threshold shift (bits 31:16)
pub const DMA_CTRL1_COUNTER_SHIFT: u32 = 16;

// =============================================================================
// Status Register (STATUS) Bits
// =============================================================================

/// Bus error
pub const DMA_STATUS_ERROR: u32 = 1 << 0;
/// Channel disabled itself
pub const DMA_STATUS_DISABLE: u32 = 1 << 1;
/// Counter threshold reached
pub const DMA_STATUS_COUNTER: u32 = 1 << 2;
/// Transfer length reached
pub const DMA_STATUS_COMPLETE: u32 = 1 << 3;
/// First element moved
pub const DMA_STATUS_START: u32 = 1 << 4;

/// All status bits (for clearing)
pub const DMA_STATUS_ALL: u32 =
    DMA_STATUS_ERROR | DMA_STATUS_DISABLE | DMA_STATUS_COUNTER | DMA_STATUS_COMPLETE | DMA_STATUS_START;

// =============================================================================
// Field Encoding
// =============================================================================

/// Word size field value for a transfer width
#[inline]
pub const fn word_size(width: TransferWidth) -> u32 {
    match width {
        TransferWidth::Byte => DMA_WORD_SIZE_8,
        TransferWidth::HalfWord => DMA_WORD_SIZE_16,
        TransferWidth::Word => DMA_WORD_SIZE_32,
    }
}

/// CTRL0 value for a descriptor, without the enable bit.
///
/// The buffer side increments, the UART side stays fixed. Transmit raises
/// a completion interrupt; receive raises the start interrupt if asked.
pub fn ctrl0_bits(descriptor: &TransferDescriptor) -> u32 {
    let size = word_size(descriptor.width);
    let mut bits = DMA_CTRL0_ERROR_INT_EN
        | (size << DMA_CTRL0_SRC_WORD_SIZE_SHIFT)
        | (size << DMA_CTRL0_DEST_WORD_SIZE_SHIFT);

    bits |= match descriptor.direction {
        Direction::MemoryToPeripheral => {
            (DMA_TRANSFER_M_TO_P << DMA_CTRL0_TRANSFER_SHIFT)
                | DMA_CTRL0_SRC_ADDR_INC
                | (DMA_SELECT_MEMORY << DMA_CTRL0_SRC_SELECT_SHIFT)
                | (DMA_SELECT_UART << DMA_CTRL0_DEST_SELECT_SHIFT)
                | DMA_CTRL0_COMPLETE_INT_EN
        }
        Direction::PeripheralToMemory => {
            (DMA_TRANSFER_P_TO_M << DMA_CTRL0_TRANSFER_SHIFT)
                | DMA_CTRL0_DEST_ADDR_INC
                | (DMA_SELECT_UART << DMA_CTRL0_SRC_SELECT_SHIFT)
                | (DMA_SELECT_MEMORY << DMA_CTRL0_DEST_SELECT_SHIFT)
        }
    };

    if descriptor.mode == AddressingMode::Circular {
        bits |= DMA_CTRL0_ADDR_CIRC;
    }
    if descriptor.start_event {
        bits |= DMA_CTRL0_START_INT_EN;
    }
    bits
}

// =============================================================================
// Channel Access
// =============================================================================

/// One hardware DMA channel.
///
/// A zero-sized handle apart from its index; creating several handles to
/// the same channel is allowed, as the interrupt handler does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmaChannel {
    index: u8,
}

impl DmaChannel {
    /// Handle for channel `index` (0..8). Const-compatible.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self { index }
    }

    /// Channel number
    #[inline(always)]
    pub const fn index(&self) -> u8 {
        self.index
    }

    #[inline(always)]
    const fn base(&self) -> usize {
        DMA_BASE + self.index as usize * DMA_CHANNEL_STRIDE
    }

    chan_reg_rw!(ctrl0, set_ctrl0, DMA_CTRL0_OFFSET, "Control Register 0");
    chan_reg_rw!(src_base, set_src_base, DMA_SRC_BASE_OFFSET, "Source Base Address register");
    chan_reg_rw!(dest_base, set_dest_base, DMA_DEST_BASE_OFFSET, "Destination Base Address register");
    chan_reg_rw!(ctrl1, set_ctrl1, DMA_CTRL1_OFFSET, "Control Register 1");
    chan_reg_rw!(raw_status, set_raw_status, DMA_STATUS_OFFSET, "Status register");

    chan_reg_ro!(next_src, DMA_NEXT_SRC_OFFSET, "Next Source Address register");
    chan_reg_ro!(next_dest, DMA_NEXT_DEST_OFFSET, "Next Destination Address register");
    chan_reg_ro!(word_count, DMA_WORD_CNT_OFFSET, "Word Count register");
}

impl TransferChannel for DmaChannel {
    fn number(&self) -> u8 {
        self.index
    }

    fn configure(&mut self, descriptor: &TransferDescriptor) {
        self.disable();
        self.set_src_base(descriptor.source as u32);
        self.set_dest_base(descriptor.destination as u32);
        self.set_ctrl1(descriptor.length as u32 & DMA_CTRL1_TRANSFER_LENGTH_MASK);
        let bits = ctrl0_bits(descriptor);
        self.set_ctrl0(bits);
        self.set_ctrl0(bits | DMA_CTRL0_ENABLE);
    }

    fn disable(&mut self) {
        // SAFETY: base() addresses a valid channel block for index < 8
        unsafe { clear_bits(self.base() + DMA_CTRL0_OFFSET, DMA_CTRL0_ENABLE) }
    }

    fn is_active(&self) -> bool {
        (self.ctrl0() & DMA_CTRL0_ENABLE) != 0
    }

    fn committed_length(&self) -> usize {
        (self.ctrl1() & DMA_CTRL1_TRANSFER_LENGTH_MASK) as usize
    }

    fn set_committed_length(&mut self, length: usize) {
        let length = length as u32 & DMA_CTRL1_TRANSFER_LENGTH_MASK;
        // SAFETY: base() addresses a valid channel block for index < 8
        unsafe {
            modify_reg(self.base() + DMA_CTRL1_OFFSET, |v| {
                (v & !DMA_CTRL1_TRANSFER_LENGTH_MASK) | length
            })
        }
    }

    fn destination_base(&self) -> usize {
        self.dest_base() as usize
    }

    fn destination_cursor(&self) -> usize {
        self.next_dest() as usize
    }

    fn status(&self) -> ChannelStatus {
        ChannelStatus::from_raw(self.raw_status())
    }

    fn clear_status(&mut self, status: ChannelStatus) {
        self.set_raw_status(status.to_raw());
    }
}
