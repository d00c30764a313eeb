//! Memory-mapped register definitions for the RSL10
//!
//! This module provides access to the DMA, UART and DIO peripheral
//! registers used by the transport. All register access is volatile to
//! ensure proper hardware interaction.

// Full field maps; the driver uses a subset
#![allow(dead_code)]

pub mod dio;
pub mod dma;
pub mod uart;

/// DIO configuration block base address
pub const DIO_BASE: usize = 0x4000_0000;

/// DMA controller base address (channel 0)
pub const DMA_BASE: usize = 0x4000_0200;

/// Address stride between consecutive DMA channel register blocks
pub const DMA_CHANNEL_STRIDE: usize = 0x20;

/// UART register block base address
pub const UART_BASE: usize = 0x4000_0600;

/// Read a 32-bit register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn read_reg(addr: usize) -> u32 {
    unsafe { core::ptr::read_volatile(addr as *const u32) }
}

/// Write a 32-bit value to a register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn write_reg(addr: usize, value: u32) {
    unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
}

/// Read-modify-write a register
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn modify_reg<F>(addr: usize, f: F)
where
    F: FnOnce(u32) -> u32,
{
    // SAFETY: caller guarantees address validity
    let value = unsafe { read_reg(addr) };
    unsafe { write_reg(addr, f(value)) }
}

/// Set bits in a register (read-modify-write)
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn set_bits(addr: usize, bits: u32) {
    // SAFETY: caller guarantees address validity
    unsafe { modify_reg(addr, |v| v | bits) }
}

/// Clear bits in a register (read-modify-write)
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn clear_bits(addr: usize, bits: u32) {
    // SAFETY: caller guarantees address validity
    unsafe { modify_reg(addr, |v| v & !bits) }
}

// =============================================================================
// Register Access Macros
// =============================================================================

/// Generate read/write accessor methods for a register in a singleton block.
///
/// # Example
/// ```ignore
/// impl UartRegs {
///     reg_rw!(ctrl, set_ctrl, UART_BASE, UART_CTRL_OFFSET, "Control register");
/// }
/// ```
macro_rules! reg_rw {
    ($read_fn:ident, $write_fn:ident, $base:expr, $offset:expr, $doc:expr) => {
        #[doc = concat!("Read ", $doc)]
        #[inline(always)]
        pub fn $read_fn() -> u32 {
            unsafe { $crate::internal::register::read_reg($base + $offset) }
        }

        #[doc = concat!("Write ", $doc)]
        #[inline(always)]
        pub fn $write_fn(value: u32) {
            unsafe { $crate::internal::register::write_reg($base + $offset, value) }
        }
    };
}

/// Generate read/write accessor methods for a register in a per-instance
/// block. The implementing type provides `fn base(&self) -> usize`.
///
/// # Example
/// ```ignore
/// impl DmaChannel {
///     chan_reg_rw!(src_base, set_src_base, DMA_SRC_BASE_OFFSET, "Source Base Address register");
/// }
/// ```
macro_rules! chan_reg_rw {
    ($read_fn:ident, $write_fn:ident, $offset:expr, $doc:expr) => {
        #[doc = concat!("Read ", $doc)]
        #[inline(always)]
        pub fn $read_fn(&self) -> u32 {
            unsafe { $crate::internal::register::read_reg(self.base() + $offset) }
        }

        #[doc = concat!("Write ", $doc)]
        #[inline(always)]
        pub fn $write_fn(&self, value: u32) {
            unsafe { $crate::internal::register::write_reg(self.base() + $offset, value) }
        }
    };
}

/// Generate a read-only accessor method for a register in a per-instance block.
macro_rules! chan_reg_ro {
    ($read_fn:ident, $offset:expr, $doc:expr) => {
        #[doc = concat!("Read ", $doc)]
        #[inline(always)]
        pub fn $read_fn(&self) -> u32 {
            unsafe { $crate::internal::register::read_reg(self.base() + $offset) }
        }
    };
}

// Export macros for use in submodules
pub(crate) use chan_reg_ro;
pub(crate) use chan_reg_rw;
pub(crate) use reg_rw;
