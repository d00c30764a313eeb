//! Statically sized buffer shared with the DMA engine.

use core::cell::UnsafeCell;
use core::ptr;

use crate::hal::TransferWidth;

/// Fixed-size, word-aligned buffer that the DMA engine reads or writes.
///
/// Hardware accesses the memory behind the CPU's back, so every CPU access
/// is volatile and goes through the cell. Elements are `width` bytes wide;
/// the transported byte is the low (first) byte of its element.
///
/// The buffer must not move once its address has been handed to a channel.
#[repr(C, align(4))]
pub struct DmaBuffer<const SIZE: usize> {
    storage: UnsafeCell<[u8; SIZE]>,
}

impl<const SIZE: usize> DmaBuffer<SIZE> {
    /// Create a zeroed buffer. Const-compatible.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            storage: UnsafeCell::new([0u8; SIZE]),
        }
    }

    /// Size in bytes
    #[inline(always)]
    #[must_use]
    pub const fn size() -> usize {
        SIZE
    }

    /// Address of the first byte, as programmed into a channel
    #[inline(always)]
    pub fn base_address(&self) -> usize {
        self.storage.get() as usize
    }

    /// Byte offset of `address` within this buffer, if it lies in `[base, base + SIZE]`.
    ///
    /// One past the end is accepted: a circular channel may report it just
    /// before wrapping.
    pub fn offset_of(&self, address: usize) -> Option<usize> {
        address
            .checked_sub(self.base_address())
            .filter(|offset| *offset <= SIZE)
    }

    #[inline(always)]
    fn byte_ptr(&self) -> *mut u8 {
        self.storage.get().cast::<u8>()
    }

    /// Store `data` one byte per element starting at element `start`.
    ///
    /// Unused bytes of each element are zeroed. Stops at the end of the
    /// buffer and returns the number of elements written.
    pub fn write_elements(&self, start: usize, width: TransferWidth, data: &[u8]) -> usize {
        let step = width.bytes();
        let mut written = 0;
        for (i, &byte) in data.iter().enumerate() {
            let offset = (start + i) * step;
            if offset + step > SIZE {
                break;
            }
            // SAFETY: offset + step <= SIZE, so every byte touched is inside storage.
            unsafe {
                let slot = self.byte_ptr().add(offset);
                ptr::write_volatile(slot, byte);
                for pad in 1..step {
                    ptr::write_volatile(slot.add(pad), 0);
                }
            }
            written += 1;
        }
        written
    }

    /// Load one byte per element starting at element `start` into `out`.
    ///
    /// Stops at the end of the buffer and returns the number of elements read.
    pub fn read_elements(&self, start: usize, width: TransferWidth, out: &mut [u8]) -> usize {
        let step = width.bytes();
        let mut read = 0;
        for (i, byte) in out.iter_mut().enumerate() {
            let offset = (start + i) * step;
            if offset + step > SIZE {
                break;
            }
            // SAFETY: offset + step <= SIZE.
            *byte = unsafe { ptr::read_volatile(self.byte_ptr().add(offset)) };
            read += 1;
        }
        read
    }
}

impl<const SIZE: usize> Default for DmaBuffer<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_address_is_word_aligned() {
        let buffer: DmaBuffer<16> = DmaBuffer::new();
        assert_eq!(buffer.base_address() % 4, 0);
        assert_eq!(DmaBuffer::<16>::size(), 16);
    }

    #[test]
    fn word_elements_store_low_byte_and_zero_padding() {
        let buffer: DmaBuffer<16> = DmaBuffer::new();
        // Dirty the storage first so zero padding is observable
        assert_eq!(buffer.write_elements(0, TransferWidth::Byte, &[0xFF; 16]), 16);

        assert_eq!(buffer.write_elements(1, TransferWidth::Word, &[0xAB, 0xCD]), 2);

        let mut raw = [0u8; 16];
        assert_eq!(buffer.read_elements(0, TransferWidth::Byte, &mut raw), 16);
        assert_eq!(
            raw,
            [0xFF, 0xFF, 0xFF, 0xFF, 0xAB, 0, 0, 0, 0xCD, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn read_elements_takes_low_byte_of_each_element() {
        let buffer: DmaBuffer<8> = DmaBuffer::new();
        buffer.write_elements(0, TransferWidth::HalfWord, b"rust");

        let mut out = [0u8; 4];
        assert_eq!(buffer.read_elements(0, TransferWidth::HalfWord, &mut out), 4);
        assert_eq!(&out, b"rust");
    }

    #[test]
    fn writes_stop_at_buffer_end() {
        let buffer: DmaBuffer<8> = DmaBuffer::new();
        assert_eq!(buffer.write_elements(1, TransferWidth::Word, &[1, 2, 3]), 1);

        let mut out = [0u8; 3];
        assert_eq!(buffer.read_elements(1, TransferWidth::Word, &mut out), 1);
    }

    #[test]
    fn offset_of_bounds() {
        let buffer: DmaBuffer<32> = DmaBuffer::new();
        let base = buffer.base_address();

        assert_eq!(buffer.offset_of(base), Some(0));
        assert_eq!(buffer.offset_of(base + 31), Some(31));
        assert_eq!(buffer.offset_of(base + 32), Some(32));
        assert_eq!(buffer.offset_of(base + 33), None);
        assert_eq!(buffer.offset_of(base.wrapping_sub(1)), None);
    }
}
