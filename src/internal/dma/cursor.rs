//! Element cursor into a circular buffer.

use crate::hal::TransferWidth;

/// Position within a circular buffer of `capacity` elements.
///
/// The index is always `< capacity`; every constructor and mutator keeps it
/// there, so an out-of-range cursor cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RingCursor {
    index: usize,
    capacity: usize,
}

impl RingCursor {
    /// Cursor at `index`, or `None` if it is outside the buffer
    #[must_use]
    pub const fn new(index: usize, capacity: usize) -> Option<Self> {
        if index < capacity {
            Some(Self { index, capacity })
        } else {
            None
        }
    }

    /// Cursor at the buffer origin, or `None` for an empty buffer
    #[must_use]
    pub const fn origin(capacity: usize) -> Option<Self> {
        Self::new(0, capacity)
    }

    /// Cursor for a byte offset reported by hardware.
    ///
    /// The offset must land on an element boundary. An offset exactly one
    /// past the end is the hardware about to wrap and maps to the origin.
    #[must_use]
    pub const fn from_byte_offset(
        offset: usize,
        width: TransferWidth,
        capacity: usize,
    ) -> Option<Self> {
        if offset % width.bytes() != 0 {
            return None;
        }
        let index = offset / width.bytes();
        if index == capacity {
            Self::origin(capacity)
        } else {
            Self::new(index, capacity)
        }
    }

    /// Element index
    #[inline(always)]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Buffer capacity in elements
    #[inline(always)]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Elements from this cursor forward to `other`, modulo capacity
    #[inline(always)]
    #[must_use]
    pub const fn distance_to(&self, other: RingCursor) -> usize {
        (other.index + self.capacity - self.index) % self.capacity
    }

    /// Elements from this cursor to the end of the buffer
    #[inline(always)]
    #[must_use]
    pub const fn run_to_end(&self) -> usize {
        self.capacity - self.index
    }

    /// Advance by `n` elements, wrapping around
    #[inline(always)]
    pub fn advance(&mut self, n: usize) {
        self.index = (self.index + n % self.capacity) % self.capacity;
    }
}
