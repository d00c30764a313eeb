//! Synchronization primitives for ISR-safe access.
//!
//! Every critical section here comes from `critical_section::with`, which
//! saves the interrupt mask on entry and restores it on exit. Nesting is
//! therefore safe: an inner section never re-enables interrupts that an
//! outer one masked.

use core::cell::RefCell;
use critical_section::{CriticalSection, Mutex};

/// Cell providing interior mutability with critical section protection.
///
/// Combines `critical_section::Mutex` with `RefCell` so state can be shared
/// between the polling loop and an interrupt handler. The borrow never
/// outlives the critical section that produced it.
pub struct CriticalSectionCell<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> CriticalSectionCell<T> {
    /// Create a new cell (const, suitable for static initialization).
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Execute a closure with exclusive mutable access.
    ///
    /// Interrupts are masked for the duration of the closure; keep it short.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| self.with_cs(cs, f))
    }

    /// Execute a closure inside a critical section the caller already holds.
    #[inline]
    pub fn with_cs<R, F>(&self, cs: CriticalSection<'_>, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut value = self.inner.borrow_ref_mut(cs);
        f(&mut value)
    }
}

// SAFETY: CriticalSectionCell uses critical sections to protect all access.
unsafe impl<T: Send> Sync for CriticalSectionCell<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_section_cell_with_mutates() {
        let cell: CriticalSectionCell<u32> = CriticalSectionCell::new(0);
        cell.with(|v| *v += 10);
        assert_eq!(cell.with(|v| *v), 10);
    }

    #[test]
    fn critical_section_cell_with_cs_under_outer_section() {
        let cell: CriticalSectionCell<u32> = CriticalSectionCell::new(1);
        let doubled = critical_section::with(|cs| cell.with_cs(cs, |v| *v * 2));
        assert_eq!(doubled, 2);
    }

    #[test]
    fn critical_section_cell_nested_sections() {
        let outer: CriticalSectionCell<u32> = CriticalSectionCell::new(1);
        let inner: CriticalSectionCell<u32> = CriticalSectionCell::new(2);

        let sum = outer.with(|a| inner.with(|b| *a + *b));
        assert_eq!(sum, 3);
    }

    #[test]
    fn critical_section_cell_static_usage() {
        static CELL: CriticalSectionCell<u32> = CriticalSectionCell::new(0);
        CELL.with(|v| *v = 100);
        assert_eq!(CELL.with(|v| *v), 100);
    }
}
