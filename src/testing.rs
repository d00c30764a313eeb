//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing the transport on
//! the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use core::ptr;
use std::rc::Rc;
use std::vec::Vec;

use crate::driver::config::UartConfig;
use crate::driver::error::{ConfigError, ConfigResult};
use crate::driver::interrupt::ChannelStatus;
use crate::hal::{Direction, SerialPort, TransferChannel, TransferDescriptor};

// =============================================================================
// Mock DMA Channel
// =============================================================================

#[derive(Debug, Default)]
struct ChannelState {
    current: Option<TransferDescriptor>,
    active: bool,
    /// Transfer length register, in elements
    length: usize,
    /// Elements moved in the current transfer (TX) or write index (RX)
    progress: usize,
    status: ChannelStatus,
    descriptors: Vec<TransferDescriptor>,
    wire: Vec<u8>,
    disables: usize,
    complete_before_commit: bool,
    complete_after_check: Option<usize>,
    /// START already raised for the current transfer
    start_raised: bool,
    cursor_override: Option<usize>,
}

impl ChannelState {
    /// Move up to `max` TX elements from the buffer onto the wire.
    fn run_tx(&mut self, max: usize) -> usize {
        let Some(desc) = self.current else {
            return 0;
        };
        if !self.active || desc.direction != Direction::MemoryToPeripheral {
            return 0;
        }

        let step = desc.width.bytes();
        let mut moved = 0;
        while moved < max && self.progress < self.length {
            // SAFETY: tests keep the stream (and its buffer) boxed and alive
            // while the channel runs, and progress < length <= capacity.
            let byte = unsafe { ptr::read_volatile((desc.source + self.progress * step) as *const u8) };
            self.wire.push(byte);
            self.progress += 1;
            moved += 1;
        }

        if self.progress >= self.length {
            self.active = false;
            self.status.complete = true;
            self.status.disabled = true;
        }
        moved
    }
}

/// Simulated DMA channel for host tests
///
/// Clones share state, so a test keeps one handle while the stream under
/// test owns another. TX transfers read the real buffer through the source
/// address and append to a simulated wire; RX writes land in the real buffer
/// through the destination address.
///
/// # Example
///
/// ```ignore
/// let channel = MockChannel::new();
/// let mut tx = Box::new(TxStream::<_, 64>::new(channel.clone()));
/// tx.init(TransferWidth::Byte, 0x4000_0610).unwrap();
/// tx.submit(b"hi").unwrap();
/// channel.finish();
/// assert_eq!(channel.wire(), b"hi");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockChannel {
    number: u8,
    state: Rc<RefCell<ChannelState>>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Channel reporting `number` to the transport
    pub fn numbered(number: u8) -> Self {
        Self {
            number,
            ..Self::default()
        }
    }

    /// Set status flags as if the hardware raised them
    pub fn raise(&self, status: ChannelStatus) {
        let mut st = self.state.borrow_mut();
        st.status.started |= status.started;
        st.status.complete |= status.complete;
        st.status.counter |= status.counter;
        st.status.disabled |= status.disabled;
        st.status.error |= status.error;
    }

    /// Move up to `count` elements of the in-flight TX transfer
    pub fn transmit(&self, count: usize) -> usize {
        self.state.borrow_mut().run_tx(count)
    }

    /// Run the in-flight TX transfer to completion
    pub fn finish(&self) {
        self.state.borrow_mut().run_tx(usize::MAX);
    }

    /// Complete the in-flight transfer inside the next length write, just
    /// before the new length lands
    pub fn complete_before_commit(&self) {
        self.state.borrow_mut().complete_before_commit = true;
    }

    /// Complete the in-flight transfer right after the `nth` following
    /// activity check has sampled "active"
    pub fn complete_after_activity_check(&self, nth: usize) {
        self.state.borrow_mut().complete_after_check = Some(nth.max(1));
    }

    /// Hardware writes `bytes` into the RX ring, one per element
    pub fn receive(&self, bytes: &[u8]) {
        let mut st = self.state.borrow_mut();
        let Some(desc) = st.current else {
            return;
        };
        if !st.active || desc.direction != Direction::PeripheralToMemory || st.length == 0 {
            return;
        }

        let step = desc.width.bytes();
        for &byte in bytes {
            let slot = (desc.destination + st.progress * step) as *mut u8;
            // SAFETY: progress < length, and the ring is length * step bytes
            unsafe {
                ptr::write_volatile(slot, byte);
                for pad in 1..step {
                    ptr::write_volatile(slot.add(pad), 0);
                }
            }
            st.progress = (st.progress + 1) % st.length;
        }
        // START fires once per transfer, on the first element
        if !bytes.is_empty() && !st.start_raised {
            st.start_raised = true;
            st.status.started = true;
        }
    }

    /// Drop the start flag, as the interrupt handler would
    pub fn clear_started(&self) {
        self.state.borrow_mut().status.started = false;
    }

    /// Report `address` as the destination cursor from now on
    pub fn force_cursor(&self, address: usize) {
        self.state.borrow_mut().cursor_override = Some(address);
    }

    /// Bytes that went out on the wire so far
    pub fn wire(&self) -> Vec<u8> {
        self.state.borrow().wire.clone()
    }

    /// Every descriptor programmed, in order
    pub fn descriptors(&self) -> Vec<TransferDescriptor> {
        self.state.borrow().descriptors.clone()
    }

    /// Number of explicit disables
    pub fn disable_count(&self) -> usize {
        self.state.borrow().disables
    }

    /// Current status flags
    pub fn status_snapshot(&self) -> ChannelStatus {
        self.state.borrow().status
    }
}

impl TransferChannel for MockChannel {
    fn number(&self) -> u8 {
        self.number
    }

    fn configure(&mut self, descriptor: &TransferDescriptor) {
        let mut st = self.state.borrow_mut();
        st.current = Some(*descriptor);
        st.descriptors.push(*descriptor);
        st.length = descriptor.length;
        st.progress = 0;
        st.active = true;
        st.start_raised = false;
    }

    fn disable(&mut self) {
        let mut st = self.state.borrow_mut();
        st.active = false;
        st.disables += 1;
    }

    fn is_active(&self) -> bool {
        let mut st = self.state.borrow_mut();
        let active = st.active;
        match st.complete_after_check {
            Some(n) if n <= 1 => {
                st.complete_after_check = None;
                st.run_tx(usize::MAX);
            }
            Some(n) => st.complete_after_check = Some(n - 1),
            None => {}
        }
        active
    }

    fn committed_length(&self) -> usize {
        self.state.borrow().length
    }

    fn set_committed_length(&mut self, length: usize) {
        let mut st = self.state.borrow_mut();
        if st.complete_before_commit {
            st.complete_before_commit = false;
            st.run_tx(usize::MAX);
        }
        st.length = length;
    }

    fn destination_base(&self) -> usize {
        self.state.borrow().current.map_or(0, |d| d.destination)
    }

    fn destination_cursor(&self) -> usize {
        let st = self.state.borrow();
        if let Some(address) = st.cursor_override {
            return address;
        }
        st.current
            .map_or(0, |d| d.destination + st.progress * d.width.bytes())
    }

    fn status(&self) -> ChannelStatus {
        self.state.borrow().status
    }

    fn clear_status(&mut self, status: ChannelStatus) {
        let mut st = self.state.borrow_mut();
        st.status.started &= !status.started;
        st.status.complete &= !status.complete;
        st.status.counter &= !status.counter;
        st.status.disabled &= !status.disabled;
        st.status.error &= !status.error;
    }
}

// =============================================================================
// Mock Serial Port
// =============================================================================

pub const MOCK_TX_DATA: usize = 0x4000_0610;
pub const MOCK_RX_DATA: usize = 0x4000_0614;

/// Serial port that records each configuration it receives
#[derive(Debug, Clone, Default)]
pub struct MockSerialPort {
    configured: Rc<RefCell<Vec<UartConfig>>>,
    reject_baud: bool,
}

impl MockSerialPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// A port whose configure always fails with an unreachable baud rate
    pub fn rejecting_baud() -> Self {
        Self {
            reject_baud: true,
            ..Self::default()
        }
    }

    pub fn configurations(&self) -> Vec<UartConfig> {
        self.configured.borrow().clone()
    }
}

impl SerialPort for MockSerialPort {
    fn configure(&mut self, config: &UartConfig) -> ConfigResult<()> {
        if self.reject_baud {
            return Err(ConfigError::InvalidBaudRate);
        }
        self.configured.borrow_mut().push(*config);
        Ok(())
    }

    fn tx_data_address(&self) -> usize {
        MOCK_TX_DATA
    }

    fn rx_data_address(&self) -> usize {
        MOCK_RX_DATA
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing bounded waits
///
/// Tracks total delay time without actually waiting. Optionally drives a
/// [`MockChannel`], moving one TX element per delay call, so waits observe
/// the transfer progressing.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: RefCell<u64>,
    driving: Option<MockChannel>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a delay that transmits one element of `channel` per call
    pub fn driving(channel: MockChannel) -> Self {
        Self {
            total_ns: RefCell::new(0),
            driving: Some(channel),
        }
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        *self.total_ns.borrow()
    }

    /// Get total microseconds that were "delayed"
    pub fn total_us(&self) -> u64 {
        self.total_ns() / 1_000
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.borrow_mut() += ns as u64;
        if let Some(channel) = &self.driving {
            channel.transmit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::TransferWidth;

    #[test]
    fn mock_channel_clones_share_state() {
        let a = MockChannel::new();
        let mut b = a.clone();
        b.disable();
        assert_eq!(a.disable_count(), 1);
    }

    #[test]
    fn mock_channel_transmits_from_memory() {
        let data: [u8; 4] = *b"wire";
        let mut channel = MockChannel::new();
        channel.configure(&TransferDescriptor::transmit(
            data.as_ptr() as usize,
            MOCK_TX_DATA,
            4,
            TransferWidth::Byte,
        ));

        assert_eq!(channel.transmit(2), 2);
        assert!(channel.is_active());
        channel.finish();
        assert!(!channel.is_active());
        assert_eq!(channel.wire(), b"wire");
        assert!(channel.status_snapshot().complete);
    }

    #[test]
    fn mock_channel_receive_wraps() {
        let mut ring = [0u8; 4];
        let base = ring.as_mut_ptr() as usize;
        let mut channel = MockChannel::new();
        channel.configure(&TransferDescriptor::receive_circular(
            MOCK_RX_DATA,
            base,
            4,
            TransferWidth::Byte,
        ));

        channel.receive(b"abcdef");
        assert_eq!(channel.destination_cursor(), base + 2);
        assert!(channel.status().started);
        assert_eq!(&ring, b"efcd");
    }

    #[test]
    fn mock_channel_start_is_raised_once_per_transfer() {
        let mut ring = [0u8; 8];
        let base = ring.as_mut_ptr() as usize;
        let mut channel = MockChannel::new();
        let desc = TransferDescriptor::receive_circular(MOCK_RX_DATA, base, 8, TransferWidth::Byte);
        channel.configure(&desc);

        channel.receive(b"a");
        assert!(channel.status().started);
        channel.clear_started();

        channel.receive(b"bc");
        assert!(!channel.status().started);

        // A new transfer raises it again
        channel.configure(&desc);
        channel.receive(b"d");
        assert!(channel.status().started);
    }

    #[test]
    fn mock_delay_accumulates() {
        use embedded_hal::delay::DelayNs;

        let mut delay = MockDelay::new();
        delay.delay_us(10);
        delay.delay_ns(500);
        assert_eq!(delay.total_ns(), 10_500);
        assert_eq!(delay.total_us(), 10);
    }
}
