//! Transport facade.
//!
//! [`Uart`] owns the serial port and both streams, runs bring-up once, and
//! forwards the events the interrupt handler latches to the streams that
//! need them.

use embedded_hal::delay::DelayNs;

use super::config::{State, UartConfig};
use super::error::{ConfigError, IoError, Result};
use crate::hal::{SerialPort, TransferChannel};
use crate::internal::constants::{
    DEFAULT_RX_BUFFER_SIZE, DEFAULT_TX_BUFFER_SIZE, FLUSH_POLL_INTERVAL_US,
};
use crate::internal::dma::{RxStream, TxStats, TxStream};
use crate::internal::register::dma::DmaChannel;
use crate::internal::register::uart::UartRegs;
use crate::sync::{PendingEvents, TransferEvents};

// =============================================================================
// UART Transport
// =============================================================================

/// DMA-backed UART transport
///
/// # Type Parameters
/// * `S` - Serial port bring-up
/// * `TX` / `RX` - DMA channels for each direction
/// * `TX_SIZE` / `RX_SIZE` - Buffer sizes in bytes
///
/// The buffers live inside this struct and their addresses are handed to
/// the DMA engine during [`init`](Self::init), so it must not move after
/// that. Keep it in a `static`.
///
/// # Example
/// ```ignore
/// static EVENTS: TransferEvents = TransferEvents::new();
/// static mut UART: UartDefault<'static> = UartDefault::for_config(&EVENTS, &UartConfig::new());
///
/// let uart = unsafe { &mut *core::ptr::addr_of_mut!(UART) };
/// uart.init(UartConfig::new()).unwrap();
///
/// uart.write(b"hello\r\n").unwrap();
///
/// let mut buf = [0u8; 256];
/// let n = uart.read(&mut buf).unwrap();
/// ```
pub struct Uart<'a, S, TX, RX, const TX_SIZE: usize, const RX_SIZE: usize> {
    events: &'a TransferEvents,
    port: S,
    tx: TxStream<TX, TX_SIZE>,
    rx: RxStream<RX, RX_SIZE>,
    state: State,
    config: UartConfig,
    bus_errors: u32,
}

/// Transport on the RSL10 registers with the default 512/256-word buffers
pub type UartDefault<'a> =
    Uart<'a, UartRegs, DmaChannel, DmaChannel, DEFAULT_TX_BUFFER_SIZE, DEFAULT_RX_BUFFER_SIZE>;

impl<'a, S, TX, RX, const TX_SIZE: usize, const RX_SIZE: usize> Uart<'a, S, TX, RX, TX_SIZE, RX_SIZE> {
    /// Create an uninitialized transport. Const-compatible.
    pub const fn new(events: &'a TransferEvents, port: S, tx_channel: TX, rx_channel: RX) -> Self {
        Self {
            events,
            port,
            tx: TxStream::new(tx_channel),
            rx: RxStream::new(rx_channel),
            state: State::Uninitialized,
            config: UartConfig::new(),
            bus_errors: 0,
        }
    }

    /// Current state
    #[inline(always)]
    pub fn state(&self) -> State {
        self.state
    }

    /// Configuration applied at bring-up
    pub fn config(&self) -> &UartConfig {
        &self.config
    }

    /// Transmit stream
    pub fn tx(&self) -> &TxStream<TX, TX_SIZE> {
        &self.tx
    }

    /// Receive stream
    pub fn rx(&self) -> &RxStream<RX, RX_SIZE> {
        &self.rx
    }

    /// Transmit counters
    pub fn tx_stats(&self) -> TxStats {
        self.tx.stats()
    }

    /// Bus errors reported by either channel
    pub fn bus_errors(&self) -> u32 {
        self.bus_errors
    }

    fn ensure_running(&self) -> Result<()> {
        if self.state != State::Running {
            return Err(IoError::NotRunning.into());
        }
        Ok(())
    }
}

impl<'a> UartDefault<'a> {
    /// Default-sized transport on the channels named in `config`.
    pub const fn for_config(events: &'a TransferEvents, config: &UartConfig) -> Self {
        Self::new(
            events,
            UartRegs::new(),
            DmaChannel::new(config.tx_channel),
            DmaChannel::new(config.rx_channel),
        )
    }
}

impl<S, TX, RX, const TX_SIZE: usize, const RX_SIZE: usize> Uart<'_, S, TX, RX, TX_SIZE, RX_SIZE>
where
    S: SerialPort,
    TX: TransferChannel,
    RX: TransferChannel,
{
    /// Bring up the UART and both DMA channels.
    ///
    /// Leaves TX idle until the first write and starts the circular RX
    /// transfer. After this the transport is `Running`.
    ///
    /// # Errors
    /// - `AlreadyInitialized` - called twice
    /// - Any [`UartConfig::validate`] error
    /// - `BufferMisaligned` / `BufferTooLarge` - buffer sizes do not suit the width
    /// - `InvalidChannel` - `config` names channels other than the ones
    ///   this transport was built with
    pub fn init(&mut self, config: UartConfig) -> Result<()> {
        if self.state != State::Uninitialized {
            return Err(ConfigError::AlreadyInitialized.into());
        }
        config.validate()?;
        if !config.width.divides(TX_SIZE) || !config.width.divides(RX_SIZE) {
            return Err(ConfigError::BufferMisaligned.into());
        }
        if self.tx.channel().number() != config.tx_channel
            || self.rx.channel().number() != config.rx_channel
        {
            return Err(ConfigError::InvalidChannel.into());
        }

        // No UART data to send yet, so TX stays disabled after this
        self.tx.channel_mut().disable();
        self.rx.channel_mut().disable();

        // Anything latched before here belongs to a previous transfer. The
        // RX start event can fire as soon as the channel is enabled below,
        // and must survive until the first read.
        self.events.take();

        self.port.configure(&config)?;
        self.tx.init(config.width, self.port.tx_data_address())?;
        self.rx.init(config.width, self.port.rx_data_address())?;

        self.config = config;
        self.state = State::Running;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "uart running: {} baud, tx {} / rx {} elements",
            config.baud_rate,
            self.tx.capacity(),
            self.rx.capacity()
        );
        Ok(())
    }

    /// Queue bytes for transmission without blocking.
    ///
    /// # Errors
    /// - `NotRunning` - before [`init`](Self::init)
    /// - `CapacityExceeded` - see [`TxStream::submit`]
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        self.ensure_running()?;
        self.tx.submit(data)?;
        Ok(())
    }

    /// Copy received bytes into `out`, returning how many.
    ///
    /// Consumes latched interrupt events first, so the first read after
    /// the RX start event can establish its cursor.
    ///
    /// # Errors
    /// - `NotRunning` - before [`init`](Self::init)
    pub fn read(&mut self, out: &mut [u8]) -> Result<usize> {
        self.ensure_running()?;
        self.service_events();
        Ok(self.rx.drain(out))
    }

    /// Unread received bytes
    pub fn rx_pending(&mut self) -> usize {
        self.service_events();
        self.rx.pending()
    }

    /// True while a TX transfer is in flight
    pub fn tx_busy(&self) -> bool {
        self.tx.is_busy()
    }

    /// Apply and return the events latched since the last call.
    pub fn take_events(&mut self) -> PendingEvents {
        self.service_events()
    }

    /// Wait until everything written so far has left the TX buffer.
    ///
    /// # Errors
    /// - `NotRunning` - before [`init`](Self::init)
    /// - `Timeout` - still transmitting after `timeout_us`
    pub fn flush<D: DelayNs>(&mut self, delay: &mut D, timeout_us: u32) -> Result<()> {
        self.ensure_running()?;

        let mut waited = 0u32;
        while self.tx.is_busy() {
            if waited >= timeout_us {
                return Err(IoError::Timeout.into());
            }
            delay.delay_us(FLUSH_POLL_INTERVAL_US);
            waited = waited.saturating_add(FLUSH_POLL_INTERVAL_US);
        }
        Ok(())
    }

    fn service_events(&mut self) -> PendingEvents {
        let events = self.events.take();
        if events.rx_started {
            self.rx.mark_started();
        }
        if events.tx_completions > 0 {
            self.tx.note_completions(events.tx_completions);
        }
        if events.error {
            self.bus_errors = self.bus_errors.wrapping_add(1);
            #[cfg(feature = "defmt")]
            defmt::warn!("uart dma bus error");
        }
        events
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
