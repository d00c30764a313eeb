//! UART bring-up seam.

use crate::driver::config::UartConfig;
use crate::driver::error::ConfigResult;

/// The serial peripheral the DMA channels feed.
///
/// Bring-up configures pins, line rate and DMA request mode once; after
/// that the transport only needs the data register addresses to point its
/// channels at.
pub trait SerialPort {
    /// Route pins, set the line rate, and enable DMA-driven operation.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidBaudRate`](crate::ConfigError::InvalidBaudRate)
    /// if the line rate cannot be generated from the system clock.
    fn configure(&mut self, config: &UartConfig) -> ConfigResult<()>;

    /// Address of the transmit data register (TX channel destination)
    fn tx_data_address(&self) -> usize;

    /// Address of the receive data register (RX channel source)
    fn rx_data_address(&self) -> usize;
}
