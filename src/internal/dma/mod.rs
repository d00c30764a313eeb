//! DMA-backed transport streams
//!
//! This module holds the two halves of the transport and the storage they
//! share with the DMA engine. All memory is statically sized using const
//! generics.
//!
//! - [`TxStream`]: linear buffer, append-or-restart submission
//! - [`RxStream`]: circular buffer, software read cursor
//! - `DmaBuffer`: volatile element storage
//! - [`RingCursor`]: validated position in a circular buffer
//!
//! # Example
//!
//! ```ignore
//! use ph_rsl10_uart::{RxStream, TxStream, TransferWidth};
//!
//! // 512 TX and 256 RX elements of 32 bits each
//! let mut tx: TxStream<DmaChannel, 2048> = TxStream::new(DmaChannel::new(0));
//! let mut rx: RxStream<DmaChannel, 1024> = RxStream::new(DmaChannel::new(1));
//! ```

mod buffer;
mod cursor;
mod rx;
mod tx;

pub use cursor::RingCursor;
pub use rx::RxStream;
pub use tx::{TxStats, TxStream};
