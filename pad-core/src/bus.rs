//! Bus port trait and error types.

use core::future::Future;
use joybus_proto::Response;

/// Error type for bus operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// The line went idle before a complete frame arrived.
    Timeout,
    /// More command bytes arrived than the frame buffer holds.
    Overrun,
    /// Transfer-level I/O error.
    Io,
}

/// Async trait for the serial bus the console polls us on.
///
/// Implementations own the bit-level transfer: edge timing, stop bits,
/// and releasing the line between transactions. The engine only ever sees
/// whole frames and whole responses.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap
/// allocation.
pub trait BusPort {
    /// Block until one complete command frame has been received into
    /// `buf`, returning its length in bits (including the stop bit).
    ///
    /// This is the poll cycle's only suspension point.
    fn receive(&mut self, buf: &mut [u8]) -> impl Future<Output = Result<usize, BusError>>;

    /// Transmit a response, appending the stop bit the payload does not
    /// carry. Must complete within the console's reply window.
    fn respond(&mut self, response: &Response) -> impl Future<Output = Result<(), BusError>>;
}
