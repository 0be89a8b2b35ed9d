//! Transport trait for modem communication.
//!
//! The [`Transport`] trait abstracts over the physical link to the modem.
//! Implementations exist for serial ports (`simprobe-transport`) and mock
//! transports for testing (`simprobe-test-harness`).
//!
//! The AT exchange layer in `simprobe-at` operates on a `Transport` rather
//! than directly on a serial port, enabling both real hardware runs and
//! deterministic unit testing with `MockTransport`.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;

/// Asynchronous byte-level transport to a modem.
///
/// Implementations handle buffering and error recovery at the physical
/// layer. Protocol-level concerns (command framing, settle delays, reply
/// sanitization) are handled by the AT exchange layer that consumes this
/// trait.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send raw bytes to the modem.
    ///
    /// Implementations should block until all bytes have been written to
    /// the underlying transport.
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive bytes from the modem into the provided buffer.
    ///
    /// Returns the number of bytes actually read. Will wait up to `timeout`
    /// for data to arrive; returns [`Error::Timeout`](crate::error::Error::Timeout)
    /// if no data is received within the deadline.
    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;

    /// Discard any bytes waiting in the inbound buffer.
    ///
    /// The modem may still be emitting output from a prior unrelated event
    /// (an unsolicited result code, the tail of an earlier reply). The
    /// exchange layer calls this before every command write so a stale
    /// reply is never correlated with a fresh command.
    async fn flush_inbound(&mut self) -> Result<()>;

    /// Close the transport connection.
    ///
    /// After calling `close()`, subsequent `send()` and `receive()` calls
    /// should return [`Error::NotConnected`](crate::error::Error::NotConnected).
    async fn close(&mut self) -> Result<()>;

    /// Check whether the transport is currently connected.
    fn is_connected(&self) -> bool;
}
