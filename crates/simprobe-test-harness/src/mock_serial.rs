//! Mock transport for deterministic testing of the AT driver.
//!
//! [`MockTransport`] implements the [`Transport`] trait with pre-loaded
//! command/reply pairs. This lets you test command framing, reply
//! sanitization, the parsers, and the whole diagnostic script without a
//! modem on the bench.
//!
//! An empty reply models modem silence: `receive()` reports a timeout
//! immediately, which the exchange layer turns into its no-reply sentinel.
//!
//! # Example
//!
//! ```
//! use simprobe_test_harness::MockTransport;
//!
//! let mut mock = MockTransport::new();
//! // Pre-load: when the driver sends this command, return this reply.
//! mock.expect(b"AT+CSQ\r\n", b"+CSQ: 21,0\r\nOK\r\n");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use simprobe_core::error::{Error, Result};
use simprobe_core::transport::Transport;

/// A pre-loaded command/reply pair for the mock transport.
#[derive(Debug, Clone)]
struct Expectation {
    /// The exact bytes we expect to be sent.
    command: Vec<u8>,
    /// The bytes to return when the matching command is received.
    reply: Vec<u8>,
}

/// A mock [`Transport`] for testing the AT driver without hardware.
///
/// Expectations are consumed in order. When `send()` is called, the sent
/// data is recorded and matched against the next expectation. The
/// corresponding reply is then returned by subsequent `receive()` calls;
/// once it is exhausted, `receive()` reports a timeout, just like a real
/// port going quiet.
///
/// If no expectation matches or the queue is exhausted, an error is
/// returned -- so a test's expectation queue pins down the exact command
/// sequence the driver may issue.
#[derive(Debug)]
pub struct MockTransport {
    /// Ordered queue of expected command/reply pairs.
    expectations: VecDeque<Expectation>,
    /// The reply bytes pending for the next `receive()` calls.
    pending_reply: Option<Vec<u8>>,
    /// Cursor into the pending reply (how many bytes have been read so far).
    reply_cursor: usize,
    /// Whether the transport is "connected".
    connected: bool,
    /// Log of all bytes sent through this transport.
    sent_log: Vec<Vec<u8>>,
    /// Number of `flush_inbound()` calls, shared so tests can observe it
    /// after the mock has been boxed into the driver.
    flush_count: Arc<AtomicUsize>,
}

impl MockTransport {
    /// Create a new mock transport in the connected state.
    pub fn new() -> Self {
        MockTransport {
            expectations: VecDeque::new(),
            pending_reply: None,
            reply_cursor: 0,
            connected: true,
            sent_log: Vec::new(),
            flush_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Add an expected command/reply pair.
    ///
    /// When `send()` is called with data matching `command`, subsequent
    /// `receive()` calls will return `reply`. An empty `reply` models
    /// modem silence.
    pub fn expect(&mut self, command: &[u8], reply: &[u8]) {
        self.expectations.push_back(Expectation {
            command: command.to_vec(),
            reply: reply.to_vec(),
        });
    }

    /// Return a reference to all data that has been sent through this
    /// transport. Each element is the byte slice from one `send()` call.
    pub fn sent_data(&self) -> &[Vec<u8>] {
        &self.sent_log
    }

    /// Return the number of expectations that have not yet been consumed.
    pub fn remaining_expectations(&self) -> usize {
        self.expectations.len()
    }

    /// Handle to the `flush_inbound()` call counter. Clone it before
    /// handing the mock to the driver to assert on flush behavior.
    pub fn flush_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.flush_count)
    }

    /// Set the connected state of the mock transport.
    ///
    /// When set to `false`, subsequent calls return
    /// [`Error::NotConnected`].
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        if !self.connected {
            return Err(Error::NotConnected);
        }

        // Record what was sent.
        self.sent_log.push(data.to_vec());

        // Match against the next expectation.
        if let Some(expectation) = self.expectations.pop_front() {
            if data != expectation.command.as_slice() {
                return Err(Error::Protocol(format!(
                    "unexpected send data: expected {:?}, got {:?}",
                    String::from_utf8_lossy(&expectation.command),
                    String::from_utf8_lossy(data)
                )));
            }
            self.pending_reply = Some(expectation.reply);
            self.reply_cursor = 0;
            Ok(())
        } else {
            Err(Error::Protocol(
                "no more expectations in mock transport".into(),
            ))
        }
    }

    async fn receive(&mut self, buf: &mut [u8], _timeout: Duration) -> Result<usize> {
        if !self.connected {
            return Err(Error::NotConnected);
        }

        if let Some(ref reply) = self.pending_reply {
            let remaining = &reply[self.reply_cursor..];
            if remaining.is_empty() {
                self.pending_reply = None;
                self.reply_cursor = 0;
                return Err(Error::Timeout);
            }
            let n = remaining.len().min(buf.len());
            buf[..n].copy_from_slice(&remaining[..n]);
            self.reply_cursor += n;
            if self.reply_cursor >= reply.len() {
                // All reply bytes consumed; clear for the next exchange.
                self.pending_reply = None;
                self.reply_cursor = 0;
            }
            Ok(n)
        } else {
            Err(Error::Timeout)
        }
    }

    async fn flush_inbound(&mut self) -> Result<()> {
        if !self.connected {
            return Err(Error::NotConnected);
        }

        // Discard anything the previous exchange left unread, like a real
        // input-buffer clear would.
        self.pending_reply = None;
        self.reply_cursor = 0;
        self.flush_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.connected = false;
        self.pending_reply = None;
        self.reply_cursor = 0;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simprobe_core::transport::Transport;

    #[tokio::test]
    async fn mock_transport_basic_send_receive() {
        let mut mock = MockTransport::new();
        let command = b"AT+CSQ\r\n";
        let reply = b"+CSQ: 21,0\r\nOK\r\n";

        mock.expect(command, reply);

        mock.send(command).await.unwrap();

        let mut buf = [0u8; 64];
        let n = mock
            .receive(&mut buf, Duration::from_millis(100))
            .await
            .unwrap();

        assert_eq!(n, reply.len());
        assert_eq!(&buf[..n], reply);
    }

    #[tokio::test]
    async fn mock_transport_tracks_sent_data() {
        let mut mock = MockTransport::new();
        let cmd1 = b"AT\r\n";
        let cmd2 = b"AT+GSN\r\n";

        mock.expect(cmd1, b"OK\r\n");
        mock.expect(cmd2, b"867723051234567\r\nOK\r\n");

        mock.send(cmd1).await.unwrap();
        mock.send(cmd2).await.unwrap();

        assert_eq!(mock.sent_data().len(), 2);
        assert_eq!(mock.sent_data()[0], cmd1);
        assert_eq!(mock.sent_data()[1], cmd2);
    }

    #[tokio::test]
    async fn mock_transport_wrong_data_errors() {
        let mut mock = MockTransport::new();
        mock.expect(b"AT\r\n", b"OK\r\n");

        let result = mock.send(b"AT+CSQ\r\n").await;
        assert!(matches!(result.unwrap_err(), Error::Protocol(_)));
    }

    #[tokio::test]
    async fn mock_transport_no_expectations_errors() {
        let mut mock = MockTransport::new();

        let result = mock.send(b"AT\r\n").await;
        assert!(matches!(result.unwrap_err(), Error::Protocol(_)));
    }

    #[tokio::test]
    async fn mock_transport_receive_without_send_times_out() {
        let mut mock = MockTransport::new();
        let mut buf = [0u8; 64];

        let result = mock.receive(&mut buf, Duration::from_millis(10)).await;
        assert!(matches!(result.unwrap_err(), Error::Timeout));
    }

    #[tokio::test]
    async fn mock_transport_empty_reply_models_silence() {
        let mut mock = MockTransport::new();
        mock.expect(b"AT+GSN\r\n", b"");

        mock.send(b"AT+GSN\r\n").await.unwrap();

        let mut buf = [0u8; 64];
        let result = mock.receive(&mut buf, Duration::from_millis(10)).await;
        assert!(matches!(result.unwrap_err(), Error::Timeout));
    }

    #[tokio::test]
    async fn mock_transport_flush_discards_pending_reply() {
        let mut mock = MockTransport::new();
        mock.expect(b"AT\r\n", b"OK\r\n");

        mock.send(b"AT\r\n").await.unwrap();
        mock.flush_inbound().await.unwrap();

        // The unread reply is gone, like stale bytes cleared from a real
        // input buffer.
        let mut buf = [0u8; 64];
        let result = mock.receive(&mut buf, Duration::from_millis(10)).await;
        assert!(matches!(result.unwrap_err(), Error::Timeout));
        assert_eq!(mock.flush_counter().load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn mock_transport_disconnect() {
        let mut mock = MockTransport::new();
        assert!(mock.is_connected());

        mock.close().await.unwrap();
        assert!(!mock.is_connected());

        let result = mock.send(b"AT\r\n").await;
        assert!(matches!(result.unwrap_err(), Error::NotConnected));
    }

    #[tokio::test]
    async fn mock_transport_set_connected() {
        let mut mock = MockTransport::new();
        mock.set_connected(false);
        assert!(!mock.is_connected());

        let result = mock.send(b"AT\r\n").await;
        assert!(matches!(result.unwrap_err(), Error::NotConnected));

        let mut buf = [0u8; 8];
        let result = mock.receive(&mut buf, Duration::from_millis(10)).await;
        assert!(matches!(result.unwrap_err(), Error::NotConnected));

        let result = mock.flush_inbound().await;
        assert!(matches!(result.unwrap_err(), Error::NotConnected));
    }

    #[tokio::test]
    async fn mock_transport_remaining_expectations() {
        let mut mock = MockTransport::new();
        mock.expect(b"AT\r\n", b"OK\r\n");
        mock.expect(b"AT+CSQ\r\n", b"+CSQ: 21,0\r\nOK\r\n");
        assert_eq!(mock.remaining_expectations(), 2);

        mock.send(b"AT\r\n").await.unwrap();
        assert_eq!(mock.remaining_expectations(), 1);

        mock.send(b"AT+CSQ\r\n").await.unwrap();
        assert_eq!(mock.remaining_expectations(), 0);
    }

    #[tokio::test]
    async fn mock_transport_partial_receive() {
        let mut mock = MockTransport::new();
        let command = b"AT+GSN\r\n";
        let reply = b"8677";
        mock.expect(command, reply);

        mock.send(command).await.unwrap();

        // Read with a buffer smaller than the reply.
        let mut buf = [0u8; 2];
        let n = mock
            .receive(&mut buf, Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(&buf[..n], b"86");

        let n = mock
            .receive(&mut buf, Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(&buf[..n], b"77");
    }
}
