//! One command/response exchange against the transport.
//!
//! The AT link is half-duplex with no framing beyond line terminators, so
//! request/response correlation is purely temporal: flush anything stale,
//! write the command, give the modem its settle time, then drain whatever
//! arrives inside the read window. Silence is an expected, recoverable
//! condition in this protocol -- it yields the sentinel reply rather than
//! an error.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use simprobe_core::error::{Error, Result};
use simprobe_core::transport::Transport;

use crate::protocol::{self, NO_REPLY};

/// Upper bound on accumulated reply bytes for a single exchange.
///
/// AT replies in this script are tens of bytes; 1024 is generous headroom
/// and also caps the damage from a modem babbling on the line.
pub const MAX_RESPONSE: usize = 1024;

/// A command/response channel over a [`Transport`].
///
/// Owns the transport exclusively for the duration of a diagnostic run;
/// the flush-before-write step in [`exchange`](AtLink::exchange) is the
/// only synchronization the single-actor protocol needs.
pub struct AtLink {
    transport: Box<dyn Transport>,
}

impl AtLink {
    /// Create a link over the given transport.
    pub fn new(transport: Box<dyn Transport>) -> Self {
        AtLink { transport }
    }

    /// Recover the underlying transport.
    pub fn into_transport(self) -> Box<dyn Transport> {
        self.transport
    }

    /// Perform one exchange: flush stale input, write `cmd`, wait `settle`
    /// for the modem to process it, then read until `read_timeout` elapses
    /// or the reply buffer fills.
    ///
    /// Returns the sanitized reply text. Zero bytes within the window is
    /// not an error: the fixed [`NO_REPLY`] sentinel is returned instead,
    /// and every downstream extractor degrades it to that field's default.
    /// `Err` surfaces only for hard transport faults (write failure, lost
    /// port).
    pub async fn exchange(
        &mut self,
        cmd: &[u8],
        settle: Duration,
        read_timeout: Duration,
    ) -> Result<String> {
        self.transport.flush_inbound().await?;
        self.transport.send(cmd).await?;

        tokio::time::sleep(settle).await;

        let deadline = Instant::now() + read_timeout;
        let mut recv_buf = [0u8; 256];
        let mut reply_buf: Vec<u8> = Vec::new();

        loop {
            let now = Instant::now();
            if now >= deadline || reply_buf.len() >= MAX_RESPONSE {
                break;
            }
            let remaining = deadline - now;

            match self.transport.receive(&mut recv_buf, remaining).await {
                Ok(n) if n > 0 => {
                    let room = MAX_RESPONSE - reply_buf.len();
                    reply_buf.extend_from_slice(&recv_buf[..n.min(room)]);
                }
                Ok(_) => break,
                Err(Error::Timeout) => break,
                Err(e) => return Err(e),
            }
        }

        let reply = if reply_buf.is_empty() {
            NO_REPLY.to_string()
        } else {
            protocol::sanitize(&reply_buf)
        };

        let command = String::from_utf8_lossy(cmd);
        debug!(command = %command.trim_end(), reply = %reply.trim_end(), "AT exchange");

        Ok(reply)
    }
}
