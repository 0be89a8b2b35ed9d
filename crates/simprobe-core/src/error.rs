//! Error types for simprobe.
//!
//! All fallible operations across the library return [`Result<T>`], which
//! uses [`Error`] as the error type. Note that modem *silence* is not an
//! error anywhere in this library -- a command that produces no reply within
//! its read window yields a sentinel reply string instead (see
//! `simprobe-at`). The variants here cover genuine transport and
//! configuration faults only.

/// The error type for all simprobe operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A transport-level error (serial port open/configure failure).
    #[error("transport error: {0}")]
    Transport(String),

    /// A protocol-level error (used by the test harness to report
    /// expectation mismatches).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Timed out waiting for bytes from the modem.
    ///
    /// Raised by [`Transport::receive`](crate::transport::Transport::receive)
    /// when the read window elapses with nothing received. The AT exchange
    /// layer absorbs this into the no-reply sentinel; it never escapes a
    /// diagnostic run.
    #[error("timeout waiting for data")]
    Timeout,

    /// An invalid parameter was passed to a builder or command.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// No connection to the modem has been established.
    #[error("not connected")]
    NotConnected,

    /// The connection to the modem was lost unexpectedly.
    #[error("connection lost")]
    ConnectionLost,

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;
