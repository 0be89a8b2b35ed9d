//! simprobe-core: Core traits, types, and error definitions for simprobe.
//!
//! This crate defines the transport-agnostic abstractions shared by the
//! simprobe AT driver and its transports. Applications depend on these
//! types without pulling in a serial port stack.
//!
//! # Key types
//!
//! - [`Transport`] -- byte-level communication channel to the modem
//! - [`ModemReport`] -- the accumulating record of one diagnostic run
//! - [`Error`] / [`Result`] -- error handling

pub mod error;
pub mod report;
pub mod transport;

// Re-export key types at crate root for ergonomic `use simprobe_core::*`.
pub use error::{Error, Result};
pub use report::{
    ModemReport, RegistrationStatus, RestartStatus, SignalCategory, SignalQuality, NOT_AVAILABLE,
};
pub use transport::Transport;
