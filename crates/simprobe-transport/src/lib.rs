//! Transport implementations for simprobe.
//!
//! This crate provides the concrete implementation of the
//! [`Transport`](simprobe_core::Transport) trait from `simprobe-core` for
//! the serial link to a cellular module:
//!
//! - [`SerialTransport`]: USB virtual COM ports and on-board UART
//!   connections
//!
//! # Example
//!
//! ```no_run
//! use simprobe_transport::SerialTransport;
//! use simprobe_core::transport::Transport;
//! use std::time::Duration;
//!
//! # async fn example() -> simprobe_core::Result<()> {
//! let mut transport = SerialTransport::open("/dev/ttyUSB0", 115_200).await?;
//!
//! transport.send(b"AT\r\n").await?;
//!
//! let mut buf = [0u8; 256];
//! let n = transport.receive(&mut buf, Duration::from_secs(3)).await?;
//! # Ok(())
//! # }
//! ```

pub mod serial;

pub use serial::{DataBits, FlowControl, Parity, SerialConfig, SerialTransport, StopBits};
