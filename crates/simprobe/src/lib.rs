//! # simprobe -- Serial Diagnostics for SIM7000-class Cellular Modems
//!
//! `simprobe` is an asynchronous Rust library for running a connectivity
//! diagnostic against a cellular module over its AT command interface:
//! module reset, identity collection (IMEI, IMSI, SIM status), a bounded
//! network-registration retry loop with a one-shot recovery action, and a
//! final signal-quality check. The result is a single structured report.
//!
//! ## Quick Start
//!
//! ```no_run
//! use simprobe::at::DiagnosticBuilder;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runner = DiagnosticBuilder::new()
//!         .serial_port("/dev/ttyUSB0")
//!         .baud_rate(115_200)
//!         .build()
//!         .await?;
//!
//!     let report = runner.run().await?;
//!     println!("{}: rssi {}", report.network_status, report.signal_quality.rssi);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized as a workspace of focused crates:
//!
//! | Crate                   | Purpose                                      |
//! |-------------------------|----------------------------------------------|
//! | `simprobe-core`         | [`Transport`] trait, report types, errors    |
//! | `simprobe-transport`    | Serial transport implementation              |
//! | `simprobe-at`           | AT protocol driver and diagnostic runner     |
//! | `simprobe-test-harness` | `MockTransport` for hardware-free testing    |
//! | **`simprobe`**          | This facade crate -- re-exports everything   |
//!
//! The driver operates on `dyn Transport`, so the same script runs against
//! real hardware and against the mock transport in tests.
//!
//! ## Failure model
//!
//! Modem silence and unparseable replies are not errors: each degrades one
//! report field to its documented default ("N/A", `Unknown`, level -1)
//! and the run continues. Hard transport faults (port gone, write failure)
//! are the only conditions that surface as `Err`.

pub use simprobe_core::*;

/// AT protocol driver and diagnostic orchestrator.
///
/// Provides [`DiagnosticBuilder`](at::DiagnosticBuilder) and
/// [`DiagnosticRunner`](at::DiagnosticRunner), along with the command
/// builders, parsers, and timing profile used by the diagnostic script.
pub mod at {
    pub use simprobe_at::*;
}

/// Transport implementations.
///
/// Provides [`SerialTransport`](transport::SerialTransport) for the UART
/// link to the module.
pub mod transport {
    pub use simprobe_transport::*;
}
