//! DiagnosticBuilder -- fluent builder for constructing
//! [`DiagnosticRunner`] instances.
//!
//! Separates configuration from construction so that callers can set up
//! serial port parameters, the registration-loop budget, and timing before
//! establishing the transport connection.
//!
//! # Example
//!
//! ```no_run
//! use simprobe_at::builder::DiagnosticBuilder;
//!
//! # async fn example() -> simprobe_core::Result<()> {
//! let runner = DiagnosticBuilder::new()
//!     .serial_port("/dev/ttyUSB0")
//!     .baud_rate(115_200)
//!     .build()
//!     .await?;
//! let report = runner.run().await?;
//! # Ok(())
//! # }
//! ```

use simprobe_core::error::{Error, Result};
use simprobe_core::transport::Transport;

use crate::runner::{DiagnosticRunner, RunnerConfig};
use crate::timing::TimingProfile;

/// Fluent builder for [`DiagnosticRunner`].
///
/// All configuration has sensible defaults, so the simplest usage is:
///
/// ```ignore
/// let runner = DiagnosticBuilder::new()
///     .serial_port("/dev/ttyUSB0")
///     .build()
///     .await?;
/// ```
pub struct DiagnosticBuilder {
    serial_port: Option<String>,
    baud_rate: u32,
    config: RunnerConfig,
}

impl DiagnosticBuilder {
    /// Create a builder with default settings (115200 baud, 12 registration
    /// attempts, forced re-selection on attempt 9, default timing).
    pub fn new() -> Self {
        DiagnosticBuilder {
            serial_port: None,
            baud_rate: 115_200,
            config: RunnerConfig::default(),
        }
    }

    /// Set the serial port path (e.g. `/dev/ttyUSB0` or `COM3`).
    pub fn serial_port(mut self, port: &str) -> Self {
        self.serial_port = Some(port.to_string());
        self
    }

    /// Override the default baud rate (115200).
    pub fn baud_rate(mut self, baud: u32) -> Self {
        self.baud_rate = baud;
        self
    }

    /// Set the maximum number of registration poll attempts (default: 12).
    pub fn registration_attempts(mut self, n: u32) -> Self {
        self.config.registration_attempts = n;
        self
    }

    /// Set the 1-based attempt on which forced operator re-selection is
    /// issued if the modem is still unregistered (default: 9). A value
    /// beyond the attempt budget disables the recovery action.
    pub fn reselect_attempt(mut self, n: u32) -> Self {
        self.config.reselect_attempt = n;
        self
    }

    /// Replace the timing profile (settle delays, poll interval, read
    /// timeout).
    pub fn timing(mut self, timing: TimingProfile) -> Self {
        self.config.timing = timing;
        self
    }

    /// Build a [`DiagnosticRunner`] with a caller-provided transport.
    ///
    /// This is the primary entry point for testing (pass a
    /// `MockTransport` from `simprobe-test-harness`) and for advanced use
    /// cases where the caller manages the transport lifecycle directly.
    pub fn build_with_transport(self, transport: Box<dyn Transport>) -> Result<DiagnosticRunner> {
        if self.config.registration_attempts == 0 {
            return Err(Error::InvalidParameter(
                "registration_attempts must be at least 1".into(),
            ));
        }
        if self.config.reselect_attempt == 0 {
            return Err(Error::InvalidParameter(
                "reselect_attempt is 1-based and must be at least 1".into(),
            ));
        }

        Ok(DiagnosticRunner::new(transport, self.config))
    }

    /// Build a [`DiagnosticRunner`] using a serial transport.
    ///
    /// Requires that [`serial_port()`](Self::serial_port) has been called.
    pub async fn build(self) -> Result<DiagnosticRunner> {
        let port = self
            .serial_port
            .as_ref()
            .ok_or_else(|| Error::InvalidParameter("serial_port is required for build()".into()))?;

        let transport = simprobe_transport::SerialTransport::open(port, self.baud_rate).await?;
        self.build_with_transport(Box::new(transport))
    }
}

impl Default for DiagnosticBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simprobe_test_harness::MockTransport;

    #[tokio::test]
    async fn builder_defaults_accepted() {
        let mock = MockTransport::new();
        let result = DiagnosticBuilder::new().build_with_transport(Box::new(mock));
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn builder_fluent_chain() {
        let mock = MockTransport::new();
        let result = DiagnosticBuilder::new()
            .serial_port("/dev/ttyUSB0")
            .baud_rate(57_600)
            .registration_attempts(6)
            .reselect_attempt(4)
            .timing(TimingProfile::instant())
            .build_with_transport(Box::new(mock));
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn builder_rejects_zero_attempts() {
        let mock = MockTransport::new();
        let result = DiagnosticBuilder::new()
            .registration_attempts(0)
            .build_with_transport(Box::new(mock));
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[tokio::test]
    async fn builder_rejects_zero_reselect_attempt() {
        let mock = MockTransport::new();
        let result = DiagnosticBuilder::new()
            .reselect_attempt(0)
            .build_with_transport(Box::new(mock));
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[tokio::test]
    async fn builder_serial_port_required_for_build() {
        let result = DiagnosticBuilder::new().build().await;
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }
}
