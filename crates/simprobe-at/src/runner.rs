//! DiagnosticRunner -- the fixed diagnostic script.
//!
//! One run walks the script in order: module reset, boot settle, liveness
//! probe, identity collection, the registration retry loop, and a final
//! signal check, accumulating a [`ModemReport`] along the way. Every step
//! degrades to a default field value on failure; nothing inside the script
//! aborts the run. One run produces exactly one report -- there is no
//! outer retry.
//!
//! The registration loop is the central retry construct: a bounded number
//! of polls with a fixed inter-attempt delay, early exit as soon as the
//! modem reports a registered state, and a one-shot forced operator
//! re-selection partway through the budget to dislodge modules stuck in a
//! non-searching state.

use tracing::{debug, info, warn};

use simprobe_core::error::Result;
use simprobe_core::report::{ModemReport, RestartStatus};
use simprobe_core::transport::Transport;

use crate::exchange::AtLink;
use crate::timing::TimingProfile;
use crate::{commands, parser, protocol};

/// Tunables for a diagnostic run.
#[derive(Debug, Clone, Copy)]
pub struct RunnerConfig {
    /// Maximum registration poll attempts.
    pub registration_attempts: u32,
    /// 1-based attempt on which, if still unregistered, the forced
    /// operator re-selection is issued. Set beyond
    /// `registration_attempts` to disable the recovery action.
    pub reselect_attempt: u32,
    /// Settle delays, poll interval, and read timeout.
    pub timing: TimingProfile,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            registration_attempts: 12,
            reselect_attempt: 9,
            timing: TimingProfile::default(),
        }
    }
}

/// Drives the diagnostic script over an AT link.
///
/// Constructed via [`DiagnosticBuilder`](crate::builder::DiagnosticBuilder).
pub struct DiagnosticRunner {
    link: AtLink,
    config: RunnerConfig,
}

impl DiagnosticRunner {
    /// Create a runner from its constituent parts.
    ///
    /// This is called by the builder; callers should use
    /// [`DiagnosticBuilder`](crate::builder::DiagnosticBuilder) instead.
    pub(crate) fn new(transport: Box<dyn Transport>, config: RunnerConfig) -> Self {
        DiagnosticRunner {
            link: AtLink::new(transport),
            config,
        }
    }

    /// Run the full diagnostic script and return the completed report.
    pub async fn run(mut self) -> Result<ModemReport> {
        let mut report = ModemReport::default();
        let timing = self.config.timing;

        self.step_reset(&mut report).await?;

        // The module boots after a reset; commands issued too early are
        // silently dropped, so wait it out unconditionally.
        debug!(boot_settle_ms = timing.boot_settle.as_millis() as u64, "waiting for module boot");
        tokio::time::sleep(timing.boot_settle).await;

        self.step_probe().await?;
        self.step_identity(&mut report).await?;
        self.step_registration(&mut report).await?;
        self.step_signal(&mut report).await?;

        info!(
            restart = %report.restart,
            network_status = %report.network_status,
            rssi = report.signal_quality.rssi,
            "diagnostic run complete"
        );
        Ok(report)
    }

    /// Issue the module restart command with the long settle window.
    ///
    /// The restart field records `Ok` only if the reply carries the generic
    /// acknowledgement. A missing acknowledgement is non-fatal: the modem
    /// may have reset anyway, so the run continues either way.
    async fn step_reset(&mut self, report: &mut ModemReport) -> Result<()> {
        let timing = self.config.timing;
        let reply = self
            .link
            .exchange(&commands::cmd_reset(), timing.reset_settle, timing.read_timeout)
            .await?;

        if protocol::contains_ok(&reply) {
            report.restart = RestartStatus::Ok;
        } else {
            warn!("module restart not acknowledged, continuing");
        }
        Ok(())
    }

    /// No-op echo probe to confirm the link is alive. Observational only:
    /// the reply lands in the trace, not in the report.
    async fn step_probe(&mut self) -> Result<()> {
        let timing = self.config.timing;
        self.link
            .exchange(&commands::cmd_probe(), timing.command_settle, timing.read_timeout)
            .await?;
        Ok(())
    }

    /// Collect the identity fields: IMEI, IMSI, SIM PIN status, and
    /// subscriber number. The four exchanges are independent and are not
    /// retried -- a failed extraction leaves "N/A" and the run proceeds.
    ///
    /// All four replies carry their value without a usable label on these
    /// modules, so extraction uses the long-digit-line heuristic.
    async fn step_identity(&mut self, report: &mut ModemReport) -> Result<()> {
        let timing = self.config.timing;

        let reply = self
            .link
            .exchange(&commands::cmd_read_imei(), timing.command_settle, timing.read_timeout)
            .await?;
        report.imei = parser::extract_line(&reply, None);

        let reply = self
            .link
            .exchange(&commands::cmd_read_imsi(), timing.command_settle, timing.read_timeout)
            .await?;
        report.imsi = parser::extract_line(&reply, None);

        let reply = self
            .link
            .exchange(
                &commands::cmd_read_pin_status(),
                timing.command_settle,
                timing.read_timeout,
            )
            .await?;
        report.sim_pin_status = parser::extract_line(&reply, None);

        let reply = self
            .link
            .exchange(
                &commands::cmd_read_subscriber_number(),
                timing.command_settle,
                timing.read_timeout,
            )
            .await?;
        report.sim_number = parser::extract_line(&reply, None);

        debug!(
            imei = %report.imei,
            imsi = %report.imsi,
            sim_pin_status = %report.sim_pin_status,
            "identity collection complete"
        );
        Ok(())
    }

    /// The registration retry loop.
    ///
    /// Each attempt polls `AT+CREG?` into the report (overwriting -- only
    /// the last attempt's value survives), polls the packet domain and
    /// operator selection for trace visibility, and exits early on any
    /// registered state. On the configured attempt, if still unregistered,
    /// a forced automatic operator re-selection is issued once; its
    /// acknowledgement is not checked. Budget exhaustion keeps whatever
    /// status the final attempt produced.
    async fn step_registration(&mut self, report: &mut ModemReport) -> Result<()> {
        let timing = self.config.timing;

        for attempt in 1..=self.config.registration_attempts {
            let reply = self
                .link
                .exchange(
                    &commands::cmd_read_registration(),
                    timing.command_settle,
                    timing.read_timeout,
                )
                .await?;
            report.network_status = parser::parse_registration(&reply);
            debug!(attempt, status = %report.network_status, "registration status");

            // Trace-only visibility into the packet domain and the
            // selected operator; neither reply is parsed into the report.
            let packet = self
                .link
                .exchange(
                    &commands::cmd_read_packet_registration(),
                    timing.command_settle,
                    timing.read_timeout,
                )
                .await?;
            debug!(reply = %packet.trim_end(), "packet registration");

            let operator = self
                .link
                .exchange(
                    &commands::cmd_read_operator(),
                    timing.command_settle,
                    timing.read_timeout,
                )
                .await?;
            debug!(reply = %operator.trim_end(), "operator selection");

            if report.network_status.is_registered() {
                debug!(attempt, "registered, ending poll loop");
                return Ok(());
            }

            if attempt == self.config.reselect_attempt {
                warn!(attempt, "still unregistered, forcing automatic operator selection");
                self.link
                    .exchange(
                        &commands::cmd_force_operator_reselect(),
                        timing.command_settle,
                        timing.read_timeout,
                    )
                    .await?;
            }

            tokio::time::sleep(timing.registration_poll_interval).await;
        }

        debug!(status = %report.network_status, "registration attempts exhausted");
        Ok(())
    }

    /// Final signal-quality check, populating the last two report fields.
    async fn step_signal(&mut self, report: &mut ModemReport) -> Result<()> {
        let timing = self.config.timing;
        let reply = self
            .link
            .exchange(
                &commands::cmd_read_signal_quality(),
                timing.command_settle,
                timing.read_timeout,
            )
            .await?;
        report.signal_quality = parser::parse_signal(&reply);
        Ok(())
    }
}
