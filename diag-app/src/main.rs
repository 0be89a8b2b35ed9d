// simprobe diagnostic application -- runs the full modem diagnostic script
// against a serial port (or a mock transport) and prints the report as a
// JSON document on stdout. Logs go to stderr so the document stays clean.
//
// Usage:
//   simprobe-diag-app --port /dev/ttyUSB0
//   simprobe-diag-app --port /dev/ttyUSB0 --baud 57600 --attempts 6
//   simprobe-diag-app --mock
//
// Log verbosity is controlled with RUST_LOG, e.g.:
//   RUST_LOG=simprobe_at=debug simprobe-diag-app --port /dev/ttyUSB0

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use simprobe::at::{commands, DiagnosticBuilder, DiagnosticRunner, TimingProfile};
use simprobe_test_harness::MockTransport;
use simprobe_transport::SerialTransport;

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// simprobe diagnostic application -- exercises a SIM7000-class modem and
/// reports its state as JSON.
#[derive(Parser)]
#[command(name = "simprobe-diag-app", version, about)]
struct Cli {
    /// Serial port path (e.g. /dev/ttyUSB0, COM3).
    /// Required unless --mock is used.
    #[arg(long)]
    port: Option<String>,

    /// Baud rate for the serial port.
    #[arg(long, default_value_t = 115_200)]
    baud: u32,

    /// Use a mock transport with canned healthy-modem replies instead of a
    /// real serial port. Useful for verifying CLI parsing and report
    /// rendering without hardware.
    #[arg(long)]
    mock: bool,

    /// Maximum registration poll attempts.
    #[arg(long, default_value_t = 12)]
    attempts: u32,

    /// 1-based attempt on which to force automatic operator re-selection
    /// if still unregistered. Set beyond --attempts to disable.
    #[arg(long, default_value_t = 9)]
    reselect_attempt: u32,

    /// Print the report as a single line instead of pretty-printed JSON.
    #[arg(long)]
    compact: bool,
}

// ---------------------------------------------------------------------------
// Mock transport
// ---------------------------------------------------------------------------

/// Pre-load a mock transport with the reply set of a healthy modem:
/// acknowledged reset, valid identities, registration on the first poll,
/// and a good signal reading.
fn healthy_modem_mock() -> MockTransport {
    let mut mock = MockTransport::new();
    mock.expect(&commands::cmd_reset(), b"AT+CFUN=1,1\r\nOK\r\n");
    mock.expect(&commands::cmd_probe(), b"AT\r\nOK\r\n");
    mock.expect(
        &commands::cmd_read_imei(),
        b"AT+GSN\r\n867723051234567\r\n\r\nOK\r\n",
    );
    mock.expect(
        &commands::cmd_read_imsi(),
        b"AT+CIMI\r\n460011234567890\r\n\r\nOK\r\n",
    );
    mock.expect(
        &commands::cmd_read_pin_status(),
        b"AT+CPIN?\r\n+CPIN: READY\r\n\r\nOK\r\n",
    );
    mock.expect(
        &commands::cmd_read_subscriber_number(),
        b"AT+CNUM\r\n+CNUM: \"\",\"+8613812345678\",145\r\n\r\nOK\r\n",
    );
    mock.expect(&commands::cmd_read_registration(), b"+CREG: 0,1\r\nOK\r\n");
    mock.expect(
        &commands::cmd_read_packet_registration(),
        b"+CGREG: 0,1\r\nOK\r\n",
    );
    mock.expect(
        &commands::cmd_read_operator(),
        b"+COPS: 0,0,\"TESTNET\"\r\nOK\r\n",
    );
    mock.expect(&commands::cmd_read_signal_quality(), b"+CSQ: 21,0\r\nOK\r\n");
    mock
}

// ---------------------------------------------------------------------------
// Runner construction
// ---------------------------------------------------------------------------

/// Construct the diagnostic runner from CLI arguments, opening a real
/// serial port unless --mock was given.
async fn create_runner(cli: &Cli) -> Result<DiagnosticRunner> {
    let builder = DiagnosticBuilder::new()
        .registration_attempts(cli.attempts)
        .reselect_attempt(cli.reselect_attempt);

    if cli.mock {
        let runner = builder
            .timing(TimingProfile::instant())
            .build_with_transport(Box::new(healthy_modem_mock()))
            .context("failed to build runner with mock transport")?;
        info!("using mock transport");
        Ok(runner)
    } else {
        let port = cli
            .port
            .as_deref()
            .context("--port is required when not using --mock")?;

        let transport = SerialTransport::open(port, cli.baud)
            .await
            .with_context(|| format!("failed to open serial port {port} at {} baud", cli.baud))?;

        info!(port, baud = cli.baud, "serial port opened");
        builder
            .build_with_transport(Box::new(transport))
            .context("failed to build runner")
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // Logs on stderr; the JSON report owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!(
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        "starting modem diagnostic"
    );

    let runner = create_runner(&cli).await?;
    let report = runner.run().await.context("diagnostic run failed")?;

    let doc = serde_json::json!({ "test_results": report });
    let rendered = if cli.compact {
        serde_json::to_string(&doc)?
    } else {
        serde_json::to_string_pretty(&doc)?
    };
    println!("{rendered}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use simprobe::report::{RegistrationStatus, RestartStatus, SignalCategory};

    #[tokio::test]
    async fn mock_run_produces_healthy_report() {
        let runner = DiagnosticBuilder::new()
            .timing(TimingProfile::instant())
            .build_with_transport(Box::new(healthy_modem_mock()))
            .unwrap();

        let report = runner.run().await.unwrap();
        assert_eq!(report.restart, RestartStatus::Ok);
        assert_eq!(report.imei, "867723051234567");
        assert_eq!(report.network_status, RegistrationStatus::RegisteredHome);
        assert_eq!(report.signal_quality.category, SignalCategory::Good);
    }

    #[tokio::test]
    async fn mock_report_renders_expected_document() {
        let runner = DiagnosticBuilder::new()
            .timing(TimingProfile::instant())
            .build_with_transport(Box::new(healthy_modem_mock()))
            .unwrap();

        let report = runner.run().await.unwrap();
        let doc = serde_json::json!({ "test_results": report });

        assert_eq!(doc["test_results"]["restart_module"], "OK");
        assert_eq!(doc["test_results"]["imei"], "867723051234567");
        assert_eq!(
            doc["test_results"]["network_status"],
            "Registered (Home)"
        );
        assert_eq!(doc["test_results"]["signal_quality"]["rssi"], 21);
        assert_eq!(
            doc["test_results"]["signal_quality"]["description"],
            "Good"
        );
    }
}
