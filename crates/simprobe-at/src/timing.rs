//! Settle and poll timing for the diagnostic script.
//!
//! Settle time is a protocol-level fact: the modem needs a pause between
//! receiving a command and having the complete reply ready, and the pause
//! varies by orders of magnitude across commands. A SIM lookup finishes
//! within a second; a module reset takes the UART down for several. The
//! profile keeps one duration per command class rather than a single
//! global constant.

use std::time::Duration;

/// Per-class settle delays and poll intervals for a diagnostic run.
#[derive(Debug, Clone, Copy)]
pub struct TimingProfile {
    /// Settle delay after an ordinary command, before reading the reply.
    pub command_settle: Duration,
    /// Settle delay after the module restart command.
    pub reset_settle: Duration,
    /// Unconditional wait after the restart step for the module to finish
    /// booting. Commands issued earlier are silently dropped by the modem.
    pub boot_settle: Duration,
    /// Wait between registration retry attempts. Long enough for a
    /// registration state transition to plausibly occur, short enough to
    /// bound the whole loop to under a minute.
    pub registration_poll_interval: Duration,
    /// How long to wait for reply bytes after the settle delay.
    pub read_timeout: Duration,
}

impl Default for TimingProfile {
    fn default() -> Self {
        TimingProfile {
            command_settle: Duration::from_secs(1),
            reset_settle: Duration::from_secs(3),
            boot_settle: Duration::from_millis(7500),
            registration_poll_interval: Duration::from_secs(4),
            read_timeout: Duration::from_secs(3),
        }
    }
}

impl TimingProfile {
    /// A profile with all delays collapsed, for driving the script against
    /// a mock transport in tests. The read timeout stays nonzero so the
    /// reply drain loop still performs its reads.
    pub fn instant() -> Self {
        TimingProfile {
            command_settle: Duration::ZERO,
            reset_settle: Duration::ZERO,
            boot_settle: Duration::ZERO,
            registration_poll_interval: Duration::ZERO,
            read_timeout: Duration::from_millis(50),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_values() {
        let t = TimingProfile::default();
        assert_eq!(t.command_settle, Duration::from_secs(1));
        assert_eq!(t.reset_settle, Duration::from_secs(3));
        assert_eq!(t.boot_settle, Duration::from_millis(7500));
        assert_eq!(t.registration_poll_interval, Duration::from_secs(4));
        assert_eq!(t.read_timeout, Duration::from_secs(3));
    }

    #[test]
    fn instant_profile_keeps_read_timeout() {
        let t = TimingProfile::instant();
        assert_eq!(t.command_settle, Duration::ZERO);
        assert!(t.read_timeout > Duration::ZERO);
    }
}
