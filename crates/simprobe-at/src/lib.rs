//! AT protocol driver for simprobe.
//!
//! This crate implements the line-oriented AT command protocol used by
//! SIM7000-class cellular modules, and the fixed diagnostic script that
//! drives it. It provides:
//!
//! - **Protocol framing** ([`protocol`]) -- command encoding, reply
//!   sanitization, and the no-reply sentinel for silent exchanges.
//! - **Command builders** ([`commands`]) -- construct the AT commands of
//!   the diagnostic script (reset, identity queries, registration polling,
//!   signal quality).
//! - **Exchange layer** ([`exchange`]) -- one command/response round trip
//!   over a [`Transport`](simprobe_core::Transport): flush, write, settle,
//!   drain, sanitize.
//! - **Reply parsers** ([`parser`]) -- total extractors for identity
//!   lines, signal quality, and registration status.
//! - **Timing** ([`timing`]) -- per-command-class settle delays and poll
//!   intervals.
//! - **Runner** ([`runner`]) -- the diagnostic orchestrator with the
//!   bounded registration retry loop and one-shot recovery action.
//! - **Builder** ([`builder`]) -- fluent construction of
//!   [`DiagnosticRunner`] instances.
//!
//! # Example
//!
//! ```
//! use simprobe_at::parser::{parse_registration, parse_signal};
//! use simprobe_core::report::RegistrationStatus;
//!
//! let reply = "+CREG: 0,5\r\nOK\r\n";
//! assert_eq!(
//!     parse_registration(reply),
//!     RegistrationStatus::RegisteredRoaming
//! );
//!
//! let sq = parse_signal("+CSQ: 14,0\r\nOK\r\n");
//! assert_eq!(sq.rssi, 14);
//! ```

pub mod builder;
pub mod commands;
pub mod exchange;
pub mod parser;
pub mod protocol;
pub mod runner;
pub mod timing;

// Re-export the primary types for ergonomic `use simprobe_at::*`.
pub use builder::DiagnosticBuilder;
pub use exchange::AtLink;
pub use runner::{DiagnosticRunner, RunnerConfig};
pub use timing::TimingProfile;
