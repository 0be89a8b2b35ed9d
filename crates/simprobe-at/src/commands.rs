//! AT command builders for the diagnostic script.
//!
//! All functions are pure -- they produce command byte sequences (including
//! the line terminator) without performing any I/O. The caller is
//! responsible for sending the bytes over a transport and feeding the reply
//! into the parsers.
//!
//! The command set is the fixed script a SIM7000-class module needs for a
//! connectivity diagnostic: reset, identity queries, registration polling,
//! operator selection, and signal quality.

use crate::protocol::encode_command;

/// Build the module restart command (`AT+CFUN=1,1`).
///
/// Full-functionality reset with module reboot. Needs the long settle
/// class: the module drops off the UART while it reboots.
pub fn cmd_reset() -> Vec<u8> {
    encode_command("AT+CFUN=1,1")
}

/// Build the no-op echo probe (`AT`).
///
/// Replies `OK` whenever the link and the command interpreter are alive.
pub fn cmd_probe() -> Vec<u8> {
    encode_command("AT")
}

/// Build the device identity query (`AT+GSN`).
///
/// The reply carries the IMEI as a bare digit line with no prefix.
pub fn cmd_read_imei() -> Vec<u8> {
    encode_command("AT+GSN")
}

/// Build the subscriber identity query (`AT+CIMI`).
///
/// The reply carries the IMSI as a bare digit line with no prefix.
pub fn cmd_read_imsi() -> Vec<u8> {
    encode_command("AT+CIMI")
}

/// Build the SIM PIN status query (`AT+CPIN?`).
pub fn cmd_read_pin_status() -> Vec<u8> {
    encode_command("AT+CPIN?")
}

/// Build the subscriber number query (`AT+CNUM`).
pub fn cmd_read_subscriber_number() -> Vec<u8> {
    encode_command("AT+CNUM")
}

/// Build the network registration status query (`AT+CREG?`).
pub fn cmd_read_registration() -> Vec<u8> {
    encode_command("AT+CREG?")
}

/// Build the packet-domain registration status query (`AT+CGREG?`).
///
/// Polled alongside `AT+CREG?` for trace visibility only; its reply is
/// never parsed into the report.
pub fn cmd_read_packet_registration() -> Vec<u8> {
    encode_command("AT+CGREG?")
}

/// Build the operator selection query (`AT+COPS?`).
///
/// Trace visibility only, like [`cmd_read_packet_registration`].
pub fn cmd_read_operator() -> Vec<u8> {
    encode_command("AT+COPS?")
}

/// Build the automatic operator re-selection command (`AT+COPS=0`).
///
/// The recovery action for modules stuck in a non-searching state. Its
/// acknowledgement is not checked.
pub fn cmd_force_operator_reselect() -> Vec<u8> {
    encode_command("AT+COPS=0")
}

/// Build the signal quality query (`AT+CSQ`).
pub fn cmd_read_signal_quality() -> Vec<u8> {
    encode_command("AT+CSQ")
}
