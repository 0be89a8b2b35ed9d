//! AT protocol framing: command encoding, reply sanitization, and the
//! no-reply sentinel.
//!
//! AT replies are line-oriented text separated by `\r\n`, but the stream is
//! loosely specified: a reply may carry embedded control bytes, partial
//! lines cut off by a read timeout, or nothing at all. This module turns a
//! raw byte blob into text that downstream line-scanning can trust:
//! control bytes other than the line terminator become spaces (so they can
//! never split or merge lines), and total silence becomes a fixed sentinel
//! token that no extractor rule matches.

/// Line terminator appended to every outgoing command.
pub const TERMINATOR: &str = "\r\n";

/// Sentinel reply substituted when the modem sends nothing within the read
/// window. Chosen so that every extractor treats it as "no qualifying
/// line" and falls back to its default value.
pub const NO_REPLY: &str = "ERROR";

/// The generic acknowledgement marker in AT replies.
pub const OK_MARKER: &str = "OK";

/// Bytes below this are non-printable controls.
const PRINTABLE_THRESHOLD: u8 = 0x20;

/// Encode a command for the wire: the command text followed by the line
/// terminator.
pub fn encode_command(cmd: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(cmd.len() + TERMINATOR.len());
    bytes.extend_from_slice(cmd.as_bytes());
    bytes.extend_from_slice(TERMINATOR.as_bytes());
    bytes
}

/// Sanitize a raw reply for line-based scanning.
///
/// Every byte below the printable threshold, other than `\r` and `\n`,
/// is replaced with a space. Non-UTF-8 sequences are lossily decoded.
pub fn sanitize(raw: &[u8]) -> String {
    let cleaned: Vec<u8> = raw
        .iter()
        .map(|&b| {
            if b < PRINTABLE_THRESHOLD && b != b'\r' && b != b'\n' {
                b' '
            } else {
                b
            }
        })
        .collect();
    String::from_utf8_lossy(&cleaned).into_owned()
}

/// Split a sanitized reply into its lines.
///
/// Splits on both `\r` and `\n`; empty segments between the two terminator
/// bytes are yielded but match no extractor rule.
pub fn lines(reply: &str) -> impl Iterator<Item = &str> {
    reply.split(['\r', '\n'])
}

/// Whether the reply contains the generic `OK` acknowledgement.
pub fn contains_ok(reply: &str) -> bool {
    reply.contains(OK_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // encode_command
    // -----------------------------------------------------------------------

    #[test]
    fn encode_appends_terminator() {
        assert_eq!(encode_command("AT"), b"AT\r\n");
        assert_eq!(encode_command("AT+CREG?"), b"AT+CREG?\r\n");
    }

    // -----------------------------------------------------------------------
    // sanitize
    // -----------------------------------------------------------------------

    #[test]
    fn sanitize_passes_printable_text() {
        assert_eq!(sanitize(b"+CSQ: 14,0\r\nOK\r\n"), "+CSQ: 14,0\r\nOK\r\n");
    }

    #[test]
    fn sanitize_replaces_control_byte_mid_line() {
        // A control byte embedded mid-line becomes a space at that position
        // and must not split the line in two.
        let raw = b"+CSQ:\x0114,0\r\nOK\r\n";
        let clean = sanitize(raw);
        assert_eq!(clean, "+CSQ: 14,0\r\nOK\r\n");
        let first_line = lines(&clean).next().unwrap();
        assert_eq!(first_line, "+CSQ: 14,0");
    }

    #[test]
    fn sanitize_preserves_line_terminators() {
        let clean = sanitize(b"a\r\nb");
        assert_eq!(lines(&clean).filter(|l| !l.is_empty()).count(), 2);
    }

    #[test]
    fn sanitize_replaces_nul_and_tab() {
        assert_eq!(sanitize(b"a\x00b\tc"), "a b c");
    }

    #[test]
    fn sanitize_empty_input() {
        assert_eq!(sanitize(b""), "");
    }

    // -----------------------------------------------------------------------
    // contains_ok
    // -----------------------------------------------------------------------

    #[test]
    fn ok_detected_in_reply() {
        assert!(contains_ok("AT+CFUN=1,1\r\nOK\r\n"));
    }

    #[test]
    fn ok_absent_from_sentinel() {
        assert!(!contains_ok(NO_REPLY));
    }

    #[test]
    fn ok_absent_from_cme_error() {
        assert!(!contains_ok("+CME ERROR: SIM not inserted\r\n"));
    }
}
