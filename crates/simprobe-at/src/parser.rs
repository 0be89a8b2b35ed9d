//! Reply parsers: stateless extractors over a sanitized AT reply.
//!
//! Each extractor is total -- it never fails and always returns a defined
//! value. A reply that matches no rule (including the no-reply sentinel)
//! degrades to the field's documented default rather than an error, so a
//! single bad exchange costs one report field, never the run.

use simprobe_core::report::{RegistrationStatus, SignalCategory, SignalQuality, NOT_AVAILABLE};

use crate::protocol;

/// Marker that introduces the signal-quality line in a `AT+CSQ` reply.
const SIGNAL_MARKER: &str = "+CSQ:";

/// Minimum count of decimal digits for the no-prefix line heuristic.
const DIGIT_HEURISTIC_THRESHOLD: usize = 10;

/// Ordered (marker, status) table for registration decoding. Markers are
/// mutually exclusive by construction; the first match wins.
const REGISTRATION_MARKERS: &[(&str, RegistrationStatus)] = &[
    ("+CREG: 0,1", RegistrationStatus::RegisteredHome),
    ("+CREG: 0,5", RegistrationStatus::RegisteredRoaming),
    ("+CREG: 0,2", RegistrationStatus::Searching),
    ("+CREG: 0,3", RegistrationStatus::Denied),
    ("+CREG: 0,0", RegistrationStatus::NotRegistered),
];

/// Inclusive upper bounds mapping an RSSI level to its category, evaluated
/// in order. Level 99 (handled separately) means the modem cannot estimate
/// signal strength.
const SIGNAL_THRESHOLDS: &[(i32, SignalCategory)] = &[
    (10, SignalCategory::Poor),
    (15, SignalCategory::Fair),
    (20, SignalCategory::Moderate),
    (26, SignalCategory::Good),
];

/// Extract the first qualifying line from a reply.
///
/// With `Some(prefix)`, a line qualifies if it contains `prefix` as a
/// substring. With `None`, a line qualifies if strictly more than ten of
/// its characters are decimal digits -- the heuristic for a long numeric
/// identifier (IMEI, IMSI, subscriber number) that carries no
/// distinguishing label.
///
/// The heuristic is inherently fragile: it fires on *any* line with enough
/// digits, so it will happily pick up an unrelated numeric line if the
/// modem interleaves one. It is kept because these replies genuinely carry
/// no label to anchor on.
///
/// Leading spaces are trimmed from the returned line. Returns
/// [`NOT_AVAILABLE`] when no line qualifies.
pub fn extract_line(reply: &str, prefix: Option<&str>) -> String {
    for line in protocol::lines(reply) {
        let qualifies = match prefix {
            Some(p) => line.contains(p),
            None => {
                line.chars().filter(|c| c.is_ascii_digit()).count() > DIGIT_HEURISTIC_THRESHOLD
            }
        };
        if qualifies {
            return line.trim_start_matches(' ').to_string();
        }
    }
    NOT_AVAILABLE.to_string()
}

/// Decode the signal-quality reading from a `AT+CSQ` reply.
///
/// Scans for the first line containing the `+CSQ:` marker and decodes the
/// integer that follows against the fixed threshold table. Returns
/// `(-1, Invalid)` when no such line exists; this is a terminal,
/// non-retried outcome for the run.
pub fn parse_signal(reply: &str) -> SignalQuality {
    for line in protocol::lines(reply) {
        let Some(idx) = line.find(SIGNAL_MARKER) else {
            continue;
        };
        let rest = &line[idx + SIGNAL_MARKER.len()..];
        let digits: String = rest
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if let Ok(rssi) = digits.parse::<i32>() {
            return SignalQuality {
                rssi,
                category: categorize_rssi(rssi),
            };
        }
    }
    SignalQuality {
        rssi: -1,
        category: SignalCategory::Invalid,
    }
}

/// Map an RSSI level to its category via the ordered threshold table.
fn categorize_rssi(rssi: i32) -> SignalCategory {
    if rssi == 99 {
        return SignalCategory::Unknown;
    }
    for &(bound, category) in SIGNAL_THRESHOLDS {
        if rssi < bound {
            return category;
        }
    }
    SignalCategory::Excellent
}

/// Decode the registration status from a `AT+CREG?` reply.
///
/// Tests the reply against the fixed marker table; absence of any known
/// marker yields [`RegistrationStatus::Unknown`].
pub fn parse_registration(reply: &str) -> RegistrationStatus {
    REGISTRATION_MARKERS
        .iter()
        .find(|(marker, _)| reply.contains(marker))
        .map(|&(_, status)| status)
        .unwrap_or(RegistrationStatus::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::NO_REPLY;

    // -----------------------------------------------------------------------
    // extract_line -- prefix match
    // -----------------------------------------------------------------------

    #[test]
    fn extract_prefix_match() {
        let reply = "AT+CPIN?\r\n+CPIN: READY\r\n\r\nOK\r\n";
        assert_eq!(extract_line(reply, Some("+CPIN")), "+CPIN: READY");
    }

    #[test]
    fn extract_prefix_trims_leading_spaces() {
        let reply = "   +CPIN: READY\r\nOK\r\n";
        assert_eq!(extract_line(reply, Some("+CPIN")), "+CPIN: READY");
    }

    #[test]
    fn extract_prefix_absent_returns_not_available() {
        let reply = "AT+CPIN?\r\nOK\r\n";
        assert_eq!(extract_line(reply, Some("+CPIN:")), NOT_AVAILABLE);
    }

    #[test]
    fn extract_first_of_multiple_matches() {
        let reply = "+CNUM: \"\",\"+8613812345678\",145\r\n+CNUM: \"\",\"+8613800000000\",145\r\n";
        assert_eq!(
            extract_line(reply, Some("+CNUM")),
            "+CNUM: \"\",\"+8613812345678\",145"
        );
    }

    // -----------------------------------------------------------------------
    // extract_line -- digit heuristic
    // -----------------------------------------------------------------------

    #[test]
    fn extract_digit_heuristic_finds_imei() {
        let reply = "AT+GSN\r\n867723051234567\r\n\r\nOK\r\n";
        assert_eq!(extract_line(reply, None), "867723051234567");
    }

    #[test]
    fn extract_digit_heuristic_ignores_short_numbers() {
        // 10 digits is not strictly more than 10.
        let reply = "1234567890\r\nOK\r\n";
        assert_eq!(extract_line(reply, None), NOT_AVAILABLE);
    }

    #[test]
    fn extract_digit_heuristic_boundary_eleven_digits() {
        let reply = "12345678901\r\nOK\r\n";
        assert_eq!(extract_line(reply, None), "12345678901");
    }

    #[test]
    fn extract_digit_heuristic_counts_digits_across_line() {
        // Digits interleaved with punctuation still count.
        let reply = "+CNUM: \"\",\"+8613812345678\",145\r\nOK\r\n";
        assert_eq!(
            extract_line(reply, None),
            "+CNUM: \"\",\"+8613812345678\",145"
        );
    }

    #[test]
    fn extract_digit_heuristic_misfires_on_unrelated_numeric_line() {
        // Documented fragility: any long numeric line qualifies, so an
        // unsolicited timestamp-style line wins over the identifier that
        // follows it.
        let reply = "20260806123456\r\n867723051234567\r\nOK\r\n";
        assert_eq!(extract_line(reply, None), "20260806123456");
    }

    #[test]
    fn extract_on_sentinel_returns_not_available() {
        assert_eq!(extract_line(NO_REPLY, None), NOT_AVAILABLE);
        assert_eq!(extract_line(NO_REPLY, Some("+CPIN")), NOT_AVAILABLE);
    }

    #[test]
    fn extract_on_empty_reply_returns_not_available() {
        assert_eq!(extract_line("", None), NOT_AVAILABLE);
        assert_eq!(extract_line("", Some("+CSQ")), NOT_AVAILABLE);
    }

    // -----------------------------------------------------------------------
    // parse_signal
    // -----------------------------------------------------------------------

    #[test]
    fn signal_basic_decode() {
        let sq = parse_signal("+CSQ: 14,0\r\nOK\r\n");
        assert_eq!(sq.rssi, 14);
        assert_eq!(sq.category, SignalCategory::Fair);
    }

    #[test]
    fn signal_without_ber_field() {
        let sq = parse_signal("+CSQ: 14\r\nOK\r\n");
        assert_eq!(sq.rssi, 14);
        assert_eq!(sq.category, SignalCategory::Fair);
    }

    #[test]
    fn signal_no_marker_is_invalid() {
        let sq = parse_signal("OK\r\n");
        assert_eq!(sq.rssi, -1);
        assert_eq!(sq.category, SignalCategory::Invalid);
    }

    #[test]
    fn signal_on_sentinel_is_invalid() {
        let sq = parse_signal(NO_REPLY);
        assert_eq!(sq.rssi, -1);
        assert_eq!(sq.category, SignalCategory::Invalid);
    }

    #[test]
    fn signal_threshold_boundaries() {
        // The category boundaries are inclusive upper bounds, evaluated in
        // order: <10 Poor, <15 Fair, <20 Moderate, <26 Good, else Excellent.
        let cases = [
            (0, SignalCategory::Poor),
            (9, SignalCategory::Poor),
            (10, SignalCategory::Fair),
            (14, SignalCategory::Fair),
            (15, SignalCategory::Moderate),
            (19, SignalCategory::Moderate),
            (20, SignalCategory::Good),
            (25, SignalCategory::Good),
            (26, SignalCategory::Excellent),
            (31, SignalCategory::Excellent),
            (99, SignalCategory::Unknown),
        ];
        for (rssi, expected) in cases {
            let reply = format!("+CSQ: {rssi},0\r\nOK\r\n");
            let sq = parse_signal(&reply);
            assert_eq!(sq.rssi, rssi, "level {rssi}");
            assert_eq!(sq.category, expected, "level {rssi}");
        }
    }

    #[test]
    fn signal_decoding_exhaustive_over_protocol_range() {
        // Every level the protocol can report maps to exactly one
        // non-sentinel category.
        for rssi in (0..=31).chain([99]) {
            let reply = format!("+CSQ: {rssi},0\r\n");
            let sq = parse_signal(&reply);
            assert_ne!(sq.category, SignalCategory::Invalid, "level {rssi}");
            assert_ne!(sq.category, SignalCategory::NotAvailable, "level {rssi}");
        }
    }

    // -----------------------------------------------------------------------
    // parse_registration
    // -----------------------------------------------------------------------

    #[test]
    fn registration_all_known_markers() {
        let cases = [
            ("+CREG: 0,0", RegistrationStatus::NotRegistered),
            ("+CREG: 0,1", RegistrationStatus::RegisteredHome),
            ("+CREG: 0,2", RegistrationStatus::Searching),
            ("+CREG: 0,3", RegistrationStatus::Denied),
            ("+CREG: 0,5", RegistrationStatus::RegisteredRoaming),
        ];
        for (marker, expected) in cases {
            let reply = format!("AT+CREG?\r\n{marker}\r\nOK\r\n");
            assert_eq!(parse_registration(&reply), expected, "{marker}");
        }
    }

    #[test]
    fn registration_unknown_marker_falls_back() {
        // Status 4 ("unknown" in the standard) is not in the marker table.
        assert_eq!(
            parse_registration("+CREG: 0,4\r\nOK\r\n"),
            RegistrationStatus::Unknown
        );
    }

    #[test]
    fn registration_on_sentinel_is_unknown() {
        assert_eq!(parse_registration(NO_REPLY), RegistrationStatus::Unknown);
    }

    #[test]
    fn registration_on_empty_reply_is_unknown() {
        assert_eq!(parse_registration(""), RegistrationStatus::Unknown);
    }
}
