//! Diagnostic report types.
//!
//! A diagnostic run produces exactly one [`ModemReport`]. The record is
//! created with every field at its documented default and each field is
//! overwritten at most once by the step that measures it (the registration
//! field is overwritten per retry attempt; only the last attempt's value
//! survives). There is no partially-written state: a step that fails to
//! extract its field simply leaves the default in place.
//!
//! All types serialize with `serde` so the completed report can be rendered
//! as a JSON document by the caller.

use std::fmt;

use serde::Serialize;

/// Placeholder used when an extractor finds no qualifying line in a reply.
pub const NOT_AVAILABLE: &str = "N/A";

/// Outcome of the module restart step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RestartStatus {
    /// The restart command was acknowledged with `OK`.
    #[serde(rename = "OK")]
    Ok,
    /// No acknowledgement seen. Non-fatal: an unacknowledged reset does not
    /// necessarily mean the modem failed to reset, so the run continues.
    #[serde(rename = "Failed")]
    Failed,
}

impl fmt::Display for RestartStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestartStatus::Ok => write!(f, "OK"),
            RestartStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// Network registration state reported by the modem.
///
/// One variant per standard `+CREG` status code, plus [`Unknown`] as the
/// total fallback when the reply matches no known marker.
///
/// [`Unknown`]: RegistrationStatus::Unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegistrationStatus {
    /// Not registered and not currently searching (`+CREG: 0,0`).
    #[serde(rename = "Not Registered")]
    NotRegistered,
    /// Registered on the home network (`+CREG: 0,1`).
    #[serde(rename = "Registered (Home)")]
    RegisteredHome,
    /// Not registered, searching for a network (`+CREG: 0,2`).
    #[serde(rename = "Searching")]
    Searching,
    /// Registration denied by the network (`+CREG: 0,3`).
    #[serde(rename = "Denied")]
    Denied,
    /// Registered on a roaming network (`+CREG: 0,5`).
    #[serde(rename = "Registered (Roaming)")]
    RegisteredRoaming,
    /// The reply matched no known registration marker.
    #[serde(rename = "Unknown")]
    Unknown,
}

impl RegistrationStatus {
    /// Whether this status represents a usable network attachment
    /// (home or roaming). The registration retry loop exits as soon as
    /// this returns true.
    pub fn is_registered(&self) -> bool {
        matches!(
            self,
            RegistrationStatus::RegisteredHome | RegistrationStatus::RegisteredRoaming
        )
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RegistrationStatus::NotRegistered => "Not Registered",
            RegistrationStatus::RegisteredHome => "Registered (Home)",
            RegistrationStatus::Searching => "Searching",
            RegistrationStatus::Denied => "Denied",
            RegistrationStatus::RegisteredRoaming => "Registered (Roaming)",
            RegistrationStatus::Unknown => "Unknown",
        };
        write!(f, "{s}")
    }
}

/// Human-readable category for a received signal strength indication.
///
/// Mapped from the raw RSSI level via fixed inclusive-upper-bound
/// thresholds (see `simprobe-at`'s signal parser). `Unknown` is the
/// protocol's reserved value 99; `Invalid` means no signal-quality line was
/// found in the reply at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignalCategory {
    #[serde(rename = "Poor")]
    Poor,
    #[serde(rename = "Fair")]
    Fair,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Excellent")]
    Excellent,
    /// RSSI level 99: the modem cannot estimate signal strength.
    #[serde(rename = "Unknown")]
    Unknown,
    /// No signal-quality line found in the reply.
    #[serde(rename = "Invalid")]
    Invalid,
    /// The signal check has not run yet.
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SignalCategory::Poor => "Poor",
            SignalCategory::Fair => "Fair",
            SignalCategory::Moderate => "Moderate",
            SignalCategory::Good => "Good",
            SignalCategory::Excellent => "Excellent",
            SignalCategory::Unknown => "Unknown",
            SignalCategory::Invalid => "Invalid",
            SignalCategory::NotAvailable => "N/A",
        };
        write!(f, "{s}")
    }
}

/// A decoded signal-quality measurement: raw RSSI level plus its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignalQuality {
    /// Raw RSSI level (0-31, or 99 for unknown; -1 when no reading).
    pub rssi: i32,
    /// Category derived from the level.
    #[serde(rename = "description")]
    pub category: SignalCategory,
}

impl Default for SignalQuality {
    fn default() -> Self {
        SignalQuality {
            rssi: -1,
            category: SignalCategory::NotAvailable,
        }
    }
}

/// The accumulating record of one diagnostic run.
#[derive(Debug, Clone, Serialize)]
pub struct ModemReport {
    /// Outcome of the module restart step.
    #[serde(rename = "restart_module")]
    pub restart: RestartStatus,
    /// Device identifier (IMEI), or `"N/A"`.
    pub imei: String,
    /// Subscriber identifier (IMSI), or `"N/A"`.
    pub imsi: String,
    /// Subscriber phone number line, or `"N/A"`.
    pub sim_number: String,
    /// SIM PIN/lock status line, or the default.
    pub sim_pin_status: String,
    /// Network registration state from the last retry attempt.
    pub network_status: RegistrationStatus,
    /// Signal level and category from the final signal check.
    pub signal_quality: SignalQuality,
}

impl Default for ModemReport {
    fn default() -> Self {
        ModemReport {
            restart: RestartStatus::Failed,
            imei: NOT_AVAILABLE.to_string(),
            imsi: NOT_AVAILABLE.to_string(),
            sim_number: NOT_AVAILABLE.to_string(),
            sim_pin_status: "Unknown".to_string(),
            network_status: RegistrationStatus::Unknown,
            signal_quality: SignalQuality::default(),
        }
    }
}
