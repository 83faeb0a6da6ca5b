//! Compile-time configuration. Credentials can be overridden without
//! touching this file by creating `secrets.local.rs` (see `build.rs`).

use std::time::Duration;

// ── Network ─────────────────────────────────────────────────────────

pub const WIFI_SSID: &str = match option_env!("LOCAL_WIFI_SSID") {
    Some(v) => v,
    None => "YOUR_WIFI_SSID",
};
pub const WIFI_PASS: &str = match option_env!("LOCAL_WIFI_PASS") {
    Some(v) => v,
    None => "YOUR_WIFI_PASS",
};

pub const NTP_SERVER_1: &str = "pool.ntp.org";
pub const NTP_SERVER_2: &str = "time.nist.gov";

/// POSIX TZ string.
pub const TIMEZONE: &str = "MST7";

// ── Timeouts ────────────────────────────────────────────────────────

/// Wi-Fi association budget per cycle. Single attempt, no retry.
pub const WIFI_TIMEOUT: Duration = Duration::from_secs(10);
/// Poll interval while waiting for association.
pub const WIFI_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// SNTP sync budget per cycle.
pub const NTP_TIMEOUT: Duration = Duration::from_secs(10);
/// Poll interval while waiting for sync completion.
pub const NTP_POLL_INTERVAL: Duration = Duration::from_millis(250);

// ── Locale / units ──────────────────────────────────────────────────

/// Two-letter language code for label tables and date word order.
pub const LANG: &str = "en";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Metric,
    Imperial,
}

pub const UNITS: Units = Units::Imperial;

/// Location label shown in the header.
pub const LOCATION: &str = "Tucson, Arizona";

// ── Wake cadence ────────────────────────────────────────────────────

/// Minutes between scheduled wakes, aligned to the hour. Must divide 60
/// evenly for the alignment to be meaningful.
pub const SLEEP_CADENCE_MIN: u32 = 30;

// ── Panel ───────────────────────────────────────────────────────────

pub const DISP_WIDTH: u32 = 800;
pub const DISP_HEIGHT: u32 = 480;
