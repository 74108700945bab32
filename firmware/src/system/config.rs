//! Fixed Node Configuration
//!
//! Everything the node needs beyond its pin assignments (see
//! `system::resources`): network credentials, the collector endpoint, the
//! device identity and the task cadences.
//!
//! Credentials and the collector address are baked in at build time from
//! environment variables so they never live in the source tree:
//!
//! ```text
//! FLAMEWATCH_WIFI_SSID=mynet FLAMEWATCH_WIFI_PASS=secret \
//! FLAMEWATCH_COLLECTOR_IP=192.168.1.50 cargo build --release
//! ```
//!
//! With the variables unset the firmware still builds; the node then runs
//! sensing and annunciation only and logs that uploads are deferred.

use embassy_time::Duration;

/// Wireless network name, baked in at build time
pub const WIFI_SSID: &str = match option_env!("FLAMEWATCH_WIFI_SSID") {
    Some(ssid) => ssid,
    None => "",
};

/// Wireless network passphrase, baked in at build time
pub const WIFI_PASSWORD: &str = match option_env!("FLAMEWATCH_WIFI_PASS") {
    Some(password) => password,
    None => "",
};

/// Collector IPv4 address, baked in at build time
pub const COLLECTOR_IP: &str = match option_env!("FLAMEWATCH_COLLECTOR_IP") {
    Some(address) => address,
    None => "",
};

/// Collector TCP port
pub const COLLECTOR_PORT: u16 = 5000;

/// Device identifier reported in every payload
pub const DEVICE_ID: &str = "pico_01";

/// Time between sensor sampling cycles
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(1000);

/// Time between reporting cycles
pub const REPORT_INTERVAL: Duration = Duration::from_millis(5000);

/// Annunciator on/off phase while the alarm is active (~5 Hz pulse)
pub const ALARM_PULSE_INTERVAL: Duration = Duration::from_millis(100);

/// Annunciator re-check interval while the alarm is clear
pub const IDLE_RECHECK_INTERVAL: Duration = Duration::from_millis(1000);

/// How long startup waits for association and an address before moving on
pub const WIFI_JOIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Seed for the network stack's local port and TCP sequence randomization
pub const NET_STACK_SEED: u64 = 0x1c5f_9a70_23d4_8b16;
