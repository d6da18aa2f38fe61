//! System configuration parameters
//!
//! All tunable parameters for the RedDust object. Defaults match the
//! installation; station credentials and an optional JSON overlay are baked
//! in at build time (`WIFI_SSID`, `WIFI_PASSWORD`, `REDDUST_CONFIG`).

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::osc::OSC_ADDRESS_CAPACITY;

pub const SSID_CAPACITY: usize = 32;
pub const PASSWORD_CAPACITY: usize = 64;

const BUILD_SSID: Option<&str> = option_env!("WIFI_SSID");
const BUILD_PASSWORD: Option<&str> = option_env!("WIFI_PASSWORD");
const BUILD_OVERLAY: Option<&str> = option_env!("REDDUST_CONFIG");

/// Which input wins when nothing is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArbitrationPolicy {
    /// Serial dominates; WiFi status shows only while serial was never seen.
    SerialFirst,
    /// As `SerialFirst`, but solid red while serial was never seen and the
    /// station is not connected (portal, joining and disabled included).
    IsolationRed,
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Inputs ---
    /// OSC address carrying the float value
    pub osc_address: String<OSC_ADDRESS_CAPACITY>,
    /// UDP listen port for OSC
    pub osc_port: u16,
    /// Console UART baud rate
    pub serial_baud: u32,

    // --- Arbitration ---
    pub policy: ArbitrationPolicy,

    // --- Serial staleness (milliseconds) ---
    /// Serial counts as "receiving" this long after the last byte
    pub receiving_timeout_ms: u32,
    /// A partial line is dropped after this much silence
    pub partial_line_timeout_ms: u32,
    /// Serial counts as "active" (and blocks OSC) this long after the last byte
    pub active_timeout_ms: u32,

    // --- WiFi ---
    pub wifi_enabled: bool,
    pub wifi_ssid: String<SSID_CAPACITY>,
    pub wifi_password: String<PASSWORD_CAPACITY>,
    /// Soft-AP name used while no station credentials exist
    pub ap_name: String<SSID_CAPACITY>,
    /// Minimum spacing between join attempts
    pub reconnect_interval_ms: u32,

    // --- LED ---
    /// Half period of every blink pattern
    pub blink_interval_ms: u32,
    /// Length of the connect / disconnect flash
    pub flash_duration_ms: u32,
    /// Global brightness scale (0-255)
    pub led_brightness: u8,

    // --- Timing ---
    /// Delay between scheduler ticks
    pub loop_yield_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            osc_address: bounded("/red_dust/object_1"),
            osc_port: 8000,
            serial_baud: 115_200,

            policy: ArbitrationPolicy::SerialFirst,

            receiving_timeout_ms: 100,
            partial_line_timeout_ms: 1000,
            active_timeout_ms: 2000,

            wifi_enabled: true,
            wifi_ssid: bounded(BUILD_SSID.unwrap_or("")),
            wifi_password: bounded(BUILD_PASSWORD.unwrap_or("")),
            ap_name: bounded("RedDust_Object"),
            reconnect_interval_ms: 10_000,

            blink_interval_ms: 1000,
            flash_duration_ms: 200,
            led_brightness: 100,

            loop_yield_ms: 1,
        }
    }
}

impl SystemConfig {
    /// Defaults, the build-time overlay if present, then validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config = match BUILD_OVERLAY {
            Some(json) => Self::from_json(json)?,
            None => {
                let config = Self::default();
                config.validate()?;
                config
            }
        };

        // An over-long credential would have been silently dropped by `bounded`.
        if BUILD_SSID.is_some_and(|s| !s.is_empty()) && config.wifi_ssid.is_empty() {
            return Err(ConfigError::ValidationFailed("wifi_ssid"));
        }
        Ok(config)
    }

    /// Parse a (possibly partial) JSON document over the defaults and validate.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-range values rather than clamping them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.osc_address.starts_with('/') {
            return Err(ConfigError::ValidationFailed("osc_address"));
        }
        if self.osc_port == 0 {
            return Err(ConfigError::ValidationFailed("osc_port"));
        }
        if self.serial_baud == 0 {
            return Err(ConfigError::ValidationFailed("serial_baud"));
        }
        if self.receiving_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed("receiving_timeout_ms"));
        }
        if self.partial_line_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed("partial_line_timeout_ms"));
        }
        if self.active_timeout_ms < self.receiving_timeout_ms {
            return Err(ConfigError::ValidationFailed("active_timeout_ms"));
        }
        if self.reconnect_interval_ms < 1000 {
            return Err(ConfigError::ValidationFailed("reconnect_interval_ms"));
        }
        if self.blink_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("blink_interval_ms"));
        }
        if self.flash_duration_ms == 0 || self.flash_duration_ms >= self.reconnect_interval_ms {
            return Err(ConfigError::ValidationFailed("flash_duration_ms"));
        }
        if self.loop_yield_ms > 100 {
            return Err(ConfigError::ValidationFailed("loop_yield_ms"));
        }
        if !self.wifi_ssid.is_empty() && !validate_ssid(&self.wifi_ssid) {
            return Err(ConfigError::ValidationFailed("wifi_ssid"));
        }
        if !validate_password(&self.wifi_password) {
            return Err(ConfigError::ValidationFailed("wifi_password"));
        }
        if !validate_ssid(&self.ap_name) {
            return Err(ConfigError::ValidationFailed("ap_name"));
        }
        Ok(())
    }

    /// No station credentials: the WiFi adapter starts its access point.
    pub fn needs_provisioning(&self) -> bool {
        self.wifi_enabled && self.wifi_ssid.is_empty()
    }
}

/// 1–32 printable ASCII bytes.
pub fn validate_ssid(ssid: &str) -> bool {
    (1..=SSID_CAPACITY).contains(&ssid.len()) && is_printable_ascii(ssid)
}

/// Open network (empty) or WPA2 passphrase of 8–64 printable bytes.
pub fn validate_password(password: &str) -> bool {
    password.is_empty()
        || ((8..=PASSWORD_CAPACITY).contains(&password.len()) && is_printable_ascii(password))
}

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn bounded<const N: usize>(s: &str) -> String<N> {
    String::try_from(s).unwrap_or_default()
}
