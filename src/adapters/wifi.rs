//! WiFi adapter.
//!
//! Implements [`WifiProvider`] — the hexagonal boundary for network
//! connectivity. The adapter only brings the radio up and reports status;
//! the join cadence lives in [`ConnectivityMonitor`](crate::connectivity).
//!
//! ## Modes
//!
//! | Config                       | Mode         | Reports                 |
//! |------------------------------|--------------|-------------------------|
//! | `wifi_enabled = false`       | Disabled     | never connected         |
//! | no SSID                      | AccessPoint  | provisioning            |
//! | SSID (+ optional passphrase) | Station      | associated + IP up      |
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver via `esp_idf_svc::wifi`.
//! - **all other targets**: a scriptable simulation for host-side tests.

use log::{info, warn};

use crate::app::ports::WifiProvider;
use crate::config::{SystemConfig, validate_password, validate_ssid};
use crate::error::HwInitError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::{
    eventloop::EspSystemEventLoop,
    hal::{modem::Modem, peripheral::Peripheral},
    nvs::EspDefaultNvsPartition,
    wifi::{AccessPointConfiguration, AuthMethod, ClientConfiguration, Configuration, EspWifi},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiMode {
    Disabled,
    AccessPoint,
    Station,
}

impl WifiMode {
    pub fn for_config(config: &SystemConfig) -> Self {
        if !config.wifi_enabled {
            Self::Disabled
        } else if config.needs_provisioning() {
            Self::AccessPoint
        } else {
            Self::Station
        }
    }
}

fn check_credentials(config: &SystemConfig) -> Result<(), HwInitError> {
    match WifiMode::for_config(config) {
        WifiMode::Disabled => Ok(()),
        WifiMode::AccessPoint if validate_ssid(&config.ap_name) => Ok(()),
        WifiMode::Station
            if validate_ssid(&config.wifi_ssid) && validate_password(&config.wifi_password) =>
        {
            Ok(())
        }
        _ => Err(HwInitError::Credentials),
    }
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    mode: WifiMode,
    #[cfg(target_os = "espidf")]
    wifi: Option<EspWifi<'static>>,
    #[cfg(not(target_os = "espidf"))]
    link_up: bool,
    #[cfg(not(target_os = "espidf"))]
    joins: u32,
}

impl WifiAdapter {
    /// Create the driver and start it in the mode the config implies.
    ///
    /// Station mode does not associate here; the first `retry_join` from the
    /// monitor does.
    #[cfg(target_os = "espidf")]
    pub fn new(
        modem: impl Peripheral<P = Modem> + 'static,
        sysloop: EspSystemEventLoop,
        nvs: Option<EspDefaultNvsPartition>,
        config: &SystemConfig,
    ) -> Result<Self, HwInitError> {
        check_credentials(config)?;
        let mode = WifiMode::for_config(config);
        if mode == WifiMode::Disabled {
            info!("WiFi: disabled by configuration");
            return Ok(Self { mode, wifi: None });
        }

        let wifi_err = |e: esp_idf_svc::sys::EspError| {
            log::error!("WiFi: driver error: {:?}", e);
            HwInitError::Wifi
        };
        let mut wifi = EspWifi::new(modem, sysloop, nvs).map_err(wifi_err)?;

        let configuration = match mode {
            WifiMode::AccessPoint => Configuration::AccessPoint(AccessPointConfiguration {
                ssid: config
                    .ap_name
                    .as_str()
                    .try_into()
                    .map_err(|_| HwInitError::Credentials)?,
                auth_method: AuthMethod::None,
                channel: 1,
                ..Default::default()
            }),
            _ => Configuration::Client(ClientConfiguration {
                ssid: config
                    .wifi_ssid
                    .as_str()
                    .try_into()
                    .map_err(|_| HwInitError::Credentials)?,
                password: config
                    .wifi_password
                    .as_str()
                    .try_into()
                    .map_err(|_| HwInitError::Credentials)?,
                auth_method: if config.wifi_password.is_empty() {
                    AuthMethod::None
                } else {
                    AuthMethod::WPA2Personal
                },
                ..Default::default()
            }),
        };
        wifi.set_configuration(&configuration).map_err(wifi_err)?;
        wifi.start().map_err(wifi_err)?;

        match mode {
            WifiMode::AccessPoint => info!("WiFi: access point '{}' up", config.ap_name),
            _ => info!("WiFi: station for '{}' started", config.wifi_ssid),
        }
        Ok(Self {
            mode,
            wifi: Some(wifi),
        })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(config: &SystemConfig) -> Result<Self, HwInitError> {
        check_credentials(config)?;
        let mode = WifiMode::for_config(config);
        info!("WiFi(sim): mode {:?}", mode);
        Ok(Self {
            mode,
            link_up: false,
            joins: 0,
        })
    }

    pub fn mode(&self) -> WifiMode {
        self.mode
    }

    // ── Simulation controls ───────────────────────────────────

    /// Force the simulated link state (association and IP).
    #[cfg(not(target_os = "espidf"))]
    pub fn set_link(&mut self, up: bool) {
        if self.mode == WifiMode::Disabled {
            return;
        }
        if up && self.mode == WifiMode::AccessPoint {
            // A portal hand-off ends with the device as a station.
            self.mode = WifiMode::Station;
        }
        self.link_up = up;
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn join_attempts(&self) -> u32 {
        self.joins
    }
}

// ───────────────────────────────────────────────────────────────
// WifiProvider
// ───────────────────────────────────────────────────────────────

impl WifiProvider for WifiAdapter {
    #[cfg(target_os = "espidf")]
    fn is_connected(&self) -> bool {
        if self.mode != WifiMode::Station {
            return false;
        }
        self.wifi.as_ref().is_some_and(|w| {
            w.is_connected().unwrap_or(false) && w.sta_netif().is_up().unwrap_or(false)
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn is_connected(&self) -> bool {
        self.mode == WifiMode::Station && self.link_up
    }

    fn is_provisioning(&self) -> bool {
        self.mode == WifiMode::AccessPoint
    }

    #[cfg(target_os = "espidf")]
    fn retry_join(&mut self) {
        if self.mode != WifiMode::Station {
            return;
        }
        let Some(wifi) = self.wifi.as_mut() else {
            return;
        };
        // Abort any half-finished association before starting over.
        let _ = wifi.disconnect();
        match wifi.connect() {
            Ok(()) => info!("WiFi: join requested"),
            Err(e) => warn!("WiFi: join request failed: {:?}", e),
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn retry_join(&mut self) {
        if self.mode != WifiMode::Station {
            warn!("WiFi(sim): join ignored in {:?}", self.mode);
            return;
        }
        self.joins += 1;
        info!("WiFi(sim): join requested (#{})", self.joins);
    }
}
