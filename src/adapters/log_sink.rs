//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger, which shares UART0 with the value stream: logs leave
//! on TX while samples arrive on RX. Every line carries a subsystem tag so a
//! console capture can be grepped per channel.

use log::{debug, error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::connectivity::ConnectivityEvent;

/// Adapter that logs every [`AppEvent`] to the console.
pub struct LogEventSink;

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started {
                policy,
                wifi_enabled,
            } => {
                info!("START | policy={:?} wifi={}", policy, wifi_enabled);
            }
            AppEvent::SerialSample { value, colour } => {
                debug!("SERIAL | value={:.6} rgb={:?}", value, colour);
            }
            AppEvent::SerialRejected(e) => {
                error!("SERIAL | line rejected: {}", e);
            }
            AppEvent::SerialOverflow => {
                warn!("SERIAL | line buffer overflow, cleared");
            }
            AppEvent::SerialStaleLine => {
                warn!("SERIAL | partial line timed out, cleared");
            }
            AppEvent::SerialActivity { active } => {
                info!("SERIAL | {}", if *active { "active" } else { "idle" });
            }
            AppEvent::OscListening { port } => {
                info!("OSC | listening on UDP {}", port);
            }
            AppEvent::OscListenFailed(e) => {
                error!("OSC | {}", e);
            }
            AppEvent::OscSample { value, colour } => {
                debug!("OSC | value={:.6} rgb={:?}", value, colour);
            }
            AppEvent::OscDiscarded(e) => {
                warn!("OSC | datagram discarded: {}", e);
            }
            AppEvent::Connectivity(c) => match c {
                ConnectivityEvent::ProvisioningStarted => {
                    info!("WIFI | configuration portal up");
                }
                ConnectivityEvent::JustConnected => info!("WIFI | connected"),
                ConnectivityEvent::JustDisconnected => warn!("WIFI | link lost"),
                ConnectivityEvent::JustReconnected => info!("WIFI | reconnected"),
                ConnectivityEvent::JoinAttempt { attempt } => {
                    info!("WIFI | join attempt {}", attempt);
                }
            },
            AppEvent::IndicationChanged { from, to } => {
                debug!("LED | {:?} -> {:?}", from, to);
            }
        }
    }
}
