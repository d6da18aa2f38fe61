//! Tick scheduler — the hexagonal core.
//!
//! [`Scheduler`] owns every piece of runtime state: both input channels, the
//! connectivity monitor and the presenter. The main loop calls [`tick`] with
//! the current uptime; all I/O flows through port traits injected at the call
//! site, so a whole session can be replayed on the host with mock adapters.
//!
//! ```text
//!  WifiProvider ──▶ ┌───────────────────────────┐
//!  ByteSource   ──▶ │         Scheduler          │ ──▶ EventSink
//!  PacketSource ──▶ │ Connectivity · Serial · OSC │
//!                   │         Presenter          │ ──▶ LedSink
//!                   └───────────────────────────┘
//! ```
//!
//! Order within a tick is fixed: connectivity, serial, OSC (only while serial
//! is inactive and WiFi is connected), presenter. Nothing blocks.
//!
//! [`tick`]: Scheduler::tick

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::{ByteSource, EventSink, LedSink, PacketSource, WifiProvider};
use crate::config::{ArbitrationPolicy, SystemConfig};
use crate::connectivity::{ConnectivityEvent, ConnectivityMonitor, ConnectivityState};
use crate::osc::OscChannel;
use crate::presenter::{Indication, LedPresenter, PresenterInputs};
use crate::serial::{SerialChannel, SerialTiming};

// ───────────────────────────────────────────────────────────────
// Scheduler
// ───────────────────────────────────────────────────────────────

pub struct Scheduler {
    serial: SerialChannel,
    connectivity: ConnectivityMonitor,
    osc: OscChannel,
    presenter: LedPresenter,
    policy: ArbitrationPolicy,
    wifi_enabled: bool,
    serial_active: bool,
    tick_count: u64,
}

impl Scheduler {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            serial: SerialChannel::new(SerialTiming::from_config(config)),
            connectivity: ConnectivityMonitor::new(
                config.wifi_enabled,
                config.reconnect_interval_ms,
            ),
            osc: OscChannel::new(&config.osc_address, config.osc_port),
            presenter: LedPresenter::new(config),
            policy: config.policy,
            wifi_enabled: config.wifi_enabled,
            serial_active: false,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            policy: self.policy,
            wifi_enabled: self.wifi_enabled,
        });
        info!(
            "Scheduler started (policy={:?}, wifi={})",
            self.policy, self.wifi_enabled
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one cycle: connectivity → serial → OSC → pixel.
    ///
    /// The `hw` parameter satisfies **both** [`ByteSource`] and [`LedSink`]
    /// since the console UART and the pixel live on the same adapter.
    pub fn tick(
        &mut self,
        now_ms: u64,
        hw: &mut (impl ByteSource + LedSink),
        wifi: &mut impl WifiProvider,
        osc_io: &mut impl PacketSource,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        // 1. Connectivity edges; a link-up edge re-binds the OSC listener.
        for event in self.connectivity.poll(now_ms, wifi) {
            self.presenter.notify(event, now_ms);
            sink.emit(&AppEvent::Connectivity(event));
            if matches!(
                event,
                ConnectivityEvent::JustConnected | ConnectivityEvent::JustReconnected
            ) {
                self.listen_osc(osc_io, sink);
            }
        }

        // 2. Serial drain + parse
        let report = self.serial.poll(now_ms, hw);
        if report.overflowed {
            sink.emit(&AppEvent::SerialOverflow);
        }
        match report.line {
            Some(Ok(sample)) => sink.emit(&AppEvent::SerialSample {
                value: sample.value,
                colour: sample.colour,
            }),
            Some(Err(e)) => sink.emit(&AppEvent::SerialRejected(e)),
            None => {}
        }
        if report.stale_line_dropped {
            sink.emit(&AppEvent::SerialStaleLine);
        }

        let active = self.serial.is_active(now_ms);
        if active != self.serial_active {
            self.serial_active = active;
            sink.emit(&AppEvent::SerialActivity { active });
        }

        // 3. OSC, only while serial is quiet and the link is up
        if !active && self.connectivity.is_connected() {
            match self.osc.poll(osc_io) {
                Some(Ok(sample)) => sink.emit(&AppEvent::OscSample {
                    value: sample.value,
                    colour: sample.colour,
                }),
                Some(Err(e)) => sink.emit(&AppEvent::OscDiscarded(e)),
                None => {}
            }
        }

        // 4. Pixel
        let inputs = self.presenter_inputs(now_ms);
        if let Some((from, to)) = self.presenter.commit(now_ms, &inputs, hw) {
            sink.emit(&AppEvent::IndicationChanged { from, to });
        }
    }

    fn listen_osc(&mut self, osc_io: &mut impl PacketSource, sink: &mut impl EventSink) {
        match self.osc.listen(osc_io) {
            Ok(()) => sink.emit(&AppEvent::OscListening {
                port: self.osc.port(),
            }),
            Err(e) => sink.emit(&AppEvent::OscListenFailed(e)),
        }
    }

    fn presenter_inputs(&self, now_ms: u64) -> PresenterInputs {
        PresenterInputs {
            serial_connected: self.serial.is_connected(),
            serial_receiving: self.serial.is_receiving(now_ms),
            serial_colour: self.serial.colour(),
            connectivity: self.connectivity.state(),
            osc_colour: self.osc.colour(),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn connectivity_state(&self) -> ConnectivityState {
        self.connectivity.state()
    }

    pub fn indication(&self) -> Option<Indication> {
        self.presenter.indication()
    }

    pub fn serial(&self) -> &SerialChannel {
        &self.serial
    }

    pub fn osc(&self) -> &OscChannel {
        &self.osc
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
