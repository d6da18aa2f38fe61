//! WiFi connectivity monitor.
//!
//! Samples the WiFi provider once per tick and turns its level-triggered
//! status into edge events plus a join retry cadence.
//!
//! ```text
//!            ┌────────────── SettingUp ──────────────┐
//!   boot ──► │ Provisioning (AP)   Connecting (join) │ ── link up ──► Ready
//!            └───────────────────────────────────────┘
//!   Ready:  Connected ◄──── JustReconnected ──── Reconnecting
//!               └──────── JustDisconnected ────────►┘
//! ```
//!
//! Join attempts are rate limited: the first one after boot and the one on a
//! disconnect edge go out immediately, later ones every `retry_interval_ms`,
//! and the timer restarts on every attempt whether or not it succeeded.

use heapless::Vec;

use crate::app::ports::WifiProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Never associated since boot.
    SettingUp,
    /// Associated at least once.
    Ready,
}

/// User-facing connectivity state derived from the phase and last sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityState {
    /// WiFi is disabled in configuration.
    NotSetUp,
    /// The provider runs its access point / captive portal.
    Provisioning,
    /// First association in progress.
    Connecting,
    Connected,
    /// Link lost after having been up.
    Reconnecting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityEvent {
    ProvisioningStarted,
    JustConnected,
    JustDisconnected,
    JustReconnected,
    /// `retry_join` was issued; `attempt` counts since the last link-up.
    JoinAttempt { attempt: u32 },
}

/// At most one edge plus one join attempt per tick.
pub type ConnectivityEvents = Vec<ConnectivityEvent, 2>;

pub struct ConnectivityMonitor {
    enabled: bool,
    phase: Phase,
    connected: bool,
    provisioning: bool,
    retry_interval_ms: u64,
    last_attempt_ms: Option<u64>,
    attempts: u32,
}

impl ConnectivityMonitor {
    pub fn new(enabled: bool, retry_interval_ms: u32) -> Self {
        Self {
            enabled,
            phase: Phase::SettingUp,
            connected: false,
            provisioning: false,
            retry_interval_ms: u64::from(retry_interval_ms),
            last_attempt_ms: None,
            attempts: 0,
        }
    }

    /// Sample the provider and advance the state machine.
    pub fn poll(&mut self, now_ms: u64, wifi: &mut impl WifiProvider) -> ConnectivityEvents {
        let mut events = ConnectivityEvents::new();
        if !self.enabled {
            return events;
        }

        let link_up = wifi.is_connected();
        match self.phase {
            Phase::SettingUp => {
                let provisioning = wifi.is_provisioning();
                if provisioning && !self.provisioning {
                    push(&mut events, ConnectivityEvent::ProvisioningStarted);
                }
                self.provisioning = provisioning;

                if link_up {
                    self.phase = Phase::Ready;
                    self.provisioning = false;
                    self.mark_up();
                    push(&mut events, ConnectivityEvent::JustConnected);
                } else if !provisioning {
                    self.maybe_retry(now_ms, wifi, &mut events);
                }
            }
            Phase::Ready => match (self.connected, link_up) {
                (true, false) => {
                    self.connected = false;
                    self.last_attempt_ms = None;
                    push(&mut events, ConnectivityEvent::JustDisconnected);
                    self.maybe_retry(now_ms, wifi, &mut events);
                }
                (false, true) => {
                    self.mark_up();
                    push(&mut events, ConnectivityEvent::JustReconnected);
                }
                (false, false) => self.maybe_retry(now_ms, wifi, &mut events),
                (true, true) => {}
            },
        }

        events
    }

    fn mark_up(&mut self) {
        self.connected = true;
        self.last_attempt_ms = None;
        self.attempts = 0;
    }

    fn maybe_retry(
        &mut self,
        now_ms: u64,
        wifi: &mut impl WifiProvider,
        events: &mut ConnectivityEvents,
    ) {
        let due = self
            .last_attempt_ms
            .is_none_or(|last| now_ms.saturating_sub(last) >= self.retry_interval_ms);
        if !due {
            return;
        }

        self.last_attempt_ms = Some(now_ms);
        self.attempts = self.attempts.saturating_add(1);
        wifi.retry_join();
        push(
            events,
            ConnectivityEvent::JoinAttempt {
                attempt: self.attempts,
            },
        );
    }

    pub fn state(&self) -> ConnectivityState {
        if !self.enabled {
            return ConnectivityState::NotSetUp;
        }
        match (self.phase, self.connected) {
            (Phase::SettingUp, _) if self.provisioning => ConnectivityState::Provisioning,
            (Phase::SettingUp, _) => ConnectivityState::Connecting,
            (Phase::Ready, true) => ConnectivityState::Connected,
            (Phase::Ready, false) => ConnectivityState::Reconnecting,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn is_setup_complete(&self) -> bool {
        self.phase == Phase::Ready
    }

    pub fn is_provisioning(&self) -> bool {
        self.state() == ConnectivityState::Provisioning
    }
}

fn push(events: &mut ConnectivityEvents, event: ConnectivityEvent) {
    // Capacity covers the worst case of one edge and one attempt.
    let _ = events.push(event);
}
