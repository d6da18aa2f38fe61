//! Status pixel arbitration.
//!
//! Each tick the presenter folds the serial channel, the connectivity monitor
//! and the OSC channel into one [`Indication`], renders it through the
//! pattern engine and commits the result to the LED sink.
//!
//! ## Precedence (highest first)
//!
//! | # | Condition                                          | Pixel            |
//! |---|----------------------------------------------------|------------------|
//! | 1 | `IsolationRed`, serial never seen, WiFi not up     | solid red        |
//! | 2 | serial receiving                                   | serial colour    |
//! | 3 | serial seen but quiet                              | blink blue       |
//! | 4 | serial never seen, WiFi disabled                   | solid blue       |
//! | 5 | within 200 ms of a (re)connect / disconnect edge   | green / red      |
//! | 6 | provisioning portal up                             | blink blue       |
//! | 7 | joining / rejoining                                | blink yellow     |
//! | 8 | connected                                          | OSC colour/black |

use crate::app::ports::LedSink;
use crate::colour::{self, Rgb};
use crate::config::{ArbitrationPolicy, SystemConfig};
use crate::connectivity::{ConnectivityEvent, ConnectivityState};
use crate::drivers::led_patterns::{LedPatternEngine, PatternRequest};

/// What the pixel is currently telling the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indication {
    /// Serial never seen and the station is not connected.
    Isolated,
    /// Showing the colour of the live serial stream.
    SerialColour,
    /// Serial was seen but has gone quiet.
    SerialIdle,
    /// Nothing seen on serial and WiFi is disabled.
    AwaitingSerial,
    Provisioning,
    Connecting,
    Reconnecting,
    ConnectedFlash,
    DisconnectedFlash,
    /// Connected and showing the last OSC colour.
    OscColour,
    /// Connected, nothing to show.
    Dark,
}

/// Snapshot of everything the presenter arbitrates over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresenterInputs {
    pub serial_connected: bool,
    pub serial_receiving: bool,
    pub serial_colour: Rgb,
    pub connectivity: ConnectivityState,
    pub osc_colour: Option<Rgb>,
}

#[derive(Debug, Clone, Copy)]
struct Flash {
    indication: Indication,
    colour: Rgb,
    until_ms: u64,
}

pub struct LedPresenter {
    policy: ArbitrationPolicy,
    blink_half_ms: u32,
    flash_ms: u32,
    flash: Option<Flash>,
    engine: LedPatternEngine,
    last_tick_ms: Option<u64>,
    indication: Option<Indication>,
    output: Rgb,
}

impl LedPresenter {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            policy: config.policy,
            blink_half_ms: config.blink_interval_ms,
            flash_ms: config.flash_duration_ms,
            flash: None,
            engine: LedPatternEngine::new(),
            last_tick_ms: None,
            indication: None,
            output: colour::BLACK,
        }
    }

    /// Arm the edge flash for a connectivity event. Other events are ignored.
    pub fn notify(&mut self, event: ConnectivityEvent, now_ms: u64) {
        let (indication, colour) = match event {
            ConnectivityEvent::JustConnected | ConnectivityEvent::JustReconnected => {
                (Indication::ConnectedFlash, colour::GREEN)
            }
            ConnectivityEvent::JustDisconnected => (Indication::DisconnectedFlash, colour::RED),
            ConnectivityEvent::ProvisioningStarted | ConnectivityEvent::JoinAttempt { .. } => {
                return;
            }
        };
        self.flash = Some(Flash {
            indication,
            colour,
            until_ms: now_ms.saturating_add(u64::from(self.flash_ms)),
        });
    }

    /// Pure precedence decision for `now_ms`.
    pub fn decide(&self, now_ms: u64, inputs: &PresenterInputs) -> (Indication, PatternRequest) {
        let wifi_up = inputs.connectivity == ConnectivityState::Connected;

        if self.policy == ArbitrationPolicy::IsolationRed && !inputs.serial_connected && !wifi_up {
            return (Indication::Isolated, PatternRequest::solid(colour::RED));
        }
        if inputs.serial_receiving {
            return (
                Indication::SerialColour,
                PatternRequest::solid(inputs.serial_colour),
            );
        }
        if inputs.serial_connected {
            return (
                Indication::SerialIdle,
                PatternRequest::blink(colour::BLUE, self.blink_half_ms),
            );
        }
        if inputs.connectivity == ConnectivityState::NotSetUp {
            return (Indication::AwaitingSerial, PatternRequest::solid(colour::BLUE));
        }

        if let Some(flash) = self.flash.filter(|f| now_ms < f.until_ms) {
            return (flash.indication, PatternRequest::solid(flash.colour));
        }
        match inputs.connectivity {
            ConnectivityState::Provisioning => (
                Indication::Provisioning,
                PatternRequest::blink(colour::BLUE, self.blink_half_ms),
            ),
            ConnectivityState::Connecting => (
                Indication::Connecting,
                PatternRequest::blink(colour::YELLOW, self.blink_half_ms),
            ),
            ConnectivityState::Reconnecting => (
                Indication::Reconnecting,
                PatternRequest::blink(colour::YELLOW, self.blink_half_ms),
            ),
            ConnectivityState::Connected | ConnectivityState::NotSetUp => match inputs.osc_colour {
                Some(c) => (Indication::OscColour, PatternRequest::solid(c)),
                None => (Indication::Dark, PatternRequest::off()),
            },
        }
    }

    /// Decide, render and latch the pixel. Writes and shows exactly once.
    ///
    /// Returns the previous and new indication when it changed.
    pub fn commit(
        &mut self,
        now_ms: u64,
        inputs: &PresenterInputs,
        led: &mut impl LedSink,
    ) -> Option<(Option<Indication>, Indication)> {
        let delta = self
            .last_tick_ms
            .map_or(0, |last| now_ms.saturating_sub(last).min(u64::from(u32::MAX)) as u32);
        self.last_tick_ms = Some(now_ms);

        if self.flash.is_some_and(|f| now_ms >= f.until_ms) {
            self.flash = None;
        }

        let (indication, request) = self.decide(now_ms, inputs);
        self.output = self.engine.tick(request, delta);

        led.set_pixel(self.output);
        led.show();

        let previous = self.indication.replace(indication);
        (previous != Some(indication)).then_some((previous, indication))
    }

    pub fn indication(&self) -> Option<Indication> {
        self.indication
    }

    /// Colour written on the last commit.
    pub fn output(&self) -> Rgb {
        self.output
    }
}
