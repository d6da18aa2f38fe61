//! Outbound application events.
//!
//! The [`Scheduler`](crate::scheduler::Scheduler) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them; on the device they become log lines.

use crate::colour::Rgb;
use crate::config::ArbitrationPolicy;
use crate::connectivity::ConnectivityEvent;
use crate::error::{Error, LineError, TransportError};
use crate::presenter::Indication;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// The scheduler has started.
    Started {
        policy: ArbitrationPolicy,
        wifi_enabled: bool,
    },

    /// A serial line was accepted.
    SerialSample { value: f32, colour: Rgb },

    /// A complete serial line was rejected; the colour is unchanged.
    SerialRejected(LineError),

    /// The line accumulator overflowed and was reset.
    SerialOverflow,

    /// A partial line went stale and was discarded.
    SerialStaleLine,

    /// Serial traffic started or stopped gating the OSC channel.
    SerialActivity { active: bool },

    /// The UDP listener was (re)bound.
    OscListening { port: u16 },

    /// The UDP listener could not be bound.
    OscListenFailed(TransportError),

    /// An OSC float was accepted.
    OscSample { value: f32, colour: Rgb },

    /// A datagram was received but not used.
    OscDiscarded(Error),

    /// WiFi edge or join attempt.
    Connectivity(ConnectivityEvent),

    /// The pixel switched to a different indication.
    /// `from` is `None` on the first commit after boot.
    IndicationChanged {
        from: Option<Indication>,
        to: Indication,
    },
}
