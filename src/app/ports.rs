//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Scheduler (domain)
//! ```
//!
//! Driven adapters (UART, status pixel, WiFi driver, UDP socket, event sinks)
//! implement these traits. The [`Scheduler`](crate::scheduler::Scheduler)
//! consumes them via generics, so the domain core never touches hardware
//! directly and every tick is reproducible on the host.
//!
//! Every port is non-blocking: a call returns whatever is available right now.

use crate::colour::Rgb;
use crate::error::TransportError;

// ───────────────────────────────────────────────────────────────
// Byte source port (driven adapter: console UART → domain)
// ───────────────────────────────────────────────────────────────

/// Raw serial input.
pub trait ByteSource {
    /// Copy pending bytes into `buf` and return how many were written.
    /// Returns 0 immediately when nothing is pending.
    fn read_available(&mut self, buf: &mut [u8]) -> usize;
}

// ───────────────────────────────────────────────────────────────
// LED sink port (driven adapter: domain → status pixel)
// ───────────────────────────────────────────────────────────────

/// Single addressable pixel.
pub trait LedSink {
    /// Stage the colour for the next [`show`](Self::show).
    fn set_pixel(&mut self, colour: Rgb);

    /// Latch the staged colour onto the wire.
    fn show(&mut self);
}

// ───────────────────────────────────────────────────────────────
// WiFi provider port (driven adapter: domain ↔ station / portal)
// ───────────────────────────────────────────────────────────────

/// Association status of the network stack.
///
/// Implementations own the radio and any captive portal; the domain only
/// samples status and asks for a join.
pub trait WifiProvider {
    /// Station is associated and has an address.
    fn is_connected(&self) -> bool;

    /// The access point / configuration portal is running.
    fn is_provisioning(&self) -> bool;

    /// Kick off a (re)join with the stored credentials. Must not block
    /// until association completes.
    fn retry_join(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Packet source port (driven adapter: UDP socket → domain)
// ───────────────────────────────────────────────────────────────

/// Datagram input for the OSC channel.
pub trait PacketSource {
    /// Bind (or re-bind) the listener to `port`, dropping any previous socket.
    fn open(&mut self, port: u16) -> Result<(), TransportError>;

    /// Receive one pending datagram into `buf`.
    /// `Ok(None)` when nothing is queued.
    fn recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TransportError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
