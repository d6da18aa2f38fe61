//! Unified error types for the RedDust object firmware.
//!
//! Every subsystem error converts into the top-level [`Error`] so the bring-up
//! path in `main` handles failures uniformly. Input errors are `Copy` because
//! they travel inside `AppEvent`s to the log sink on every rejected sample.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A serial line was rejected by the parser.
    Line(LineError),
    /// An OSC datagram was discarded.
    Osc(OscError),
    /// The UDP transport could not be opened or read.
    Transport(TransportError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// Peripheral initialisation failed.
    Init(HwInitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line(e) => write!(f, "serial: {e}"),
            Self::Osc(e) => write!(f, "osc: {e}"),
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Serial line errors
// ---------------------------------------------------------------------------

/// Why a complete serial line was not turned into a colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineError {
    /// The line has no `,` separating value and timestamp.
    MissingComma,
    /// Nothing precedes the comma, or the value field is blank.
    MissingValue,
    /// Nothing follows the comma.
    MissingTimestamp,
    /// The value field does not look like a number.
    NotNumeric,
    /// The value parsed to NaN or an infinity.
    NotFinite,
    /// The value lies outside [-1000, 1000].
    OutOfRange,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingComma => write!(f, "no comma delimiter"),
            Self::MissingValue => write!(f, "empty value field"),
            Self::MissingTimestamp => write!(f, "empty timestamp field"),
            Self::NotNumeric => write!(f, "value is not numeric"),
            Self::NotFinite => write!(f, "value is NaN or infinite"),
            Self::OutOfRange => write!(f, "value outside [-1000, 1000]"),
        }
    }
}

impl From<LineError> for Error {
    fn from(e: LineError) -> Self {
        Self::Line(e)
    }
}

// ---------------------------------------------------------------------------
// OSC errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscError {
    /// The datagram is not a valid OSC packet.
    Malformed,
    /// No message in the packet targets the configured address.
    AddressMismatch,
    /// The message at the configured address has no float first argument.
    NotAFloat,
}

impl fmt::Display for OscError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed packet"),
            Self::AddressMismatch => write!(f, "address not handled"),
            Self::NotAFloat => write!(f, "first argument is not a float"),
        }
    }
}

impl From<OscError> for Error {
    fn from(e: OscError) -> Self {
        Self::Osc(e)
    }
}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The UDP socket could not be bound to the listen port.
    BindFailed,
    /// The socket could not be switched to non-blocking mode.
    ConfigureFailed,
    /// A receive failed for a reason other than "nothing pending".
    ReceiveFailed,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BindFailed => write!(f, "UDP bind failed"),
            Self::ConfigureFailed => write!(f, "UDP socket configuration failed"),
            Self::ReceiveFailed => write!(f, "UDP receive failed"),
        }
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The JSON overlay could not be deserialised.
    Parse,
    /// A field is outside its accepted range; carries the field name.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "overlay is not valid JSON"),
            Self::ValidationFailed(field) => write!(f, "invalid value for '{field}'"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Hardware initialisation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    /// The RMT channel driving the status pixel failed to start.
    LedDriver,
    /// UART0 could not be configured.
    Uart,
    /// The WiFi driver could not be created or started.
    Wifi,
    /// Stored WiFi credentials failed validation.
    Credentials,
}

impl fmt::Display for HwInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LedDriver => write!(f, "status LED driver"),
            Self::Uart => write!(f, "UART"),
            Self::Wifi => write!(f, "WiFi driver"),
            Self::Credentials => write!(f, "WiFi credentials"),
        }
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}
