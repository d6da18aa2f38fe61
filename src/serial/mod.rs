//! Serial value channel.
//!
//! Drains the console UART every tick, frames it into lines, parses the most
//! recent line and keeps the resulting colour. Liveness is derived on demand
//! from the time of the last byte:
//!
//! | Flag        | True while                          |
//! |-------------|-------------------------------------|
//! | `connected` | any byte was ever received (sticky) |
//! | `receiving` | last byte ≤ 100 ms ago              |
//! | `active`    | last byte ≤ 2000 ms ago             |
//!
//! A partial line that sees no new byte for 1000 ms is discarded.

pub mod framer;
pub mod parser;

use crate::app::ports::ByteSource;
use crate::colour::{self, Rgb};
use crate::config::SystemConfig;
use crate::error::LineError;

use framer::{Feed, LINE_CAPACITY, LineFramer};

const READ_CHUNK: usize = 64;

/// Staleness windows applied to `last_byte_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialTiming {
    pub receiving_ms: u32,
    pub partial_line_ms: u32,
    pub active_ms: u32,
}

impl SerialTiming {
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            receiving_ms: config.receiving_timeout_ms,
            partial_line_ms: config.partial_line_timeout_ms,
            active_ms: config.active_timeout_ms,
        }
    }
}

/// An accepted sample: the value as sent and the colour shown for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptedSample {
    pub value: f32,
    pub colour: Rgb,
}

/// Everything one `poll` observed, for the scheduler to report.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SerialPoll {
    pub bytes: usize,
    pub overflowed: bool,
    pub stale_line_dropped: bool,
    pub line: Option<Result<AcceptedSample, LineError>>,
}

pub struct SerialChannel {
    framer: LineFramer<LINE_CAPACITY>,
    timing: SerialTiming,
    last_byte_ms: Option<u64>,
    colour: Rgb,
}

impl SerialChannel {
    pub fn new(timing: SerialTiming) -> Self {
        Self {
            framer: LineFramer::new(),
            timing,
            last_byte_ms: None,
            colour: colour::BLACK,
        }
    }

    /// Drain `source`, then act on the newest complete line.
    pub fn poll(&mut self, now_ms: u64, source: &mut impl ByteSource) -> SerialPoll {
        let mut report = SerialPoll::default();
        let mut chunk = [0u8; READ_CHUNK];

        loop {
            let n = source.read_available(&mut chunk).min(READ_CHUNK);
            if n == 0 {
                break;
            }
            report.bytes += n;
            for &byte in &chunk[..n] {
                if self.framer.feed(byte) == Feed::Overflowed {
                    report.overflowed = true;
                }
            }
        }
        if report.bytes > 0 {
            self.last_byte_ms = Some(now_ms);
        }

        if let Some(line) = self.framer.extract_latest_complete() {
            report.line = Some(self.apply_line(&line, now_ms));
        }

        let partial_limit = u64::from(self.timing.partial_line_ms);
        if !self.framer.is_empty() && self.silent_for(now_ms) > partial_limit {
            self.framer.clear();
            report.stale_line_dropped = true;
        }

        report
    }

    fn apply_line(&mut self, line: &str, now_ms: u64) -> Result<AcceptedSample, LineError> {
        let sample = parser::parse_line(line)?;
        let colour = colour::map_value_to_colour(sample.value);
        self.colour = colour;
        self.last_byte_ms = Some(now_ms);
        Ok(AcceptedSample {
            value: sample.value,
            colour,
        })
    }

    fn silent_for(&self, now_ms: u64) -> u64 {
        self.last_byte_ms.map_or(u64::MAX, |t| now_ms.saturating_sub(t))
    }

    /// Any byte has ever arrived. Never reverts.
    pub fn is_connected(&self) -> bool {
        self.last_byte_ms.is_some()
    }

    pub fn is_receiving(&self, now_ms: u64) -> bool {
        self.is_connected() && self.silent_for(now_ms) <= u64::from(self.timing.receiving_ms)
    }

    pub fn is_active(&self, now_ms: u64) -> bool {
        self.is_connected() && self.silent_for(now_ms) <= u64::from(self.timing.active_ms)
    }

    /// Colour of the last accepted line, black until one arrives.
    pub fn colour(&self) -> Rgb {
        self.colour
    }

    pub fn pending_bytes(&self) -> usize {
        self.framer.len()
    }
}
