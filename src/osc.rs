//! OSC value channel.
//!
//! Listens for one float at a single OSC address (default
//! `/red_dust/object_1`). Bundles are searched recursively; when several
//! messages match, the last one in packet order wins. Anything else is
//! discarded with a log line and never affects the pixel.

use heapless::String;
use log::debug;
use rosc::{OscPacket, OscType, decoder};

use crate::app::ports::PacketSource;
use crate::colour::{self, Rgb};
use crate::error::{Error, OscError, TransportError};

/// Largest datagram accepted; matches the usual Ethernet MTU payload.
pub const OSC_PACKET_CAPACITY: usize = 1536;

pub const OSC_ADDRESS_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscSample {
    pub value: f32,
    pub colour: Rgb,
}

pub struct OscChannel {
    address: String<OSC_ADDRESS_CAPACITY>,
    port: u16,
    listening: bool,
    colour: Option<Rgb>,
    buf: [u8; OSC_PACKET_CAPACITY],
}

impl OscChannel {
    pub fn new(address: &str, port: u16) -> Self {
        let mut owned = String::new();
        // Config validation bounds the address length.
        let _ = owned.push_str(address);
        Self {
            address: owned,
            port,
            listening: false,
            colour: None,
            buf: [0; OSC_PACKET_CAPACITY],
        }
    }

    /// (Re)bind the transport. Called on every link-up edge.
    pub fn listen(&mut self, transport: &mut impl PacketSource) -> Result<(), TransportError> {
        self.listening = false;
        transport.open(self.port)?;
        self.listening = true;
        Ok(())
    }

    /// Handle at most one pending datagram.
    pub fn poll(&mut self, transport: &mut impl PacketSource) -> Option<Result<OscSample, Error>> {
        if !self.listening {
            return None;
        }

        let len = match transport.recv(&mut self.buf) {
            Ok(Some(len)) => len.min(OSC_PACKET_CAPACITY),
            Ok(None) => return None,
            Err(e) => return Some(Err(e.into())),
        };

        let outcome = decode_value(&self.buf[..len], &self.address).map(|value| {
            let colour = colour::map_value_to_colour(value);
            self.colour = Some(colour);
            OscSample { value, colour }
        });
        Some(outcome.map_err(Error::from))
    }

    /// Colour of the last accepted message, if any arrived since boot.
    pub fn colour(&self) -> Option<Rgb> {
        self.colour
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

/// Extract the float addressed to `address` from a raw datagram.
pub fn decode_value(datagram: &[u8], address: &str) -> Result<f32, OscError> {
    let (_, packet) = decoder::decode_udp(datagram).map_err(|e| {
        debug!("OSC | decode failed: {:?}", e);
        OscError::Malformed
    })?;
    find_float(&packet, address)
}

fn find_float(packet: &OscPacket, address: &str) -> Result<f32, OscError> {
    match packet {
        OscPacket::Message(msg) if msg.addr == address => match msg.args.first() {
            Some(OscType::Float(v)) => Ok(*v),
            _ => Err(OscError::NotAFloat),
        },
        OscPacket::Message(_) => Err(OscError::AddressMismatch),
        OscPacket::Bundle(bundle) => {
            let mut result = Err(OscError::AddressMismatch);
            for inner in &bundle.content {
                match find_float(inner, address) {
                    Ok(v) => result = Ok(v),
                    Err(OscError::NotAFloat) if result.is_err() => result = Err(OscError::NotAFloat),
                    Err(_) => {}
                }
            }
            result
        }
    }
}
