//! UDP packet source adapter.
//!
//! Implements [`PacketSource`] on a non-blocking `std::net::UdpSocket`. The
//! ESP-IDF lwIP stack backs `std::net` on the device, so the same code runs
//! on target and host. `open` drops any previous socket before binding, which
//! is what a link-up edge needs after the station got a fresh address.

use std::io::ErrorKind;
use std::net::{Ipv4Addr, SocketAddr, UdpSocket};

use log::{info, warn};

use crate::app::ports::PacketSource;
use crate::error::TransportError;

pub struct UdpPacketSource {
    socket: Option<UdpSocket>,
}

impl Default for UdpPacketSource {
    fn default() -> Self {
        Self::new()
    }
}

impl UdpPacketSource {
    pub fn new() -> Self {
        Self { socket: None }
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.socket.as_ref().and_then(|s| s.local_addr().ok())
    }
}

impl PacketSource for UdpPacketSource {
    fn open(&mut self, port: u16) -> Result<(), TransportError> {
        self.socket = None;

        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, port)).map_err(|e| {
            warn!("UDP: bind to port {} failed: {}", port, e);
            TransportError::BindFailed
        })?;
        socket.set_nonblocking(true).map_err(|e| {
            warn!("UDP: set_nonblocking failed: {}", e);
            TransportError::ConfigureFailed
        })?;

        info!("UDP: bound {:?}", socket.local_addr().ok());
        self.socket = Some(socket);
        Ok(())
    }

    fn recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TransportError> {
        let Some(socket) = self.socket.as_ref() else {
            return Ok(None);
        };
        match socket.recv_from(buf) {
            Ok((n, _peer)) => Ok(Some(n)),
            Err(e) if e.kind() == ErrorKind::WouldBlock => Ok(None),
            Err(e) => {
                warn!("UDP: recv failed: {}", e);
                Err(TransportError::ReceiveFailed)
            }
        }
    }
}
