//! Mock adapters for integration tests.
//!
//! Every port gets a recording double so tests can script input and assert
//! on the full output history without touching UART, RMT, WiFi or sockets.

use std::collections::VecDeque;

use reddust_object::app::events::AppEvent;
use reddust_object::app::ports::{ByteSource, EventSink, LedSink, PacketSource, WifiProvider};
use reddust_object::colour::Rgb;
use reddust_object::error::TransportError;
use rosc::{OscMessage, OscPacket, OscType, encoder};

pub const OSC_ADDRESS: &str = "/red_dust/object_1";

// ── MockHardware (UART + pixel) ───────────────────────────────

pub struct MockHardware {
    rx: VecDeque<u8>,
    staged: Rgb,
    pub set_calls: usize,
    /// One entry per `show()`.
    pub frames: Vec<Rgb>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            rx: VecDeque::new(),
            staged: (0, 0, 0),
            set_calls: 0,
            frames: Vec::new(),
        }
    }

    pub fn inject(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }

    pub fn last_frame(&self) -> Option<Rgb> {
        self.frames.last().copied()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteSource for MockHardware {
    fn read_available(&mut self, buf: &mut [u8]) -> usize {
        let n = buf.len().min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        n
    }
}

impl LedSink for MockHardware {
    fn set_pixel(&mut self, colour: Rgb) {
        self.set_calls += 1;
        self.staged = colour;
    }

    fn show(&mut self) {
        self.frames.push(self.staged);
    }
}

// ── MockWifi ──────────────────────────────────────────────────

#[derive(Default)]
pub struct MockWifi {
    pub connected: bool,
    pub provisioning: bool,
    pub joins: u32,
}

impl WifiProvider for MockWifi {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn is_provisioning(&self) -> bool {
        self.provisioning
    }

    fn retry_join(&mut self) {
        self.joins += 1;
    }
}

// ── MockOsc ───────────────────────────────────────────────────

#[derive(Default)]
pub struct MockOsc {
    pub opens: Vec<u16>,
    pub fail_open: bool,
    pub queue: VecDeque<Vec<u8>>,
}

#[allow(dead_code)]
impl MockOsc {
    pub fn push_raw(&mut self, datagram: &[u8]) {
        self.queue.push_back(datagram.to_vec());
    }

    pub fn push_message(&mut self, addr: &str, args: Vec<OscType>) {
        let packet = OscPacket::Message(OscMessage {
            addr: addr.to_owned(),
            args,
        });
        self.queue.push_back(encoder::encode(&packet).unwrap());
    }

    pub fn push_float(&mut self, value: f32) {
        self.push_message(OSC_ADDRESS, vec![OscType::Float(value)]);
    }
}

impl PacketSource for MockOsc {
    fn open(&mut self, port: u16) -> Result<(), TransportError> {
        if self.fail_open {
            return Err(TransportError::BindFailed);
        }
        self.opens.push(port);
        Ok(())
    }

    fn recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TransportError> {
        let Some(datagram) = self.queue.pop_front() else {
            return Ok(None);
        };
        let n = datagram.len().min(buf.len());
        buf[..n].copy_from_slice(&datagram[..n]);
        Ok(Some(n))
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── Rig: scheduler plus one of each mock ──────────────────────

pub struct Rig {
    pub scheduler: reddust_object::scheduler::Scheduler,
    pub hw: MockHardware,
    pub wifi: MockWifi,
    pub osc: MockOsc,
    pub sink: RecordingSink,
}

#[allow(dead_code)]
impl Rig {
    pub fn new(config: &reddust_object::config::SystemConfig) -> Self {
        let mut sink = RecordingSink::new();
        let mut scheduler = reddust_object::scheduler::Scheduler::new(config);
        scheduler.start(&mut sink);
        Self {
            scheduler,
            hw: MockHardware::new(),
            wifi: MockWifi::default(),
            osc: MockOsc::default(),
            sink,
        }
    }

    /// Run one tick and return the frame it latched.
    pub fn tick(&mut self, now_ms: u64) -> Rgb {
        self.scheduler.tick(
            now_ms,
            &mut self.hw,
            &mut self.wifi,
            &mut self.osc,
            &mut self.sink,
        );
        self.hw.last_frame().unwrap()
    }

    /// Tick every `step_ms` over `[from, to]` and return the frames.
    pub fn run(&mut self, from: u64, to: u64, step_ms: u64) -> Vec<Rgb> {
        let mut frames = Vec::new();
        let mut t = from;
        while t <= to {
            frames.push(self.tick(t));
            t += step_ms;
        }
        frames
    }
}
