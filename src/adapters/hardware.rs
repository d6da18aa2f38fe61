//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the console UART and the status pixel, exposing them through
//! [`ByteSource`] and [`LedSink`]. This is the only module besides the WiFi
//! and UDP adapters that touches actual hardware. On non-espidf targets the
//! underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{ByteSource, LedSink};
use crate::colour::Rgb;
use crate::drivers::console_uart::ConsoleUart;
use crate::drivers::status_led::StatusLed;

/// Concrete adapter that combines all on-board hardware behind port traits.
pub struct HardwareAdapter {
    uart: ConsoleUart,
    led: StatusLed,
}

impl HardwareAdapter {
    pub fn new(uart: ConsoleUart, led: StatusLed) -> Self {
        Self { uart, led }
    }

    pub fn led(&self) -> &StatusLed {
        &self.led
    }

    pub fn uart_mut(&mut self) -> &mut ConsoleUart {
        &mut self.uart
    }
}

// ── ByteSource implementation ─────────────────────────────────

impl ByteSource for HardwareAdapter {
    fn read_available(&mut self, buf: &mut [u8]) -> usize {
        self.uart.read(buf)
    }
}

// ── LedSink implementation ────────────────────────────────────

impl LedSink for HardwareAdapter {
    fn set_pixel(&mut self, colour: Rgb) {
        let (r, g, b) = colour;
        self.led.set_colour(r, g, b);
    }

    fn show(&mut self) {
        self.led.show();
    }
}
