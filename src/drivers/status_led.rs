//! WS2812B status pixel driver.
//!
//! One addressable LED on the RMT peripheral. Colours are staged with
//! [`set_colour`](StatusLed::set_colour) and latched with
//! [`show`](StatusLed::show); the global brightness scale is applied on the
//! way out so callers always work with full-scale colours.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: `ws2812-esp32-rmt-driver` clocks the frame out (GRB order).
//! On host/test: the last latched frame is kept in memory.

use smart_leds::{RGB8, brightness};

use crate::colour::Rgb;
use crate::error::HwInitError;

#[cfg(target_os = "espidf")]
use esp_idf_hal::{gpio::AnyOutputPin, peripheral::Peripheral, rmt::RmtChannel};
#[cfg(target_os = "espidf")]
use smart_leds::SmartLedsWrite;
#[cfg(target_os = "espidf")]
use ws2812_esp32_rmt_driver::Ws2812Esp32Rmt;

pub struct StatusLed {
    staged: Rgb,
    level: u8,
    #[cfg(target_os = "espidf")]
    driver: Ws2812Esp32Rmt<'static>,
    #[cfg(not(target_os = "espidf"))]
    latched: Option<Rgb>,
    #[cfg(not(target_os = "espidf"))]
    frames: u32,
}

impl StatusLed {
    /// Claim `channel` and the data pin from [`crate::pins`].
    #[cfg(target_os = "espidf")]
    pub fn new<C: RmtChannel>(
        channel: impl Peripheral<P = C> + 'static,
        level: u8,
    ) -> Result<Self, HwInitError> {
        // SAFETY: the data pin is not claimed anywhere else.
        let pin = unsafe { AnyOutputPin::new(crate::pins::LED_DATA_GPIO) };
        let driver = Ws2812Esp32Rmt::new(channel, pin).map_err(|e| {
            log::error!("StatusLed: RMT init failed: {:?}", e);
            HwInitError::LedDriver
        })?;
        log::info!(
            "StatusLed: WS2812B on GPIO{} (brightness {})",
            crate::pins::LED_DATA_GPIO,
            level
        );
        Ok(Self {
            staged: (0, 0, 0),
            level,
            driver,
        })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(level: u8) -> Result<Self, HwInitError> {
        Ok(Self {
            staged: (0, 0, 0),
            level,
            latched: None,
            frames: 0,
        })
    }

    pub fn set_colour(&mut self, r: u8, g: u8, b: u8) {
        self.staged = (r, g, b);
    }

    /// Latch the staged colour. Transmission errors are logged, never fatal.
    pub fn show(&mut self) {
        let frame = self.scaled();

        #[cfg(target_os = "espidf")]
        {
            let (r, g, b) = frame;
            let pixels = [RGB8 { r, g, b }; crate::pins::LED_COUNT];
            if let Err(e) = self.driver.write(pixels.iter().copied()) {
                log::warn!("StatusLed: write failed: {:?}", e);
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            self.latched = Some(frame);
            self.frames = self.frames.wrapping_add(1);
        }
    }

    pub fn off(&mut self) {
        self.set_colour(0, 0, 0);
        self.show();
    }

    /// Staged colour at full scale.
    pub fn current_colour(&self) -> Rgb {
        self.staged
    }

    /// The staged colour after the brightness scale.
    fn scaled(&self) -> Rgb {
        let (r, g, b) = self.staged;
        brightness(core::iter::once(RGB8 { r, g, b }), self.level)
            .next()
            .map_or((0, 0, 0), |px| (px.r, px.g, px.b))
    }

    /// Last frame on the (simulated) wire.
    #[cfg(not(target_os = "espidf"))]
    pub fn latched(&self) -> Option<Rgb> {
        self.latched
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn frames_shown(&self) -> u32 {
        self.frames
    }
}
