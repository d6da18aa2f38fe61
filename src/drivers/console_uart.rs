//! Console UART driver — the serial value stream's receive side.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: UART0 through `esp_idf_hal::uart::UartDriver`, read with a
//! zero timeout so a drain never blocks the tick.
//! On host/test: an in-memory byte queue fed with [`ConsoleUart::inject`].

use crate::error::HwInitError;

#[cfg(target_os = "espidf")]
use esp_idf_hal::{
    delay::NON_BLOCK,
    gpio::{AnyIOPin, AnyInputPin, AnyOutputPin},
    peripheral::Peripheral,
    uart::{Uart, UartDriver, config::Config as UartConfig},
    units::Hertz,
};

#[cfg(not(target_os = "espidf"))]
use std::collections::VecDeque;

pub struct ConsoleUart {
    #[cfg(target_os = "espidf")]
    driver: UartDriver<'static>,
    #[cfg(not(target_os = "espidf"))]
    rx: VecDeque<u8>,
}

impl ConsoleUart {
    /// Claim `uart` with the TX/RX pins from [`crate::pins`] at `baud`.
    #[cfg(target_os = "espidf")]
    pub fn new<U: Uart>(
        uart: impl Peripheral<P = U> + 'static,
        baud: u32,
    ) -> Result<Self, HwInitError> {
        // SAFETY: UART0's pins are not claimed anywhere else.
        let tx = unsafe { AnyOutputPin::new(crate::pins::UART_TX_GPIO) };
        let rx = unsafe { AnyInputPin::new(crate::pins::UART_RX_GPIO) };
        let config = UartConfig::default().baudrate(Hertz(baud));
        let driver = UartDriver::new(
            uart,
            tx,
            rx,
            Option::<AnyIOPin>::None,
            Option::<AnyIOPin>::None,
            &config,
        )
        .map_err(|e| {
            log::error!("ConsoleUart: init failed: {:?}", e);
            HwInitError::Uart
        })?;
        log::info!("ConsoleUart: UART0 @ {} baud", baud);
        Ok(Self { driver })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(_baud: u32) -> Result<Self, HwInitError> {
        Ok(Self { rx: VecDeque::new() })
    }

    /// Non-blocking read; 0 when the RX FIFO is empty.
    #[cfg(target_os = "espidf")]
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        match self.driver.read(buf, NON_BLOCK) {
            Ok(n) => n,
            Err(e) => {
                log::warn!("ConsoleUart: read failed: {:?}", e);
                0
            }
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        let n = buf.len().min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        n
    }

    /// Queue bytes as if they had arrived on RX.
    #[cfg(not(target_os = "espidf"))]
    pub fn inject(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }
}
