//! Task Watchdog Timer (TWDT) driver and loop pacing.
//!
//! Subscribes the main task to the ESP-IDF TWDT so a wedged tick resets the
//! device. [`Watchdog::end_tick`] feeds the dog and then sleeps for the
//! configured yield so the idle task (and the WiFi stack) get CPU time
//! between scheduler ticks.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::{
    ESP_OK, esp_task_wdt_add, esp_task_wdt_config_t, esp_task_wdt_reconfigure,
    esp_task_wdt_reset,
};

use log::{info, warn};

/// Reset the device if the loop stalls this long.
pub const WATCHDOG_TIMEOUT_MS: u32 = 5_000;

pub struct Watchdog {
    subscribed: bool,
    yield_ms: u32,
}

impl Watchdog {
    /// Reconfigure the TWDT and subscribe the calling task.
    ///
    /// Subscription failure is logged and tolerated: the loop still runs, it
    /// just is not guarded.
    pub fn new(yield_ms: u32) -> Self {
        #[cfg(target_os = "espidf")]
        {
            let cfg = esp_task_wdt_config_t {
                timeout_ms: WATCHDOG_TIMEOUT_MS,
                idle_core_mask: 0,
                trigger_panic: true,
            };
            // SAFETY: plain FFI calls on the current task handle (null).
            let ret = unsafe { esp_task_wdt_reconfigure(&cfg) };
            if ret != ESP_OK {
                warn!("Watchdog: reconfigure returned {} (may already be configured)", ret);
            }
            let ret = unsafe { esp_task_wdt_add(core::ptr::null_mut()) };
            let subscribed = ret == ESP_OK;
            if subscribed {
                info!("Watchdog: subscribed ({} ms timeout)", WATCHDOG_TIMEOUT_MS);
            } else {
                warn!("Watchdog: failed to subscribe ({})", ret);
            }
            Self {
                subscribed,
                yield_ms,
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            info!("Watchdog(sim): no-op, yield {} ms", yield_ms);
            Self {
                subscribed: false,
                yield_ms,
            }
        }
    }

    /// Feed the watchdog. Must be called at least every `WATCHDOG_TIMEOUT_MS`.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        if self.subscribed {
            // SAFETY: resets the TWDT entry of the subscribed current task.
            unsafe {
                esp_task_wdt_reset();
            }
        }
    }

    /// Feed, then give up the CPU for the configured yield.
    pub fn end_tick(&self) {
        self.feed();
        if self.yield_ms == 0 {
            return;
        }

        #[cfg(target_os = "espidf")]
        esp_idf_svc::hal::delay::FreeRtos::delay_ms(self.yield_ms);

        #[cfg(not(target_os = "espidf"))]
        std::thread::sleep(std::time::Duration::from_millis(u64::from(self.yield_ms)));
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn sim_watchdog_is_never_subscribed() {
        let dog = Watchdog::new(0);
        assert!(!dog.is_subscribed());
        dog.end_tick();
    }

    #[test]
    fn end_tick_yields_for_configured_time() {
        let dog = Watchdog::new(3);
        let start = std::time::Instant::now();
        dog.end_tick();
        assert!(start.elapsed() >= std::time::Duration::from_millis(3));
    }
}
