//! Peripheral drivers and the pattern engine behind the status pixel.

pub mod console_uart;
pub mod led_patterns;
pub mod status_led;
pub mod watchdog;
