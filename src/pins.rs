//! GPIO / peripheral pin assignments for the RedDust object board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Status pixel (WS2812B, single LED)
// ---------------------------------------------------------------------------

/// WS2812B data line, driven by RMT channel 0.
pub const LED_DATA_GPIO: i32 = 38;
/// Number of pixels on the data line.
pub const LED_COUNT: usize = 1;

// ---------------------------------------------------------------------------
// Console UART (UART0) — value stream in, log lines out
// ---------------------------------------------------------------------------

/// UART0 TX on the ESP32-S3 DevKit header.
pub const UART_TX_GPIO: i32 = 43;
/// UART0 RX on the ESP32-S3 DevKit header.
pub const UART_RX_GPIO: i32 = 44;
