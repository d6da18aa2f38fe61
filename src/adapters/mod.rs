//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                     |
//! |------------|---------------|---------------------------------|
//! | `hardware` | ByteSource    | UART0 (console, value stream)   |
//! |            | LedSink       | WS2812B pixel on RMT            |
//! | `log_sink` | EventSink     | ESP-IDF log output              |
//! | `time`     | —             | ESP32 system timer              |
//! | `udp`      | PacketSource  | lwIP UDP socket (OSC)           |
//! | `wifi`     | WifiProvider  | ESP-IDF WiFi STA / soft-AP      |

pub mod hardware;
pub mod log_sink;
pub mod time;
pub mod udp;
pub mod wifi;
