//! RedDust Object Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single cooperative tick loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter     WifiAdapter     UdpPacketSource           │
//! │  (ByteSource+Led)    (WifiProvider)  (PacketSource)            │
//! │  LogEventSink        Esp32TimeAdapter                          │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │                Scheduler (pure logic)                  │    │
//! │  │  Connectivity · Serial · OSC · Presenter               │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Watchdog (feed + yield between ticks)                         │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;

use reddust_object::adapters::hardware::HardwareAdapter;
use reddust_object::adapters::log_sink::LogEventSink;
use reddust_object::adapters::time::Esp32TimeAdapter;
use reddust_object::adapters::udp::UdpPacketSource;
use reddust_object::adapters::wifi::WifiAdapter;
use reddust_object::config::SystemConfig;
use reddust_object::drivers::console_uart::ConsoleUart;
use reddust_object::drivers::status_led::StatusLed;
use reddust_object::drivers::watchdog::Watchdog;
use reddust_object::error::Error;
use reddust_object::scheduler::Scheduler;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  RedDust Object v{}               ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::load().map_err(Error::from)?;
    info!(
        "Config: osc={}:{} baud={} policy={:?}",
        config.osc_address, config.osc_port, config.serial_baud, config.policy
    );

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let led = StatusLed::new(peripherals.rmt.channel0, config.led_brightness)
        .map_err(Error::from)?;
    let uart = ConsoleUart::new(peripherals.uart0, config.serial_baud).map_err(Error::from)?;
    let mut hw = HardwareAdapter::new(uart, led);

    let mut wifi = WifiAdapter::new(peripherals.modem, sysloop, Some(nvs), &config)
        .map_err(Error::from)?;
    let mut osc_io = UdpPacketSource::new();
    let mut log_sink = LogEventSink::new();
    let clock = Esp32TimeAdapter::new();
    let watchdog = Watchdog::new(config.loop_yield_ms);

    // ── 4. Tick loop ──────────────────────────────────────────
    let mut scheduler = Scheduler::new(&config);
    scheduler.start(&mut log_sink);

    loop {
        scheduler.tick(
            clock.uptime_ms(),
            &mut hw,
            &mut wifi,
            &mut osc_io,
            &mut log_sink,
        );
        watchdog.end_tick();
    }
}
