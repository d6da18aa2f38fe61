//! RedDust object firmware library.
//!
//! Exposes the pure-logic modules for integration testing and host-side
//! simulation. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod colour;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod osc;
pub mod pins;
pub mod presenter;
pub mod scheduler;
pub mod serial;

// Hardware-facing modules; the ESP-IDF implementations are guarded by cfg
// attributes inside, with simulation stubs on every other target.
pub mod adapters;
pub mod drivers;
