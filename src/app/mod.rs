//! Application boundary — events out, ports in.
//!
//! The domain components (serial and OSC channels, connectivity monitor,
//! presenter) never see hardware. Everything they consume or produce crosses
//! the **port traits** in [`ports`]; everything they report is an
//! [`events::AppEvent`].

pub mod events;
pub mod ports;
