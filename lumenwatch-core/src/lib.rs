//! Board-agnostic core logic for the Lumenwatch light sensor display
//!
//! This crate contains everything that does not depend on a specific chip:
//!
//! - SSD1306 text-mode protocol driver (cursor tracking, glyph blitting)
//! - Sensor reactor (debounce, sampling, single-slot handoff)
//! - Deferred render worker (the sensor-to-display business rule)
//! - Boot/shutdown screens
//! - Configuration types and the embedded TOML parser

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod lifecycle;
pub mod sensor;
pub mod ssd1306;
pub mod worker;

#[cfg(test)]
mod testing;

pub use sensor::{EdgeOutcome, Light, Phase, SensorReactor, SensorSample};
pub use ssd1306::{DisplayError, DisplayState, Ssd1306};
pub use worker::RenderWorker;
