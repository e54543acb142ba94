//! Lumenwatch Hardware Abstraction Layer
//!
//! This crate defines the two hardware seams the core logic depends on.
//! Board crates (the RP2040 firmware, host test mocks) implement them so the
//! display protocol and the sensor reactor never touch a chip HAL directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  lumenwatch-core (display + reactor)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lumenwatch-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  firmware     │       │  host mocks   │
//! │  (embassy-rp) │       │  (cfg(test))  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - Blocking I2C writes to a peripheral address
//! - [`gpio::InputPin`] - Digital input level

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, Level};
pub use i2c::{I2cBus, I2cConfig};
