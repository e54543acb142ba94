//! Configuration types
//!
//! Everything tunable about the panel, the sensor and the two responses.
//! The firmware embeds `lumenwatch.toml` and parses it with [`parse_config`];
//! the build script deserializes the same file through the `serde` feature.

pub mod toml;

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sensor::{Light, DEFAULT_DEBOUNCE_MS};
use crate::ssd1306::{font, DEFAULT_ADDRESS};

pub use self::toml::{parse_config, ParseError, ParseErrorKind};

/// Maximum length of any configured message
pub const MAX_MESSAGE_LEN: usize = 64;

/// Text rendered on the panel
pub type Message = String<MAX_MESSAGE_LEN>;

/// Build a message from a literal, truncating at a character boundary
pub fn message(text: &str) -> Message {
    let mut out = Message::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Panel configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DisplayConfig {
    /// 7-bit I2C address of the panel
    pub address: u8,
    /// I2C clock in Hz
    pub frequency: u32,
    /// Shown once at boot
    pub welcome: Message,
    /// Shown right before the panel is switched off
    pub farewell: Message,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            frequency: 400_000,
            welcome: message("WELCOME\nTO\nLUMENWATCH\n\n"),
            farewell: message("THANK YOU!!!"),
        }
    }
}

/// Sensor line configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SensorConfig {
    /// Minimum time between two accepted edges
    pub debounce_ms: u64,
    /// Line reads high when the room is dark
    pub dark_when_high: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            dark_when_high: true,
        }
    }
}

/// What the panel shows for one sensor state
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct Response {
    pub message: Message,
    /// Contrast programmed before the message is drawn
    pub brightness: u8,
}

/// The two-way business rule: one response per light state
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ResponseConfig {
    /// Dark room: bright panel so the notice is readable
    pub dark: Response,
    /// Light seen: dim panel so it does not give itself away
    pub light: Response,
}

impl ResponseConfig {
    pub fn for_light(&self, light: Light) -> &Response {
        match light {
            Light::Absent => &self.dark,
            Light::Present => &self.light,
        }
    }
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            dark: Response {
                message: message("No light detected.\n"),
                brightness: 149,
            },
            light: Response {
                message: message("Intruder detected.\n"),
                brightness: 3,
            },
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Config {
    pub display: DisplayConfig,
    pub sensor: SensorConfig,
    pub response: ResponseConfig,
}

/// Semantic configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Not a 7-bit address
    InvalidAddress(u8),
    /// Debounce window must be non-zero
    ZeroDebounce,
    /// A message contains characters the font cannot draw
    UnprintableMessage(MessageSlot),
}

/// Which configured message a [`ConfigError`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageSlot {
    Welcome,
    Farewell,
    Dark,
    Light,
}

impl Config {
    /// Check values the type system cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.address > 0x7F {
            return Err(ConfigError::InvalidAddress(self.display.address));
        }
        if self.sensor.debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce);
        }

        let messages = [
            (MessageSlot::Welcome, &self.display.welcome),
            (MessageSlot::Farewell, &self.display.farewell),
            (MessageSlot::Dark, &self.response.dark.message),
            (MessageSlot::Light, &self.response.light.message),
        ];
        for (slot, text) in messages {
            if !font::is_printable(text) {
                return Err(ConfigError::UnprintableMessage(slot));
            }
        }

        Ok(())
    }
}
