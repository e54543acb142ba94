//! Embedded configuration loading
//!
//! `lumenwatch.toml` is compiled into the image and already checked by the
//! build script. Parsing it again at boot keeps the device honest if the two
//! parsers ever drift; on any failure the built-in defaults are used.

use defmt::*;

use lumenwatch_core::config::{parse_config, Config};

/// Embedded default configuration (compiled into firmware)
/// Edit lumenwatch.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../lumenwatch.toml");

/// Parse and validate the embedded configuration
pub fn load() -> Config {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!(
                "lumenwatch.toml line {}: {}, using defaults",
                e.line, e.kind
            );
            return Config::default();
        }
    };

    match config.validate() {
        Ok(()) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Invalid configuration: {}, using defaults", e);
            Config::default()
        }
    }
}
