//! Build script for lumenwatch-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates lumenwatch.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use lumenwatch_core::config::Config;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate lumenwatch.toml configuration at compile time
///
/// The firmware parses the same file at boot with the small no_std parser;
/// checking it here with the real TOML crate means a typo fails the build
/// instead of silently falling back to defaults on the device.
fn validate_config() {
    println!("cargo:rerun-if-changed=lumenwatch.toml");

    let config_path = Path::new("lumenwatch.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: lumenwatch.toml not found!                               ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds lumenwatch.toml at build time.              ║\n\
            ║  Please create one in the lumenwatch-firmware directory.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read lumenwatch.toml                           ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Syntax, unknown keys, value ranges and message lengths
    let config: Config = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid lumenwatch.toml                                  ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    // Semantic checks shared with the device
    if let Err(e) = config.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: lumenwatch.toml failed validation                        ║\n\
            ║                                                                  ║\n\
            ║  {:<64} ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format!("{:?}", e)
        );
    }

    // The on-device parser must agree with the TOML crate
    match lumenwatch_core::config::parse_config(&config_content) {
        Ok(parsed) if parsed == config => {}
        Ok(_) => panic!("lumenwatch.toml: on-device parser disagrees with the TOML crate"),
        Err(e) => panic!(
            "lumenwatch.toml: on-device parser rejects line {}: {:?}",
            e.line, e.kind
        ),
    }

    println!("cargo:warning=lumenwatch.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
