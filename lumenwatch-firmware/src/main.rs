//! Lumenwatch - Light Sensor Display Firmware
//!
//! Main firmware binary for an RP2040 with an SSD1306 I2C OLED and a
//! light-dependent comparator on a GPIO line. Every debounced edge of the
//! sensor redraws the panel with the message configured for the new state.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use lumenwatch_core::{lifecycle, SensorReactor, Ssd1306};
use lumenwatch_hal::I2cConfig;

use crate::board::{BlockingBus, SensorLine};

mod board;
mod config;
mod tasks;

/// Reactor shared between the sensor and render tasks
pub type Reactor = SensorReactor<CriticalSectionRawMutex>;

/// The panel on I2C0
pub type Display = Ssd1306<BlockingBus<I2c<'static, I2C0, Blocking>>>;

// Must live forever: both tasks hold a reference
static REACTOR: StaticCell<Reactor> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Lumenwatch firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();

    // SSD1306 on I2C0: SDA = GPIO4, SCL = GPIO5
    let bus_config = I2cConfig::with_frequency(config.display.frequency);
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = bus_config.frequency;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    info!(
        "I2C initialized at {} Hz, panel at {=u8:#x}",
        bus_config.frequency, config.display.address
    );

    let mut display = Ssd1306::new(BlockingBus::new(i2c), config.display.address);
    match lifecycle::welcome(&mut display, &config.display.welcome) {
        Ok(()) => info!("Panel initialized"),
        // Keep going: every render re-initializes the panel
        Err(e) => warn!("Welcome screen failed: {}", e),
    }

    // Light sensor comparator on GPIO15, driven push-pull by the comparator
    let line = SensorLine::new(Input::new(p.PIN_15, Pull::None));

    let reactor: &'static Reactor = REACTOR.init(SensorReactor::from_config(&config.sensor));

    spawner.spawn(tasks::sensor_task(line, reactor)).unwrap();
    spawner
        .spawn(tasks::render_task(reactor, display, config.response))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
