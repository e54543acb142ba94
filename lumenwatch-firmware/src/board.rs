//! Board adapters
//!
//! Wraps embassy-rp peripherals in the `lumenwatch-hal` traits so the core
//! crate never sees a chip type.

use embassy_rp::gpio::Input;
use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

use lumenwatch_hal::{I2cBus, InputPin};

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// Panel did not acknowledge
    Nack,
    /// Overrun
    Overrun,
    /// Other error
    Other,
}

impl From<ErrorKind> for I2cBusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => I2cBusError::Bus,
            ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(_) => I2cBusError::Nack,
            ErrorKind::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

/// Any blocking embedded-hal I2C master as an [`I2cBus`]
pub struct BlockingBus<T> {
    inner: T,
}

impl<T: I2c> BlockingBus<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T: I2c> I2cBus for BlockingBus<T> {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.inner
            .write(address, data)
            .map_err(|e| I2cBusError::from(e.kind()))
    }
}

/// The comparator output of the light sensor
pub struct SensorLine {
    pin: Input<'static>,
}

impl SensorLine {
    pub fn new(pin: Input<'static>) -> Self {
        Self { pin }
    }

    /// Wait for the comparator to switch
    pub async fn wait_for_edge(&mut self) {
        self.pin.wait_for_rising_edge().await
    }
}

impl InputPin for SensorLine {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
