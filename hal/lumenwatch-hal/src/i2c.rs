//! I2C bus abstractions
//!
//! Provides the blocking master-write primitive the panel driver is built on.

/// I2C bus master
///
/// The only I/O primitive the display driver needs: send a byte sequence to
/// a fixed 7-bit address and report whether the transfer completed.
/// Implementations block until the transfer is done. Start/stop conditions,
/// address framing and ACK handling belong to the implementation.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, address, data)
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::FAST
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz), what SSD1306 breakout boards are rated for
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Build a config from a raw frequency, clamped to what the panel accepts
    pub fn with_frequency(frequency: u32) -> Self {
        Self {
            frequency: frequency.clamp(Self::STANDARD.frequency, Self::FAST.frequency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        writes: usize,
    }

    impl I2cBus for Counter {
        type Error = ();

        fn write(&mut self, _address: u8, _data: &[u8]) -> Result<(), ()> {
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_default_is_fast_mode() {
        assert_eq!(I2cConfig::default(), I2cConfig::FAST);
    }

    #[test]
    fn test_frequency_clamped() {
        assert_eq!(I2cConfig::with_frequency(1_000_000).frequency, 400_000);
        assert_eq!(I2cConfig::with_frequency(10_000).frequency, 100_000);
        assert_eq!(I2cConfig::with_frequency(250_000).frequency, 250_000);
    }

    #[test]
    fn test_mut_ref_forwards() {
        let mut bus = Counter { writes: 0 };
        {
            let mut by_ref = &mut bus;
            by_ref.write(0x3C, &[0x00, 0xAF]).unwrap();
            by_ref.write(0x3C, &[0x40, 0x00]).unwrap();
        }
        assert_eq!(bus.writes, 2);
    }
}
