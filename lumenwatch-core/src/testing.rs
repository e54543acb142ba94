//! Host-side bus mocks shared by the unit tests

use std::vec::Vec;

use lumenwatch_hal::I2cBus;

use crate::ssd1306::cmd;

/// One recorded I2C transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Write {
    pub address: u8,
    pub bytes: Vec<u8>,
}

impl Write {
    pub fn command(c: u8) -> Self {
        Self {
            address: crate::ssd1306::DEFAULT_ADDRESS,
            bytes: [cmd::CONTROL_COMMAND, c].to_vec(),
        }
    }

    pub fn data(d: u8) -> Self {
        Self {
            address: crate::ssd1306::DEFAULT_ADDRESS,
            bytes: [cmd::CONTROL_DATA, d].to_vec(),
        }
    }

    pub fn is_data(&self) -> bool {
        self.bytes.first() == Some(&cmd::CONTROL_DATA)
    }

    pub fn expect_command(&self) -> u8 {
        assert_eq!(self.bytes.len(), 2);
        assert_eq!(self.bytes[0], cmd::CONTROL_COMMAND);
        self.bytes[1]
    }
}

/// Records every write, never fails
#[derive(Debug, Default)]
pub struct RecordingBus {
    pub writes: Vec<Write>,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload bytes of all data transactions, in order
    pub fn data_bytes(&self) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|w| w.is_data())
            .map(|w| w.bytes[1])
            .collect()
    }

    /// Commands that followed a contrast opcode
    pub fn contrast_values(&self) -> Vec<u8> {
        self.writes
            .windows(2)
            .filter(|pair| {
                !pair[0].is_data()
                    && pair[0].bytes[1] == cmd::SET_CONTRAST
                    && !pair[1].is_data()
            })
            .map(|pair| pair[1].bytes[1])
            .collect()
    }
}

impl I2cBus for RecordingBus {
    type Error = ();

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
        self.writes.push(Write {
            address,
            bytes: data.to_vec(),
        });
        Ok(())
    }
}

/// Accepts `ok` writes, then fails (every write after, or just the next one)
#[derive(Debug)]
pub struct FailingBus {
    pub ok: usize,
    pub attempts: usize,
    once: bool,
}

impl FailingBus {
    pub fn after(ok: usize) -> Self {
        Self {
            ok,
            attempts: 0,
            once: false,
        }
    }

    pub fn once_after(ok: usize) -> Self {
        Self {
            ok,
            attempts: 0,
            once: true,
        }
    }
}

impl I2cBus for FailingBus {
    type Error = ();

    fn write(&mut self, _address: u8, _data: &[u8]) -> Result<(), ()> {
        self.attempts += 1;
        let failing = if self.once {
            self.attempts == self.ok + 1
        } else {
            self.attempts > self.ok
        };
        if failing {
            Err(())
        } else {
            Ok(())
        }
    }
}
