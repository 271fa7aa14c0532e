// src/thermometer/scratchpad.rs

use core::fmt::Debug;

use crate::common::{crc::verify_crc8, error::OneWireError, Resolution};

/// The 9-byte thermometer scratchpad as returned by READ SCRATCHPAD.
///
/// | Byte | Content |
/// | ---- | ------- |
/// | 0-1  | Temperature, LSB first |
/// | 2-3  | TH / TL alarm registers (user bytes) |
/// | 4    | Configuration register (reserved on DS18S20) |
/// | 5    | Reserved |
/// | 6    | COUNT_REMAIN |
/// | 7    | COUNT_PER_C |
/// | 8    | CRC |
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Scratchpad([u8; Scratchpad::LEN]);

impl Scratchpad {
    pub const LEN: usize = 9;

    /// Validates bytes read from the bus.
    ///
    /// All zeros passes the CRC but means the line was held low, so it is rejected.
    pub fn parse<E: Debug>(bytes: [u8; Self::LEN]) -> Result<Self, OneWireError<E>> {
        if bytes == [0u8; Self::LEN] {
            return Err(OneWireError::InvalidResponse);
        }
        verify_crc8(&bytes)?;
        Ok(Scratchpad(bytes))
    }

    pub fn raw_temperature(&self) -> i16 {
        i16::from_le_bytes([self.0[0], self.0[1]])
    }

    pub fn alarm_high(&self) -> u8 {
        self.0[2]
    }

    pub fn alarm_low(&self) -> u8 {
        self.0[3]
    }

    pub fn config_register(&self) -> u8 {
        self.0[4]
    }

    pub fn count_remain(&self) -> u8 {
        self.0[6]
    }

    pub fn count_per_c(&self) -> u8 {
        self.0[7]
    }

    /// Bytes for WRITE SCRATCHPAD that keep the alarm registers and set `resolution`.
    pub fn with_resolution(&self, resolution: Resolution) -> [u8; 3] {
        [self.alarm_high(), self.alarm_low(), resolution.config_register()]
    }
}
