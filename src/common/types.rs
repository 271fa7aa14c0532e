// src/common/types.rs

use core::fmt;
use core::time::Duration;

use super::timing;

// --- Temperature ---

/// A temperature in fixed point, 1/10000 °C per unit.
///
/// Every resolution the supported thermometers report (1/16 °C and the
/// DS18S20 COUNT_REMAIN steps of 1/16 °C) is exact in this unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Temperature(i32);

impl Temperature {
    /// Units per degree Celsius.
    pub const SCALE: i32 = 10_000;

    pub const fn from_ten_thousandths(value: i32) -> Self {
        Self(value)
    }

    /// From a two's complement reading in 1/16 °C steps.
    pub const fn from_sixteenths(raw: i16) -> Self {
        Self(raw as i32 * (Self::SCALE / 16))
    }

    pub const fn as_ten_thousandths(&self) -> i32 {
        self.0
    }

    /// Rounds to hundredths of a degree, halves away from zero.
    pub const fn as_hundredths(&self) -> i32 {
        let step = Self::SCALE / 100;
        if self.0 >= 0 {
            self.0.saturating_add(step / 2) / step
        } else {
            self.0.saturating_sub(step / 2) / step
        }
    }
}

/// Formats with two decimals, e.g. `25.06` or `-10.13`.
impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hundredths = self.as_hundredths();
        let sign = if hundredths < 0 { "-" } else { "" };
        let abs = hundredths.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

// --- Resolution ---

/// Conversion resolution of the programmable-resolution thermometers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Resolution {
    Bits9,
    Bits10,
    Bits11,
    Bits12,
}

impl Resolution {
    /// Decodes the configuration register (`0 R1 R0 1 1 1 1 1`).
    pub fn from_config_register(config: u8) -> Self {
        match (config >> 5) & 0b11 {
            0b00 => Resolution::Bits9,
            0b01 => Resolution::Bits10,
            0b10 => Resolution::Bits11,
            _ => Resolution::Bits12,
        }
    }

    pub fn config_register(&self) -> u8 {
        let bits = match self {
            Resolution::Bits9 => 0b00,
            Resolution::Bits10 => 0b01,
            Resolution::Bits11 => 0b10,
            Resolution::Bits12 => 0b11,
        };
        (bits << 5) | 0b0001_1111
    }

    pub fn bits(&self) -> u8 {
        match self {
            Resolution::Bits9 => 9,
            Resolution::Bits10 => 10,
            Resolution::Bits11 => 11,
            Resolution::Bits12 => 12,
        }
    }

    /// Mask clearing the low bits the device leaves undefined at this resolution.
    pub fn raw_mask(&self) -> i16 {
        !((1i16 << (12 - self.bits())) - 1)
    }

    /// Maximum conversion time from the datasheet.
    pub fn conversion_time(&self) -> Duration {
        match self {
            Resolution::Bits9 => timing::CONVERSION_9_BIT,
            Resolution::Bits10 => timing::CONVERSION_10_BIT,
            Resolution::Bits11 => timing::CONVERSION_11_BIT,
            Resolution::Bits12 => timing::CONVERSION_12_BIT,
        }
    }
}

impl Default for Resolution {
    /// Power-on default of the DS18B20.
    fn default() -> Self {
        Resolution::Bits12
    }
}
